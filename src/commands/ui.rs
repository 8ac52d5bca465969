//! Interactive screen: the status line, its controls, and the edit dialog.
//!
//! Terminal events are read on the main thread and turned into
//! [`UiCommand`]s, which are applied to the presenter one at a time. Event
//! mapping, hit testing and command application are plain functions so the
//! flow is testable without a terminal.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{Write, stdout};

use crate::constants::EXIT_FAILURE;
use crate::logger::QuietGuard;
use crate::presenter::{ClickTarget, ModalState, Presenter};
use crate::state::SlotStorage;
use crate::utils::TerminalGuard;

const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 7;
const ALERT_WIDTH: u16 = 44;
const ALERT_HEIGHT: u16 = 5;

/// A screen region in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Centered rectangle, clamped to the screen.
    fn centered(cols: u16, rows: u16, width: u16, height: u16) -> Self {
        let width = width.min(cols);
        let height = height.min(rows);
        Self {
            x: (cols - width) / 2,
            y: (rows - height) / 2,
            width,
            height,
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && col < self.x.saturating_add(self.width)
            && row < self.y.saturating_add(self.height)
    }
}

/// Where the edit dialog sits on a `cols` x `rows` screen.
///
/// At least one backdrop cell stays free on every side so a click can always
/// dismiss it, however small the terminal.
pub fn dialog_rect(cols: u16, rows: u16) -> Rect {
    let inner = Rect::centered(
        cols.saturating_sub(2),
        rows.saturating_sub(2),
        DIALOG_WIDTH,
        DIALOG_HEIGHT,
    );
    Rect {
        x: inner.x + 1,
        y: inner.y + 1,
        ..inner
    }
}

/// A click inside the dialog hits the dialog; anything else is backdrop.
pub fn classify_click(dialog: Rect, col: u16, row: u16) -> ClickTarget {
    if dialog.contains(col, row) {
        ClickTarget::Dialog
    } else {
        ClickTarget::Backdrop
    }
}

/// User intent decoded from a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Lock,
    OpenEdit,
    Save,
    Cancel,
    Click { col: u16, row: u16 },
    Type(char),
    Backspace,
    ClearInput,
    DismissAlert,
    Quit,
}

/// Decode a terminal event for the current screen state.
pub fn map_event(event: &Event, modal_open: bool, alert_pending: bool) -> Option<UiCommand> {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return None;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl && key.code == KeyCode::Char('c') {
                return Some(UiCommand::Quit);
            }
            // The notice blocks everything until acknowledged
            if alert_pending {
                return Some(UiCommand::DismissAlert);
            }

            if modal_open {
                match key.code {
                    KeyCode::Enter => Some(UiCommand::Save),
                    KeyCode::Esc => Some(UiCommand::Cancel),
                    KeyCode::Backspace => Some(UiCommand::Backspace),
                    KeyCode::Char('u') if ctrl => Some(UiCommand::ClearInput),
                    KeyCode::Char(c) if !ctrl => Some(UiCommand::Type(c)),
                    _ => None,
                }
            } else {
                match key.code {
                    KeyCode::Char('l') => Some(UiCommand::Lock),
                    KeyCode::Char('e') => Some(UiCommand::OpenEdit),
                    KeyCode::Char('q') | KeyCode::Esc => Some(UiCommand::Quit),
                    _ => None,
                }
            }
        }
        Event::Mouse(mouse) if modal_open && !alert_pending => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(UiCommand::Click {
                col: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Apply one command. Returns `false` when the screen should close.
pub fn apply<S: SlotStorage>(
    presenter: &mut Presenter<S>,
    command: UiCommand,
    cols: u16,
    rows: u16,
) -> Result<bool> {
    match command {
        UiCommand::Lock => {
            presenter.handle_lock()?;
        }
        UiCommand::OpenEdit => {
            // The control is hidden without a record
            if presenter.display().has_record() {
                presenter.handle_edit_open()?;
            }
        }
        UiCommand::Save => {
            if let Some(form) = presenter.edit_form_mut() {
                let input = form.input().to_string();
                presenter.handle_save(&input)?;
            }
        }
        UiCommand::Cancel => presenter.handle_cancel(),
        UiCommand::Click { col, row } => {
            presenter.handle_outside_click(classify_click(dialog_rect(cols, rows), col, row));
        }
        UiCommand::Type(c) => {
            if let Some(form) = presenter.edit_form_mut() {
                form.push(c);
            }
        }
        UiCommand::Backspace => {
            if let Some(form) = presenter.edit_form_mut() {
                form.pop();
            }
        }
        UiCommand::ClearInput => {
            if let Some(form) = presenter.edit_form_mut() {
                form.clear();
            }
        }
        UiCommand::DismissAlert => {
            presenter.take_alert();
        }
        UiCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Run the interactive screen until the user quits.
///
/// # Arguments
/// * `debug_enabled` - Log config and storage details before the screen opens
/// * `open_edit` - Start with the edit dialog open
pub fn run_interactive(debug_enabled: bool, open_edit: bool) -> Result<()> {
    let (config, mut presenter) = super::open_presenter(debug_enabled)?;

    if open_edit && !presenter.handle_edit_open()? {
        log_version!();
        log_error_exit!("Nothing recorded yet, so there is nothing to edit");
        log_indented!("Run 'lockcheck lock' first");
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }

    {
        // Dropped in reverse: the terminal is restored before logging resumes
        let _quiet = QuietGuard::new();
        let _term = TerminalGuard::new(config.mouse_enabled())?;
        event_loop(&mut presenter, config.mouse_enabled())?;
    }

    log_version!();
    log_block_start!("{}", presenter.display().text);
    log_end!();
    Ok(())
}

fn event_loop<S: SlotStorage>(presenter: &mut Presenter<S>, mouse: bool) -> Result<()> {
    let mut out = stdout();
    let (mut cols, mut rows) = terminal::size()?;

    loop {
        render(&mut out, presenter, cols, rows, mouse)?;

        let event = event::read()?;
        if let Event::Resize(c, r) = event {
            cols = c;
            rows = r;
            continue;
        }

        let Some(command) = map_event(&event, presenter.is_modal_open(), presenter.alert().is_some())
        else {
            continue;
        };
        if !apply(presenter, command, cols, rows)? {
            return Ok(());
        }
    }
}

/// Draw the whole screen.
pub fn render<S: SlotStorage, W: Write>(
    out: &mut W,
    presenter: &Presenter<S>,
    cols: u16,
    rows: u16,
    mouse: bool,
) -> Result<()> {
    let display = presenter.display();

    queue!(out, Clear(ClearType::All))?;
    queue!(out, MoveTo(2, 1), Print("lockcheck"))?;
    queue!(out, MoveTo(2, 3), Print(&display.text))?;

    queue!(out, MoveTo(2, 5), Print("l  lock now"))?;
    let mut row = 6;
    if display.edit_visible {
        queue!(out, MoveTo(2, row), Print("e  edit"))?;
        row += 1;
    }
    queue!(out, MoveTo(2, row), Print("q  quit"))?;

    if let ModalState::Open(form) = presenter.modal() {
        let rect = dialog_rect(cols, rows);
        draw_box(out, rect, "Edit lock time")?;
        queue!(
            out,
            MoveTo(rect.x + 2, rect.y + 2),
            Print(format!("> {}_", form.input()))
        )?;
        queue!(
            out,
            MoveTo(rect.x + 2, rect.y + 4),
            Print("Enter save   Esc cancel")
        )?;
        if mouse {
            queue!(
                out,
                MoveTo(rect.x + 2, rect.y + 5),
                Print("Click outside to close")
            )?;
        }
    }

    if let Some(alert) = presenter.alert() {
        let rect = Rect::centered(cols, rows, ALERT_WIDTH, ALERT_HEIGHT);
        draw_box(out, rect, "Notice")?;
        queue!(out, MoveTo(rect.x + 2, rect.y + 2), Print(alert.message()))?;
        queue!(out, MoveTo(rect.x + 2, rect.y + 3), Print("Press any key"))?;
    }

    out.flush()?;
    Ok(())
}

/// Blank `rect` and draw a titled border around it.
fn draw_box<W: Write>(out: &mut W, rect: Rect, title: &str) -> Result<()> {
    if rect.width < 2 || rect.height < 2 {
        return Ok(());
    }
    let inner = usize::from(rect.width - 2);
    let right = rect.x + rect.width - 1;

    let mut top = format!("┌ {title} ");
    let used = title.chars().count() + 3;
    top.push_str(&"─".repeat(inner.saturating_sub(used - 1)));
    queue!(out, MoveTo(rect.x, rect.y), Print(top))?;
    queue!(out, MoveTo(right, rect.y), Print("┐"))?;

    for r in 1..rect.height - 1 {
        queue!(
            out,
            MoveTo(rect.x, rect.y + r),
            Print(format!("│{}", " ".repeat(inner)))
        )?;
        // Placed by column so wide characters inside cannot shift it
        queue!(out, MoveTo(right, rect.y + r), Print("│"))?;
    }

    queue!(
        out,
        MoveTo(rect.x, rect.y + rect.height - 1),
        Print(format!("└{}┘", "─".repeat(inner)))
    )?;
    Ok(())
}
