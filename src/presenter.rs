//! The presenter: user actions in, display and modal state out.
//!
//! Every user action maps to one `handle_*` method that runs to completion,
//! reads or writes the [`TimestampStore`], and leaves a fresh
//! [`DisplayState`] behind. Inputs are passed explicitly (`handle_save`
//! receives the raw form text) so the whole flow is testable without a
//! terminal.
//!
//! ## Modal state machine
//!
//! ```text
//!            handle_edit_open (record exists)
//!   Closed ─────────────────────────────────▶ Open
//!     ▲                                        │ │
//!     │ save ok / cancel / backdrop click      │ │ save rejected
//!     └────────────────────────────────────────┘ └──▶ Open
//! ```

use anyhow::Result;
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::constants::INVALID_DATETIME_MESSAGE;
use crate::state::{DisplayState, SlotStorage, TimestampStore, format_edit_input};
use crate::time_source::{InvalidDateTime, TimeSource, parse_edit_input};

/// Text buffer of the open edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    input: String,
}

impl EditForm {
    pub fn new(prefill: String) -> Self {
        Self { input: prefill }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

/// Visibility of the edit dialog. The form only exists while it is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(EditForm),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }
}

/// Where a click inside the modal layer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the dialog
    Backdrop,
    /// Anywhere on the dialog itself
    Dialog,
}

/// Blocking notices raised by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    InvalidDateTime,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::InvalidDateTime => INVALID_DATETIME_MESSAGE,
        }
    }
}

/// Result of [`Presenter::handle_save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Written to the store, dialog closed
    Saved(DateTime<Local>),
    /// Input was not a date-time; nothing changed
    Rejected(InvalidDateTime),
}

/// Mediates between the stored moment and everything the user sees.
pub struct Presenter<S: SlotStorage> {
    store: TimestampStore<S>,
    clock: Arc<dyn TimeSource>,
    display: DisplayState,
    modal: ModalState,
    alert: Option<Alert>,
    debug_enabled: bool,
}

impl<S: SlotStorage> Presenter<S> {
    /// Create a presenter and render the initial display.
    pub fn new(store: TimestampStore<S>, clock: Arc<dyn TimeSource>) -> Result<Self> {
        let mut presenter = Self {
            store,
            clock,
            display: DisplayState::no_record(),
            modal: ModalState::Closed,
            alert: None,
            debug_enabled: false,
        };
        presenter.refresh_display()?;
        Ok(presenter)
    }

    /// Log handler transitions with `log_debug!`.
    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    /// The open dialog's form, for the view to type into.
    pub fn edit_form_mut(&mut self) -> Option<&mut EditForm> {
        match &mut self.modal {
            ModalState::Open(form) => Some(form),
            ModalState::Closed => None,
        }
    }

    pub fn store(&self) -> &TimestampStore<S> {
        &self.store
    }

    /// The pending notice, if any, without clearing it.
    pub fn alert(&self) -> Option<Alert> {
        self.alert
    }

    /// Acknowledge and clear the pending notice.
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Recompute the display from the store.
    pub fn refresh_display(&mut self) -> Result<()> {
        self.display = DisplayState::from_record(self.store.read()?);
        Ok(())
    }

    /// Record "now" as the last locked moment.
    pub fn handle_lock(&mut self) -> Result<DateTime<Local>> {
        let now = self.clock.now();
        self.store.write(now)?;
        self.refresh_display()?;

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Recorded lock at {}", now.to_rfc3339());
        }

        Ok(now)
    }

    /// Open the edit dialog pre-filled with the stored moment.
    ///
    /// Returns `false` and leaves the dialog closed when nothing is recorded.
    pub fn handle_edit_open(&mut self) -> Result<bool> {
        let Some(recorded) = self.store.read()? else {
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Edit requested without a record, ignoring");
            }
            return Ok(false);
        };

        self.modal = ModalState::Open(EditForm::new(format_edit_input(recorded)));
        Ok(true)
    }

    /// Validate `input` and, if it is a date-time, store it and close the dialog.
    ///
    /// Seconds are zeroed: the form edits at minute precision. A rejected
    /// input raises [`Alert::InvalidDateTime`] and changes nothing else.
    pub fn handle_save(&mut self, input: &str) -> Result<SaveOutcome> {
        let moment = match parse_edit_input(input) {
            Ok(moment) => moment,
            Err(invalid) => {
                self.alert = Some(Alert::InvalidDateTime);
                if self.debug_enabled {
                    log_pipe!();
                    log_debug!("Rejected edit input '{}'", invalid.input);
                }
                return Ok(SaveOutcome::Rejected(invalid));
            }
        };

        self.store.write(moment)?;
        self.refresh_display()?;
        self.close_modal();

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Saved edited lock time {}", moment.to_rfc3339());
        }

        Ok(SaveOutcome::Saved(moment))
    }

    pub fn handle_cancel(&mut self) {
        self.close_modal();
    }

    /// Dismiss the dialog when the click landed on the backdrop itself.
    pub fn handle_outside_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close_modal();
        }
    }

    /// Hide the dialog, dropping the form. Idempotent.
    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }
}
