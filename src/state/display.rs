//! What the user sees, derived from the stored moment.
//!
//! `DisplayState` is never persisted or cached on its own: it is recomputed
//! from the store after every change. It serializes for `show --json`.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_FORMAT, DISPLAY_LABEL, EDIT_INPUT_FORMAT, NO_RECORD_TEXT};

/// Status line plus visibility of the edit control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Placeholder or labelled, formatted moment
    pub text: String,

    /// Whether the edit control is offered
    pub edit_visible: bool,

    /// The moment behind `text`, if any
    pub recorded_at: Option<DateTime<Local>>,
}

impl DisplayState {
    /// Projection of the stored value.
    pub fn from_record(recorded_at: Option<DateTime<Local>>) -> Self {
        match recorded_at {
            Some(moment) => Self {
                text: format_display(moment),
                edit_visible: true,
                recorded_at: Some(moment),
            },
            None => Self::no_record(),
        }
    }

    pub fn no_record() -> Self {
        Self {
            text: NO_RECORD_TEXT.to_string(),
            edit_visible: false,
            recorded_at: None,
        }
    }

    pub fn has_record(&self) -> bool {
        self.recorded_at.is_some()
    }
}

/// `最終確認日時： YYYY年MM月DD日 HH:MM:SS` in local time.
pub fn format_display(moment: DateTime<Local>) -> String {
    format!("{DISPLAY_LABEL}{}", moment.format(DISPLAY_FORMAT))
}

/// Edit form pre-fill, `YYYY-MM-DDTHH:MM`. Seconds are dropped.
pub fn format_edit_input(moment: DateTime<Local>) -> String {
    moment.format(EDIT_INPUT_FORMAT).to_string()
}
