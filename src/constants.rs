//! Fixed strings and identifiers shared across lockcheck.

/// Key of the single storage slot holding the last locked moment.
pub const STORAGE_KEY: &str = "lastLockedTimestamp";

/// Application directory name under the XDG config and state homes.
pub const APP_DIR_NAME: &str = "lockcheck";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "lockcheck.toml";

/// Label placed before the formatted timestamp.
pub const DISPLAY_LABEL: &str = "最終確認日時： ";

/// Shown when nothing has been recorded yet.
pub const NO_RECORD_TEXT: &str = "まだ記録がありません";

/// Display format after the label (zero-padded, 24-hour, local time).
pub const DISPLAY_FORMAT: &str = "%Y年%m月%d日 %H:%M:%S";

/// Pre-fill format of the edit form, minute precision.
pub const EDIT_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// `EDIT_INPUT_FORMAT` as shown to users.
pub const EDIT_INPUT_HINT: &str = "YYYY-MM-DDTHH:MM";

/// Blocking notice shown when the edit form holds an invalid date-time.
pub const INVALID_DATETIME_MESSAGE: &str = "有効な日時を入力してください。";

// # Exit code
pub const EXIT_FAILURE: i32 = 1;

#[cfg(any(test, feature = "testing-support"))]
pub mod test_constants {
    /// Scenario moment used throughout the tests: 2024-03-05 09:07:22 local.
    pub const TEST_LOCK_MOMENT: (i32, u32, u32, u32, u32, u32) = (2024, 3, 5, 9, 7, 22);
    pub const TEST_LOCK_DISPLAY: &str = "最終確認日時： 2024年03月05日 09:07:22";
    pub const TEST_LOCK_PREFILL: &str = "2024-03-05T09:07";
    pub const TEST_EDIT_INPUT: &str = "2024-03-06T10:00";
    pub const TEST_EDIT_DISPLAY: &str = "最終確認日時： 2024年03月06日 10:00:00";
}
