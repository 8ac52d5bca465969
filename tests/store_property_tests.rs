use chrono::{DateTime, Local, NaiveDate, Timelike};
use lockcheck::presenter::{Presenter, SaveOutcome};
use lockcheck::state::{DisplayState, MemorySlotStorage, TimestampStore};
use lockcheck::time_source::{FixedTimeSource, localize};
use proptest::prelude::*;
use std::sync::Arc;

/// Local moments with whole seconds, 1971-2099.
fn moment_strategy() -> impl Strategy<Value = DateTime<Local>> {
    (1971i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_filter_map(
        "local time must exist",
        |(y, mo, d, h, mi, s)| {
            let naive = NaiveDate::from_ymd_opt(y, mo, d)?.and_hms_opt(h, mi, s)?;
            localize(naive)
        },
    )
}

fn presenter_at(now: DateTime<Local>) -> Presenter<MemorySlotStorage> {
    Presenter::new(
        TimestampStore::new(MemorySlotStorage::new()),
        Arc::new(FixedTimeSource::new(now)),
    )
    .unwrap()
}

proptest! {
    /// Whatever is written is read back unchanged at second precision
    #[test]
    fn test_write_read_round_trip(moment in moment_strategy()) {
        let mut store = TimestampStore::new(MemorySlotStorage::new());
        store.write(moment).unwrap();
        prop_assert_eq!(store.read().unwrap(), Some(moment));
    }

    /// Locking stores the clock's moment; the display shows its seconds
    #[test]
    fn test_lock_round_trip(moment in moment_strategy()) {
        let mut presenter = presenter_at(moment);
        presenter.handle_lock().unwrap();
        prop_assert_eq!(presenter.store().read().unwrap(), Some(moment));
        let expected_suffix = format!(
            "{:02}:{:02}:{:02}",
            moment.hour(),
            moment.minute(),
            moment.second()
        );
        prop_assert!(presenter.display().text.ends_with(&expected_suffix));
    }

    /// Saving the pre-filled form stores the same moment with seconds zeroed
    #[test]
    fn test_edit_round_trip_zeroes_seconds(moment in moment_strategy()) {
        let mut presenter = presenter_at(moment);
        presenter.handle_lock().unwrap();
        presenter.handle_edit_open().unwrap();
        let prefill = presenter.edit_form_mut().unwrap().input().to_string();

        let outcome = presenter.handle_save(&prefill).unwrap();
        prop_assert!(matches!(outcome, SaveOutcome::Saved(_)));

        let stored = presenter.store().read().unwrap().unwrap();
        prop_assert_eq!(stored.second(), 0);
        prop_assert_eq!(stored.naive_local(), moment.naive_local().with_second(0).unwrap());
    }

    /// Refreshing twice without a write gives the same display
    #[test]
    fn test_refresh_is_idempotent(moment in moment_strategy(), locked in any::<bool>()) {
        let mut presenter = presenter_at(moment);
        if locked {
            presenter.handle_lock().unwrap();
        }
        presenter.refresh_display().unwrap();
        let first: DisplayState = presenter.display().clone();
        presenter.refresh_display().unwrap();
        prop_assert_eq!(presenter.display(), &first);
    }

    /// Only the latest of two locks survives
    #[test]
    fn test_second_lock_overwrites_first(
        first in moment_strategy(),
        second in moment_strategy()
    ) {
        let mut presenter = presenter_at(first);
        presenter.handle_lock().unwrap();

        // Carry the slot over to a session with a different clock
        let store = presenter.store().clone();
        let mut presenter = Presenter::new(store, Arc::new(FixedTimeSource::new(second))).unwrap();
        presenter.handle_lock().unwrap();

        prop_assert_eq!(presenter.store().read().unwrap(), Some(second));
    }

    /// Arbitrary text never panics the validator, and anything rejected changes nothing
    #[test]
    fn test_save_rejects_or_stores(input in ".{0,24}") {
        let moment = localize(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 7, 22).unwrap(),
        )
        .unwrap();
        let mut presenter = presenter_at(moment);
        presenter.handle_lock().unwrap();
        presenter.handle_edit_open().unwrap();

        match presenter.handle_save(&input).unwrap() {
            SaveOutcome::Saved(saved) => {
                prop_assert_eq!(saved.second(), 0);
                prop_assert!(!presenter.is_modal_open());
            }
            SaveOutcome::Rejected(_) => {
                prop_assert_eq!(presenter.store().read().unwrap(), Some(moment));
                prop_assert!(presenter.is_modal_open());
                prop_assert!(presenter.alert().is_some());
            }
        }
    }
}
