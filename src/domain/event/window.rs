//! Event window value object.
//!
//! The window is the read-only scheduling input owned by the event:
//! a span of calendar days plus the daily opening hours every sheet
//! for that event is generated from.

use crate::domain::foundation::DomainError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Slot width used when an event does not configure one.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

/// The bookable hours of an event.
///
/// # Invariants
///
/// - `slot_interval_minutes` is at least 1
/// - `from_date` and `to_date` are inclusive calendar days; an
///   inverted range is allowed and spans no days
/// - `daily_start >= daily_end` is allowed and yields no slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    /// First calendar day of the event.
    from_date: NaiveDate,

    /// Last calendar day of the event (inclusive).
    to_date: NaiveDate,

    /// Opening time, applied to every day in the range.
    daily_start: NaiveTime,

    /// Closing time, applied to every day in the range.
    daily_end: NaiveTime,

    /// Width of one bookable slot.
    slot_interval_minutes: u32,
}

impl EventWindow {
    /// Create a window with an explicit slot interval.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the interval is zero
    pub fn new(
        from_date: NaiveDate,
        to_date: NaiveDate,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
        slot_interval_minutes: u32,
    ) -> Result<Self, DomainError> {
        if slot_interval_minutes == 0 {
            return Err(DomainError::validation(
                "slot_interval_minutes",
                "Slot interval must be at least one minute",
            ));
        }

        Ok(Self {
            from_date,
            to_date,
            daily_start,
            daily_end,
            slot_interval_minutes,
        })
    }

    /// Create a window using the default slot interval.
    pub fn with_default_interval(
        from_date: NaiveDate,
        to_date: NaiveDate,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
    ) -> Result<Self, DomainError> {
        Self::new(
            from_date,
            to_date,
            daily_start,
            daily_end,
            DEFAULT_SLOT_INTERVAL_MINUTES,
        )
    }

    /// Returns the first calendar day.
    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    /// Returns the last calendar day (inclusive).
    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    /// Returns the daily opening time.
    pub fn daily_start(&self) -> NaiveTime {
        self.daily_start
    }

    /// Returns the daily closing time.
    pub fn daily_end(&self) -> NaiveTime {
        self.daily_end
    }

    /// Returns the slot width in minutes.
    pub fn slot_interval_minutes(&self) -> u32 {
        self.slot_interval_minutes
    }

    /// Iterates the calendar days of the event in order.
    ///
    /// Empty when `from_date > to_date`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to_date = self.to_date;
        self.from_date.iter_days().take_while(move |d| *d <= to_date)
    }
}
