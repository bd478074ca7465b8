//! Slot generation.
//!
//! Pure function that expands an event window into the ordered list of
//! fixed-width slot spans for the whole event. Each day is walked
//! independently from its anchored opening time; a trailing span that
//! would cross the closing time is dropped, never truncated.

use crate::domain::event::EventWindow;
use crate::domain::foundation::Timestamp;

use super::slot::SlotSpan;

/// Expands the window into every bookable span, in chronological order.
///
/// Deterministic in its input. An inverted date range or a day whose
/// opening hours are empty contributes no spans.
pub fn generate(window: &EventWindow) -> Vec<SlotSpan> {
    let interval = i64::from(window.slot_interval_minutes());
    let mut spans = Vec::new();

    for day in window.days() {
        let day_end = Timestamp::from_naive_utc(day.and_time(window.daily_end()));
        let mut cursor = Timestamp::from_naive_utc(day.and_time(window.daily_start()));

        loop {
            let span_end = cursor.plus_minutes(interval);
            if span_end.is_after(&day_end) {
                break;
            }
            spans.push(SlotSpan::new(cursor, span_end));
            cursor = span_end;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn window(
        from: (i32, u32, u32),
        to: (i32, u32, u32),
        start: (u32, u32),
        end: (u32, u32),
        interval: u32,
    ) -> EventWindow {
        EventWindow::new(
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            interval,
        )
        .unwrap()
    }

    fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Timestamp::from_naive_utc(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        )
    }

    #[test]
    fn one_hour_day_with_half_hour_interval_yields_two_spans() {
        let spans = generate(&window((2024, 6, 3), (2024, 6, 3), (9, 0), (10, 0), 30));

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start(), timestamp(2024, 6, 3, 9, 0));
        assert_eq!(spans[0].end(), timestamp(2024, 6, 3, 9, 30));
        assert_eq!(spans[1].start(), timestamp(2024, 6, 3, 9, 30));
        assert_eq!(spans[1].end(), timestamp(2024, 6, 3, 10, 0));
    }

    #[test]
    fn trailing_partial_span_is_dropped() {
        // 09:00-10:15 holds two 30-minute spans; the 15-minute tail is unused.
        let spans = generate(&window((2024, 6, 3), (2024, 6, 3), (9, 0), (10, 15), 30));

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].end(), timestamp(2024, 6, 3, 10, 0));
    }

    #[test]
    fn exact_fit_ends_at_closing_time() {
        let spans = generate(&window((2024, 6, 3), (2024, 6, 3), (9, 0), (12, 0), 60));

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].end(), timestamp(2024, 6, 3, 12, 0));
    }

    #[test]
    fn every_day_in_range_is_covered() {
        let spans = generate(&window((2024, 6, 3), (2024, 6, 5), (9, 0), (10, 0), 30));

        assert_eq!(spans.len(), 6);
        assert_eq!(spans[0].date(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(spans[2].date(), NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!(spans[4].date(), NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
    }

    #[test]
    fn inverted_date_range_yields_nothing() {
        let spans = generate(&window((2024, 6, 5), (2024, 6, 3), (9, 0), (17, 0), 30));
        assert!(spans.is_empty());
    }

    #[test]
    fn inverted_daily_hours_yield_nothing() {
        let spans = generate(&window((2024, 6, 3), (2024, 6, 4), (17, 0), (9, 0), 30));
        assert!(spans.is_empty());
    }

    #[test]
    fn interval_wider_than_the_day_yields_nothing() {
        let spans = generate(&window((2024, 6, 3), (2024, 6, 3), (9, 0), (10, 0), 90));
        assert!(spans.is_empty());
    }

    #[test]
    fn spans_are_chronological_and_non_overlapping() {
        let spans = generate(&window((2024, 6, 3), (2024, 6, 4), (9, 0), (17, 0), 45));

        for pair in spans.windows(2) {
            assert!(pair[0].start().is_before(&pair[1].start()));
            assert!(!pair[1].start().is_before(&pair[0].end()));
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generation_is_deterministic(
            to_day in 1u32..28,
            open_hour in 6u32..12,
            open_hours in 0u32..10,
            interval in 1u32..180,
        ) {
            let window = EventWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, to_day).unwrap(),
                NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(open_hour + open_hours, 0, 0).unwrap(),
                interval,
            )
            .unwrap();

            prop_assert_eq!(generate(&window), generate(&window));
        }

        #[test]
        fn no_span_crosses_its_day_boundary(
            to_day in 10u32..15,
            open_hour in 6u32..12,
            open_hours in 1u32..10,
            interval in 1u32..180,
        ) {
            let daily_end = NaiveTime::from_hms_opt(open_hour + open_hours, 0, 0).unwrap();
            let window = EventWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, to_day).unwrap(),
                NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap(),
                daily_end,
                interval,
            )
            .unwrap();

            for span in generate(&window) {
                let day_end = Timestamp::from_naive_utc(span.date().and_time(daily_end));
                prop_assert!(!span.end().is_after(&day_end));
                prop_assert_eq!(span.start().date(), span.end().date());
            }
        }

        #[test]
        fn each_day_holds_the_expected_span_count(
            open_hours in 1u32..10,
            interval in 1u32..180,
        ) {
            let window = EventWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(9 + open_hours, 0, 0).unwrap(),
                interval,
            )
            .unwrap();

            let expected = (open_hours as usize * 60) / interval as usize;
            prop_assert_eq!(generate(&window).len(), expected);
        }
    }
}
