// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, datetime};
use time::{Date, Duration};

use crate::calculate_duration;

#[test]
fn test_same_day_is_one_day() {
    let days: [Date; 4] = [
        date!(2023 - 01 - 01),
        date!(2024 - 02 - 29),
        date!(2023 - 12 - 31),
        date!(1999 - 07 - 15),
    ];
    for day in days {
        assert_eq!(calculate_duration(day, day), 1);
    }
}

#[test]
fn test_crossing_one_midnight_counts_two_days() {
    let start = datetime!(2023-01-01 10:00);
    let end = datetime!(2023-01-02 11:00);

    assert_eq!(calculate_duration(start, end), 2);
}

#[test]
fn test_overnight_span_under_24_hours_counts_two_days() {
    let start = datetime!(2023-03-10 22:00 UTC);
    let end = datetime!(2023-03-11 01:00 UTC);

    assert_eq!(calculate_duration(start, end), 2);
}

#[test]
fn test_span_just_over_24_hours_counts_two_days() {
    let start = datetime!(2023-03-10 00:30);
    let end = datetime!(2023-03-11 01:00);

    assert_eq!(calculate_duration(start, end), 2);
}

#[test]
fn test_month_boundary() {
    assert_eq!(
        calculate_duration(date!(2023 - 01 - 31), date!(2023 - 02 - 01)),
        2
    );
}

#[test]
fn test_leap_day_is_counted() {
    assert_eq!(
        calculate_duration(date!(2024 - 02 - 28), date!(2024 - 03 - 01)),
        3
    );
    assert_eq!(
        calculate_duration(date!(2023 - 02 - 28), date!(2023 - 03 - 01)),
        2
    );
}

#[test]
fn test_time_of_day_is_irrelevant() {
    let start_day: Date = date!(2023 - 05 - 01);
    let end_day: Date = date!(2023 - 05 - 09);
    let expected: i64 = calculate_duration(start_day, end_day);

    for hour in [0u8, 6, 12, 23] {
        let start = start_day.with_hms(hour, 0, 0).unwrap();
        let end = end_day.with_hms(23 - hour, 59, 59).unwrap();
        assert_eq!(calculate_duration(start, end), expected);
    }
}

#[test]
fn test_full_year() {
    assert_eq!(
        calculate_duration(date!(2023 - 01 - 01), date!(2023 - 12 - 31)),
        365
    );
}

#[test]
fn test_duration_grows_by_one_per_day() {
    let start: Date = date!(2023 - 06 - 01);
    for offset in 0..40 {
        let end: Date = start + Duration::days(offset);
        assert_eq!(calculate_duration(start, end), offset + 1);
    }
}
