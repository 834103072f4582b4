// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inclusive calendar-day duration.
//!
//! Leave is accounted in calendar days, not elapsed hours. Every input is
//! reduced to its calendar date before differencing, so an interval from
//! 22:00 one evening to 01:00 the next morning counts as two days.

use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// A value that falls on a single calendar day.
pub trait CalendarDay: Copy {
    /// The calendar date with any time-of-day removed.
    fn calendar_day(self) -> Date;
}

impl CalendarDay for Date {
    fn calendar_day(self) -> Date {
        self
    }
}

impl CalendarDay for PrimitiveDateTime {
    fn calendar_day(self) -> Date {
        self.date()
    }
}

/// Uses the date in the value's own offset.
impl CalendarDay for OffsetDateTime {
    fn calendar_day(self) -> Date {
        self.date()
    }
}

/// Computes the number of calendar days from `start` to `end`, counting both
/// endpoints.
///
/// A request starting and ending on the same day is one day long.
/// Passing `end < start` is a caller error; the result is then zero or
/// negative and callers are expected to have rejected the range first.
///
/// # Arguments
///
/// * `start` - First day (any time-of-day is ignored)
/// * `end` - Last day (any time-of-day is ignored)
#[must_use]
pub fn calculate_duration<S: CalendarDay, E: CalendarDay>(start: S, end: E) -> i64 {
    (end.calendar_day() - start.calendar_day()).whole_days() + 1
}
