// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

use crate::duration::calculate_duration;
use crate::error::DomainError;
use crate::types::LeaveType;

/// Default cap for `personal` leave, in inclusive days.
pub const DEFAULT_PERSONAL_CAP_DAYS: u32 = 12;

/// Default cap for `sick` leave, in inclusive days.
pub const DEFAULT_SICK_CAP_DAYS: u32 = 6;

/// Per-type duration limits applied when a request is created or edited.
///
/// Caps are checked against the proposed dates only. A request that was
/// accepted under an override is never re-validated later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePolicy {
    /// Maximum inclusive days for `personal` leave.
    pub personal_cap_days: u32,
    /// Maximum inclusive days for `sick` leave.
    pub sick_cap_days: u32,
}

impl LeavePolicy {
    /// Creates a policy with explicit caps.
    #[must_use]
    pub const fn new(personal_cap_days: u32, sick_cap_days: u32) -> Self {
        Self {
            personal_cap_days,
            sick_cap_days,
        }
    }

    /// Returns the cap for a leave type, or `None` if the type is uncapped.
    #[must_use]
    pub const fn cap_for(&self, leave_type: LeaveType) -> Option<u32> {
        match leave_type {
            LeaveType::Personal => Some(self.personal_cap_days),
            LeaveType::Sick => Some(self.sick_cap_days),
            LeaveType::Vacation | LeaveType::Bereavement | LeaveType::Study | LeaveType::Other => {
                None
            }
        }
    }

    /// Validates a proposed leave range.
    ///
    /// Date order is always checked. Duration caps are skipped entirely when
    /// `bypass_caps` is set (admin actor or explicit override).
    ///
    /// # Arguments
    ///
    /// * `leave_type` - The proposed leave type
    /// * `start_date` - The proposed first day
    /// * `end_date` - The proposed last day
    /// * `bypass_caps` - Whether the caller holds override privilege
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `end_date` is before `start_date`
    /// - The inclusive duration exceeds the cap for `leave_type`
    pub fn validate(
        &self,
        leave_type: LeaveType,
        start_date: Date,
        end_date: Date,
        bypass_caps: bool,
    ) -> Result<(), DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        if bypass_caps {
            return Ok(());
        }

        if let Some(limit) = self.cap_for(leave_type) {
            let actual: i64 = calculate_duration(start_date, end_date);
            if actual > i64::from(limit) {
                return Err(DomainError::DurationExceeded {
                    leave_type,
                    limit,
                    actual,
                });
            }
        }

        Ok(())
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONAL_CAP_DAYS, DEFAULT_SICK_CAP_DAYS)
    }
}
