// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only summary statistics over a collection of leave requests.

use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use time::Month;
use timeoff_domain::{LeaveRequest, LeaveStatus, LeaveType};

/// Request counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Requests awaiting a decision.
    pub pending: usize,
    /// Approved requests.
    pub approved: usize,
    /// Rejected requests.
    pub rejected: usize,
}

impl StatusCounts {
    fn record(&mut self, status: LeaveStatus) {
        match status {
            LeaveStatus::Pending => self.pending += 1,
            LeaveStatus::Approved => self.approved += 1,
            LeaveStatus::Rejected => self.rejected += 1,
        }
    }
}

/// A calendar month, ordered chronologically and rendered as `January 2023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: u8,
}

impl MonthKey {
    /// The month a request's start date falls in.
    #[must_use]
    pub fn of(request: &LeaveRequest) -> Self {
        Self {
            year: request.start_date.year(),
            month: u8::from(request.start_date.month()),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Month::try_from(self.month) {
            Ok(month) => write!(f, "{month} {}", self.year),
            Err(_) => write!(f, "{:02}/{}", self.month, self.year),
        }
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Summary statistics over a set of leave requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveReport {
    /// Number of requests considered.
    pub total_requests: usize,
    /// Counts per status.
    pub count_by_status: StatusCounts,
    /// Counts per leave type; every type is present, possibly with zero.
    pub count_by_type: BTreeMap<LeaveType, usize>,
    /// Mean inclusive duration in days, `0.0` for an empty set.
    pub average_duration_days: f64,
    /// Counts per start-date month, in chronological order.
    pub monthly_distribution: BTreeMap<MonthKey, usize>,
}

/// Derives a [`LeaveReport`] from `requests`.
///
/// Pure; access control is the caller's concern.
#[must_use]
pub fn generate_report(requests: &[LeaveRequest]) -> LeaveReport {
    let mut count_by_status: StatusCounts = StatusCounts::default();
    let mut count_by_type: BTreeMap<LeaveType, usize> =
        LeaveType::ALL.iter().map(|t| (*t, 0)).collect();
    let mut monthly_distribution: BTreeMap<MonthKey, usize> = BTreeMap::new();
    let mut total_days: i64 = 0;

    for request in requests {
        count_by_status.record(request.status);
        *count_by_type.entry(request.leave_type).or_insert(0) += 1;
        *monthly_distribution
            .entry(MonthKey::of(request))
            .or_insert(0) += 1;
        total_days += request.duration_days();
    }

    let average_duration_days: f64 = match (total_days.to_f64(), requests.len().to_f64()) {
        (Some(days), Some(count)) if count > 0.0 => days / count,
        _ => 0.0,
    };

    LeaveReport {
        total_requests: requests.len(),
        count_by_status,
        count_by_type,
        average_duration_days,
        monthly_distribution,
    }
}

/// The requests filed by `user_id`, oldest first.
#[must_use]
pub fn employee_leave_history(requests: &[LeaveRequest], user_id: &str) -> Vec<LeaveRequest> {
    let mut history: Vec<LeaveRequest> = requests
        .iter()
        .filter(|request| request.is_owned_by(user_id))
        .cloned()
        .collect();
    history.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    history
}
