// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use time::macros::{date, datetime};
use time::{Date, Duration};
use timeoff::{Command, CurrentActor, TransitionContext, TransitionResult, apply};
use timeoff_domain::{LeaveDraft, LeavePolicy, LeaveRequest, LeaveType, Role};

use crate::{LeaveStore, PersistenceError};

pub fn create_test_employee() -> CurrentActor {
    CurrentActor::new(String::from("alice"), String::from("Alice"), Role::User)
}

pub fn create_test_colleague() -> CurrentActor {
    CurrentActor::new(String::from("bob"), String::from("Bob"), Role::User)
}

pub fn create_test_admin() -> CurrentActor {
    CurrentActor::new(String::from("admin"), String::from("Dana Admin"), Role::Admin)
}

/// A context whose clock reads `minutes` after 2023-06-01 09:00 UTC.
pub fn context_at(minutes: i64) -> TransitionContext {
    TransitionContext::new(
        LeavePolicy::default(),
        datetime!(2023-06-01 09:00 UTC) + Duration::minutes(minutes),
    )
}

pub fn create_test_draft(start: Date, end: Date) -> LeaveDraft {
    LeaveDraft::new(
        LeaveType::Vacation,
        start,
        end,
        Some(String::from("Family trip")),
    )
}

pub fn vacation_draft() -> LeaveDraft {
    create_test_draft(date!(2023 - 07 - 03), date!(2023 - 07 - 07))
}

/// Files `draft` for `owner` and commits it, returning the stored request.
pub fn file_request<S: LeaveStore>(
    store: &mut S,
    owner: &CurrentActor,
    draft: LeaveDraft,
    minutes: i64,
) -> LeaveRequest {
    let result: TransitionResult = apply(
        None,
        Command::CreateLeaveRequest {
            draft,
            override_caps: false,
        },
        owner,
        &context_at(minutes),
    )
    .expect("create should succeed");
    store.commit_transition(&result).unwrap();
    result.request().cloned().unwrap()
}

/// Computes `command` against the stored request and commits it.
pub fn run_command<S: LeaveStore>(
    store: &mut S,
    request_id: &str,
    command: Command,
    actor: &CurrentActor,
    minutes: i64,
) -> Result<i64, PersistenceError> {
    let current: Option<LeaveRequest> = store.get_leave_request(request_id).unwrap();
    let result: TransitionResult = apply(current.as_ref(), command, actor, &context_at(minutes))
        .expect("command should be accepted by the lifecycle rules");
    store.commit_transition(&result)
}
