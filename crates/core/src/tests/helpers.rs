// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};
use timeoff_domain::{LeaveDraft, LeavePolicy, LeaveRequest, LeaveStatus, LeaveType, Role};

use crate::{Command, CurrentActor, TransitionContext, TransitionResult, apply};

pub fn create_test_employee() -> CurrentActor {
    CurrentActor::new(String::from("alice"), String::from("Alice"), Role::User)
}

pub fn create_test_colleague() -> CurrentActor {
    CurrentActor::new(String::from("bob"), String::from("Bob"), Role::User)
}

pub fn create_test_admin() -> CurrentActor {
    CurrentActor::new(String::from("admin"), String::from("Dana Admin"), Role::Admin)
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2023-06-01 09:00 UTC)
}

pub fn create_test_context() -> TransitionContext {
    TransitionContext::new(LeavePolicy::default(), test_now())
}

pub fn later_context() -> TransitionContext {
    TransitionContext::new(LeavePolicy::default(), datetime!(2023-06-02 15:30 UTC))
}

pub fn create_test_draft(leave_type: LeaveType, start: Date, end: Date) -> LeaveDraft {
    LeaveDraft::new(leave_type, start, end, Some(String::from("Family trip")))
}

pub fn vacation_draft() -> LeaveDraft {
    create_test_draft(
        LeaveType::Vacation,
        date!(2023 - 07 - 03),
        date!(2023 - 07 - 07),
    )
}

pub fn stored_request(result: &TransitionResult) -> LeaveRequest {
    result
        .request()
        .cloned()
        .expect("transition should leave a stored request")
}

/// Creates a pending vacation request owned by `owner`.
pub fn create_pending_request(owner: &CurrentActor) -> LeaveRequest {
    let result: TransitionResult = apply(
        None,
        Command::CreateLeaveRequest {
            draft: vacation_draft(),
            override_caps: false,
        },
        owner,
        &create_test_context(),
    )
    .expect("create should succeed");
    stored_request(&result)
}

/// Creates a request owned by the test employee with the given status.
pub fn create_request_with_status(status: LeaveStatus) -> LeaveRequest {
    let mut request: LeaveRequest = create_pending_request(&create_test_employee());
    request.status = status;
    request
}
