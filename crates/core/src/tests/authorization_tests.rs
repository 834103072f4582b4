// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;
use timeoff_domain::{LeaveRequest, LeaveStatus, Notification};

use super::helpers::{
    create_request_with_status, create_test_admin, create_test_colleague, create_test_employee,
};
use crate::{
    CoreError, CurrentActor, ErrorKind, Operation, authorize, authorize_global,
    authorize_notification, can_perform,
};

const ALL_STATUSES: [LeaveStatus; 3] = [
    LeaveStatus::Pending,
    LeaveStatus::Approved,
    LeaveStatus::Rejected,
];

fn create_test_notification(recipient: &str) -> Notification {
    Notification::new(
        String::from("n-1"),
        recipient.to_string(),
        String::from("Leave request approved"),
        String::from("Approved"),
        datetime!(2023-06-02 10:00 UTC),
    )
}

#[test]
fn test_anyone_may_create() {
    for actor in [
        create_test_employee(),
        create_test_colleague(),
        create_test_admin(),
    ] {
        assert!(can_perform(&actor, Operation::Create, None));
    }
}

#[test]
fn test_read_all_is_admin_only() {
    assert!(can_perform(&create_test_admin(), Operation::ReadAll, None));
    assert!(!can_perform(&create_test_employee(), Operation::ReadAll, None));
    assert_eq!(
        authorize_global(&create_test_employee(), Operation::ReadAll)
            .unwrap_err()
            .kind(),
        ErrorKind::Unauthorized
    );
}

#[test]
fn test_request_scoped_operation_without_request_is_denied() {
    for operation in [
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::Approve,
        Operation::Reject,
        Operation::AddComment,
    ] {
        assert!(!can_perform(&create_test_admin(), operation, None));
    }
}

#[test]
fn test_read_own_or_admin() {
    let request: LeaveRequest = create_request_with_status(LeaveStatus::Approved);

    assert!(can_perform(&create_test_employee(), Operation::Read, Some(&request)));
    assert!(can_perform(&create_test_admin(), Operation::Read, Some(&request)));
    assert!(!can_perform(&create_test_colleague(), Operation::Read, Some(&request)));
}

#[test]
fn test_update_matrix() {
    for status in ALL_STATUSES {
        let request: LeaveRequest = create_request_with_status(status);

        assert_eq!(
            can_perform(&create_test_employee(), Operation::Update, Some(&request)),
            status == LeaveStatus::Pending
        );
        assert!(!can_perform(&create_test_admin(), Operation::Update, Some(&request)));
        assert!(!can_perform(&create_test_colleague(), Operation::Update, Some(&request)));
    }
}

#[test]
fn test_delete_matrix() {
    for status in ALL_STATUSES {
        let request: LeaveRequest = create_request_with_status(status);

        assert_eq!(
            can_perform(&create_test_employee(), Operation::Delete, Some(&request)),
            status == LeaveStatus::Pending
        );
        assert!(can_perform(&create_test_admin(), Operation::Delete, Some(&request)));
        assert!(!can_perform(&create_test_colleague(), Operation::Delete, Some(&request)));
    }
}

#[test]
fn test_decision_matrix() {
    for operation in [Operation::Approve, Operation::Reject] {
        for status in ALL_STATUSES {
            let request: LeaveRequest = create_request_with_status(status);

            assert_eq!(
                can_perform(&create_test_admin(), operation, Some(&request)),
                status == LeaveStatus::Pending
            );
            assert!(!can_perform(&create_test_employee(), operation, Some(&request)));
        }
    }
}

#[test]
fn test_comment_ignores_status() {
    for status in ALL_STATUSES {
        let request: LeaveRequest = create_request_with_status(status);

        assert!(can_perform(&create_test_employee(), Operation::AddComment, Some(&request)));
        assert!(can_perform(&create_test_admin(), Operation::AddComment, Some(&request)));
        assert!(!can_perform(&create_test_colleague(), Operation::AddComment, Some(&request)));
    }
}

#[test]
fn test_authorization_keys_off_id_not_name() {
    let request: LeaveRequest = create_request_with_status(LeaveStatus::Pending);
    let impostor: CurrentActor = CurrentActor::new(
        String::from("mallory"),
        request.requester_name.clone(),
        timeoff_domain::Role::User,
    );

    assert!(!can_perform(&impostor, Operation::Update, Some(&request)));
}

#[test]
fn test_invalid_state_only_after_entitlement() {
    let request: LeaveRequest = create_request_with_status(LeaveStatus::Rejected);

    assert!(matches!(
        authorize(&create_test_employee(), Operation::Update, &request),
        Err(CoreError::InvalidState { .. })
    ));
    assert!(matches!(
        authorize(&create_test_colleague(), Operation::Update, &request),
        Err(CoreError::Unauthorized { .. })
    ));
}

#[test]
fn test_only_recipient_marks_notification_read() {
    let notification: Notification = create_test_notification("alice");

    assert!(authorize_notification(&create_test_employee(), &notification).is_ok());
    assert_eq!(
        authorize_notification(&create_test_admin(), &notification),
        Err(CoreError::Unauthorized {
            operation: Operation::MarkNotificationRead,
            actor_id: String::from("admin"),
        })
    );
}
