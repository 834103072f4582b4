// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::vacation_draft;
use crate::{Command, Operation};

#[test]
fn test_commands_map_to_operations() {
    let cases: Vec<(Command, Operation, Option<&str>)> = vec![
        (
            Command::CreateLeaveRequest {
                draft: vacation_draft(),
                override_caps: false,
            },
            Operation::Create,
            None,
        ),
        (
            Command::UpdateLeaveRequest {
                request_id: String::from("r1"),
                draft: vacation_draft(),
                override_caps: false,
            },
            Operation::Update,
            Some("r1"),
        ),
        (
            Command::ApproveLeaveRequest {
                request_id: String::from("r2"),
                comment: None,
            },
            Operation::Approve,
            Some("r2"),
        ),
        (
            Command::RejectLeaveRequest {
                request_id: String::from("r3"),
                comment: Some(String::from("no")),
            },
            Operation::Reject,
            Some("r3"),
        ),
        (
            Command::DeleteLeaveRequest {
                request_id: String::from("r4"),
            },
            Operation::Delete,
            Some("r4"),
        ),
        (
            Command::AddComment {
                request_id: String::from("r5"),
                text: String::from("hi"),
            },
            Operation::AddComment,
            Some("r5"),
        ),
    ];

    for (command, operation, target) in cases {
        assert_eq!(command.operation(), operation);
        assert_eq!(command.target_request_id(), target);
    }
}

#[test]
fn test_operation_names_are_stable() {
    assert_eq!(Operation::ReadAll.to_string(), "read_all");
    assert_eq!(Operation::AddComment.to_string(), "add_comment");
    assert_eq!(
        Operation::MarkNotificationRead.as_str(),
        "mark_notification_read"
    );
}
