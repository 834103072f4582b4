// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail, reports, notifications and the user directory.

use time::macros::datetime;
use timeoff::{CurrentActor, ErrorKind, LeaveReport};
use timeoff_audit::{AuditAction, AuditFilter, TargetType};
use timeoff_domain::{LeaveType, Role};
use timeoff_persistence::{InMemoryPersistence, PersistenceError};

use super::helpers::{actor, context_at, create_test_store, file_vacation, leave_body};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{
    add_comment, approve_leave_request, create_leave_request, delete_leave_request,
    get_leave_report, list_audit_logs, list_notifications, list_users, mark_notification_read,
    parse_audit_filter, register_user, reject_leave_request,
};
use crate::request_response::{
    AddCommentRequest, AuditLogQuery, AuditLogResponse, DecisionRequest, LeaveRequestInfo,
    ListUsersResponse, NotificationInfo, NotificationsResponse, RegisterUserRequest, UserInfo,
};

// ============================================================================
// Audit trail
// ============================================================================

#[test]
fn test_audit_trail_records_every_mutation_in_order() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");
    add_comment(
        &mut store,
        &alice,
        &filed.request_id,
        &AddCommentRequest {
            text: String::from("Please"),
        },
        &context_at(1),
    )
    .unwrap();
    approve_leave_request(
        &mut store,
        &admin,
        &filed.request_id,
        &DecisionRequest::default(),
        &context_at(2),
    )
    .unwrap();
    delete_leave_request(&mut store, &admin, &filed.request_id, &context_at(3)).unwrap();

    let response: AuditLogResponse =
        list_audit_logs(&mut store, &admin, &AuditLogQuery::default()).unwrap();

    let actions: Vec<AuditAction> = response.entries.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::Create,
            AuditAction::Comment,
            AuditAction::Approve,
            AuditAction::Delete,
        ]
    );
    let ids: Vec<i64> = response.entries.iter().map(|e| e.entry_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert!(response
        .entries
        .iter()
        .all(|e| e.target_id == filed.request_id && e.target_type == TargetType::LeaveRequest));
    assert_eq!(response.entries[3].details, "Deleted vacation leave request for Alice");
    assert_eq!(response.entries[3].timestamp, "2023-06-01T09:03:00Z");
}

#[test]
fn test_audit_filters_by_action_and_actor() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    file_vacation(&mut store, "bob", 1);
    let admin: CurrentActor = actor(&mut store, "admin");
    reject_leave_request(
        &mut store,
        &admin,
        &filed.request_id,
        &DecisionRequest::default(),
        &context_at(2),
    )
    .unwrap();

    let by_action: AuditLogResponse = list_audit_logs(
        &mut store,
        &admin,
        &AuditLogQuery {
            action: Some(String::from("create")),
            ..AuditLogQuery::default()
        },
    )
    .unwrap();
    assert_eq!(by_action.entries.len(), 2);

    let by_actor: AuditLogResponse = list_audit_logs(
        &mut store,
        &admin,
        &AuditLogQuery {
            user_id: Some(String::from("admin")),
            ..AuditLogQuery::default()
        },
    )
    .unwrap();
    assert_eq!(by_actor.entries.len(), 1);
    assert_eq!(by_actor.entries[0].action, AuditAction::Reject);
    assert_eq!(by_actor.entries[0].actor_name, "Dana Admin");
}

#[test]
fn test_audit_log_requires_admin() {
    let mut store: InMemoryPersistence = create_test_store();
    let alice: CurrentActor = actor(&mut store, "alice");

    let err: ApiError =
        list_audit_logs(&mut store, &alice, &AuditLogQuery::default()).unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
}

#[test]
fn test_audit_filter_parses_date_bounds() {
    let filter: AuditFilter = parse_audit_filter(&AuditLogQuery {
        target_type: Some(String::from("leave_request")),
        start_date: Some(String::from("2023-06-01")),
        end_date: Some(String::from("2023-06-30")),
        target_id: Some(String::from("  ")),
        ..AuditLogQuery::default()
    })
    .unwrap();

    assert_eq!(filter.target_type, Some(TargetType::LeaveRequest));
    assert_eq!(filter.target_id, None);
    assert_eq!(filter.start, Some(datetime!(2023-06-01 00:00 UTC)));
    assert_eq!(
        filter.end,
        Some(datetime!(2023-06-30 23:59:59.999_999_999 UTC))
    );

    let exact: AuditFilter = parse_audit_filter(&AuditLogQuery {
        start_date: Some(String::from("2023-06-01T09:30:00Z")),
        ..AuditLogQuery::default()
    })
    .unwrap();
    assert_eq!(exact.start, Some(datetime!(2023-06-01 09:30 UTC)));
}

#[test]
fn test_audit_filter_rejects_unknown_values() {
    let bad_action: ApiError = parse_audit_filter(&AuditLogQuery {
        action: Some(String::from("explode")),
        ..AuditLogQuery::default()
    })
    .unwrap_err();
    assert!(matches!(
        bad_action,
        ApiError::InvalidInput { ref field, .. } if field == "action"
    ));

    let bad_date: ApiError = parse_audit_filter(&AuditLogQuery {
        end_date: Some(String::from("yesterday")),
        ..AuditLogQuery::default()
    })
    .unwrap_err();
    assert!(matches!(
        bad_date,
        ApiError::InvalidInput { ref field, .. } if field == "end_date"
    ));
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_report_summarizes_all_requests() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    let bob: CurrentActor = actor(&mut store, "bob");
    let admin: CurrentActor = actor(&mut store, "admin");
    create_leave_request(
        &mut store,
        &bob,
        &leave_body("sick", "2023-08-01", "2023-08-03"),
        &context_at(1),
    )
    .unwrap();
    approve_leave_request(
        &mut store,
        &admin,
        &filed.request_id,
        &DecisionRequest::default(),
        &context_at(2),
    )
    .unwrap();

    let report: LeaveReport = get_leave_report(&mut store, &admin).unwrap();

    assert_eq!(report.total_requests, 2);
    assert_eq!(report.count_by_status.approved, 1);
    assert_eq!(report.count_by_status.pending, 1);
    assert_eq!(report.count_by_type[&LeaveType::Vacation], 1);
    assert_eq!(report.count_by_type[&LeaveType::Sick], 1);
    assert_eq!(report.count_by_type[&LeaveType::Study], 0);
    assert!((report.average_duration_days - 4.0).abs() < f64::EPSILON);
    assert_eq!(report.monthly_distribution.len(), 2);
}

#[test]
fn test_report_requires_admin() {
    let mut store: InMemoryPersistence = create_test_store();
    let alice: CurrentActor = actor(&mut store, "alice");

    let err: ApiError = get_leave_report(&mut store, &alice).unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_decisions_notify_owner_and_can_be_marked_read() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");
    approve_leave_request(
        &mut store,
        &admin,
        &filed.request_id,
        &DecisionRequest::default(),
        &context_at(1),
    )
    .unwrap();

    let inbox: NotificationsResponse = list_notifications(&mut store, &alice).unwrap();
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications[0].title, "Leave request approved");

    let notification_id: String = inbox.notifications[0].notification_id.clone();
    let read: NotificationInfo =
        mark_notification_read(&mut store, &alice, &notification_id).unwrap();
    assert!(read.is_read);

    let inbox: NotificationsResponse = list_notifications(&mut store, &alice).unwrap();
    assert_eq!(inbox.unread_count, 0);
    assert!(inbox.notifications[0].is_read);

    let admin_inbox: NotificationsResponse = list_notifications(&mut store, &admin).unwrap();
    assert!(admin_inbox.notifications.is_empty());
}

#[test]
fn test_only_recipient_may_mark_notification_read() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");
    reject_leave_request(
        &mut store,
        &admin,
        &filed.request_id,
        &DecisionRequest::default(),
        &context_at(1),
    )
    .unwrap();
    let notification_id: String = list_notifications(&mut store, &alice).unwrap().notifications
        [0]
    .notification_id
    .clone();

    let err: ApiError =
        mark_notification_read(&mut store, &admin, &notification_id).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));

    let missing: ApiError = mark_notification_read(&mut store, &alice, "ghost").unwrap_err();
    assert_eq!(missing.kind(), Some(ErrorKind::NotFound));
}

// ============================================================================
// User directory
// ============================================================================

fn registration(user_id: &str, email: &str, role: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        user_id: user_id.to_string(),
        name: String::from("Carol"),
        email: email.to_string(),
        role: role.to_string(),
    }
}

#[test]
fn test_admin_registers_user() {
    let mut store: InMemoryPersistence = create_test_store();
    let admin: CurrentActor = actor(&mut store, "admin");

    let info: UserInfo = register_user(
        &mut store,
        &admin,
        &registration("carol", "carol@example.com", "user"),
    )
    .unwrap();
    assert_eq!(info.role, Role::User);

    let listing: ListUsersResponse = list_users(&mut store, &admin).unwrap();
    let ids: Vec<&str> = listing.users.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["admin", "alice", "bob", "carol"]);

    let carol: CurrentActor = actor(&mut store, "carol");
    assert_eq!(carol.name, "Carol");
}

#[test]
fn test_register_user_validates_input() {
    let mut store: InMemoryPersistence = create_test_store();
    let admin: CurrentActor = actor(&mut store, "admin");

    let bad_email: ApiError =
        register_user(&mut store, &admin, &registration("carol", "carol", "user")).unwrap_err();
    assert!(matches!(
        bad_email,
        ApiError::InvalidInput { ref field, .. } if field == "email"
    ));

    let bad_role: ApiError = register_user(
        &mut store,
        &admin,
        &registration("carol", "carol@example.com", "owner"),
    )
    .unwrap_err();
    assert!(matches!(
        bad_role,
        ApiError::InvalidInput { ref field, .. } if field == "role"
    ));

    let duplicate: ApiError = register_user(
        &mut store,
        &admin,
        &registration("alice", "alice@example.com", "user"),
    )
    .unwrap_err();
    assert_eq!(duplicate.kind(), Some(ErrorKind::Conflict));
}

#[test]
fn test_user_cannot_manage_directory() {
    let mut store: InMemoryPersistence = create_test_store();
    let alice: CurrentActor = actor(&mut store, "alice");

    assert!(register_user(
        &mut store,
        &alice,
        &registration("carol", "carol@example.com", "user")
    )
    .is_err());
    let err: ApiError = list_users(&mut store, &alice).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
}

// ============================================================================
// Error translation
// ============================================================================

#[test]
fn test_concurrent_modification_maps_to_conflict() {
    let err: ApiError = translate_persistence_error(PersistenceError::Conflict {
        request_id: String::from("r1"),
    });

    assert_eq!(err.kind(), Some(ErrorKind::Conflict));
    assert_eq!(
        err.to_string(),
        "Leave request r1 was modified concurrently; reload and retry"
    );
}
