// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read visibility for single requests, listings and history.

use timeoff::{CurrentActor, ErrorKind};
use timeoff_persistence::InMemoryPersistence;

use super::helpers::{actor, context_at, create_test_store, file_vacation, leave_body};
use crate::error::ApiError;
use crate::handlers::{
    create_leave_request, get_employee_leave_history, get_leave_request, list_all_requests,
    list_my_requests,
};
use crate::request_response::{Capability, LeaveRequestInfo, ListLeaveRequestsResponse};

#[test]
fn test_owner_and_admin_can_read_request() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");

    let as_owner: LeaveRequestInfo =
        get_leave_request(&mut store, &alice, &filed.request_id).unwrap();
    let as_admin: LeaveRequestInfo =
        get_leave_request(&mut store, &admin, &filed.request_id).unwrap();

    assert_eq!(as_owner.request_id, filed.request_id);
    assert_eq!(as_owner.capabilities.can_approve, Capability::Denied);
    assert_eq!(as_admin.capabilities.can_approve, Capability::Allowed);
    assert_eq!(as_admin.capabilities.can_update, Capability::Denied);
}

#[test]
fn test_stranger_sees_not_found() {
    let mut store: InMemoryPersistence = create_test_store();
    let filed: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    let bob: CurrentActor = actor(&mut store, "bob");

    let hidden: ApiError = get_leave_request(&mut store, &bob, &filed.request_id).unwrap_err();
    let missing: ApiError = get_leave_request(&mut store, &bob, "ghost").unwrap_err();

    assert_eq!(hidden.kind(), Some(ErrorKind::NotFound));
    assert_eq!(missing.kind(), Some(ErrorKind::NotFound));
}

#[test]
fn test_list_my_requests_only_returns_own() {
    let mut store: InMemoryPersistence = create_test_store();
    let first: LeaveRequestInfo = file_vacation(&mut store, "alice", 0);
    file_vacation(&mut store, "bob", 1);
    let second: LeaveRequestInfo = file_vacation(&mut store, "alice", 2);
    let alice: CurrentActor = actor(&mut store, "alice");

    let response: ListLeaveRequestsResponse = list_my_requests(&mut store, &alice).unwrap();

    let ids: Vec<&str> = response
        .requests
        .iter()
        .map(|r| r.request_id.as_str())
        .collect();
    assert_eq!(ids, vec![first.request_id.as_str(), second.request_id.as_str()]);
}

#[test]
fn test_list_all_requires_admin() {
    let mut store: InMemoryPersistence = create_test_store();
    file_vacation(&mut store, "alice", 0);
    file_vacation(&mut store, "bob", 1);
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");

    let err: ApiError = list_all_requests(&mut store, &alice).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));

    let response: ListLeaveRequestsResponse = list_all_requests(&mut store, &admin).unwrap();
    assert_eq!(response.requests.len(), 2);
}

#[test]
fn test_history_is_ordered_by_start_date() {
    let mut store: InMemoryPersistence = create_test_store();
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");
    create_leave_request(
        &mut store,
        &alice,
        &leave_body("vacation", "2023-09-04", "2023-09-08"),
        &context_at(0),
    )
    .unwrap();
    create_leave_request(
        &mut store,
        &alice,
        &leave_body("personal", "2023-02-01", "2023-02-01"),
        &context_at(1),
    )
    .unwrap();

    let response: ListLeaveRequestsResponse =
        get_employee_leave_history(&mut store, &admin, "alice").unwrap();

    let starts: Vec<&str> = response
        .requests
        .iter()
        .map(|r| r.start_date.as_str())
        .collect();
    assert_eq!(starts, vec!["2023-02-01", "2023-09-04"]);
}

#[test]
fn test_history_of_someone_else_is_unauthorized_for_users() {
    let mut store: InMemoryPersistence = create_test_store();
    file_vacation(&mut store, "alice", 0);
    let bob: CurrentActor = actor(&mut store, "bob");

    let err: ApiError = get_employee_leave_history(&mut store, &bob, "alice").unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
}
