// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;
use time::macros::datetime;
use timeoff::{CurrentActor, TransitionContext};
use timeoff_domain::{LeavePolicy, Role, User};
use timeoff_persistence::{InMemoryPersistence, UserRepository};

use crate::authenticate;
use crate::handlers::create_leave_request;
use crate::request_response::{CreateLeaveRequestRequest, LeaveRequestInfo};

/// A store whose directory holds alice, bob and an admin.
pub fn create_test_store() -> InMemoryPersistence {
    let mut store: InMemoryPersistence = InMemoryPersistence::new();
    for (id, name, role) in [
        ("alice", "Alice", Role::User),
        ("bob", "Bob", Role::User),
        ("admin", "Dana Admin", Role::Admin),
    ] {
        store
            .create_user(&User::new(
                id.to_string(),
                name.to_string(),
                format!("{id}@example.com"),
                role,
            ))
            .unwrap();
    }
    store
}

pub fn actor(store: &mut InMemoryPersistence, id: &str) -> CurrentActor {
    authenticate(store, Some(id)).expect("test user should resolve")
}

/// A context whose clock reads `minutes` after 2023-06-01 09:00 UTC.
pub fn context_at(minutes: i64) -> TransitionContext {
    TransitionContext::new(
        LeavePolicy::default(),
        datetime!(2023-06-01 09:00 UTC) + Duration::minutes(minutes),
    )
}

pub fn leave_body(leave_type: &str, start: &str, end: &str) -> CreateLeaveRequestRequest {
    CreateLeaveRequestRequest {
        leave_type: leave_type.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        reason: Some(String::from("Family trip")),
        override_caps: false,
    }
}

pub fn vacation_body() -> CreateLeaveRequestRequest {
    leave_body("vacation", "2023-07-03", "2023-07-07")
}

/// Files a vacation request as `owner_id` at `minutes`.
pub fn file_vacation(
    store: &mut InMemoryPersistence,
    owner_id: &str,
    minutes: i64,
) -> LeaveRequestInfo {
    let owner: CurrentActor = actor(store, owner_id);
    create_leave_request(store, &owner, &vacation_body(), &context_at(minutes))
        .expect("filing should succeed")
        .request
}
