// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timeoff::CurrentActor;
use timeoff_domain::Role;
use timeoff_persistence::InMemoryPersistence;

use super::helpers::{actor, create_test_store};
use crate::error::{ApiError, AuthError};
use crate::{AuthorizationService, authenticate};

#[test]
fn test_authenticate_resolves_known_user() {
    let mut store: InMemoryPersistence = create_test_store();

    let resolved: CurrentActor = authenticate(&mut store, Some("  admin ")).unwrap();

    assert_eq!(resolved.id, "admin");
    assert_eq!(resolved.name, "Dana Admin");
    assert_eq!(resolved.role, Role::Admin);
}

#[test]
fn test_authenticate_without_identity_fails() {
    let mut store: InMemoryPersistence = create_test_store();

    assert!(matches!(
        authenticate(&mut store, None),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(matches!(
        authenticate(&mut store, Some("   ")),
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_authenticate_unknown_user_fails() {
    let mut store: InMemoryPersistence = create_test_store();

    let err: AuthError = authenticate(&mut store, Some("mallory")).unwrap_err();

    assert_eq!(
        err,
        AuthError::AuthenticationFailed {
            reason: String::from("unknown user 'mallory'"),
        }
    );
}

#[test]
fn test_non_admin_cannot_request_cap_override() {
    let mut store: InMemoryPersistence = create_test_store();
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");

    assert!(AuthorizationService::authorize_cap_override(&alice, false).is_ok());
    assert!(AuthorizationService::authorize_cap_override(&admin, true).is_ok());

    let err: ApiError = AuthorizationService::authorize_cap_override(&alice, true)
        .unwrap_err()
        .into();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("override_caps"),
            message: String::from("'override_caps' requires Admin role"),
        }
    );
}

#[test]
fn test_history_visible_to_self_and_admin_only() {
    let mut store: InMemoryPersistence = create_test_store();
    let alice: CurrentActor = actor(&mut store, "alice");
    let admin: CurrentActor = actor(&mut store, "admin");

    assert!(AuthorizationService::authorize_view_history(&alice, "alice").is_ok());
    assert!(AuthorizationService::authorize_view_history(&admin, "alice").is_ok());
    assert!(AuthorizationService::authorize_view_history(&alice, "bob").is_err());
}
