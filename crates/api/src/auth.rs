// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resolving the current actor and coarse role checks.
//!
//! Transport layers supply an identifier for the caller; this module looks
//! it up in the user directory and produces the [`CurrentActor`] the
//! lifecycle rules operate on. Credential verification is out of scope.

use timeoff::CurrentActor;
use timeoff_domain::User;
use timeoff_persistence::UserRepository;
use tracing::debug;

use crate::error::AuthError;

/// Resolves `actor_id` against the user directory.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if no identifier was supplied or it names
/// no known user, and `DirectoryUnavailable` if the lookup itself fails.
pub fn authenticate<S: UserRepository + ?Sized>(
    store: &mut S,
    actor_id: Option<&str>,
) -> Result<CurrentActor, AuthError> {
    let actor_id: &str = actor_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("no actor identity supplied"),
        })?;

    let user: User = store
        .get_user(actor_id)
        .map_err(|e| AuthError::DirectoryUnavailable(e.to_string()))?
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: format!("unknown user '{actor_id}'"),
        })?;

    debug!(actor_id, role = %user.role, "Resolved actor");
    Ok(CurrentActor::from(&user))
}

/// Role checks for directory maintenance, which the leave request
/// capability table does not cover.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only admins may register users.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_register_user(actor: &CurrentActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "register_user")
    }

    /// Only admins may list the user directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_list_users(actor: &CurrentActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_users")
    }

    /// Admins may read anyone's history; users only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-admin asks for someone else's history.
    pub fn authorize_view_history(actor: &CurrentActor, user_id: &str) -> Result<(), AuthError> {
        if actor.id == user_id {
            return Ok(());
        }
        Self::require_admin(actor, "view_leave_history")
    }

    /// Only admins may ask for the cap override explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-admin sets the override flag.
    pub fn authorize_cap_override(actor: &CurrentActor, requested: bool) -> Result<(), AuthError> {
        if !requested {
            return Ok(());
        }
        Self::require_admin(actor, "override_caps")
    }

    fn require_admin(actor: &CurrentActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            })
        }
    }
}
