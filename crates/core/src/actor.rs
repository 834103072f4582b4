// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timeoff_audit::Actor;
use timeoff_domain::{Role, User};

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentActor {
    /// The user's id.
    pub id: String,
    /// The user's display name.
    pub name: String,
    /// The user's role.
    pub role: Role,
}

impl CurrentActor {
    /// Creates a new `CurrentActor`.
    ///
    /// # Arguments
    ///
    /// * `id` - The user's id
    /// * `name` - The user's display name
    /// * `role` - The user's role
    #[must_use]
    pub const fn new(id: String, name: String, role: Role) -> Self {
        Self { id, name, role }
    }

    /// Returns true if the actor holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Converts this actor into the audit trail's actor snapshot.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.name.clone())
    }
}

impl From<&User> for CurrentActor {
    fn from(user: &User) -> Self {
        Self::new(user.user_id.clone(), user.name.clone(), user.role)
    }
}
