// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities are read off the same rules that guard the operations, so
//! a button shown as enabled is one the server will accept, barring a
//! concurrent change.

use timeoff::{CurrentActor, Operation, can_perform};
use timeoff_domain::LeaveRequest;

use crate::request_response::{Capability, RequestCapabilities};

fn capability(actor: &CurrentActor, operation: Operation, request: &LeaveRequest) -> Capability {
    Capability::from_bool(can_perform(actor, operation, Some(request)))
}

/// Computes what `actor` may currently do with `request`.
#[must_use]
pub fn compute_request_capabilities(
    actor: &CurrentActor,
    request: &LeaveRequest,
) -> RequestCapabilities {
    RequestCapabilities {
        can_update: capability(actor, Operation::Update, request),
        can_delete: capability(actor, Operation::Delete, request),
        can_approve: capability(actor, Operation::Approve, request),
        can_reject: capability(actor, Operation::Reject, request),
        can_comment: capability(actor, Operation::AddComment, request),
    }
}
