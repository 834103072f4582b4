// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timeoff_audit::{AuditAction, AuditLogEntry, TargetType};
use timeoff_domain::{
    Comment, LeaveDraft, LeaveRequest, LeaveStatus, Notification, normalize_comment_text,
    normalize_optional_text,
};
use uuid::Uuid;

use crate::actor::CurrentActor;
use crate::authorization::{Operation, authorize, authorize_global};
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{RequestChange, TransitionContext, TransitionResult};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Applies a lifecycle command, producing the request change, its audit
/// entry and any notification.
///
/// This function is pure with respect to storage: it neither reads nor
/// writes anything. The caller loads `current`, then commits the returned
/// result atomically.
///
/// # Arguments
///
/// * `current` - The stored request the command targets (`None` for create,
///   or when the target does not exist)
/// * `command` - The command to apply
/// * `actor` - The acting user
/// * `context` - Policy and clock
///
/// # Errors
///
/// Returns an error if:
/// - The target request does not exist (`NotFound`)
/// - The actor may not perform the operation (`Unauthorized`)
/// - The request's status does not allow the operation (`InvalidState`)
/// - The proposed content violates the leave policy or is malformed
pub fn apply(
    current: Option<&LeaveRequest>,
    command: Command,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateLeaveRequest {
            draft,
            override_caps,
        } => create(&draft, override_caps, actor, context),
        Command::UpdateLeaveRequest {
            request_id,
            draft,
            override_caps,
        } => {
            let request: &LeaveRequest = require_target(current, &request_id)?;
            update(request, &draft, override_caps, actor, context)
        }
        Command::ApproveLeaveRequest {
            request_id,
            comment,
        } => {
            let request: &LeaveRequest = require_target(current, &request_id)?;
            decide(request, LeaveStatus::Approved, comment.as_deref(), actor, context)
        }
        Command::RejectLeaveRequest {
            request_id,
            comment,
        } => {
            let request: &LeaveRequest = require_target(current, &request_id)?;
            decide(request, LeaveStatus::Rejected, comment.as_deref(), actor, context)
        }
        Command::DeleteLeaveRequest { request_id } => {
            let request: &LeaveRequest = require_target(current, &request_id)?;
            delete(request, actor, context)
        }
        Command::AddComment { request_id, text } => {
            let request: &LeaveRequest = require_target(current, &request_id)?;
            add_comment(request, &text, actor, context)
        }
    }
}

fn require_target<'a>(
    current: Option<&'a LeaveRequest>,
    request_id: &str,
) -> Result<&'a LeaveRequest, CoreError> {
    current
        .filter(|request| request.request_id == request_id)
        .ok_or_else(|| CoreError::NotFound {
            request_id: request_id.to_string(),
        })
}

fn build_audit_entry(
    action: AuditAction,
    request: &LeaveRequest,
    actor: &CurrentActor,
    details: String,
    context: &TransitionContext,
) -> AuditLogEntry {
    AuditLogEntry::new(
        action,
        request.request_id.clone(),
        TargetType::LeaveRequest,
        actor.to_audit_actor(),
        details,
        context.now,
    )
}

fn create(
    draft: &LeaveDraft,
    override_caps: bool,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    authorize_global(actor, Operation::Create)?;
    context.policy.validate(
        draft.leave_type,
        draft.start_date,
        draft.end_date,
        actor.is_admin() || override_caps,
    )?;

    let request: LeaveRequest = LeaveRequest {
        request_id: new_id(),
        requester_id: actor.id.clone(),
        requester_name: actor.name.clone(),
        leave_type: draft.leave_type,
        start_date: draft.start_date,
        end_date: draft.end_date,
        reason: normalize_optional_text(draft.reason.as_deref()),
        status: LeaveStatus::Pending,
        comments: Vec::new(),
        version: 1,
        created_at: context.now,
        updated_at: context.now,
    };

    let details: String = format!(
        "Created {} leave request from {} to {}",
        request.leave_type, request.start_date, request.end_date
    );
    let audit_entry: AuditLogEntry =
        build_audit_entry(AuditAction::Create, &request, actor, details, context);

    Ok(TransitionResult {
        change: RequestChange::Insert(request),
        audit_entry,
        notification: None,
    })
}

fn update(
    current: &LeaveRequest,
    draft: &LeaveDraft,
    override_caps: bool,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    authorize(actor, Operation::Update, current)?;
    context.policy.validate(
        draft.leave_type,
        draft.start_date,
        draft.end_date,
        actor.is_admin() || override_caps,
    )?;

    let mut request: LeaveRequest = current.clone();
    request.leave_type = draft.leave_type;
    request.start_date = draft.start_date;
    request.end_date = draft.end_date;
    request.reason = normalize_optional_text(draft.reason.as_deref());
    request.updated_at = context.now;
    request.version = current.version + 1;

    let details: String = format!(
        "Updated {} leave request from {} to {}",
        request.leave_type, request.start_date, request.end_date
    );
    let audit_entry: AuditLogEntry =
        build_audit_entry(AuditAction::Modify, &request, actor, details, context);

    Ok(TransitionResult {
        change: RequestChange::Update {
            request,
            expected_version: current.version,
            new_comment: None,
        },
        audit_entry,
        notification: None,
    })
}

fn decide(
    current: &LeaveRequest,
    outcome: LeaveStatus,
    comment: Option<&str>,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    let (operation, action, verb): (Operation, AuditAction, &str) = match outcome {
        LeaveStatus::Rejected => (Operation::Reject, AuditAction::Reject, "rejected"),
        _ => (Operation::Approve, AuditAction::Approve, "approved"),
    };

    authorize(actor, operation, current)?;
    if !current.status.can_transition_to(outcome) {
        return Err(CoreError::InvalidState {
            operation,
            status: current.status,
        });
    }

    let mut request: LeaveRequest = current.clone();
    request.status = outcome;
    request.updated_at = context.now;
    request.version = current.version + 1;

    let new_comment: Option<Comment> =
        normalize_optional_text(comment).map(|text| Comment {
            comment_id: new_id(),
            author_id: actor.id.clone(),
            author_name: actor.name.clone(),
            text,
            created_at: context.now,
        });
    if let Some(comment) = &new_comment {
        request.comments.push(comment.clone());
    }

    let details: String = match action {
        AuditAction::Reject => format!("Rejected leave request for {}", request.requester_name),
        _ => format!("Approved leave request for {}", request.requester_name),
    };
    let audit_entry: AuditLogEntry = build_audit_entry(action, &request, actor, details, context);

    let mut message: String = format!(
        "Your {} leave request from {} to {} was {verb} by {}.",
        request.leave_type, request.start_date, request.end_date, actor.name
    );
    if let Some(comment) = &new_comment {
        message.push_str(&format!(" Comment: {}", comment.text));
    }
    let notification: Notification = Notification::new(
        new_id(),
        request.requester_id.clone(),
        format!("Leave request {verb}"),
        message,
        context.now,
    );

    Ok(TransitionResult {
        change: RequestChange::Update {
            request,
            expected_version: current.version,
            new_comment,
        },
        audit_entry,
        notification: Some(notification),
    })
}

fn delete(
    current: &LeaveRequest,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    authorize(actor, Operation::Delete, current)?;

    // Written from the pre-removal snapshot.
    let details: String = format!(
        "Deleted {} leave request for {}",
        current.leave_type, current.requester_name
    );
    let audit_entry: AuditLogEntry =
        build_audit_entry(AuditAction::Delete, current, actor, details, context);

    Ok(TransitionResult {
        change: RequestChange::Remove {
            request_id: current.request_id.clone(),
            expected_version: current.version,
        },
        audit_entry,
        notification: None,
    })
}

fn add_comment(
    current: &LeaveRequest,
    text: &str,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<TransitionResult, CoreError> {
    authorize(actor, Operation::AddComment, current)?;
    let text: String = normalize_comment_text(text)?;

    let comment: Comment = Comment {
        comment_id: new_id(),
        author_id: actor.id.clone(),
        author_name: actor.name.clone(),
        text,
        created_at: context.now,
    };

    let mut request: LeaveRequest = current.clone();
    request.comments.push(comment.clone());
    request.updated_at = context.now;
    request.version = current.version + 1;

    let details: String = format!(
        "Added comment to leave request for {}",
        request.requester_name
    );
    let audit_entry: AuditLogEntry =
        build_audit_entry(AuditAction::Comment, &request, actor, details, context);

    Ok(TransitionResult {
        change: RequestChange::Update {
            request,
            expected_version: current.version,
            new_comment: Some(comment),
        },
        audit_entry,
        notification: None,
    })
}
