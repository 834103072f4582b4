// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One handler per exposed operation.
//!
//! Handlers translate DTOs into lifecycle commands, run them through the
//! core rules against the current stored state, commit the result through
//! the store port and translate the outcome back into DTOs. They are
//! transport-agnostic: the caller supplies the resolved actor and, for
//! mutations, the policy and clock.

use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use timeoff::{
    Command, CurrentActor, LeaveReport, Operation, TransitionContext, TransitionResult, apply,
    authorize, authorize_global, authorize_notification, employee_leave_history,
    generate_report,
};
use timeoff_audit::{AuditAction, AuditFilter, AuditLogEntry, TargetType};
use timeoff_domain::{
    Comment, LeaveDraft, LeaveRequest, LeaveType, Notification, Role, User,
    parse_calendar_date, validate_user_fields,
};
use timeoff_persistence::{LeaveStore, PersistenceError};
use tracing::{debug, info, warn};

use crate::auth::AuthorizationService;
use crate::capabilities::compute_request_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AddCommentRequest, AuditLogEntryInfo, AuditLogQuery, AuditLogResponse, CommentInfo,
    CreateLeaveRequestRequest, DecisionRequest, DeleteLeaveRequestResponse,
    LeaveRequestInfo, LeaveRequestMutationResponse, ListLeaveRequestsResponse,
    ListUsersResponse, NotificationInfo, NotificationsResponse, RegisterUserRequest,
    UpdateLeaveRequestRequest, UserInfo,
};

// ========================================================================
// Conversions
// ========================================================================

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn comment_info(comment: &Comment) -> Result<CommentInfo, ApiError> {
    Ok(CommentInfo {
        comment_id: comment.comment_id.clone(),
        author_id: comment.author_id.clone(),
        author_name: comment.author_name.clone(),
        text: comment.text.clone(),
        created_at: format_timestamp(comment.created_at)?,
    })
}

fn request_info(
    actor: &CurrentActor,
    request: &LeaveRequest,
) -> Result<LeaveRequestInfo, ApiError> {
    Ok(LeaveRequestInfo {
        request_id: request.request_id.clone(),
        requester_id: request.requester_id.clone(),
        requester_name: request.requester_name.clone(),
        leave_type: request.leave_type,
        start_date: request.start_date.to_string(),
        end_date: request.end_date.to_string(),
        duration_days: request.duration_days(),
        reason: request.reason.clone(),
        status: request.status,
        comments: request
            .comments
            .iter()
            .map(comment_info)
            .collect::<Result<_, _>>()?,
        version: request.version,
        created_at: format_timestamp(request.created_at)?,
        updated_at: format_timestamp(request.updated_at)?,
        capabilities: compute_request_capabilities(actor, request),
    })
}

fn request_list(
    actor: &CurrentActor,
    requests: &[LeaveRequest],
) -> Result<ListLeaveRequestsResponse, ApiError> {
    Ok(ListLeaveRequestsResponse {
        requests: requests
            .iter()
            .map(|request| request_info(actor, request))
            .collect::<Result<_, _>>()?,
    })
}

fn audit_entry_info(entry: &AuditLogEntry) -> Result<AuditLogEntryInfo, ApiError> {
    Ok(AuditLogEntryInfo {
        entry_id: entry.entry_id.ok_or_else(|| ApiError::Internal {
            message: String::from("Stored audit entry has no id"),
        })?,
        action: entry.action,
        target_id: entry.target_id.clone(),
        target_type: entry.target_type,
        actor_id: entry.actor.id.clone(),
        actor_name: entry.actor.name.clone(),
        details: entry.details.clone(),
        timestamp: format_timestamp(entry.timestamp)?,
    })
}

fn notification_info(notification: &Notification) -> Result<NotificationInfo, ApiError> {
    Ok(NotificationInfo {
        notification_id: notification.notification_id.clone(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        is_read: notification.is_read,
        created_at: format_timestamp(notification.created_at)?,
    })
}

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        user_id: user.user_id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    }
}

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_calendar_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_draft(request: &CreateLeaveRequestRequest) -> Result<LeaveDraft, ApiError> {
    let leave_type: LeaveType = request
        .leave_type
        .trim()
        .parse()
        .map_err(translate_domain_error)?;
    let start_date: Date = parse_date_field("start_date", &request.start_date)?;
    let end_date: Date = parse_date_field("end_date", &request.end_date)?;

    Ok(LeaveDraft::new(
        leave_type,
        start_date,
        end_date,
        request.reason.clone(),
    ))
}

// ========================================================================
// Shared lifecycle plumbing
// ========================================================================

fn load_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    request_id: &str,
) -> Result<Option<LeaveRequest>, ApiError> {
    store
        .get_leave_request(request_id)
        .map_err(translate_persistence_error)
}

/// Runs `command` against `current` and commits the outcome.
fn execute<S: LeaveStore + ?Sized>(
    store: &mut S,
    current: Option<&LeaveRequest>,
    command: Command,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<(TransitionResult, i64), ApiError> {
    let operation: Operation = command.operation();

    let result: TransitionResult = apply(current, command, actor, context).map_err(|err| {
        warn!(
            actor_id = %actor.id,
            %operation,
            kind = %err.kind(),
            error = %err,
            "Leave request operation refused"
        );
        translate_core_error(err)
    })?;

    let entry_id: i64 = store.commit_transition(&result).map_err(|err| {
        if let PersistenceError::Conflict { request_id } = &err {
            warn!(actor_id = %actor.id, %operation, %request_id, "Concurrent modification");
        }
        translate_persistence_error(err)
    })?;

    info!(
        actor_id = %actor.id,
        %operation,
        request_id = result.request_id(),
        entry_id,
        "Leave request transition committed"
    );
    Ok((result, entry_id))
}

fn mutation_response(
    actor: &CurrentActor,
    result: &TransitionResult,
    audit_entry_id: i64,
    message: &str,
) -> Result<LeaveRequestMutationResponse, ApiError> {
    let request: &LeaveRequest = result.request().ok_or_else(|| ApiError::Internal {
        message: String::from("Transition left no request to report"),
    })?;
    Ok(LeaveRequestMutationResponse {
        request: request_info(actor, request)?,
        audit_entry_id,
        message: message.to_string(),
    })
}

fn run_on_existing<S: LeaveStore + ?Sized>(
    store: &mut S,
    request_id: &str,
    command: Command,
    actor: &CurrentActor,
    context: &TransitionContext,
) -> Result<(TransitionResult, i64), ApiError> {
    let current: Option<LeaveRequest> = load_request(store, request_id)?;
    execute(store, current.as_ref(), command, actor, context)
}

// ========================================================================
// Lifecycle operations
// ========================================================================

/// Files a new leave request for the actor.
///
/// # Arguments
///
/// * `store` - The store to commit to
/// * `actor` - The resolved caller
/// * `request` - The proposed request
/// * `context` - Policy and clock
///
/// # Errors
///
/// Returns an error if:
/// - A field is malformed
/// - A non-admin asks for the cap override
/// - The date range is inverted or the duration exceeds the type's cap
/// - The store fails
pub fn create_leave_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request: &CreateLeaveRequestRequest,
    context: &TransitionContext,
) -> Result<LeaveRequestMutationResponse, ApiError> {
    AuthorizationService::authorize_cap_override(actor, request.override_caps)?;
    let draft: LeaveDraft = parse_draft(request)?;

    let (result, entry_id): (TransitionResult, i64) = execute(
        store,
        None,
        Command::CreateLeaveRequest {
            draft,
            override_caps: request.override_caps,
        },
        actor,
        context,
    )?;
    mutation_response(actor, &result, entry_id, "Leave request submitted")
}

/// Edits the dates, type or reason of the actor's own pending request.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The actor is not the owner, or asks for the override without being admin
/// - The request is no longer pending
/// - The new content violates the leave policy
/// - Another change was committed first (`Conflict`)
pub fn update_leave_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request_id: &str,
    request: &UpdateLeaveRequestRequest,
    context: &TransitionContext,
) -> Result<LeaveRequestMutationResponse, ApiError> {
    AuthorizationService::authorize_cap_override(actor, request.override_caps)?;
    let draft: LeaveDraft = parse_draft(request)?;

    let (result, entry_id): (TransitionResult, i64) = run_on_existing(
        store,
        request_id,
        Command::UpdateLeaveRequest {
            request_id: request_id.to_string(),
            draft,
            override_caps: request.override_caps,
        },
        actor,
        context,
    )?;
    mutation_response(actor, &result, entry_id, "Leave request updated")
}

/// Approves a pending request. Admin only.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is not an
/// admin, the request is already decided, or a concurrent decision won.
pub fn approve_leave_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request_id: &str,
    request: &DecisionRequest,
    context: &TransitionContext,
) -> Result<LeaveRequestMutationResponse, ApiError> {
    let (result, entry_id): (TransitionResult, i64) = run_on_existing(
        store,
        request_id,
        Command::ApproveLeaveRequest {
            request_id: request_id.to_string(),
            comment: request.comment.clone(),
        },
        actor,
        context,
    )?;
    mutation_response(actor, &result, entry_id, "Leave request approved")
}

/// Rejects a pending request. Admin only.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is not an
/// admin, the request is already decided, or a concurrent decision won.
pub fn reject_leave_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request_id: &str,
    request: &DecisionRequest,
    context: &TransitionContext,
) -> Result<LeaveRequestMutationResponse, ApiError> {
    let (result, entry_id): (TransitionResult, i64) = run_on_existing(
        store,
        request_id,
        Command::RejectLeaveRequest {
            request_id: request_id.to_string(),
            comment: request.comment.clone(),
        },
        actor,
        context,
    )?;
    mutation_response(actor, &result, entry_id, "Leave request rejected")
}

/// Removes a request together with its comments.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is neither an
/// admin nor the owner of a pending request, or a concurrent change won.
pub fn delete_leave_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request_id: &str,
    context: &TransitionContext,
) -> Result<DeleteLeaveRequestResponse, ApiError> {
    let (result, entry_id): (TransitionResult, i64) = run_on_existing(
        store,
        request_id,
        Command::DeleteLeaveRequest {
            request_id: request_id.to_string(),
        },
        actor,
        context,
    )?;
    Ok(DeleteLeaveRequestResponse {
        request_id: result.request_id().to_string(),
        audit_entry_id: entry_id,
        message: String::from("Leave request deleted"),
    })
}

/// Appends a comment. Owner or admin, any status.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor may not read
/// it, the text is blank, or a concurrent change won.
pub fn add_comment<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request_id: &str,
    request: &AddCommentRequest,
    context: &TransitionContext,
) -> Result<LeaveRequestMutationResponse, ApiError> {
    let (result, entry_id): (TransitionResult, i64) = run_on_existing(
        store,
        request_id,
        Command::AddComment {
            request_id: request_id.to_string(),
            text: request.text.clone(),
        },
        actor,
        context,
    )?;
    mutation_response(actor, &result, entry_id, "Comment added")
}

// ========================================================================
// Reads
// ========================================================================

/// Returns one request with the actor's capabilities on it.
///
/// Requests the actor may not read are reported as not found.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the request is missing or hidden from the
/// actor, or an internal error if the store fails.
pub fn get_leave_request<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request_id: &str,
) -> Result<LeaveRequestInfo, ApiError> {
    let request: LeaveRequest = load_request(store, request_id)?
        .filter(|request| authorize(actor, Operation::Read, request).is_ok())
        .ok_or_else(|| {
            debug!(actor_id = %actor.id, request_id, "Leave request not visible to actor");
            ApiError::leave_request_not_found(request_id)
        })?;
    request_info(actor, &request)
}

/// Lists the actor's own requests, oldest first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_my_requests<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
) -> Result<ListLeaveRequestsResponse, ApiError> {
    let requests: Vec<LeaveRequest> = store
        .list_leave_requests_for_user(&actor.id)
        .map_err(translate_persistence_error)?;
    request_list(actor, &requests)
}

/// Lists every request. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the store fails.
pub fn list_all_requests<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
) -> Result<ListLeaveRequestsResponse, ApiError> {
    authorize_global(actor, Operation::ReadAll).map_err(translate_core_error)?;
    let requests: Vec<LeaveRequest> = store
        .list_leave_requests()
        .map_err(translate_persistence_error)?;
    request_list(actor, &requests)
}

/// Lists `user_id`'s requests ordered by start date.
///
/// # Errors
///
/// Returns an error if a non-admin asks about someone else, or the store
/// fails.
pub fn get_employee_leave_history<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    user_id: &str,
) -> Result<ListLeaveRequestsResponse, ApiError> {
    AuthorizationService::authorize_view_history(actor, user_id)?;
    let requests: Vec<LeaveRequest> = store
        .list_leave_requests_for_user(user_id)
        .map_err(translate_persistence_error)?;
    request_list(actor, &employee_leave_history(&requests, user_id))
}

/// Summary statistics over every request. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the store fails.
pub fn get_leave_report<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
) -> Result<LeaveReport, ApiError> {
    authorize_global(actor, Operation::ReadAll).map_err(translate_core_error)?;
    let requests: Vec<LeaveRequest> = store
        .list_leave_requests()
        .map_err(translate_persistence_error)?;
    Ok(generate_report(&requests))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_time_bound(
    field: &str,
    value: &str,
    end_of_day: bool,
) -> Result<OffsetDateTime, ApiError> {
    if let Ok(timestamp) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(timestamp);
    }
    let invalid = || ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{value}' is neither an RFC 3339 timestamp nor a YYYY-MM-DD date"),
    };
    let date: Date = parse_calendar_date(value).map_err(|_| invalid())?;
    let bound: PrimitiveDateTime = if end_of_day {
        date.with_hms_nano(23, 59, 59, 999_999_999)
            .map_err(|_| invalid())?
    } else {
        date.midnight()
    };
    Ok(bound.assume_utc())
}

/// Builds an [`AuditFilter`] from query parameters.
///
/// Blank parameters are ignored. A bare date as the end bound covers that
/// whole day.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first malformed parameter.
pub fn parse_audit_filter(query: &AuditLogQuery) -> Result<AuditFilter, ApiError> {
    let action: Option<AuditAction> = present(query.action.as_deref())
        .map(|value| {
            value.parse::<AuditAction>().map_err(|message| ApiError::InvalidInput {
                field: String::from("action"),
                message,
            })
        })
        .transpose()?;
    let target_type: Option<TargetType> = present(query.target_type.as_deref())
        .map(|value| {
            value.parse::<TargetType>().map_err(|message| ApiError::InvalidInput {
                field: String::from("target_type"),
                message,
            })
        })
        .transpose()?;
    let start: Option<OffsetDateTime> = present(query.start_date.as_deref())
        .map(|value| parse_time_bound("start_date", value, false))
        .transpose()?;
    let end: Option<OffsetDateTime> = present(query.end_date.as_deref())
        .map(|value| parse_time_bound("end_date", value, true))
        .transpose()?;

    Ok(AuditFilter {
        action,
        user_id: present(query.user_id.as_deref()).map(ToString::to_string),
        target_type,
        target_id: present(query.target_id.as_deref()).map(ToString::to_string),
        start,
        end,
    })
}

/// Lists audit entries matching `query`, in application order. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a parameter is malformed,
/// or the store fails.
pub fn list_audit_logs<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    query: &AuditLogQuery,
) -> Result<AuditLogResponse, ApiError> {
    authorize_global(actor, Operation::ReadAll).map_err(translate_core_error)?;
    let filter: AuditFilter = parse_audit_filter(query)?;
    let entries: Vec<AuditLogEntry> = store
        .list_audit_entries(&filter)
        .map_err(translate_persistence_error)?;
    Ok(AuditLogResponse {
        entries: entries
            .iter()
            .map(audit_entry_info)
            .collect::<Result<_, _>>()?,
    })
}

// ========================================================================
// Notifications
// ========================================================================

/// The actor's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_notifications<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
) -> Result<NotificationsResponse, ApiError> {
    let notifications: Vec<Notification> = store
        .list_notifications_for_user(&actor.id)
        .map_err(translate_persistence_error)?;
    Ok(NotificationsResponse {
        unread_count: notifications.iter().filter(|n| !n.is_read).count(),
        notifications: notifications
            .iter()
            .map(notification_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Marks one of the actor's notifications as read.
///
/// # Errors
///
/// Returns an error if the notification does not exist, belongs to someone
/// else, or the store fails.
pub fn mark_notification_read<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    notification_id: &str,
) -> Result<NotificationInfo, ApiError> {
    let not_found = || ApiError::ResourceNotFound {
        resource_type: String::from("Notification"),
        message: format!("Notification {notification_id} does not exist"),
    };

    let mut notification: Notification = store
        .get_notification(notification_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(not_found)?;
    authorize_notification(actor, &notification).map_err(|_| ApiError::Unauthorized {
        action: Operation::MarkNotificationRead.as_str().to_string(),
        message: String::from("Only the recipient may mark a notification as read"),
    })?;

    store
        .mark_notification_read(notification_id)
        .map_err(translate_persistence_error)?;
    notification.is_read = true;
    debug!(actor_id = %actor.id, notification_id, "Notification marked read");
    notification_info(&notification)
}

// ========================================================================
// User directory
// ========================================================================

/// Adds a user to the directory. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the id is already taken.
pub fn register_user<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
    request: &RegisterUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_register_user(actor)?;

    let user_id: &str = request.user_id.trim();
    let name: &str = request.name.trim();
    let email: &str = request.email.trim();
    validate_user_fields(user_id, name, email).map_err(translate_domain_error)?;
    let role: Role = request
        .role
        .trim()
        .parse()
        .map_err(translate_domain_error)?;

    let user: User = User::new(
        user_id.to_string(),
        name.to_string(),
        email.to_string(),
        role,
    );
    store.create_user(&user).map_err(translate_persistence_error)?;

    info!(actor_id = %actor.id, user_id, %role, "User registered");
    Ok(user_info(&user))
}

/// Lists the directory. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the store fails.
pub fn list_users<S: LeaveStore + ?Sized>(
    store: &mut S,
    actor: &CurrentActor,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_list_users(actor)?;
    let users: Vec<User> = store.list_users().map_err(translate_persistence_error)?;
    Ok(ListUsersResponse {
        users: users.iter().map(user_info).collect(),
    })
}
