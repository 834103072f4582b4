// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP transport over the API handlers.
//!
//! The caller identifies themself with the `x-actor-id` header. Each
//! request holds the store lock for its whole load, decide and commit
//! sequence.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use timeoff::{CurrentActor, ErrorKind, LeaveReport, TransitionContext};
use timeoff_api::{
    AddCommentRequest, ApiError, AuditLogQuery, AuditLogResponse, CreateLeaveRequestRequest,
    DecisionRequest, DeleteLeaveRequestResponse, LeaveRequestInfo, LeaveRequestMutationResponse,
    ListLeaveRequestsResponse, ListUsersResponse, NotificationInfo, NotificationsResponse,
    RegisterUserRequest, UpdateLeaveRequestRequest, UserInfo, add_comment,
    approve_leave_request, authenticate, create_leave_request, delete_leave_request,
    get_employee_leave_history, get_leave_report, get_leave_request, list_all_requests,
    list_audit_logs, list_my_requests, list_notifications, list_users, mark_notification_read,
    register_user, reject_leave_request, update_leave_request,
};
use timeoff_domain::LeavePolicy;
use timeoff_persistence::LeaveStore;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Header carrying the caller's user id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The store chosen at startup.
pub type SharedStore = Arc<Mutex<Box<dyn LeaveStore + Send>>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one store every handler reads and commits through.
    pub store: SharedStore,
    /// Caps applied to every create and update.
    pub policy: LeavePolicy,
}

impl AppState {
    /// Wraps `store` for sharing across handlers.
    #[must_use]
    pub fn new(store: Box<dyn LeaveStore + Send>, policy: LeavePolicy) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            policy,
        }
    }

    fn context(&self) -> TransitionContext {
        TransitionContext::new(self.policy, OffsetDateTime::now_utc())
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidDateRange | ErrorKind::DurationExceeded => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match (&err, err.kind()) {
            (ApiError::AuthenticationFailed { .. }, _) => StatusCode::UNAUTHORIZED,
            (_, Some(kind)) => status_for(kind),
            (_, None) => {
                error!(error = %err, "Internal error while serving request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;

fn actor_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn resolve_actor<S: LeaveStore + ?Sized>(
    store: &mut S,
    headers: &HeaderMap,
) -> Result<CurrentActor, HttpError> {
    authenticate(store, actor_id(headers)).map_err(|e| HttpError::from(ApiError::from(e)))
}

// ========================================================================
// Leave requests
// ========================================================================

/// Handler for POST `/leave_requests`.
async fn handle_create_leave_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateLeaveRequestRequest>,
) -> HttpResult<LeaveRequestMutationResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let response: LeaveRequestMutationResponse =
        create_leave_request(&mut **store, &actor, &req, &app_state.context())?;
    Ok(Json(response))
}

/// Handler for GET `/leave_requests`. Admin only.
async fn handle_list_all_requests(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> HttpResult<ListLeaveRequestsResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(list_all_requests(&mut **store, &actor)?))
}

/// Handler for GET `/leave_requests/mine`.
async fn handle_list_my_requests(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> HttpResult<ListLeaveRequestsResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(list_my_requests(&mut **store, &actor)?))
}

/// Handler for GET `/leave_requests/{id}`.
async fn handle_get_leave_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
) -> HttpResult<LeaveRequestInfo> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(get_leave_request(&mut **store, &actor, &request_id)?))
}

/// Handler for PUT `/leave_requests/{id}`.
async fn handle_update_leave_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
    Json(req): Json<UpdateLeaveRequestRequest>,
) -> HttpResult<LeaveRequestMutationResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let response: LeaveRequestMutationResponse = update_leave_request(
        &mut **store,
        &actor,
        &request_id,
        &req,
        &app_state.context(),
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/leave_requests/{id}`.
async fn handle_delete_leave_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
) -> HttpResult<DeleteLeaveRequestResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let response: DeleteLeaveRequestResponse =
        delete_leave_request(&mut **store, &actor, &request_id, &app_state.context())?;
    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{id}/approve`.
async fn handle_approve_leave_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
    req: Option<Json<DecisionRequest>>,
) -> HttpResult<LeaveRequestMutationResponse> {
    let req: DecisionRequest = req.map(|Json(req)| req).unwrap_or_default();
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let response: LeaveRequestMutationResponse = approve_leave_request(
        &mut **store,
        &actor,
        &request_id,
        &req,
        &app_state.context(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{id}/reject`.
async fn handle_reject_leave_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
    req: Option<Json<DecisionRequest>>,
) -> HttpResult<LeaveRequestMutationResponse> {
    let req: DecisionRequest = req.map(|Json(req)| req).unwrap_or_default();
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let response: LeaveRequestMutationResponse = reject_leave_request(
        &mut **store,
        &actor,
        &request_id,
        &req,
        &app_state.context(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{id}/comments`.
async fn handle_add_comment(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
    Json(req): Json<AddCommentRequest>,
) -> HttpResult<LeaveRequestMutationResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let response: LeaveRequestMutationResponse = add_comment(
        &mut **store,
        &actor,
        &request_id,
        &req,
        &app_state.context(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}/leave_history`.
async fn handle_get_leave_history(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> HttpResult<ListLeaveRequestsResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(get_employee_leave_history(
        &mut **store,
        &actor,
        &user_id,
    )?))
}

// ========================================================================
// Reports and audit
// ========================================================================

/// Handler for GET `/reports/leave`. Admin only.
async fn handle_get_leave_report(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> HttpResult<LeaveReport> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(get_leave_report(&mut **store, &actor)?))
}

/// Handler for GET `/audit_logs`. Admin only.
async fn handle_list_audit_logs(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<AuditLogQuery>,
) -> HttpResult<AuditLogResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    debug!(actor_id = %actor.id, ?query, "Listing audit entries");
    Ok(Json(list_audit_logs(&mut **store, &actor, &query)?))
}

// ========================================================================
// Notifications
// ========================================================================

/// Handler for GET `/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> HttpResult<NotificationsResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(list_notifications(&mut **store, &actor)?))
}

/// Handler for POST `/notifications/{id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> HttpResult<NotificationInfo> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(mark_notification_read(
        &mut **store,
        &actor,
        &notification_id,
    )?))
}

// ========================================================================
// Users
// ========================================================================

/// Handler for GET `/users`. Admin only.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> HttpResult<ListUsersResponse> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    Ok(Json(list_users(&mut **store, &actor)?))
}

/// Handler for POST `/users`. Admin only.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserInfo>), HttpError> {
    let mut store = app_state.store.lock().await;
    let actor: CurrentActor = resolve_actor(&mut **store, &headers)?;
    let user: UserInfo = register_user(&mut **store, &actor, &req)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/leave_requests",
            post(handle_create_leave_request).get(handle_list_all_requests),
        )
        .route("/leave_requests/mine", get(handle_list_my_requests))
        .route(
            "/leave_requests/{id}",
            get(handle_get_leave_request)
                .put(handle_update_leave_request)
                .delete(handle_delete_leave_request),
        )
        .route(
            "/leave_requests/{id}/approve",
            post(handle_approve_leave_request),
        )
        .route(
            "/leave_requests/{id}/reject",
            post(handle_reject_leave_request),
        )
        .route("/leave_requests/{id}/comments", post(handle_add_comment))
        .route("/reports/leave", get(handle_get_leave_report))
        .route("/audit_logs", get(handle_list_audit_logs))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route("/users", get(handle_list_users).post(handle_register_user))
        .route("/users/{user_id}/leave_history", get(handle_get_leave_history))
        .with_state(app_state)
}
