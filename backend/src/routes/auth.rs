//! Authentication routes
//!
//! Registration, login/logout, session check, and the password-reset
//! flow. The session token is delivered both in the response body and in
//! an `HttpOnly` cookie; subsequent requests may present either.

use crate::auth::{build_clear_cookie, build_session_cookie, AuthUser};
use crate::error::ApiResult;
use crate::services::{AccountService, ResetService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use provider_directory_shared::types::{
    AccountSummary, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, ResetPasswordRequest, SessionCheckResponse,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session/check", get(session_check))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
}

/// Register a new account
///
/// POST /api/v1/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AccountSummary>)> {
    let account = AccountService::register(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Login with email and password
///
/// POST /api/v1/login
///
/// On success the signed session token is set as an `HttpOnly` cookie and
/// echoed in the body. Credential failures produce 401 with no cookie.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (token, account) =
        AccountService::login(state.db(), state.tokens(), &req.email, &req.password).await?;

    let cookie = build_session_cookie(
        &token,
        state.tokens().ttl_secs(),
        state.config().auth.cookie_secure,
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse { token, account }),
    ))
}

/// Clear the session cookie
///
/// POST /api/v1/logout
///
/// Stateless tokens are not revoked server-side; an exfiltrated token
/// stays valid until its natural expiry.
async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = build_clear_cookie(state.config().auth.cookie_secure);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Report whether the presented token is valid and for whom
///
/// GET /api/v1/session/check
///
/// Identity comes from the verified claims; the credential store is not
/// consulted.
async fn session_check(auth: AuthUser) -> Json<SessionCheckResponse> {
    Json(SessionCheckResponse {
        logged_in: true,
        account_id: auth.account_id.to_string(),
        email: auth.email,
    })
}

/// Begin a password-reset flow
///
/// POST /api/v1/forgot-password
async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    ResetService::request_reset(state.db(), state.notifier(), state.config(), &req.email).await?;
    Ok(Json(MessageResponse {
        message: "Password reset link sent to your email".to_string(),
    }))
}

/// Consume a reset token and set a new password
///
/// POST /api/v1/reset-password/{token}
async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    ResetService::consume_reset(state.db(), &token, &req.password).await?;
    Ok(Json(MessageResponse {
        message: "Password reset successful".to_string(),
    }))
}
