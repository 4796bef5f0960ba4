//! Auth handlers: register, login, me, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse, RegisterResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{BearerToken, ValidatedJson};
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state.auth.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            error: false,
            user: user.into(),
            message: "Created!".to_string(),
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issued = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(issued.into()))
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.me(token.as_str()).await?;
    Ok(Json(user.into()))
}

/// GET|POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth.logout(token.as_str()).await?;

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}
