use axum::{Json, extract::State, http::StatusCode};
use ridegate_core::{ApiResponse, AppError};
use ridegate_models::{AuthPayload, CreateUserDto, LoginDto, LoginPayload};
use tracing::instrument;
use utoipa::ToSchema;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Error envelope shared by every endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthPayload>),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 403, description = "Admin accounts cannot self-register", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), AppError> {
    let payload = AuthService::register_user(
        state.users.as_ref(),
        dto,
        &state.jwt_config,
        &state.password_config,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User registered successfully",
            payload,
        )),
    ))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginPayload>),
        (status = 400, description = "Invalid credentials, role mismatch or inactive account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<ApiResponse<LoginPayload>>, AppError> {
    let payload = AuthService::login_user(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(ApiResponse::with_message("Login successful", payload)))
}
