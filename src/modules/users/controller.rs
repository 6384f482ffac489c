use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ridegate_core::query::{ListParams, Projection};
use ridegate_core::{ApiResponse, AppError, PaginatedResponse};
use ridegate_models::{CreateUserDto, UpdateUserDto, User};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Admin creation response: the new user plus a token issued for it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserResponse {
    pub success: bool,
    pub message: String,
    pub data: User,
    pub token: String,
}

/// List users
///
/// Supports `page`, `limit`, `sort` (a field name, or a JSON object such as
/// `{"lastName":1,"createdAt":-1}`), `order`, `fields`, `query` and any number of
/// `filter_<field>=<value>` equality filters.
#[utoipa::path(
    get,
    path = "/user",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10, max 100)"),
        ("sort" = Option<String>, Query, description = "Sort field or JSON sort object (default createdAt)"),
        ("order" = Option<String>, Query, description = "asc or desc (default desc)"),
        ("fields" = Option<String>, Query, description = "Comma-separated field paths, e.g. firstName,metadata.phone"),
        ("query" = Option<String>, Query, description = "Case-insensitive search over names and email"),
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedResponse<User>),
        (status = 400, description = "Invalid list parameters", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PaginatedResponse<Value>>, AppError> {
    let params = ListParams::from_pairs(&pairs)?;
    let (data, pagination) = UserService::list_users(state.users.as_ref(), &params).await?;
    Ok(Json(PaginatedResponse::new(data, pagination)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(
        ("id" = String, Path, description = "User id"),
        ("fields" = Option<String>, Query, description = "Comma-separated field paths"),
    ),
    responses(
        (status = 200, description = "The user", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let fields = pairs
        .iter()
        .find(|(key, _)| key == "fields")
        .map(|(_, value)| value.as_str());
    let projection = Projection::parse(fields);

    let user = UserService::get_user(state.users.as_ref(), &id, &projection).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/user/admin",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = CreatedUserResponse),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), AppError> {
    let (user, token) = UserService::create_user(
        state.users.as_ref(),
        &auth_user.0,
        dto,
        &state.jwt_config,
        &state.password_config,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            success: true,
            message: "User created successfully".to_string(),
            data: user,
            token,
        }),
    ))
}

/// Update a user
///
/// Partial update: omitted fields are left as they are. A new password is re-hashed.
#[utoipa::path(
    patch,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = UserService::update_user(
        state.users.as_ref(),
        &auth_user.0,
        &id,
        dto,
        &state.password_config,
    )
    .await?;

    Ok(Json(ApiResponse::with_message("User updated successfully", user)))
}

/// Soft-delete a user
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    UserService::delete_user(state.users.as_ref(), &auth_user.0, &id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
