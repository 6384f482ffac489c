use ridegate_core::PaginationMeta;
use ridegate_core::permissions::Role;
use ridegate_models::{
    AuthPayload, CreateUserDto, LoginDto, LoginPayload, Metadata, Status, UpdateUserDto, User,
    UserSummary,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::HealthResponse;
use crate::modules::users::controller::CreatedUserResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::health::health_check,
    ),
    components(
        schemas(
            User,
            UserSummary,
            Role,
            Status,
            Metadata,
            CreateUserDto,
            UpdateUserDto,
            LoginDto,
            AuthPayload,
            LoginPayload,
            CreatedUserResponse,
            PaginationMeta,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "User listing, lookup and management"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Ridegate API",
        version = "0.1.0",
        description = "User accounts for a ride-hailing platform: registration, login, and role-gated user management.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
