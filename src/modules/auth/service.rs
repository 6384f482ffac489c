use ridegate_auth::create_token;
use ridegate_config::{JwtConfig, PasswordConfig};
use ridegate_core::permissions::Role;
use ridegate_core::{AppError, verify_password};
use ridegate_db::{Lookup, Scope, UserRepository};
use ridegate_models::{AuthPayload, CreateUserDto, LoginDto, LoginPayload, Status};
use tracing::{info, instrument, warn};

use crate::modules::users::service::UserService;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ROLE_MISMATCH: &str = "Role does not match this account";
pub const ACCOUNT_NOT_ACTIVE: &str = "Account is not active";

pub struct AuthService;

impl AuthService {
    /// Self-registration. Any role but `admin` may be chosen; admins are
    /// provisioned by an existing admin or from the CLI.
    #[instrument(skip(users, dto, jwt_config, password_config), fields(email = %dto.email))]
    pub async fn register_user(
        users: &dyn UserRepository,
        dto: CreateUserDto,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<AuthPayload, AppError> {
        if dto.role == Some(Role::Admin) {
            warn!("Rejected self-registration as admin");
            return Err(AppError::insufficient_permissions());
        }

        let (user, token) =
            UserService::create_account(users, dto, jwt_config, password_config).await?;

        Ok(AuthPayload { user, token })
    }

    /// Checks run in order: account exists and is live, claimed role matches,
    /// password matches, account is active.
    ///
    /// A wrong role is reported distinctly from a wrong password. That lets a
    /// caller learn an email's role, which is accepted for the clearer message.
    #[instrument(skip(users, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserRepository,
        dto: LoginDto,
        jwt_config: &JwtConfig,
    ) -> Result<LoginPayload, AppError> {
        let user = users
            .find_one(&Lookup::Email(dto.email.clone()), Scope::Live)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_CREDENTIALS))?;

        if user.role != dto.role {
            return Err(AppError::bad_request(ROLE_MISMATCH));
        }

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::bad_request(INVALID_CREDENTIALS));
        }

        if user.status != Status::Active {
            return Err(AppError::bad_request(ACCOUNT_NOT_ACTIVE));
        }

        let token = create_token(user.id, jwt_config)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginPayload {
            user: user.summary(),
            token,
        })
    }
}
