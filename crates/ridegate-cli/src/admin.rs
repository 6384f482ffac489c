use chrono::Utc;
use ridegate_config::PasswordConfig;
use ridegate_core::permissions::Role;
use ridegate_core::{AppError, hash_password};
use ridegate_db::{Lookup, Scope, USER_ALREADY_EXISTS, UserRepository};
use ridegate_models::{CreateUserDto, Status, UserRecord};
use validator::Validate;

/// Input for a new admin account.
pub struct AdminSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Creates an active admin. Applies the same validation and email uniqueness
/// rules as registration.
pub async fn create_admin(
    users: &dyn UserRepository,
    seed: AdminSeed,
    password_config: &PasswordConfig,
) -> Result<UserRecord, AppError> {
    let dto = CreateUserDto {
        first_name: seed.first_name,
        last_name: seed.last_name,
        middle_name: None,
        email: seed.email,
        password: seed.password,
        role: Some(Role::Admin),
        status: Some(Status::Active),
        avatar: None,
        metadata: None,
    };

    dto.validate()
        .map_err(|errors| AppError::bad_request(errors.to_string()))?;

    if users
        .find_one(&Lookup::Email(dto.email.clone()), Scope::All)
        .await?
        .is_some()
    {
        return Err(AppError::bad_request(USER_ALREADY_EXISTS));
    }

    let password_hash = hash_password(&dto.password, password_config.bcrypt_cost)?;
    users.create(dto.into_record(password_hash, Utc::now())).await
}
