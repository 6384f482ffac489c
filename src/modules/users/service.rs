use chrono::Utc;
use ridegate_auth::create_token;
use ridegate_config::{JwtConfig, PasswordConfig};
use ridegate_core::permissions::{Permission, has_permission};
use ridegate_core::query::{ListParams, Projection};
use ridegate_core::{AppError, PaginationMeta, hash_password};
use ridegate_db::{Lookup, Scope, USER_ALREADY_EXISTS, UserQuery, UserRepository};
use ridegate_models::{CreateUserDto, UpdateUserDto, User, UserRecord};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

pub const USER_NOT_FOUND: &str = "User not found";

pub struct UserService;

impl UserService {
    /// Shared by self-registration and admin creation: rejects a taken email
    /// (soft-deleted users included), hashes the password, stores the user and
    /// issues a token for it.
    #[instrument(skip(users, dto, jwt_config, password_config), fields(email = %dto.email))]
    pub async fn create_account(
        users: &dyn UserRepository,
        dto: CreateUserDto,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<(User, String), AppError> {
        if users
            .find_one(&Lookup::Email(dto.email.clone()), Scope::All)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(USER_ALREADY_EXISTS));
        }

        let password_hash = hash_password(&dto.password, password_config.bcrypt_cost)?;
        let record = users.create(dto.into_record(password_hash, Utc::now())).await?;
        let token = create_token(record.id, jwt_config)?;

        info!(user_id = %record.id, role = %record.role, "User account created");
        Ok((record.to_public(), token))
    }

    #[instrument(skip(users, actor, dto, jwt_config, password_config), fields(actor_id = %actor.id))]
    pub async fn create_user(
        users: &dyn UserRepository,
        actor: &User,
        dto: CreateUserDto,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<(User, String), AppError> {
        if !has_permission(actor.role, Permission::AdminAll) {
            return Err(AppError::insufficient_permissions());
        }

        Self::create_account(users, dto, jwt_config, password_config).await
    }

    #[instrument(skip(users))]
    pub async fn list_users(
        users: &dyn UserRepository,
        params: &ListParams,
    ) -> Result<(Vec<Value>, PaginationMeta), AppError> {
        let query = UserQuery {
            search: params.search.clone(),
            filters: params.filters.clone(),
        };

        let records = users
            .find(&query, &params.sort, params.skip(), params.limit)
            .await?;
        let total = users.count(&query).await?;

        let data = records
            .iter()
            .map(|record| project(record, &params.projection))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((data, PaginationMeta::new(total, params.page, params.limit)))
    }

    #[instrument(skip(users, projection))]
    pub async fn get_user(
        users: &dyn UserRepository,
        id: &str,
        projection: &Projection,
    ) -> Result<Value, AppError> {
        let record = find_live(users, id).await?;
        project(&record, projection)
    }

    #[instrument(skip(users, actor, dto, password_config), fields(actor_id = %actor.id))]
    pub async fn update_user(
        users: &dyn UserRepository,
        actor: &User,
        id: &str,
        dto: UpdateUserDto,
        password_config: &PasswordConfig,
    ) -> Result<User, AppError> {
        if !has_permission(actor.role, Permission::WriteUsers) {
            return Err(AppError::insufficient_permissions());
        }

        let mut record = find_live(users, id).await?;

        if let Some(password) = &dto.password {
            record.password = hash_password(password, password_config.bcrypt_cost)?;
        }
        dto.apply_to(&mut record);
        record.updated_at = Utc::now();

        let updated = users
            .update(record)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        info!(user_id = %updated.id, "User updated");
        Ok(updated.to_public())
    }

    /// Flags the user as deleted. A second call finds no live user and fails with 404.
    #[instrument(skip(users, actor), fields(actor_id = %actor.id))]
    pub async fn delete_user(
        users: &dyn UserRepository,
        actor: &User,
        id: &str,
    ) -> Result<(), AppError> {
        if !has_permission(actor.role, Permission::DeleteUsers) {
            return Err(AppError::insufficient_permissions());
        }

        let mut record = find_live(users, id).await?;
        record.is_deleted = true;
        record.updated_at = Utc::now();

        users
            .update(record)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        info!(user_id = %id, "User soft-deleted");
        Ok(())
    }
}

/// A malformed id cannot name a stored user, so it is a 404 like any other miss.
async fn find_live(users: &dyn UserRepository, id: &str) -> Result<UserRecord, AppError> {
    let id = Uuid::parse_str(id.trim()).map_err(|_| AppError::not_found(USER_NOT_FOUND))?;

    users
        .find_one(&Lookup::Id(id), Scope::Live)
        .await?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
}

fn project(record: &UserRecord, projection: &Projection) -> Result<Value, AppError> {
    let value = serde_json::to_value(record.to_public()).map_err(AppError::internal)?;
    Ok(projection.apply(&value))
}
