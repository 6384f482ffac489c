//! Fake user seeding.
//!
//! Users are generated in parallel with rayon and share one bcrypt hash, so
//! seeding thousands of accounts costs a single hash.

use std::time::Instant;

use chrono::{DateTime, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use ridegate_config::PasswordConfig;
use ridegate_core::permissions::Role;
use ridegate_core::{AppError, hash_password};
use ridegate_db::UserRepository;
use ridegate_models::{Metadata, Status, UserRecord};
use uuid::Uuid;

const GENDERS: [&str; 2] = ["female", "male"];

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub count: usize,
    pub role: Role,
    /// Plaintext password shared by every seeded user.
    pub password: String,
}

impl SeedConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            role: Role::Passenger,
            password: "password123".to_string(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

fn generate_user(role: Role, idx: usize, password_hash: &str, now: DateTime<Utc>) -> UserRecord {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let age: i32 = (18..75).fake();

    let email = format!(
        "{}.{}+{}{}@example.com",
        email_part(&first_name),
        email_part(&last_name),
        role,
        idx
    );

    UserRecord {
        id: Uuid::new_v4(),
        first_name,
        last_name,
        middle_name: None,
        email,
        password: password_hash.to_string(),
        role,
        status: Status::Active,
        avatar: None,
        metadata: Some(Metadata {
            address: Some(format!("{street}, {city}")),
            phone: Some(PhoneNumber().fake()),
            age: Some(age),
            gender: Some(GENDERS[idx % GENDERS.len()].to_string()),
        }),
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

/// Builds `count` users of `role`, all carrying `password_hash`.
pub fn generate_users(count: usize, role: Role, password_hash: &str) -> Vec<UserRecord> {
    let now = Utc::now();
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(role, idx, password_hash, now))
        .collect()
}

/// Inserts fake users and returns how many were created. Users whose
/// generated email is already taken are skipped.
pub async fn seed_users(
    users: &dyn UserRepository,
    config: &SeedConfig,
    password_config: &PasswordConfig,
) -> Result<usize, AppError> {
    let start_time = Instant::now();
    println!("👥 Generating {} {} users...", config.count, config.role);

    let password_hash = hash_password(&config.password, password_config.bcrypt_cost)?;
    let generated = generate_users(config.count, config.role, &password_hash);

    let mut created = 0;
    for record in generated {
        match users.create(record).await {
            Ok(_) => created += 1,
            Err(AppError::BadRequest(_)) => {}
            Err(e) => return Err(e),
        }
    }

    println!(
        "   ✓ Inserted {created} users in {:?} ({} skipped)",
        start_time.elapsed(),
        config.count - created
    );
    Ok(created)
}
