use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use ridegate_cli::admin::{AdminSeed, create_admin};
use ridegate_cli::seeder::{SeedConfig, seed_users};
use ridegate_config::PasswordConfig;
use ridegate_core::permissions::Role;
use ridegate_db::{PgUserRepository, init_db_pool};

#[derive(Parser)]
#[command(name = "ridegate-cli")]
#[command(about = "Ridegate CLI - Administrative tools for Ridegate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users
    SeedUsers {
        /// Number of users to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,

        /// Role given to every seeded user
        #[arg(short = 'r', long, default_value = "passenger")]
        role: Role,

        /// Password shared by every seeded user
        #[arg(short = 'p', long, default_value = "password123")]
        password: String,
    },
}

fn prompt(label: &str, value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let users = PgUserRepository::new(pool);
    let password_config = PasswordConfig::from_env();

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => {
            let seed = AdminSeed {
                first_name: prompt("First name", first_name)?,
                last_name: prompt("Last name", last_name)?,
                email: prompt("Email address", email)?,
                password: match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()
                        .context("Failed to read password")?,
                },
            };

            match create_admin(&users, seed, &password_config).await {
                Ok(admin) => {
                    println!("\n✅ Admin created successfully!");
                    println!("   Email: {}", admin.email);
                    println!("   Name: {} {}", admin.first_name, admin.last_name);
                }
                Err(e) => {
                    eprintln!("\n❌ Error creating admin: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::SeedUsers {
            count,
            role,
            password,
        } => {
            let config = SeedConfig::new(count)
                .with_role(role)
                .with_password(password);

            match seed_users(&users, &config, &password_config).await {
                Ok(created) => println!("✅ Created {created} users"),
                Err(e) => {
                    eprintln!("\n❌ Error seeding users: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
