//! CLI administration tool for kitten-catalog.
//!
//! Provides commands for managing users and breeds, loading demo data,
//! viewing statistics, and performing database operations without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator (password generated when omitted)
//! cargo run --bin admin -- user create --username admin --admin
//!
//! # Grant or revoke administrator rights
//! cargo run --bin admin -- user promote user1
//! cargo run --bin admin -- user demote user1
//!
//! # Maintain breeds
//! cargo run --bin admin -- breed add "Сиамская"
//! cargo run --bin admin -- breed remove "Сиамская"
//!
//! # Load the demo dataset
//! cargo run --bin admin -- seed
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection

use kitten_catalog::application::services::BreedService;
use kitten_catalog::config::Config;
use kitten_catalog::domain::entities::{NewKitten, NewRating, NewUser, User};
use kitten_catalog::domain::repositories::{KittenRepository, RatingRepository, UserRepository};
use kitten_catalog::infrastructure::persistence::{
    PgBreedRepository, PgKittenRepository, PgRatingRepository, PgUserRepository,
};
use kitten_catalog::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing kitten-catalog.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage breeds
    Breed {
        #[command(subcommand)]
        action: BreedAction,
    },

    /// Load demo users, breeds, kittens and ratings
    Seed,

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        /// Login name
        #[arg(short, long)]
        username: Option<String>,

        /// Password (generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Grant administrator rights
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Grant administrator rights
    Promote { username: String },

    /// Revoke administrator rights
    Demote { username: String },
}

/// Breed management subcommands.
#[derive(Subcommand)]
enum BreedAction {
    /// Add a breed
    Add { name: String },

    /// List all breeds
    List,

    /// Remove a breed together with its kittens and their ratings
    Remove {
        /// Breed name or ID
        name_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Breed { action } => handle_breed_action(action, &pool).await?,
        Commands::Seed => seed(&pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            username,
            password,
            admin,
            yes,
        } => create_user(repo, username, password, admin, yes).await?,
        UserAction::List => list_users(repo).await?,
        UserAction::Promote { username } => set_admin(repo, &username, true).await?,
        UserAction::Demote { username } => set_admin(repo, &username, false).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username (or use provided)
/// 2. Prompt for password; an empty answer generates one
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash the password with Argon2id and store the user
/// 5. Print a generated password once
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    password: Option<String>,
    admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let username = username.trim().to_string();
    if username.is_empty() || username.chars().count() > 150 {
        anyhow::bail!("Username must be 1 to 150 characters");
    }

    let (password, generated) = match password {
        Some(p) => (p, false),
        None if skip_confirm => (generate_password(), true),
        None => {
            let entered: String = Password::new()
                .with_prompt("Password (leave empty to generate)")
                .allow_empty_password(true)
                .interact()?;
            if entered.is_empty() {
                (generate_password(), true)
            } else {
                (entered, false)
            }
        }
    };

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!(
        "  Role:     {}",
        if admin {
            "administrator".bright_magenta()
        } else {
            "user".normal()
        }
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    let user = repo
        .create(NewUser {
            username,
            password_hash,
            is_admin: admin,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created:".green().bold(),
        user.username.cyan()
    );

    if generated {
        println!();
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! It is not stored in readable form."
                .red()
                .bold()
        );
    }
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username                       Created              Role
///   ───────────────────────────────────────────────────────────────────────
///   1   user1                          2024-01-15 10:30     user
///   3   admin                          2024-01-15 10:30     admin
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Created".bright_white().bold(),
        "Role".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<30} {:<20} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            role_label(user)
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn role_label(user: &User) -> ColoredString {
    if user.is_admin {
        "admin".bright_magenta()
    } else {
        "user".normal()
    }
}

/// Grants or revokes administrator rights.
async fn set_admin(repo: Arc<PgUserRepository>, username: &str, is_admin: bool) -> Result<()> {
    let user = repo
        .find_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    if user.is_admin == is_admin {
        println!(
            "{} {} is already {}",
            "⚠️ ".yellow(),
            user.username.cyan(),
            role_label(&user)
        );
        return Ok(());
    }

    repo.set_admin(user.id, is_admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update user: {}", e))?;

    let verb = if is_admin { "promoted" } else { "demoted" };
    println!(
        "{} {} {}",
        "✅".green(),
        user.username.cyan(),
        verb.green().bold()
    );

    Ok(())
}

/// Dispatches breed management commands.
async fn handle_breed_action(action: BreedAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgBreedRepository::new(Arc::new(pool.clone())));
    let service = BreedService::new(repo);

    match action {
        BreedAction::Add { name } => {
            let breed = service
                .create(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add breed: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Breed added:".green().bold(),
                breed.name.cyan(),
                breed.id.to_string().bright_black()
            );
        }
        BreedAction::List => {
            println!("{}", "📋 Breeds".bright_blue().bold());
            println!();

            let (breeds, total) = service
                .list(0, i64::MAX)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list breeds: {}", e))?;

            if breeds.is_empty() {
                println!("{}", "  No breeds found".yellow());
                return Ok(());
            }

            for breed in &breeds {
                println!(
                    "  {:<5} {}",
                    breed.id.to_string().bright_black(),
                    breed.name.cyan()
                );
            }

            println!();
            println!("  Total: {}", total.to_string().bright_white().bold());
            println!();
        }
        BreedAction::Remove { name_or_id } => {
            println!("{}", "🗑️  Remove Breed".bright_blue().bold());
            println!();

            let breed = service
                .find(&name_or_id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            let kittens: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM kittens WHERE breed_id = $1")
                    .bind(breed.id)
                    .fetch_one(pool)
                    .await?;

            println!("  Breed: {}", breed.name.cyan());
            println!("  ID:    {}", breed.id.to_string().bright_black());
            if kittens > 0 {
                println!(
                    "  {}",
                    format!("⚠️  {kittens} kitten(s) and their ratings will be deleted too")
                        .yellow()
                );
            }
            println!();

            let confirmed = Confirm::new()
                .with_prompt("Remove this breed?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            service
                .delete(breed.id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to remove breed: {}", e))?;

            println!();
            println!("{}", "✅ Breed removed".green().bold());
            println!();
        }
    }

    Ok(())
}

/// Loads the demo dataset.
///
/// Creates `user1`/`user1`, `user2`/`user2` and the administrator
/// `admin`/`admin`, three breeds, three kittens and three ratings. Refuses
/// to run when any of the demo users already exists.
async fn seed(pool: &PgPool) -> Result<()> {
    println!("{}", "🌱 Seeding demo data".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let users = PgUserRepository::new(pool.clone());
    let breeds = BreedService::new(Arc::new(PgBreedRepository::new(pool.clone())));
    let kittens = PgKittenRepository::new(pool.clone());
    let ratings = PgRatingRepository::new(pool.clone());

    for username in ["user1", "user2", "admin"] {
        if users
            .find_by_username(username)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .is_some()
        {
            anyhow::bail!("User '{username}' already exists; demo data appears to be loaded");
        }
    }

    let mut created = Vec::new();
    for (username, is_admin) in [("user1", false), ("user2", false), ("admin", true)] {
        let password_hash = hash_password(username)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
        let user = users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                is_admin,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;
        println!("  {} user {}", "+".green(), user.username.cyan());
        created.push(user);
    }
    let (user1, user2) = (created[0].id, created[1].id);

    let mut breed_ids = Vec::new();
    for name in ["Сиамская", "Британская", "Мейн-кун"] {
        let breed = match breeds.find(name).await {
            Ok(existing) => existing,
            Err(_) => breeds
                .create(name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add breed: {}", e))?,
        };
        println!("  {} breed {}", "+".green(), breed.name.cyan());
        breed_ids.push(breed.id);
    }

    let demo_kittens = [
        (breed_ids[0], "Серый", 4, "Очень игривый котёнок", user1),
        (breed_ids[1], "Черный", 6, "Спокойный котёнок", user2),
        (breed_ids[2], "Белый", 3, "Любопытный котёнок", user1),
    ];

    let mut kitten_ids = Vec::new();
    for (breed_id, color, age, description, owner_id) in demo_kittens {
        let kitten = kittens
            .create(NewKitten {
                breed_id,
                color: color.to_string(),
                age,
                description: description.to_string(),
                owner_id,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create kitten: {}", e))?;
        println!("  {} kitten {} ({})", "+".green(), kitten.id, color.cyan());
        kitten_ids.push(kitten.id);
    }

    for (kitten_id, user_id, rating) in [
        (kitten_ids[0], user1, 5),
        (kitten_ids[0], user2, 2),
        (kitten_ids[2], user1, 4),
    ] {
        ratings
            .create(NewRating {
                kitten_id,
                user_id,
                rating,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create rating: {}", e))?;
    }
    println!("  {} 3 ratings", "+".green());

    println!();
    println!(
        "{}",
        "✅ Users, breeds, kittens, and ratings created successfully"
            .green()
            .bold()
    );
    println!();

    Ok(())
}

/// Displays catalogue statistics.
///
/// Shows counts of users (and administrators), breeds, kittens and ratings.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin")
        .fetch_one(pool)
        .await?;
    let breeds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM breeds")
        .fetch_one(pool)
        .await?;
    let kittens: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kittens")
        .fetch_one(pool)
        .await?;
    let ratings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:    {} ({} admin)",
        users.to_string().bright_green().bold(),
        admins.to_string().bright_magenta()
    );
    println!("  Breeds:   {}", breeds.to_string().bright_green().bold());
    println!("  Kittens:  {}", kittens.to_string().bright_green().bold());
    println!("  Ratings:  {}", ratings.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
