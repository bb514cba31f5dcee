//! CLI administration tool for linkvault.
//!
//! Provides commands for managing user accounts and checking the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List users
//! cargo run --bin admin -- user list --limit 20
//!
//! # Create a user interactively
//! cargo run --bin admin -- user create
//!
//! # Deactivate / reactivate a user
//! cargo run --bin admin -- user deactivate alice
//! cargo run --bin admin -- user activate alice
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USERNAME` / `DB_PASSWORD` / `DB_NAME`

use linkvault::api::dto::user::SignupRequest;
use linkvault::config::Config;
use linkvault::domain::entities::NewUser;
use linkvault::domain::repositories::UserRepository;
use linkvault::infrastructure::persistence::PgUserRepository;
use linkvault::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing linkvault.
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

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        /// Number of users to skip
        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Maximum number of users to show
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// Create a user (prompts for details)
    Create,

    /// Allow a user to use protected endpoints again
    Activate { username: String },

    /// Block a user from protected endpoints
    Deactivate {
        username: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::List { offset, limit } => list_users(repo, offset, limit).await?,
        UserAction::Create => create_user(repo).await?,
        UserAction::Activate { username } => set_active(repo, &username, true, true).await?,
        UserAction::Deactivate { username, yes } => {
            set_active(repo, &username, false, yes).await?
        }
    }

    Ok(())
}

/// Lists users in a table.
///
/// # Output Format
///
/// ```text
/// Users
///
///   ID    Username             Email                          Created            Status
///   ---------------------------------------------------------------------------------------
///   1     alice                alice@example.com              2026-01-15 10:30   ACTIVE
/// ```
async fn list_users(repo: Arc<PgUserRepository>, offset: i64, limit: i64) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let users = repo
        .list(offset, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {:<18} {:<8}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(87).bright_black());

    for user in &users {
        let status = if user.active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<5} {:<20} {:<30} {:<18} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Shown: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// Input goes through the same rules as `POST /signup`. The password is
/// hashed with Argon2 before it reaches the database.
async fn create_user(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let request = SignupRequest {
        username,
        email,
        password,
    };
    let problems = signup_problems(&request);
    if !problems.is_empty() {
        println!();
        println!("{}", "Invalid user details:".red().bold());
        for problem in &problems {
            println!("  {}", problem.yellow());
        }
        anyhow::bail!("User was not created");
    }

    let password_hash = hash_password(&request.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {} (id {})",
        "Created user".green().bold(),
        user.username.cyan(),
        user.id
    );
    println!();

    Ok(())
}

/// Applies the `POST /signup` rules, returning one line per violation.
fn signup_problems(request: &SignupRequest) -> Vec<String> {
    let Err(errors) = request.validate() else {
        return Vec::new();
    };

    let mut problems: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_deref()
                    .map_or_else(|| error.code.to_string(), str::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    problems.sort();
    problems
}

/// Toggles the active flag of a user.
///
/// Deactivation asks for confirmation (default: No) unless `skip_confirm`.
async fn set_active(
    repo: Arc<PgUserRepository>,
    username: &str,
    active: bool,
    skip_confirm: bool,
) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Deactivate user '{}'?", username))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let updated = repo
        .set_active(username, active)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if !updated {
        anyhow::bail!("User '{}' not found", username);
    }

    let state = if active { "activated" } else { "deactivated" };
    println!("{} {}", "User".green().bold(), format!("{username} {state}").cyan());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let repo = PgUserRepository::new(Arc::new(pool.clone()));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
