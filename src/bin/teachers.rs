//! Teacher directory maintenance.
//!
//! The HTTP API only checks that a teacher exists; this tool is how teachers
//! get into (and out of) the directory.
//!
//! Usage:
//!   teachers add <USERNAME> [--display-name NAME] [--role teacher|admin]
//!   teachers remove <USERNAME>
//!   teachers list
//!
//! Environment variables:
//!   DATABASE_URL — PostgreSQL connection string (required)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use announcements_api::{
    config,
    db::{self, PgTeacherStore},
    models::teacher::TeacherRole,
};

#[derive(Parser)]
#[command(name = "teachers", about = "Manage the teachers allowed to publish announcements")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a teacher, or update the name and role of an existing one
    Add {
        username: String,
        /// Defaults to the username
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long, default_value = "teacher")]
        role: TeacherRole,
    },
    /// Remove a teacher. Their announcements are kept.
    Remove { username: String },
    /// List all teachers
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url = config::required("DATABASE_URL")?;
    let pool = db::create_pool(&database_url, 2)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;
    let teachers = PgTeacherStore::new(pool);

    match args.command {
        Command::Add {
            username,
            display_name,
            role,
        } => {
            let display_name = display_name.unwrap_or_else(|| username.clone());
            let teacher = teachers
                .upsert(&username, &display_name, &role.to_string())
                .await?;
            tracing::info!(username = %teacher.username, role = %teacher.role, "Teacher saved");
        }
        Command::Remove { username } => {
            if teachers.remove(&username).await? {
                tracing::info!(username = %username, "Teacher removed");
            } else {
                tracing::warn!(username = %username, "No such teacher");
            }
        }
        Command::List => {
            for teacher in teachers.list().await? {
                println!(
                    "{:<24} {:<8} {}",
                    teacher.username, teacher.role, teacher.display_name
                );
            }
        }
    }

    Ok(())
}
