//! CLI administration tool for tinylink.
//!
//! Inspects and prunes short links directly in PostgreSQL, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin tinylink-admin -- links list
//!
//! # Show one link with its click count
//! cargo run --bin tinylink-admin -- links show Xk9pQ2
//!
//! # Delete a link (asks for confirmation)
//! cargo run --bin tinylink-admin -- links delete Xk9pQ2
//!
//! # Check database connection
//! cargo run --bin tinylink-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use tinylink::application::services::LinkService;
use tinylink::config::{Config, mask_connection_string};
use tinylink::domain::entities::Link;
use tinylink::domain::error::LinkError;
use tinylink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type PgLinkService = LinkService<PgLinkRepository>;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "tinylink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

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
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: PgPool) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = LinkService::new(repo);

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Show { code } => show_link(&service, &code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Prints all links as a table.
///
/// ```text
/// 📋 Links
///
///   Code         Clicks   Created            Destination
///   ──────────────────────────────────────────────────────────────────
///   Xk9pQ2       12       2025-01-15 10:30   https://example.com/a
/// ```
async fn list_links(service: &PgLinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<8} {:<18} {}",
            link.code.cyan(),
            link.click_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.destination_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(service: &PgLinkService, code: &str) -> Result<()> {
    let link = find_link(service, code).await?;
    print_link(&link);
    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &PgLinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = find_link(service, code).await?;
    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn find_link(service: &PgLinkService, code: &str) -> Result<Link> {
    match service.get_link_by_code(code).await {
        Ok(link) => Ok(link),
        Err(LinkError::NotFound(_)) => anyhow::bail!("Link '{}' not found", code),
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

fn print_link(link: &Link) {
    let last_clicked = link
        .last_clicked_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.code.cyan().bold());
    println!("  Destination:  {}", link.destination_url.bright_white());
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!(
        "  Clicks:       {}",
        link.click_count.to_string().bright_green().bold()
    );
    println!("  Last click:   {}", last_clicked.bright_black());
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Connected, but the links table is missing; start the server once to run migrations")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Links: {}",
                links_count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
