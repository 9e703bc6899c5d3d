//! CLI administration tool for qr-link-service.
//!
//! Inspects and manages stored links and the database without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links, oldest first
//! cargo run --bin admin -- links list --limit 20
//!
//! # Search by substring of the original or dynamic URL
//! cargo run --bin admin -- links search example.com
//!
//! # Show or delete a single link
//! cargo run --bin admin -- links show 3f2a...
//! cargo run --bin admin -- links delete 3f2a... -y
//!
//! # Check database connection and applied migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrations
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite connection string, defaults to `sqlite://links.db`

use qr_link_service::domain::entities::Link;
use qr_link_service::domain::repositories::LinkRepository;
use qr_link_service::infrastructure::persistence::{Database, SqliteLinkRepository, migrations};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://links.db";

/// CLI tool for managing qr-link-service.
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
    /// Manage stored links
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
    /// List links in creation order
    List {
        #[arg(short, long, default_value_t = 10)]
        limit: i64,

        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Search links by case-sensitive substring
    Search {
        query: String,
    },

    /// Show a single link
    Show {
        id: String,
    },

    /// Delete a link
    Delete {
        id: String,

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

    /// Show applied schema migrations
    Migrations,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let database = Database::open(&database_url, 1, Duration::from_secs(30))
        .await
        .context("Failed to open database")?;

    let result = match cli.command {
        Commands::Links { action } => handle_link_action(action, &database).await,
        Commands::Db { action } => handle_db_action(action, &database).await,
    };

    database.close().await;
    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, database: &Database) -> Result<()> {
    let repo = SqliteLinkRepository::new(database.pool());

    match action {
        LinkAction::List { limit, offset } => list_links(&repo, limit, offset).await?,
        LinkAction::Search { query } => search_links(&repo, &query).await?,
        LinkAction::Show { id } => show_link(&repo, &id).await?,
        LinkAction::Delete { id, yes } => delete_link(&repo, &id, yes).await?,
    }

    Ok(())
}

/// Lists a page of links.
///
/// # Output Format
///
/// ```text
/// Links
///
///   ID                                    Redirects  Created           Original URL
///   ──────────────────────────────────────────────────────────────────────────────
///   0b7c0c9e-6c3f-4d8e-9a51-2f7d1e0c4b11  12         2026-01-15 10:30  https://example.com
/// ```
async fn list_links(repo: &SqliteLinkRepository, limit: i64, offset: i64) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = repo
        .list(limit.max(0), offset.max(0))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    print_links(&links);

    println!(
        "  Showing {} of {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints links whose original or dynamic URL contains `query`.
async fn search_links(repo: &SqliteLinkRepository, query: &str) -> Result<()> {
    println!(
        "{} {}",
        "Search:".bright_blue().bold(),
        query.bright_white()
    );
    println!();

    let links = repo
        .search(query)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to search links: {}", e))?;

    print_links(&links);

    println!(
        "  Matches: {}",
        links.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_link(repo: &SqliteLinkRepository, id: &str) -> Result<()> {
    let link = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    print_link_details(&link);
    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(repo: &SqliteLinkRepository, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete Link".bright_blue().bold());
    println!();

    let link = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    print_link_details(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "Link deleted".green().bold());
    } else {
        println!("{}", "Link was already removed".yellow());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, database: &Database) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            database
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let links = SqliteLinkRepository::new(database.pool())
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Links: {}", links.to_string().bright_green().bold());
        }
        DbAction::Migrations => {
            println!("{}", "Applied migrations".bright_blue().bold());
            println!();

            let pool = database.pool();
            let applied = migrations::applied_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read migrations: {}", e))?;

            for migration in &applied {
                println!(
                    "  {:<40} {}",
                    migration.name.cyan(),
                    migration
                        .applied_at
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!(
                "  Total: {}",
                applied.len().to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}

fn print_links(links: &[Link]) {
    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return;
    }

    println!(
        "  {:<37} {:<10} {:<17} {}",
        "ID".bright_white().bold(),
        "Redirects".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in links {
        println!(
            "  {:<37} {:<10} {:<17} {}",
            link.id.bright_black(),
            link.redirect_count.to_string().green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url.cyan()
        );
    }
    println!();
}

fn print_link_details(link: &Link) {
    println!("  ID:           {}", link.id.bright_white());
    println!("  Original URL: {}", link.original_url.cyan());
    println!("  Dynamic URL:  {}", link.dynamic_url.cyan());
    println!(
        "  Redirects:    {}",
        link.redirect_count.to_string().green().bold()
    );
    println!(
        "  Created:      {}",
        link.created_at.to_rfc3339().bright_black()
    );
    println!();
}
