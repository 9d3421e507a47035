//! Carrito CLI - Shopping list in the terminal
//!
//! Composition root: opens the storage gateway once, wires the repository
//! into the application layer, runs one command and closes the store.

mod logging;
mod render;

use anyhow::{Context, Result};
use carrito_core::application::{ActionOutcome, ListAction, ListActions, ShoppingListService};
use carrito_core::domain::{Item, ItemId};
use carrito_infra_sqlite::{SqliteItemRepository, StorageGateway};
use clap::{Parser, Subcommand};
use colored::Colorize;
use logging::LogFormat;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

const DEFAULT_DB_PATH: &str = "~/.carrito/compras.db";

#[derive(Parser)]
#[command(name = "carrito")]
#[command(about = "Shopping list backed by a local SQLite file", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file
    #[arg(long, global = true, env = "CARRITO_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db_path: String,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, env = "CARRITO_LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the list, pending items first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a product to buy
    Add {
        /// Product name
        name: String,
    },

    /// Mark an item purchased, or pending again
    Toggle {
        /// Item ID
        id: ItemId,
    },

    /// Remove one item
    Remove {
        /// Item ID
        id: ItemId,
    },

    /// Remove every item
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format)?;

    let db_path = shellexpand::tilde(&cli.db_path).into_owned();
    info!(version = carrito_core::VERSION, db_path = %db_path, "Opening shopping list");

    let gateway = StorageGateway::open(&db_path)
        .await
        .with_context(|| format!("Failed to open shopping list at {}", db_path))?;

    // DI wiring
    let repo = Arc::new(SqliteItemRepository::new(gateway.clone()));
    let service = Arc::new(ShoppingListService::new(repo));
    let actions = ListActions::new(service.clone());

    let result = run(cli.command, &service, &actions).await;

    gateway.close().await;
    result
}

async fn run(command: Commands, service: &ShoppingListService, actions: &ListActions) -> Result<()> {
    match command {
        Commands::List { json } => {
            actions.run(ListAction::Refresh).await?;
            render::print_list(&actions.current(), json)?;
        }

        Commands::Add { name } => {
            if let ActionOutcome::Added(id) = actions.run(ListAction::Add(name)).await? {
                println!("{}", format!("✓ Product added (id {})", id).green().bold());
            }
        }

        Commands::Toggle { id } => match service.find(id).await? {
            Some(item) => {
                actions.run(ListAction::Toggle(item.clone())).await?;
                print_toggled(&item);
                render::print_list(&actions.current(), false)?;
            }
            None => println!("{}", format!("No item with id {}", id).yellow()),
        },

        Commands::Remove { id } => {
            actions.run(ListAction::Remove(id)).await?;
            println!("{}", format!("✓ Item {} removed", id).green().bold());
            render::print_list(&actions.current(), false)?;
        }

        Commands::Clear { yes } => {
            if !yes && !confirm("Remove every item from the list?")? {
                println!("{}", "Nothing removed".yellow());
                return Ok(());
            }
            actions.run(ListAction::Clear).await?;
            println!("{}", "✓ List cleared".green().bold());
        }
    }

    Ok(())
}

fn print_toggled(before: &Item) {
    let message = if before.purchased {
        format!("○ {} back to pending", before.name)
    } else {
        format!("✓ {} purchased", before.name)
    };
    println!("{}", message.green().bold());
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_accepts_empty_name() {
        let cli = Cli::try_parse_from(["carrito", "add", ""]).unwrap();
        assert!(matches!(cli.command, Commands::Add { ref name } if name.is_empty()));
    }

    #[test]
    fn test_parse_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "carrito",
            "list",
            "--json",
            "--db-path",
            "/tmp/list.db",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.db_path, "/tmp/list.db");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::List { json: true }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["carrito", "toggle", "milk"]).is_err());
    }

    #[tokio::test]
    async fn test_run_against_in_memory_store() {
        let gateway = StorageGateway::open_in_memory().await.unwrap();
        let repo = Arc::new(SqliteItemRepository::new(gateway.clone()));
        let service = Arc::new(ShoppingListService::new(repo));
        let actions = ListActions::new(service.clone());

        tokio_test::assert_ok!(run(Commands::Add { name: "Milk".into() }, &service, &actions).await);
        tokio_test::assert_ok!(run(Commands::Toggle { id: 1 }, &service, &actions).await);
        assert_eq!(actions.current(), vec![Item::new(1, "Milk", true)]);

        tokio_test::assert_ok!(run(Commands::Clear { yes: true }, &service, &actions).await);
        assert!(service.items().await.unwrap().is_empty());
    }
}
