//! elite-field - EliteConstruct field service technician shell
//!
//! `elite-field run` opens the terminal shell. `routes` and `resolve`
//! inspect the route table and the path router without a terminal.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use app_tui::TuiConfig;
use app_ui::{RouteTable, Router};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "ELITE_FIELD_LOG";

/// EliteConstruct field service shell
#[derive(Parser, Debug)]
#[command(name = "elite-field", author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the terminal shell (default)
    Run {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write logs to this file; logging is off otherwise
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Skip the login view
        #[arg(long)]
        auto_login: bool,

        /// Path to open after signing in, e.g. /tasks
        #[arg(long = "open", value_name = "PATH")]
        open_path: Option<String>,
    },

    /// List navigation entries and route templates
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which screen a path resolves to
    Resolve {
        /// Path to resolve, e.g. /task/TASK001
        path: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Run {
        config: None,
        log_file: None,
        auto_login: false,
        open_path: None,
    });

    match command {
        Command::Run {
            config,
            log_file,
            auto_login,
            open_path,
        } => {
            init_file_logging(log_file.as_deref())?;
            let mut config = TuiConfig::load_or_default(config.as_deref());
            config.behavior.auto_login |= auto_login;
            if open_path.is_some() {
                config.behavior.open_path = open_path;
            }
            tracing::info!(user = %config.user.id, "Starting shell");
            app_tui::run(config)
        }
        Command::Routes { json } => {
            init_stderr_logging();
            print_routes(json)
        }
        Command::Resolve { path, json } => {
            init_stderr_logging();
            print_resolution(&path, json)
        }
    }
}

// ===== Logging =====

/// The terminal is in raw mode while the shell runs, so logs go to a file or nowhere
fn init_file_logging(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "info".into()))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "off".into()))
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .init();
        }
    }
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ===== Commands =====

fn print_routes(json: bool) -> Result<()> {
    let table = RouteTable::standard()?;
    let router = Router::new();

    if json {
        let value = serde_json::json!({
            "primary": table.primary_entries(),
            "secondary": table.secondary_entries(),
            "templates": router.templates().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Tabs:");
    for (index, entry) in table.primary_entries().iter().enumerate() {
        println!("  [{}] {:<14} {:<16} {}", index + 1, entry.id, entry.path, entry.description);
    }
    println!("Other screens:");
    for entry in table.secondary_entries() {
        println!("      {:<14} {:<16} {}", entry.id, entry.path, entry.description);
    }
    println!("Templates:");
    for template in router.templates() {
        println!("  {}", template);
    }
    Ok(())
}

fn print_resolution(path: &str, json: bool) -> Result<()> {
    let resolution = Router::new().resolve(path);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    println!("{} -> {} ({})", path, resolution.path, resolution.route.title());
    if resolution.redirected {
        println!("redirected: no route matches {}", path);
    }
    Ok(())
}
