//! # TradingPro CLI Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `tradingpro` binary, the command-line companion of the
//! TRADINGPRO landing page. It handles:
//! - command-line argument parsing using Clap
//! - logging setup based on the `-v` count (or `RUST_LOG`)
//! - loading the layered configuration once
//! - routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Ask the FAQ assistant a question
//! tradingpro chat ask "Нужен ли опыт?"
//!
//! # Serve the built landing page with debug logging
//! tradingpro -vv srv ./dist
//!
//! # Use a specific configuration file
//! tradingpro --config ./site.toml chat faq
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // chat, courses, forms, srv
mod core; // config, errors, FAQ matching, session state

#[derive(Parser, Debug)]
#[command(
    name = "tradingpro",
    about = "📈 TRADINGPRO: FAQ assistant, lead forms and landing page server",
    long_about = "Answers visitor questions from the FAQ table, submits the contact and\n\
                  newsletter forms, and serves the landing page together with its chat API.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Load configuration from this file instead of searching for one.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    Courses(commands::courses::CoursesArgs),
    #[command(alias = "f")]
    Forms(commands::forms::FormsArgs),
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match core::config::load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
            Commands::Courses(args) => commands::courses::handle_courses(args, &config).await,
            Commands::Forms(args) => commands::forms::handle_forms(args, &config).await,
            Commands::Srv(args) => commands::srv::handle_srv(args, &config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
