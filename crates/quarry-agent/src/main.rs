//! # quarry-agent
//!
//! Command-line entry point: answers a business question against the
//! analytical database, or inspects the vault catalog.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quarry_core::AnswerRequest;
use quarry_core::logging::init_subscriber;
use quarry_pipeline::Vault;
use quarry_settings::QuarrySettings;
use serde_json::json;

/// Quarry: natural-language questions over the enterprise BI database.
#[derive(Parser, Debug)]
#[command(name = "quarry-agent", about = "Answer business questions over the BI database")]
struct Cli {
    /// Settings file (defaults to `~/.quarry/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a question and print the response as JSON.
    Ask {
        /// The question, as typed.
        question: String,

        /// Tenant identifier.
        #[arg(long, default_value = "t1")]
        tenant: String,

        /// Acting user; memory is scoped to it.
        #[arg(long, default_value = "u1")]
        user: String,

        /// Prior conversation turn (repeatable, oldest first).
        #[arg(long = "history")]
        history: Vec<String>,

        /// Analytical database file (overrides settings).
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// List the built-in vault questions.
    Vault,
    /// Show the vault entry a question resolves to.
    Match {
        /// The question to look up.
        question: String,
    },
}

fn load_settings(path: Option<&PathBuf>) -> Result<QuarrySettings> {
    match path {
        Some(path) => quarry_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => quarry_settings::load_settings().context("Failed to load settings"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_ref())?;
    init_subscriber(&settings.logging.level, settings.logging.format);
    tracing::debug!(version = %settings.version, "settings loaded");

    match cli.command {
        Command::Ask {
            question,
            tenant,
            user,
            history,
            db,
        } => {
            let pipeline = quarry_agent::build_pipeline(&settings, db);
            let reply = pipeline
                .reply(AnswerRequest {
                    tenant_id: tenant,
                    user_id: user,
                    question,
                    history,
                })
                .await;
            println!("{}", serde_json::to_string_pretty(&reply)?);
            if reply.is_failure() {
                std::process::exit(1);
            }
        }
        Command::Vault => {
            for (i, entry) in Vault::builtin().entries().iter().enumerate() {
                println!("{:>2}. {}", i + 1, entry.question);
            }
        }
        Command::Match { question } => {
            let matched = quarry_pipeline::vault::lookup(&question);
            let out = json!({
                "matched": matched.is_some(),
                "entry": matched,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
