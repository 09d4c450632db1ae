//! Totem kiosk CLI
//!
//! Command-line entry points for the kiosk core: classify a submission,
//! export the historical batch as JSON or a SQL import script, or load it
//! straight into SQLite.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use totem::core::generator::{self, GeneratorConfig};
use totem::core::intake::{self, IntakeSubmission};
use totem::core::triage::TriagePolicy;
use totem::export::{json, sql};
use totem::PatientRecord;

#[derive(Parser)]
#[command(name = "totem", about = "Hospital intake kiosk triage core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one kiosk submission and print its JSON payload
    Triage {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u8,
        #[arg(long)]
        complaint: String,
        #[arg(long, default_value_t = 36.5)]
        temp: f64,
        #[arg(long, default_value_t = 98)]
        sat: i32,
        #[arg(long, default_value_t = 80)]
        bpm: i32,
        /// Path to a JSON policy file; overrides the built-in policies
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Use the reduced two-threshold policy
        #[arg(long)]
        simplified: bool,
        /// Mark outcomes whose temperature reading is the sensor-fault value
        #[arg(long)]
        flag_sensor_fault: bool,
    },
    /// Export the historical batch as a JSON array
    Batch {
        /// Generate a fresh batch of this size instead of the cached one
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Emit the DDL+DML import script for the historical batch
    ExportSql {
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load the historical batch into SQLite with bound parameters
    LoadDb {
        #[arg(long, default_value = "sqlite:atendimentos.db?mode=rwc")]
        db_url: String,
    },
}

fn resolve_policy(
    policy: Option<PathBuf>,
    simplified: bool,
    flag_sensor_fault: bool,
) -> Result<TriagePolicy> {
    let mut resolved = match policy {
        Some(path) => TriagePolicy::from_json_file(path)?,
        None if simplified => TriagePolicy::simplified(),
        None => TriagePolicy::full(),
    };
    if flag_sensor_fault {
        resolved.flag_sensor_fault = true;
    }
    Ok(resolved)
}

fn resolve_batch(count: Option<usize>) -> Vec<PatientRecord> {
    match count {
        Some(count) => {
            let config = GeneratorConfig {
                count,
                ..GeneratorConfig::default()
            };
            generator::generate_batch(&mut rand::thread_rng(), &config)
        }
        None => generator::historical_batch().to_vec(),
    }
}

fn emit(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "export written");
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Triage {
            name,
            age,
            complaint,
            temp,
            sat,
            bpm,
            policy,
            simplified,
            flag_sensor_fault,
        } => {
            let policy = resolve_policy(policy, simplified, flag_sensor_fault)?;
            let submission = IntakeSubmission {
                name,
                age,
                complaint,
                temperature_celsius: temp,
                oxygen_saturation: sat,
                heart_rate: bpm,
            };
            let (record, outcome) = intake::process(submission, &policy, &mut rand::thread_rng())
                .context("submission rejected")?;
            let payload = json::submission_payload(&record, &outcome);
            println!("{}", json::to_pretty_json(&payload)?);
        }
        Commands::Batch { count, output } => {
            let batch = resolve_batch(count);
            let payload = json::batch_payload(&batch);
            emit(&json::to_pretty_json(&payload)?, output)?;
        }
        Commands::ExportSql { count, output } => {
            let batch = resolve_batch(count);
            emit(&sql::batch_script(&batch), output)?;
        }
        Commands::LoadDb { db_url } => {
            let pool = SqlitePool::connect(&db_url)
                .await
                .with_context(|| format!("failed to open {}", db_url))?;
            let rows = sql::load_into_sqlite(&pool, generator::historical_batch()).await?;
            println!("{} registros importados", rows);
        }
    }
    Ok(())
}
