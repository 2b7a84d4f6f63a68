//! wardlens dashboard demo CLI
//!
//! Loads the JSON datasets in a directory, derives the synthetic dashboard
//! and prints it. The `live` subcommand runs the telemetry feeds on their
//! real cadences (optionally sped up).
//!
//! Usage:
//!   cargo run -p demo -- summary
//!   cargo run -p demo -- --data demo/data encounters --department Cardiology
//!   cargo run -p demo -- patients --gender Female --query chen
//!   cargo run -p demo -- live --ticks 10 --speed 10

mod live;
mod report;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use wardlens_contracts::{
    dashboard::Dashboard,
    error::WardlensResult,
    filter::{EncounterFilters, PatientFilters, ALL},
};
use wardlens_data::{DashboardService, JsonDirSource, LoadTicket};
use wardlens_synth::Synthesizer;

// ── CLI definition ────────────────────────────────────────────────────────────

/// wardlens: a deterministic demo hospital dashboard.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "wardlens hospital dashboard demo",
    long_about = "Derives doctors, appointments, charges, medicine stock and trends\n\
                  from a directory of patient/encounter JSON, and runs live telemetry feeds."
)]
struct Cli {
    /// Directory holding patients.json, encounters.json, ...
    #[arg(long, global = true, default_value = "demo/data")]
    data: PathBuf,

    /// Synth tuning file (TOML). Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hospital KPIs, charges, medicine stock, trends and the doctor roster.
    Summary,
    /// Filtered encounter view: counts by department and month, most recent.
    Encounters(EncounterArgs),
    /// Filtered patient list with patient KPIs.
    Patients(PatientArgs),
    /// Run the vitals, ops and revenue feeds until N vitals ticks arrive.
    Live(live::LiveArgs),
}

#[derive(Args)]
struct EncounterArgs {
    #[arg(long, default_value = ALL)]
    department: String,
    #[arg(long = "type", default_value = ALL)]
    encounter_type: String,
    #[arg(long, default_value = ALL)]
    year: String,
    /// Yes, No or All.
    #[arg(long, default_value = ALL)]
    readmitted: String,
    /// Rows shown in the ranked and most-recent tables.
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

#[derive(Args)]
struct PatientArgs {
    #[arg(long, default_value = ALL)]
    gender: String,
    #[arg(long, default_value = ALL)]
    city: String,
    #[arg(long, default_value = ALL)]
    condition: String,
    #[arg(long)]
    age_min: Option<u32>,
    #[arg(long)]
    age_max: Option<u32>,
    /// Free-text search over id, name, city and condition.
    #[arg(long, default_value = "")]
    query: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set RUST_LOG=debug for per-derivation detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.is_load_failure() {
            warn!(error = %e, "dataset load failed");
        }
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> WardlensResult<()> {
    match cli.command {
        Command::Live(args) => live::run(&args).await,
        Command::Summary => {
            let dashboard = load_dashboard(&cli.data, cli.config.as_deref()).await?;
            report::print_summary(&dashboard);
            Ok(())
        }
        Command::Encounters(a) => {
            let dashboard = load_dashboard(&cli.data, cli.config.as_deref()).await?;
            let filters = EncounterFilters {
                department: a.department,
                encounter_type: a.encounter_type,
                year: a.year,
                readmitted: a.readmitted,
            };
            report::print_encounters(&dashboard, &filters, a.limit);
            Ok(())
        }
        Command::Patients(a) => {
            let dashboard = load_dashboard(&cli.data, cli.config.as_deref()).await?;
            let filters = PatientFilters {
                gender: a.gender,
                city: a.city,
                condition: a.condition,
                age_min: a.age_min,
                age_max: a.age_max,
                query: a.query,
            };
            report::print_patients(&dashboard, &filters);
            Ok(())
        }
    }
}

async fn load_dashboard(data: &Path, config: Option<&Path>) -> WardlensResult<Arc<Dashboard>> {
    let synth = match config {
        Some(path) => Synthesizer::from_file(path)?,
        None => Synthesizer::default(),
    };
    let service = DashboardService::new(Arc::new(JsonDirSource::new(data)), synth);
    service.dashboard(&LoadTicket::new()).await
}
