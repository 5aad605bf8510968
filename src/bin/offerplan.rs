//! Thin harness around the u-offerplan library: load a catalog, resume or
//! seed a policy, anneal, and persist the policy when it improves.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_offerplan::catalog::Catalog;
use u_offerplan::plan::{PlanConfig, PlanOutcome, PlanSession, Planner};
use u_offerplan::policy::{RankPolicy, TimeSwitchPolicy};
use u_offerplan::sim::Availability;
use u_offerplan::{PlanError, Result};

/// Policy representation to search over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Single priority ranking; record is an append-only text history.
    Rank,
    /// Day/evening rankings with a switch hour; record is JSON.
    Switch,
}

/// Command-line arguments for the offerplan binary.
#[derive(Parser, Debug)]
#[command(name = "offerplan")]
struct Cli {
    /// Catalog table (CSV: code,duration,rate,<dimensions>...).
    #[arg(long)]
    catalog: PathBuf,

    /// Policy record to resume from and write improvements to.
    #[arg(long)]
    record: PathBuf,

    #[arg(long, value_enum, default_value_t = Mode::Rank)]
    mode: Mode,

    /// JSON planner configuration; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Utility weights, comma-separated, one per catalog dimension.
    /// Overrides the configuration file.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    weights: Option<Vec<f64>>,

    /// Number of simulated steps. Overrides the configuration file.
    #[arg(long)]
    steps: Option<usize>,

    /// Apply the 08:00-23:00 day/night availability rule.
    #[arg(long)]
    day_night: bool,

    /// Fixed random seed (wall clock when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Consecutive searches, each resuming from the previous best.
    #[arg(long, default_value_t = 1)]
    runs: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = Arc::new(Catalog::from_table(&fs::read_to_string(&cli.catalog)?)?);
    info!(actions = catalog.len(), dimensions = ?catalog.dimensions(), "catalog loaded");

    let planner = Planner::new(Arc::clone(&catalog), build_config(&cli)?)?;
    let mut session = planner.session()?;

    match cli.mode {
        Mode::Rank => {
            let base = match read_record(&cli.record)? {
                Some(history) => RankPolicy::decode_latest(&history, &catalog)?,
                None => session.seed_rank_policy(),
            };
            search(&mut session, base, cli.runs, &catalog, |best| {
                let mut history = read_record(&cli.record)?.unwrap_or_default();
                if !history.is_empty() && !history.ends_with('\n') {
                    history.push('\n');
                }
                history.push_str(&best.encode(&catalog));
                history.push('\n');
                fs::write(&cli.record, history)?;
                Ok(())
            })
        }
        Mode::Switch => {
            let base = match read_record(&cli.record)? {
                Some(json) => TimeSwitchPolicy::from_json(&json, &catalog)?,
                None => session.seed_time_switch_policy(),
            };
            search(&mut session, base, cli.runs, &catalog, |best| {
                fs::write(&cli.record, best.to_json(&catalog)?)?;
                Ok(())
            })
        }
    }
}

fn build_config(cli: &Cli) -> Result<PlanConfig> {
    let mut config = match &cli.config {
        Some(path) => PlanConfig::from_json(&fs::read_to_string(path)?)?,
        None => PlanConfig::default(),
    };
    if let Some(weights) = &cli.weights {
        config.simulation.weights = weights.clone();
    }
    if let Some(steps) = cli.steps {
        config.simulation.steps = steps;
    }
    if cli.day_night {
        config.simulation.availability = Availability::day_night();
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if config.simulation.weights.is_empty() {
        return Err(PlanError::InvalidConfig(
            "utility weights are required (--weights or config file)".into(),
        ));
    }
    Ok(config)
}

fn read_record(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Runs `runs` searches, persisting every best that beats the record.
fn search<P, F>(session: &mut PlanSession, mut base: P, runs: usize, catalog: &Catalog, mut persist: F) -> Result<()>
where
    P: u_offerplan::policy::Policy + Clone,
    F: FnMut(&P) -> Result<()>,
{
    let mut record_score = session.score(&base);
    info!(score = record_score, "starting policy");

    for n in 0..runs {
        let outcome = session.run(base)?;
        report(n, &outcome, catalog);

        if outcome.best_score > record_score {
            persist(&outcome.best)?;
            info!(from = record_score, to = outcome.best_score, "record updated");
            record_score = outcome.best_score;
        }
        base = outcome.best;
    }
    Ok(())
}

fn report<P>(run: usize, outcome: &PlanOutcome<P>, catalog: &Catalog) {
    info!(
        run,
        from = outcome.initial_score,
        to = outcome.best_score,
        seed = outcome.seed,
        "search finished"
    );
    info!("stats: {}", outcome.stats.display(catalog));
    for (name, rate) in catalog.dimensions().iter().zip(outcome.stats.daily_rates()) {
        info!("daily {name}: {rate:.3}");
    }
}
