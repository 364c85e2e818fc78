use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use edca_lab_abstract::{EmptySeriesPolicy, RunConfig, RunScenario, TraceFile, TrafficPlan};
use edca_lab_stats::{ReportLine, RunContext, RunSummary, analyze};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Per-access-category statistics from an EDCA transmission trace"
)]
struct Args {
    /// JSON trace of delivered packets exported by the simulation engine.
    #[arg(long)]
    trace: PathBuf,

    /// TOML run description; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File the summary row is appended to.
    #[arg(long, default_value = "wifi-edca.dat")]
    summary_out: PathBuf,

    /// Write the full run summary as JSON.
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Also print the summary row to stdout.
    #[arg(long, default_value_t = false)]
    print: bool,

    /// Reject the run if an expected station delivered nothing.
    #[arg(long, default_value_t = false)]
    strict: bool,

    #[arg(long)]
    seed: Option<u64>,
    /// Observation window length in seconds.
    #[arg(long)]
    duration: Option<f64>,
    /// Application payload size in bytes.
    #[arg(long)]
    payload_size: Option<u32>,
    /// Per-station arrival rate.
    #[arg(long)]
    lambda: Option<f64>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a RunConfig,
    plan: &'a TrafficPlan,
    summary: &'a RunSummary,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    info!("edca-lab starting…");

    let config = args.run_config()?;
    let trace = load_trace(&args.trace)?;
    let (plan, summary) = summarize(&trace, &config)?;

    let line = ReportLine::new(&summary.categories, &config);
    append_summary(&args.summary_out, &line)?;
    if args.print {
        println!("{line}");
    }

    if let Some(path) = &args.json_out {
        let report = JsonReport {
            config: &config,
            plan: &plan,
            summary: &summary,
        };
        write_json(path, &report)?;
    }

    info!("Summary appended to {}", args.summary_out.display());
    Ok(())
}

impl Args {
    /// Defaults, then the TOML file, then command-line flags.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = RunConfig::default();
        if let Some(path) = &self.config {
            let scenario = load_scenario(path)?;
            if let Some(name) = &scenario.name {
                info!("Loaded run description: {}", name);
            }
            scenario.run.apply_to(&mut config);
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.duration {
            config.duration_s = v;
        }
        if let Some(v) = self.payload_size {
            config.payload_bytes = v;
        }
        if let Some(v) = self.lambda {
            config.per_station_lambda = v;
        }
        if self.strict {
            config.empty_series = EmptySeriesPolicy::Reject;
        }
        Ok(config)
    }
}

fn summarize(trace: &TraceFile, config: &RunConfig) -> Result<(TrafficPlan, RunSummary)> {
    let plan = TrafficPlan::build(config).context("Invalid run configuration")?;
    info!(
        "{} stations planned, {} skipped",
        plan.stations.len(),
        plan.skipped.len()
    );
    let summary =
        analyze(trace, &plan, &RunContext::from(config)).context("Failed to aggregate trace")?;
    Ok((plan, summary))
}

fn init_logging() {
    // stdout is reserved for the summary row
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scenario(path: &Path) -> Result<RunScenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read run description {}", path.display()))?;
    let scenario: RunScenario =
        toml::from_str(&content).context("Failed to parse run description")?;
    Ok(scenario)
}

fn load_trace(path: &Path) -> Result<TraceFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file {}", path.display()))?;
    let trace: TraceFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse trace file {}", path.display()))?;
    Ok(trace)
}

fn append_summary(path: &Path, line: &ReportLine) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open summary file {}", path.display()))?;
    writeln!(file, "{line}")
        .with_context(|| format!("Failed to append to summary file {}", path.display()))?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value).context("Failed to serialize run summary")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write summary file {}", path.display()))?;
    Ok(())
}
