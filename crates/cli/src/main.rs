//! Command-line driver for the SkillBridge engines.
//!
//! Usage:
//!     skillbridge score --profile profile.json --job job.json
//!     skillbridge gaps --profile profile.json --job job.json --format json
//!     skillbridge plan --profile profile.json --job job.json --weekly-hours 8 --prefer-free

mod settings;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use skillbridge_catalog::ResourceCatalog;
use skillbridge_explain::{
    describe_phase, explain_gaps, explain_score, summarize_plan, summarize_readiness,
};
use skillbridge_gaps::analyze_with;
use skillbridge_model::{CandidateProfile, JobRequirements, UserPreferences};
use skillbridge_recommend::Recommender;
use skillbridge_scoring::calculate_with;
use std::path::{Path, PathBuf};

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "skillbridge")]
#[command(about = "Match a candidate profile against a job and plan the skill gaps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct Inputs {
    /// Candidate profile (JSON)
    #[arg(short, long)]
    profile: PathBuf,

    /// Job requirements (JSON)
    #[arg(short, long)]
    job: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the profile against the job
    Score {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// List skill gaps and readiness
    Gaps {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Build a learning plan for the gaps
    Plan {
        #[command(flatten)]
        inputs: Inputs,

        /// Resource catalog (TOML or JSON); built-in catalog when omitted
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Hours per week available for study
        #[arg(short, long, default_value = "10")]
        weekly_hours: f64,

        /// Prefer free resources where the catalog has them
        #[arg(long)]
        prefer_free: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillbridge=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Score { inputs } => run_score(&settings, &inputs, cli.format),
        Commands::Gaps { inputs } => run_gaps(&settings, &inputs, cli.format),
        Commands::Plan {
            inputs,
            catalog,
            weekly_hours,
            prefer_free,
        } => {
            let preferences = UserPreferences::new(weekly_hours, prefer_free);
            run_plan(&settings, &inputs, catalog.as_deref(), &preferences, cli.format)
        }
    }
}

fn run_score(settings: &Settings, inputs: &Inputs, format: OutputFormat) -> Result<()> {
    let (profile, job) = load_inputs(inputs)?;
    let score = calculate_with(&settings.scoring, &profile, &job);

    if format == OutputFormat::Json {
        return print_json(&score);
    }

    println!("{}", explain_score(&score));
    if !score.matched_required_skills.is_empty() {
        println!("Matched: {}", score.matched_required_skills.join(", "));
    }
    Ok(())
}

fn run_gaps(settings: &Settings, inputs: &Inputs, format: OutputFormat) -> Result<()> {
    let (profile, job) = load_inputs(inputs)?;
    let result = analyze_with(&settings.penalties, &profile, &job);

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    println!("{}", summarize_readiness(&result));
    for (i, explanation) in explain_gaps(&result).iter().enumerate() {
        println!("\n{}. {}", i + 1, explanation.summary);
        println!("   {}", explanation.detail);
    }
    println!("\n---");
    println!(
        "Total: {} gap(s), {} critical",
        result.total_gaps, result.critical_gap_count
    );
    Ok(())
}

fn run_plan(
    settings: &Settings,
    inputs: &Inputs,
    catalog_path: Option<&Path>,
    preferences: &UserPreferences,
    format: OutputFormat,
) -> Result<()> {
    let (profile, job) = load_inputs(inputs)?;

    let catalog = match catalog_path {
        Some(path) => ResourceCatalog::load(path)?,
        None => ResourceCatalog::builtin().context("built-in catalog is invalid")?,
    };
    let recommender = Recommender::new(catalog).with_config(settings.recommend);
    let plan = recommender.generate(&profile, &job, preferences);

    if !plan.uncovered_skills.is_empty() {
        tracing::warn!(
            skills = ?plan.uncovered_skills,
            "Catalog has no resources for some gaps"
        );
    }

    if format == OutputFormat::Json {
        return print_json(&plan);
    }

    println!("{}", summarize_plan(&plan));
    for (i, phase) in plan.phases.iter().enumerate() {
        println!("{}. {}", i + 1, describe_phase(phase));
    }
    if !plan.uncovered_skills.is_empty() {
        println!("No resources for: {}", plan.uncovered_skills.join(", "));
    }
    Ok(())
}

fn load_inputs(inputs: &Inputs) -> Result<(CandidateProfile, JobRequirements)> {
    let profile = read_json(&inputs.profile)?;
    let job = read_json(&inputs.job)?;
    Ok((profile, job))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
