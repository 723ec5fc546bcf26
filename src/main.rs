use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use reality_check::{
    EstimationResult, Estimator, InformationQuality, ProjectContext, SanityChecker,
    ThresholdConfig, Warning, assess_quality,
};

/// Estimate a project and flag unrealistic expectations.
#[derive(Parser, Debug)]
#[command(name = "reality-check")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Project context as JSON (camelCase fields, "-" for stdin)
    input: PathBuf,

    /// Threshold overrides as JSON
    #[arg(short, long, env = "PROPOSAL_CONFIG")]
    config: Option<PathBuf>,

    /// Run only the sanity checks
    #[arg(long)]
    skip_estimate: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    quality: InformationQuality,
    estimation: Option<EstimationResult>,
    warnings: Vec<Warning>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = match &cli.config {
        Some(path) => ThresholdConfig::from_path(path)?,
        None => ThresholdConfig::default(),
    }
    .with_env_overrides()?;

    let context = read_context(&cli.input)?;
    let quality = assess_quality(&context);

    let estimation = if cli.skip_estimate {
        None
    } else if quality.allows_estimate() {
        Some(Estimator::new(&config).estimate(&context))
    } else {
        tracing::info!(?quality, "Not enough information for an estimate");
        None
    };

    let warnings = SanityChecker::new(&config).check(&context, estimation.as_ref());
    let report = Report {
        quality,
        estimation,
        warnings,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_context(path: &Path) -> anyhow::Result<ProjectContext> {
    let raw = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Invalid project context")
}

fn print_report(report: &Report) {
    if !report.warnings.is_empty() {
        println!("Reality check ({} warning(s)):", report.warnings.len());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning);
        }
        println!();
    }

    match &report.estimation {
        Some(estimation) => {
            println!("Estimate");
            println!("  Hours:      {}", estimation.total_hours);
            println!("  Multiplier: {:.2}x", estimation.applied_multiplier);
            println!("  Cost:       {}", estimation.cost_range_label());
            println!("  Timeline:   {}", estimation.timeline_label());
            println!();
            for item in &estimation.deliverables {
                println!("  - {} [{}, {}h]", item.text, item.tier, item.hours);
            }
        }
        None if report.quality == InformationQuality::Low => {
            println!("No estimate: add a project type and at least one deliverable.");
        }
        None => println!("Estimate skipped."),
    }
}
