use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use match_stats::calculate::poisson::PoissonEstimator;
use match_stats::calculate::quality::{classify, league_hints};
use match_stats::config::AppConfig;
use match_stats::models::{
    AnalysisReport, DataAvailability, EstimatedStatistic, MatchOrder, Perspective, QualityTier,
    StatFamily,
};
use match_stats::storage::{read_normalized_matches, read_provider_matches, write_json, JsonlWriter};
use match_stats::{analyze, parse_list, AnalysisOptions};

#[derive(Parser)]
#[command(name = "match-stats")]
#[command(about = "Rolling-window match statistics with Poisson fallbacks for thin data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a list of past matches
    Analyze {
        /// JSONL file, one match per line, in a single chronological order
        #[arg(long)]
        input: PathBuf,

        /// Input is already normalized (match records, not provider rows)
        #[arg(long)]
        normalized: bool,

        /// Statistic family: "corners" or "cards"
        #[arg(long)]
        family: Option<String>,

        /// Perspective: "home", "away" or "overall"
        #[arg(long)]
        perspective: Option<String>,

        /// Input order: "most_recent_first" or "oldest_first"
        #[arg(long)]
        order: Option<String>,

        /// Window sizes (e.g. "5,10")
        #[arg(long)]
        windows: Option<String>,

        /// Thresholds (e.g. "6.5,7.5,8.5")
        #[arg(long)]
        thresholds: Option<String>,

        /// Follow one team regardless of venue
        #[arg(long)]
        team: Option<String>,

        /// League name, used for competition hints
        #[arg(long)]
        league: Option<String>,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Classify data quality from availability flags
    Classify {
        /// League name, used for competition hints
        #[arg(long)]
        league: Option<String>,

        #[arg(long)]
        cards: bool,

        #[arg(long)]
        corners: bool,

        #[arg(long)]
        players: bool,

        #[arg(long)]
        h2h: bool,

        #[arg(long)]
        btts: bool,
    },

    /// Poisson estimate for a league name and quality tier
    Estimate {
        /// League name, used for competition hints
        #[arg(long)]
        league: Option<String>,

        /// Quality tier: "limited" or "minimal"
        #[arg(long, default_value = "minimal")]
        tier: String,
    },

    /// Normalize provider rows into match records
    Normalize {
        /// Provider JSONL dump
        #[arg(long)]
        input: PathBuf,

        /// Normalized JSONL output
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    // Initialize tracing
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with(
            (!cli.json_logs)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    tracing::debug!("Starting match-stats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze {
            input,
            normalized,
            family,
            perspective,
            order,
            windows,
            thresholds,
            team,
            league,
            output,
        } => {
            let mut options = AnalysisOptions::from_config(&config);

            if let Some(family) = family {
                options.family = family.parse::<StatFamily>()?;
            }
            if let Some(perspective) = perspective {
                options.perspective = perspective.parse::<Perspective>()?;
            }
            if let Some(order) = order {
                options.order = order.parse::<MatchOrder>()?;
            }
            if let Some(windows) = windows {
                options.windows = parse_list(&windows)
                    .with_context(|| format!("Invalid --windows: {}", windows))?;
            }
            if let Some(thresholds) = thresholds {
                options.thresholds = parse_list(&thresholds)
                    .with_context(|| format!("Invalid --thresholds: {}", thresholds))?;
            }
            if let Some(team) = team {
                options = options.with_focus_team(team.into());
            }
            if let Some(league) = league {
                options = options.with_league_name(league);
            }

            let matches = if normalized {
                read_normalized_matches(input.clone())
            } else {
                read_provider_matches(input.clone())
            }
            .with_context(|| format!("Failed to read matches from {:?}", input))?;

            let report = analyze(&matches, &options)?;

            match output {
                Some(path) => {
                    write_json(&path, &report)?;
                    print_summary(&report);
                }
                None => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }

        Commands::Classify {
            league,
            cards,
            corners,
            players,
            h2h,
            btts,
        } => {
            let availability = DataAvailability {
                cards: Some(cards),
                corners: Some(corners),
                players: Some(players),
                h2h: Some(h2h),
                btts: Some(btts),
                match_details: None,
                league_name: league,
            };
            let indicator = classify(&availability);
            println!("{}", serde_json::to_string_pretty(&indicator)?);
        }

        Commands::Estimate { league, tier } => {
            let tier: QualityTier = tier.parse().map_err(anyhow::Error::msg)?;
            let hints = league.as_deref().map(league_hints).unwrap_or_else(BTreeSet::new);
            let estimator = PoissonEstimator::new(
                config.estimator.card_thresholds.clone(),
                config.estimator.corner_thresholds.clone(),
            );

            let statistics = [
                EstimatedStatistic::Cards,
                EstimatedStatistic::Corners,
                EstimatedStatistic::Btts,
            ];
            match estimator.estimate_statistics(tier, &hints, &statistics) {
                Some(estimate) => {
                    if let Some(caveat) = estimate.confidence.caveat() {
                        tracing::warn!("Estimate uses {}", caveat);
                    }
                    println!("{}", serde_json::to_string_pretty(&estimate)?);
                }
                None => println!("No estimate needed for {} data", tier),
            }
        }

        Commands::Normalize { input, output } => {
            let matches = read_provider_matches(input.clone())
                .with_context(|| format!("Failed to read provider rows from {:?}", input))?;
            let written = JsonlWriter::new(output.clone()).write_all(&matches)?;
            println!("Normalized {} matches into {:?}", written, output);
        }
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("\n=== Analysis Results ===");
    println!("Family:           {}", report.family);
    println!("Input matches:    {}", report.input_matches);
    for window in &report.windows {
        let agg = &window.aggregate;
        println!(
            "{:<17} {} matches, avg {:.2} (for {:.2} / against {:.2})",
            format!("{}:", agg.label),
            agg.total_matches,
            agg.average_total,
            agg.average_for,
            agg.average_against
        );
    }
    println!("Quality tier:     {}", report.quality.quality_tier);
    if let Some(ref estimate) = report.estimate {
        println!("Estimated:        {}", estimate.explanation);
        if let Some(caveat) = estimate.confidence.caveat() {
            println!("Caveat:           {}", caveat);
        }
    }
}
