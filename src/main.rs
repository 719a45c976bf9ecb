//! Persona Match - command-line entry point
//!
//! Reads learner profiles and survey responses as JSON (from a file or
//! stdin) and prints results as JSON on stdout. Logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use persona_match::application::{
    ExplainRecommendationCommand, ForecastLevelCommand, LearnerInput, RankByCognitiveLoadCommand,
    RankPersonasCommand, RecommendationService, TuneWeightsCommand,
};
use persona_match::config::{EngineConfig, CONFIG_FILE_ENV};
use persona_match::domain::foundation::{PersonaCategory, SkillLevel};
use persona_match::domain::scoring::{Feedback, Strategy, TaskContext};
use persona_match::domain::vectors::Responses;
use persona_match::telemetry;

#[derive(Parser)]
#[command(name = "persona-match")]
#[command(about = "Match learners to expert personas", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (overrides PERSONA_MATCH_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for this crate (overrides the configured filter)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank personas for a learner
    Rank {
        /// Learner profile or vector as JSON ("-" for stdin)
        #[arg(long)]
        learner: PathBuf,

        /// Scoring strategy: adaptive, similarity or complementary
        #[arg(long, default_value = "adaptive")]
        strategy: Strategy,

        /// Number of personas to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        #[arg(long)]
        task_complexity: Option<f64>,

        #[arg(long)]
        time_factor: Option<f64>,

        /// Restrict to one persona category (education or technology)
        #[arg(long)]
        category: Option<PersonaCategory>,
    },

    /// Rank personas by cognitive load
    Load {
        /// Learner profile or vector as JSON ("-" for stdin)
        #[arg(long)]
        learner: PathBuf,

        #[arg(long)]
        task_complexity: Option<f64>,

        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        #[arg(long)]
        category: Option<PersonaCategory>,
    },

    /// Explain one persona's score for a learner
    Explain {
        /// Learner profile or vector as JSON ("-" for stdin)
        #[arg(long)]
        learner: PathBuf,

        /// Persona identifier, e.g. edu_expert
        #[arg(long)]
        persona: String,

        #[arg(long, default_value = "adaptive")]
        strategy: Strategy,

        #[arg(long)]
        task_complexity: Option<f64>,

        #[arg(long)]
        time_factor: Option<f64>,
    },

    /// Adjust aggregation weights from ratings and print the result
    Tune {
        /// Learner profile or vector as JSON ("-" for stdin)
        #[arg(long)]
        learner: PathBuf,

        /// Ratings on a 1-5 scale, comma-separated
        #[arg(long, value_delimiter = ',')]
        ratings: Vec<f64>,
    },

    /// Project a skill level forward through the level transition model
    Forecast {
        /// Starting level, e.g. competent
        #[arg(long)]
        level: SkillLevel,

        /// Number of transitions
        #[arg(long, default_value = "5")]
        steps: usize,
    },

    /// Score dual-domain survey responses
    Assess {
        /// Survey responses as a JSON object ("-" for stdin)
        #[arg(long)]
        responses: PathBuf,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Task context from optional flags, filling gaps from configuration.
fn task_context(
    config: &EngineConfig,
    task_complexity: Option<f64>,
    time_factor: Option<f64>,
) -> Result<Option<TaskContext>> {
    if task_complexity.is_none() && time_factor.is_none() {
        return Ok(None);
    }
    let context = TaskContext::try_new(
        task_complexity.unwrap_or(config.ranking.default_task_complexity),
        time_factor.unwrap_or(config.ranking.default_time_factor),
    )?;
    Ok(Some(context))
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    }
    .with_context(|| format!("Failed to load configuration (see {})", CONFIG_FILE_ENV))?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.filter = format!("warn,persona_match={}", level.to_lowercase());
    }
    telemetry::init_tracing(&logging);

    debug!("persona-match v{} starting", env!("CARGO_PKG_VERSION"));

    let service = RecommendationService::new(&config).context("Invalid configuration")?;

    match cli.command {
        Commands::Rank {
            learner,
            strategy,
            top_k,
            task_complexity,
            time_factor,
            category,
        } => {
            let learner: LearnerInput = read_json(&learner)?;
            let mut cmd = RankPersonasCommand::new(learner).with_strategy(strategy);
            cmd.context = task_context(&config, task_complexity, time_factor)?;
            cmd.top_k = top_k;
            cmd.category = category;
            print_json(&service.rank(cmd)?)
        }
        Commands::Load {
            learner,
            task_complexity,
            top_k,
            category,
        } => {
            let cmd = RankByCognitiveLoadCommand {
                learner: read_json(&learner)?,
                task_complexity,
                top_k,
                category,
            };
            print_json(&service.rank_by_cognitive_load(cmd)?)
        }
        Commands::Explain {
            learner,
            persona,
            strategy,
            task_complexity,
            time_factor,
        } => {
            let cmd = ExplainRecommendationCommand {
                learner: read_json(&learner)?,
                persona_id: persona,
                context: task_context(&config, task_complexity, time_factor)?,
                strategy,
            };
            print_json(&service.explain(cmd)?)
        }
        Commands::Tune { learner, ratings } => {
            let cmd = TuneWeightsCommand {
                learner: read_json(&learner)?,
                feedback: ratings.into_iter().map(Feedback::new).collect(),
            };
            print_json(&service.tune_weights(cmd))
        }
        Commands::Forecast { level, steps } => {
            print_json(&service.forecast_level(ForecastLevelCommand { start: level, steps }))
        }
        Commands::Assess { responses } => {
            let responses: Responses = read_json(&responses)?;
            print_json(&service.assess(&responses))
        }
    }
}
