//! LeadOps CLI
//!
//! Command-line front end for the lead data-quality engine and the outreach
//! timing scheduler. Stores are plain JSON files.
//!
//! # Usage
//!
//! ```bash
//! leadops leads analyze --file leads.json --campaign spring-launch
//! leadops leads dedupe --file leads.json --account --per-campaign
//! leadops leads cleanup --file leads.json --dry-run
//! leadops schedule distribute --file sends.json --min-delay 5
//! leadops schedule optimal --base 2024-05-06T09:00:00Z --step 2 --wait 60
//! leadops sequence validate --file steps.json --format json
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use leadops_dedup::AnalysisScope;
use leadops_scheduler::ChannelType;

mod commands;
mod config;
mod output;

#[derive(Parser, Debug)]
#[command(name = "leadops")]
#[command(author = "LeadOps")]
#[command(version)]
#[command(about = "Lead data-quality and outreach timing tools", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, env = "LEADOPS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lead data quality and deduplication
    Leads {
        #[command(subcommand)]
        action: LeadCommands,
    },
    /// Send timing and throttling
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommands,
    },
    /// Outreach sequences
    Sequence {
        #[command(subcommand)]
        action: SequenceCommands,
    },
    /// Configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Which leads an operation looks at
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Only leads of this campaign
    #[arg(long, conflicts_with = "account")]
    campaign: Option<String>,

    /// Every lead in the file (the default)
    #[arg(long)]
    account: bool,

    /// With --account, resolve duplicates inside each campaign
    #[arg(long, requires = "account")]
    per_campaign: bool,
}

impl ScopeArgs {
    pub fn scope(&self) -> AnalysisScope {
        match &self.campaign {
            Some(id) => AnalysisScope::campaign(id.as_str()),
            None if self.per_campaign => AnalysisScope::account_per_campaign(),
            None => AnalysisScope::account(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum LeadCommands {
    /// Report duplicates and data-quality issues
    Analyze {
        #[arg(short, long)]
        file: PathBuf,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Largest duplicate groups to list in table output
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Collapse duplicate groups and rewrite the file
    Dedupe {
        #[arg(short, long)]
        file: PathBuf,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Show the removal plan without touching the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete leads with neither a valid phone nor a valid email
    Cleanup {
        #[arg(short, long)]
        file: PathBuf,
        #[command(flatten)]
        scope: ScopeArgs,
        /// List the leads without touching the file
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ScheduleCommands {
    /// Space scheduled sends at least --min-delay minutes apart
    Distribute {
        #[arg(short, long)]
        file: PathBuf,
        /// Defaults to throttling.min_delay_minutes
        #[arg(long)]
        min_delay: Option<u32>,
    },
    /// Send time of one sequence step
    Optimal {
        /// Previous send time (RFC 3339)
        #[arg(long)]
        base: DateTime<Utc>,
        #[arg(long)]
        step: u32,
        /// Step wait in seconds
        #[arg(long, default_value_t = 0)]
        wait: u64,
        /// Throttling floor in minutes; defaults to throttling.min_delay_minutes
        #[arg(long)]
        floor: Option<u32>,
    },
    /// Send times of every step of a sequence for one lead
    Plan {
        /// Sequence steps (JSON)
        #[arg(short, long)]
        file: PathBuf,
        /// Enrollment time (RFC 3339); defaults to now
        #[arg(long)]
        enrolled_at: Option<DateTime<Utc>>,
        /// Throttling floor in minutes for email steps
        #[arg(long)]
        floor: Option<u32>,
    },
    /// May a sender send now?
    Check {
        #[command(flatten)]
        sender: SenderArgs,
    },
    /// Count a send against a sender's throttling state
    Record {
        #[command(flatten)]
        sender: SenderArgs,
        /// Send time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

/// Sender and the throttling-state file it is tracked in
#[derive(Args, Debug, Clone)]
pub struct SenderArgs {
    /// Throttling state file (JSON); missing means nobody has sent yet
    #[arg(long)]
    state: PathBuf,
    #[arg(long)]
    sender: String,
    /// Channel whose configured daily limit applies
    #[arg(long, default_value = "email")]
    channel: ChannelType,
    /// Override the channel's daily limit
    #[arg(long)]
    daily_limit: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum SequenceCommands {
    /// Check step timing against deliverability rules
    Validate {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a configuration file with every default spelled out
    Init {
        /// Defaults to ~/.leadops/config.toml
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    leadops_common::telemetry::init_tracing(&cli.log_level);

    let result = match config::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Leads { action } => commands::leads::handle(action, &config, cli.format).await,
            Commands::Schedule { action } => commands::schedule::handle(action, &config, cli.format).await,
            Commands::Sequence { action } => commands::sequence::handle(action, &config, cli.format).await,
            Commands::Config { action } => commands::config::handle(action, &config, cli.format).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
