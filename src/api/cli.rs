//! Command line definition

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logic::config::ScorerOverrides;
use crate::logic::dataset::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "oneshield-triage", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// JSON config file (falls back to TRIAGE_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and normalize an event file
    Validate {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Tag IOC / IOA indicators and map remediation
    Tag {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write the plain-text resolution report
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
        /// Report path; printed to stdout when omitted
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Build features and score anomalies
    Score {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        scorer: ScorerArgs,
        /// Anomaly summary path; printed to stdout when omitted
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Run every stage
    Run {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        scorer: ScorerArgs,
        /// Resolution report path
        #[arg(long)]
        report: Option<PathBuf>,
        /// Anomaly summary path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Delimited event file (`;` or `,`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the rejected-row audit here (JSON Lines)
    #[arg(long)]
    pub rejected: Option<PathBuf>,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Augmented record file; a preview is logged when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output serialization
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScorerArgs {
    /// Expected anomaly fraction, (0, 0.5]
    #[arg(long)]
    pub contamination: Option<f64>,

    /// Ensemble seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of isolation trees
    #[arg(long)]
    pub trees: Option<usize>,

    /// Smallest batch to score
    #[arg(long)]
    pub min_samples: Option<usize>,
}

impl ScorerArgs {
    pub fn overrides(&self) -> ScorerOverrides {
        ScorerOverrides {
            contamination: self.contamination,
            seed: self.seed,
            n_trees: self.trees,
            min_samples: self.min_samples,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}
