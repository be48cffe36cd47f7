//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "rulegen")]
#[command(about = "Derive password mangling rules from leaked passwords")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a password corpus and write .rule/.word files
    Analyze {
        /// Password corpus, one per line
        corpus: PathBuf,

        /// Word list used for suggestions
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Output basename (default: "analysis")
        #[arg(short, long, default_value = "analysis")]
        basename: PathBuf,

        /// Worker threads (default: available CPUs)
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// Input queue capacity (default: workers × 100)
        #[arg(long)]
        queue_capacity: Option<usize>,

        /// Skip the summary report
        #[arg(short, long)]
        quiet: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Analyze a single password
    Password {
        /// The password
        password: String,

        /// Word list used for suggestions
        #[arg(short, long)]
        dict: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print every rule sequence turning WORD into PASSWORD
    Rules {
        /// Source word
        word: String,

        /// Target password
        password: String,

        /// Only positional insert/delete/overwrite rules
        #[arg(long)]
        simple: bool,
    },

    /// Apply a rule line to words
    Apply {
        /// Rule line, e.g. "c sa@ $1"
        rule: String,

        /// Words to transform
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Summarize existing .rule/.word output files
    Stats {
        /// Output basename of an earlier run
        basename: PathBuf,
    },
}

/// Tuning flags shared by `analyze` and `password`.
///
/// Unset flags fall back to the config file, then the defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// Maximum edit distance between password and source word
    #[arg(long)]
    pub max_word_distance: Option<usize>,

    /// Maximum source words per password
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Maximum rule length
    #[arg(long)]
    pub max_rule_len: Option<usize>,

    /// Maximum rules per source word
    #[arg(long)]
    pub max_rules: Option<usize>,

    /// Keep suboptimal source words
    #[arg(long)]
    pub more_words: bool,

    /// Keep suboptimal rules
    #[arg(long)]
    pub more_rules: bool,

    /// Query the dictionary without cleaning the password first
    #[arg(long)]
    pub simple_words: bool,

    /// Also analyze the reversed password
    #[arg(long)]
    pub brute_rules: bool,

    /// Only positional insert/delete/overwrite rules
    #[arg(long)]
    pub simple_rules: bool,

    /// Emit every tied-optimal word and rule
    #[arg(long)]
    pub all_optimal: bool,

    /// Use this source word instead of dictionary suggestions
    #[arg(short = 'w', long = "word")]
    pub fixed_word: Option<String>,

    /// Edit distance bound for dictionary suggestions
    #[arg(long)]
    pub suggest_distance: Option<usize>,

    /// Maximum dictionary suggestions
    #[arg(long)]
    pub max_suggestions: Option<usize>,
}

impl TuningArgs {
    /// Flags as config overrides; boolean flags only override when given.
    pub fn overrides(&self) -> CliOverrides {
        let flag = |set: bool| set.then_some(true);
        CliOverrides {
            max_word_distance: self.max_word_distance,
            max_words: self.max_words,
            max_rule_len: self.max_rule_len,
            max_rules: self.max_rules,
            more_words: flag(self.more_words),
            more_rules: flag(self.more_rules),
            simple_words: flag(self.simple_words),
            brute_rules: flag(self.brute_rules),
            simple_rules: flag(self.simple_rules),
            all_optimal: flag(self.all_optimal),
            fixed_word: self.fixed_word.clone(),
            suggest_distance: self.suggest_distance,
            max_suggestions: self.max_suggestions,
        }
    }
}
