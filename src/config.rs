//! Tuning knobs for candidate selection and rule synthesis.
//!
//! Settings resolve in three layers: built-in defaults, then a JSON config
//! file, then command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dictionary::{DEFAULT_MAX_DISTANCE, DEFAULT_MAX_SUGGESTIONS};
use crate::synth::RuleStyle;

/// Analysis settings shared by the candidate generator and the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulegenConfig {
    /// Candidates further than this from the password are dropped
    pub max_word_distance: usize,
    /// Cap on source words kept per password
    pub max_words: usize,
    /// Rules longer than this are dropped
    pub max_rule_len: usize,
    /// Cap on rules kept per source word
    pub max_rules: usize,
    /// Keep suboptimal words too
    pub more_words: bool,
    /// Keep suboptimal rules (and the words they come from) too
    pub more_rules: bool,
    /// Skip password cleanup before asking the dictionary
    pub simple_words: bool,
    /// Also analyze the reversed password
    pub brute_rules: bool,
    /// Only positional insert/delete/overwrite rules
    pub simple_rules: bool,
    /// Emit every tied-optimal word and rule instead of the first
    pub all_optimal: bool,
    /// Use this word as the only candidate
    pub fixed_word: Option<String>,
    /// Edit-distance bound for dictionary suggestions
    pub suggest_distance: usize,
    /// Cap on dictionary suggestions
    pub max_suggestions: usize,
}

impl Default for RulegenConfig {
    fn default() -> Self {
        Self {
            max_word_distance: 10,
            max_words: 10,
            max_rule_len: 10,
            max_rules: 10,
            more_words: false,
            more_rules: false,
            simple_words: false,
            brute_rules: false,
            simple_rules: false,
            all_optimal: false,
            fixed_word: None,
            suggest_distance: DEFAULT_MAX_DISTANCE,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// See [`RulegenConfig::max_word_distance`]
    pub max_word_distance: Option<usize>,
    /// See [`RulegenConfig::max_words`]
    pub max_words: Option<usize>,
    /// See [`RulegenConfig::max_rule_len`]
    pub max_rule_len: Option<usize>,
    /// See [`RulegenConfig::max_rules`]
    pub max_rules: Option<usize>,
    /// See [`RulegenConfig::more_words`]
    pub more_words: Option<bool>,
    /// See [`RulegenConfig::more_rules`]
    pub more_rules: Option<bool>,
    /// See [`RulegenConfig::simple_words`]
    pub simple_words: Option<bool>,
    /// See [`RulegenConfig::brute_rules`]
    pub brute_rules: Option<bool>,
    /// See [`RulegenConfig::simple_rules`]
    pub simple_rules: Option<bool>,
    /// See [`RulegenConfig::all_optimal`]
    pub all_optimal: Option<bool>,
    /// See [`RulegenConfig::fixed_word`]
    pub fixed_word: Option<String>,
    /// See [`RulegenConfig::suggest_distance`]
    pub suggest_distance: Option<usize>,
    /// See [`RulegenConfig::max_suggestions`]
    pub max_suggestions: Option<usize>,
}

impl RulegenConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Self {
        Self {
            max_word_distance: cli.max_word_distance.unwrap_or(self.max_word_distance),
            max_words: cli.max_words.unwrap_or(self.max_words),
            max_rule_len: cli.max_rule_len.unwrap_or(self.max_rule_len),
            max_rules: cli.max_rules.unwrap_or(self.max_rules),
            more_words: cli.more_words.unwrap_or(self.more_words),
            more_rules: cli.more_rules.unwrap_or(self.more_rules),
            simple_words: cli.simple_words.unwrap_or(self.simple_words),
            brute_rules: cli.brute_rules.unwrap_or(self.brute_rules),
            simple_rules: cli.simple_rules.unwrap_or(self.simple_rules),
            all_optimal: cli.all_optimal.unwrap_or(self.all_optimal),
            fixed_word: cli.fixed_word.clone().or_else(|| self.fixed_word.clone()),
            suggest_distance: cli.suggest_distance.unwrap_or(self.suggest_distance),
            max_suggestions: cli.max_suggestions.unwrap_or(self.max_suggestions),
        }
    }

    /// Translator style selected by `simple_rules`.
    pub fn rule_style(&self) -> RuleStyle {
        if self.simple_rules {
            RuleStyle::Simple
        } else {
            RuleStyle::Advanced
        }
    }
}

/// `<config dir>/rulegen/config.json`
#[cfg(feature = "cli")]
pub fn default_path() -> Result<std::path::PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("rulegen").join("config.json"))
}
