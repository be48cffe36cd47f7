//! # rulegen
//!
//! Password rule synthesis: given a leaked password and a dictionary, find the
//! source word it was most likely derived from and the hashcat-style rules
//! that perform the derivation.
//!
//! The work splits into stages, each usable on its own:
//!
//! - [`distance`]: the edit matrix and every minimum-cost edit path
//! - [`rule`]: the rule language, its wire codec and interpreter
//! - [`synth`]: edit paths to rule sequences, with boundary folds
//! - [`candidate`]: dictionary suggestions, scoring and per-password analysis
//! - [`pipeline`]: multi-threaded batch runs over a corpus and the summary report
//!
//! ## Example
//!
//! ```rust
//! use rulegen::prelude::*;
//!
//! let rules = synthesize("password", "P@ssw0rd!", RuleStyle::Advanced);
//! assert!(rules.iter().any(|r| r.encode().unwrap() == "c sa@ so0 $!"));
//!
//! let ops = parse_line("c sa@ so0 $!").unwrap();
//! assert_eq!(apply_all("password", &ops).unwrap(), "P@ssw0rd!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod config;
pub mod dictionary;
pub mod distance;
pub mod error;
pub mod pipeline;
pub mod rule;
pub mod synth;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::candidate::{Analysis, Candidate, CandidateGenerator, PreRule, WordRules};
    pub use crate::config::{CliOverrides, RulegenConfig};
    pub use crate::dictionary::{Dictionary, WordList};
    pub use crate::distance::{levenshtein, reverse_paths, EditMatrix, EditOp, EditPath};
    pub use crate::error::{PipelineError, RuleError, SynthError};
    pub use crate::pipeline::{
        classify, CancellationToken, Classification, OutputPaths, Pipeline, Report, RunSummary,
    };
    pub use crate::rule::{apply, apply_all, encode_line, parse_line, RuleOp};
    pub use crate::synth::{optimize, synthesize, translate, RuleSequence, RuleStyle};
}
