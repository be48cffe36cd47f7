//! Rule synthesis: from a (word, password) pair to rule sequences.
//!
//! The stages run in order:
//! 1. [`EditMatrix`] and [`reverse_paths`] recover every minimum edit script
//! 2. [`translate`] turns each script into rules, preferring global rules
//!    (case changes, substitutions, swaps) where they stay consistent with the
//!    rest of the script
//! 3. [`optimize`] folds positional inserts/deletes at the string boundaries
//!    into prepend/append/truncate rules
//!
//! Every emitted [`RuleSequence`] replays to the password; anything that does
//! not is dropped and logged.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::distance::{reverse_paths, EditMatrix};
use crate::error::{RuleError, SynthError};
use crate::rule::{self, RuleOp};

pub mod optimize;
pub mod translate;

pub use optimize::{optimize, optimize_or_keep};
pub use translate::{translate, translate_simple};

/// Longest word or password the rule language can address by position.
pub const MAX_LEN: usize = rule::MAX_POSITION + 1;

/// Which primitives the translator may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStyle {
    /// Global rules, heuristics and boundary folds
    #[default]
    Advanced,
    /// Only insert, delete and overwrite at a position
    Simple,
}

/// A rule sequence transforming `word` into `password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSequence {
    word: String,
    password: String,
    ops: Vec<RuleOp>,
}

impl RuleSequence {
    pub(crate) fn new(word: &str, password: &str, ops: Vec<RuleOp>) -> Self {
        Self {
            word: word.to_string(),
            password: password.to_string(),
            ops,
        }
    }

    /// Source word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Target password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The rule ops in application order.
    pub fn ops(&self) -> &[RuleOp] {
        &self.ops
    }

    /// Number of ops. The no-op sequence has length 0.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True for the no-op sequence.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Replay the ops against the word.
    pub fn replay(&self) -> Result<String, RuleError> {
        rule::apply_all(&self.word, &self.ops)
    }

    /// True if replaying the ops reproduces the password.
    pub fn is_valid(&self) -> bool {
        self.replay().is_ok_and(|out| out == self.password)
    }

    /// Wire form, `:` for the empty sequence.
    pub fn encode(&self) -> Result<String, RuleError> {
        rule::encode_line(&self.ops)
    }

    /// Encode with `extra` ops appended (used for pre-analysis rules).
    pub fn encode_with(&self, extra: &[RuleOp]) -> Result<String, RuleError> {
        let mut ops = self.ops.clone();
        ops.extend_from_slice(extra);
        rule::encode_line(&ops)
    }
}

pub(crate) fn check_len(s: &str) -> Result<(), SynthError> {
    if s.chars().count() > MAX_LEN {
        Err(SynthError::TooLong(s.to_string()))
    } else {
        Ok(())
    }
}

/// Synthesize all distinct rule sequences for one pair.
///
/// One sequence is produced per minimum edit path, duplicates removed, in
/// path order. Pairs that cannot be expressed are logged and yield nothing.
///
/// ```rust
/// use rulegen::synth::{synthesize, RuleStyle};
///
/// let rules = synthesize("password", "P@ssw0rd!", RuleStyle::Advanced);
/// assert!(rules.iter().all(|r| r.is_valid()));
/// assert!(rules.iter().any(|r| r.encode().unwrap() == "c sa@ so0 $!"));
/// ```
pub fn synthesize(word: &str, password: &str, style: RuleStyle) -> Vec<RuleSequence> {
    if let Err(err) = check_len(word).and_then(|_| check_len(password)) {
        debug!(word, password, %err, "skipping pair");
        return Vec::new();
    }

    let matrix = EditMatrix::new(word, password);
    let mut seen: FxHashSet<Vec<RuleOp>> = FxHashSet::default();
    let mut sequences = Vec::new();

    for path in reverse_paths(&matrix) {
        let result = match style {
            RuleStyle::Advanced => {
                translate(word, password, &path).map(|sequence| optimize_or_keep(&sequence))
            }
            RuleStyle::Simple => translate_simple(word, password, &path),
        };

        match result {
            Ok(sequence) => {
                if seen.insert(sequence.ops.clone()) {
                    sequences.push(sequence);
                }
            }
            Err(err @ SynthError::Interpreter(_)) => {
                error!(word, password, %err, "interpreter rejected a committed rule");
            }
            Err(err) => debug!(%err, "skipping edit path"),
        }
    }

    // stable: path order breaks ties
    sequences.sort_by_key(RuleSequence::len);
    sequences
}
