//! Error types for rule interpretation, synthesis and the batch pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the rule interpreter and the wire codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// An op referenced a position (or count) outside the current string.
    ///
    /// This is a logic defect when it happens on a committed op, never a
    /// property of the input password.
    #[error("rule '{op}' addresses position {position} in a string of length {len}")]
    OutOfRange {
        /// Wire symbol of the failing op
        op: char,
        /// Requested position or count
        position: usize,
        /// Length of the string at the time the op was applied
        len: usize,
    },

    /// Character arithmetic produced a code point that is not a valid `char`.
    #[error("rule '{op}' produced an invalid character from {from:?}")]
    InvalidChar {
        /// Wire symbol of the failing op
        op: char,
        /// The character the arithmetic started from
        from: char,
    },

    /// The position cannot be written as a single rule symbol (0-9, A-Z).
    #[error("position {0} cannot be encoded (maximum is 35)")]
    PositionUnencodable(usize),

    /// A rule line could not be parsed.
    #[error("cannot parse rule {token:?}: {reason}")]
    Parse {
        /// The offending text
        token: String,
        /// What was wrong with it
        reason: &'static str,
    },
}

/// Errors raised while turning an edit path into a rule sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthError {
    /// No branch of the translator reproduced the password.
    #[error("rule translation failed: {word} => {password} (partial: {partial})")]
    TranslationFailed {
        /// Source word
        word: String,
        /// Target password
        password: String,
        /// Encoded rules emitted before the failure was detected
        partial: String,
    },

    /// A fold pass produced a sequence that no longer reproduces the password.
    #[error("rule optimization failed: {word} => {password} (folded: {folded})")]
    OptimizationFailed {
        /// Source word
        word: String,
        /// Target password
        password: String,
        /// The rejected folded sequence
        folded: String,
    },

    /// Word or password is longer than the rule language can address.
    #[error("{0:?} is longer than 36 characters")]
    TooLong(String),

    /// A committed op failed inside the interpreter.
    #[error(transparent)]
    Interpreter(#[from] RuleError),
}

/// Errors that abort a batch run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Corpus unreadable or output path unwritable.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation was performed on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A worker or writer thread could not be started.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Thread role
        name: &'static str,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A worker or writer thread panicked.
    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized `Result` type for rule interpretation.
pub type Result<T> = std::result::Result<T, RuleError>;
