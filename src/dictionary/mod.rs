//! Dictionary abstraction used to find candidate source words.
//!
//! The candidate generator only needs membership and spelling suggestions, so
//! any spell checker can be plugged in behind [`Dictionary`]. [`WordList`] is
//! the built-in backend: a plain word list with edit-distance suggestions.

mod word_list;

pub use word_list::{WordList, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_SUGGESTIONS};

/// Spell-checking capability.
///
/// Implementations are handed to worker threads, one handle per worker, so
/// they must be `Send`. Cheap `Clone` handles over shared storage are the
/// expected shape.
pub trait Dictionary: Send {
    /// True if `word` is a known term.
    fn check(&self, word: &str) -> bool;

    /// Known terms close to `word`, best first.
    fn suggest(&self, word: &str) -> Vec<String>;
}
