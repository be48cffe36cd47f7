//! In-memory word list backend.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::Dictionary;
use crate::distance::levenshtein_chars;
use crate::error::PipelineError;

/// Default edit-distance bound for [`WordList::suggest`].
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Default cap on the number of suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

#[derive(Debug)]
struct Entry {
    term: String,
    key: Vec<char>,
}

#[derive(Debug, Default)]
struct Terms {
    entries: Vec<Entry>,
    keys: FxHashSet<String>,
}

/// A word list with case-insensitive lookup.
///
/// Terms live behind an [`Arc`], so cloning a `WordList` only copies the
/// handle and the two tuning knobs.
///
/// ```rust
/// use rulegen::dictionary::{Dictionary, WordList};
///
/// let dict = WordList::from_terms(["password", "passport", "dragon"]);
/// assert!(dict.check("Password"));
/// assert_eq!(dict.suggest("passw0rd"), vec!["password", "passport"]);
/// ```
#[derive(Debug, Clone)]
pub struct WordList {
    terms: Arc<Terms>,
    max_distance: usize,
    max_suggestions: usize,
}

impl WordList {
    /// Build from terms, dropping blanks and case-insensitive duplicates.
    /// The first spelling of each term wins.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut built = Terms::default();
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let key = term.to_lowercase();
            if built.keys.insert(key.clone()) {
                built.entries.push(Entry {
                    term: term.to_string(),
                    key: key.chars().collect(),
                });
            }
        }

        Self {
            terms: Arc::new(built),
            max_distance: DEFAULT_MAX_DISTANCE,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Load a word list file, one term per line.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Io`] if the file cannot be opened or read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.map_err(|e| PipelineError::io(path, e))?);
        }

        let list = Self::from_terms(lines);
        debug!(path = %path.display(), terms = list.len(), "loaded word list");
        Ok(list)
    }

    /// Set the edit-distance bound for suggestions.
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Set the suggestion cap.
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.entries.len()
    }

    /// True if the list holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.entries.is_empty()
    }
}

impl Dictionary for WordList {
    fn check(&self, word: &str) -> bool {
        self.terms.keys.contains(&word.to_lowercase())
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let query: Vec<char> = word.to_lowercase().chars().collect();

        let mut hits: Vec<(usize, usize)> = self
            .terms
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.key.len().abs_diff(query.len()) <= self.max_distance)
            .filter_map(|(index, entry)| {
                let distance = levenshtein_chars(&entry.key, &query);
                (distance <= self.max_distance).then_some((distance, index))
            })
            .collect();

        // (distance, insertion order)
        hits.sort_unstable();
        hits.truncate(self.max_suggestions);
        hits.into_iter()
            .map(|(_, index)| self.terms.entries[index].term.clone())
            .collect()
    }
}
