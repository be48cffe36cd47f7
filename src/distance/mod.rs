//! Edit distance between a source word and a password.
//!
//! Two implementations live here:
//! - [`EditMatrix`]: the full dynamic-programming table, kept so that
//!   [`reverse_paths`] can walk it backwards and recover edit operations
//! - [`levenshtein`]: space-optimized distance (two rows) for scoring many
//!   candidate words where only the number is needed
//!
//! Both operate on `char`s, not bytes, so multi-byte input is indexed the
//! same way the rule language indexes it.

use smallvec::SmallVec;

pub mod path;

pub use path::{reverse_paths, EditOp, EditPath};

/// Character buffer used for the short strings this crate deals with.
pub(crate) type Chars = SmallVec<[char; 32]>;

/// Full Levenshtein table between a password (rows) and a word (columns).
///
/// `M[i][j]` is the distance between the first `i` characters of the
/// password and the first `j` characters of the word.
///
/// # Example
///
/// ```rust
/// use rulegen::distance::EditMatrix;
///
/// let matrix = EditMatrix::new("password", "P@ssw0rd!");
/// assert_eq!(matrix.distance(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditMatrix {
    word: Chars,
    password: Chars,
    cells: Vec<usize>,
    cols: usize,
}

impl EditMatrix {
    /// Build the table for transforming `word` into `password`.
    pub fn new(word: &str, password: &str) -> Self {
        let word: Chars = word.chars().collect();
        let password: Chars = password.chars().collect();

        let rows = password.len() + 1;
        let cols = word.len() + 1;
        let mut cells = vec![0; rows * cols];

        for (j, cell) in cells.iter_mut().enumerate().take(cols) {
            *cell = j;
        }
        for i in 0..rows {
            cells[i * cols] = i;
        }

        for i in 1..rows {
            for j in 1..cols {
                let diagonal = cells[(i - 1) * cols + j - 1];
                cells[i * cols + j] = if password[i - 1] == word[j - 1] {
                    diagonal
                } else {
                    let insertion = cells[(i - 1) * cols + j];
                    let deletion = cells[i * cols + j - 1];
                    1 + insertion.min(deletion).min(diagonal)
                };
            }
        }

        Self {
            word,
            password,
            cells,
            cols,
        }
    }

    /// Value of cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i > rows() - 1` or `j > cols() - 1`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        assert!(j < self.cols, "column {} out of range", j);
        self.cells[i * self.cols + j]
    }

    /// Number of rows (`len(password) + 1`).
    #[inline]
    pub fn rows(&self) -> usize {
        self.password.len() + 1
    }

    /// Number of columns (`len(word) + 1`).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Minimum edit distance, the bottom-right cell.
    #[inline]
    pub fn distance(&self) -> usize {
        self.get(self.password.len(), self.word.len())
    }

    /// Source word as characters.
    #[inline]
    pub fn word(&self) -> &[char] {
        &self.word
    }

    /// Target password as characters.
    #[inline]
    pub fn password(&self) -> &[char] {
        &self.password
    }
}

/// Levenshtein distance between two strings.
///
/// Classic O(n·m) dynamic programming keeping only two rows. Used to score
/// dictionary suggestions where the full table is not needed.
///
/// # Example
///
/// ```rust
/// use rulegen::distance::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
pub fn levenshtein(source: &str, target: &str) -> usize {
    let source_chars: Chars = source.chars().collect();
    let target_chars: Chars = target.chars().collect();
    levenshtein_chars(&source_chars, &target_chars)
}

/// [`levenshtein`] over pre-split characters.
pub(crate) fn levenshtein_chars(source_chars: &[char], target_chars: &[char]) -> usize {
    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = usize::from(source_chars[i - 1] != target_chars[j - 1]);

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}
