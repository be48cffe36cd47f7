//! Post-run statistics over the rule and word output files.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;

use super::RunSummary;
use crate::error::PipelineError;

/// Entries shown per table by the `Display` impl.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Default)]
struct Frequencies {
    counts: FxHashMap<String, usize>,
    lines: usize,
}

impl Frequencies {
    fn load(path: &Path) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut freq = Self::default();

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| PipelineError::io(path, e))?;
            if line.is_empty() {
                continue;
            }
            *freq.counts.entry(line).or_insert(0) += 1;
            freq.lines += 1;
        }

        Ok(freq)
    }

    fn top(&self, n: usize) -> Vec<(&str, usize, f64)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(text, &count)| (text.as_str(), count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);

        entries
            .into_iter()
            .map(|(text, count)| (text, count, percent(count, self.lines)))
            .collect()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Reject counts plus rule and word frequencies for a finished run.
#[derive(Debug, Clone)]
pub struct Report {
    summary: RunSummary,
    rules: Frequencies,
    words: Frequencies,
}

impl Report {
    /// Count line frequencies in the two output files.
    pub fn from_files(
        rule_path: impl AsRef<Path>,
        word_path: impl AsRef<Path>,
        summary: &RunSummary,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            summary: summary.clone(),
            rules: Frequencies::load(rule_path.as_ref())?,
            words: Frequencies::load(word_path.as_ref())?,
        })
    }

    /// The run counters the report was built with.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Most frequent rule lines as `(rule, count, percent of rule lines)`.
    pub fn top_rules(&self, n: usize) -> Vec<(&str, usize, f64)> {
        self.rules.top(n)
    }

    /// Most frequent source words as `(word, count, percent of word lines)`.
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize, f64)> {
        self.words.top(n)
    }

    /// Total rule lines counted.
    pub fn rule_lines(&self) -> usize {
        self.rules.lines
    }

    /// Total word lines counted.
    pub fn word_lines(&self) -> usize {
        self.words.lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "Passwords read: {}", s.total)?;
        for (label, count) in [
            ("numeric", s.numeric),
            ("low alpha", s.low_alpha),
            ("non-ascii", s.non_ascii),
        ] {
            writeln!(
                f,
                "  rejected {label:<10} {count:>8} ({:.2}%)",
                percent(count, s.total)
            )?;
        }
        writeln!(
            f,
            "  analyzed           {:>8} ({:.2}%)",
            s.processed,
            percent(s.processed, s.total)
        )?;

        writeln!(f)?;
        writeln!(f, "Top {TOP_N} rules")?;
        for (rule, count, pct) in self.top_rules(TOP_N) {
            writeln!(f, "  {rule:<30} {count:>8} ({pct:.2}%)")?;
        }

        writeln!(f)?;
        writeln!(f, "Top {TOP_N} words")?;
        for (word, count, pct) in self.top_words(TOP_N) {
            writeln!(f, "  {word:<30} {count:>8} ({pct:.2}%)")?;
        }

        Ok(())
    }
}
