//! Source word discovery and per-password analysis.
//!
//! [`CandidateGenerator::generate`] finds the dictionary words closest to a
//! password; [`CandidateGenerator::analyze`] goes on to synthesize rules for
//! each of them and keeps the cheapest.

mod cleanup;

pub use cleanup::{clean, unleet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::RulegenConfig;
use crate::dictionary::Dictionary;
use crate::distance::levenshtein;
use crate::rule::RuleOp;
use crate::synth::synthesize;

/// Transformation applied to the password before analysis.
///
/// Its inverse is appended to every rule found for the transformed password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreRule {
    /// Analyze the password as is
    Identity,
    /// Analyze the reversed password
    Reverse,
}

impl PreRule {
    /// Pre-rules to run, `[Identity]` or `[Identity, Reverse]`.
    pub fn for_config(config: &RulegenConfig) -> &'static [PreRule] {
        if config.brute_rules {
            &[PreRule::Identity, PreRule::Reverse]
        } else {
            &[PreRule::Identity]
        }
    }

    /// Apply to a password.
    pub fn apply(self, password: &str) -> String {
        match self {
            PreRule::Identity => password.to_string(),
            PreRule::Reverse => password.chars().rev().collect(),
        }
    }

    /// Ops appended to rules found for the transformed password.
    pub fn ops(self) -> &'static [RuleOp] {
        match self {
            PreRule::Identity => &[],
            PreRule::Reverse => &[RuleOp::Reverse],
        }
    }
}

/// A dictionary word scored against one pre-analysed form of a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The suggested source word
    pub word: String,
    /// Levenshtein distance from `word` to `pre_password`
    pub distance: usize,
    /// The password after `pre_rule`
    pub pre_password: String,
    /// How `pre_password` was derived
    pub pre_rule: PreRule,
}

/// Rules found for one source word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRules {
    /// Source word
    pub word: String,
    /// Shortest rule length found, not counting the pre-rule
    pub best_rule_len: usize,
    /// Encoded rule lines, pre-rule included
    pub rules: Vec<String>,
}

/// Everything kept for one password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// The analyzed password
    pub password: String,
    /// Source words, best first
    pub words: Vec<WordRules>,
}

impl Analysis {
    /// True if no source word yielded a usable rule.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(word, rule)` pairs to emit: the first rule of the first word, or
    /// every pair when `all_optimal` is set.
    pub fn emitted(&self, all_optimal: bool) -> Vec<(&str, &str)> {
        let pairs = self.words.iter().flat_map(|entry| {
            entry
                .rules
                .iter()
                .map(move |rule| (entry.word.as_str(), rule.as_str()))
        });

        if all_optimal {
            pairs.collect()
        } else {
            pairs.take(1).collect()
        }
    }
}

/// Finds source words for passwords and derives rules from them.
///
/// ```rust
/// use rulegen::candidate::CandidateGenerator;
/// use rulegen::config::RulegenConfig;
/// use rulegen::dictionary::WordList;
///
/// let dict = WordList::from_terms(["password", "dragon"]);
/// let generator = CandidateGenerator::new(dict, RulegenConfig::default());
///
/// let analysis = generator.analyze("P@ssw0rd!");
/// assert_eq!(analysis.words[0].word, "password");
/// assert_eq!(analysis.words[0].best_rule_len, 4);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateGenerator<D> {
    dictionary: D,
    config: RulegenConfig,
}

impl<D: Dictionary> CandidateGenerator<D> {
    /// Create a generator over `dictionary`.
    pub fn new(dictionary: D, config: RulegenConfig) -> Self {
        Self { dictionary, config }
    }

    /// The active settings.
    pub fn config(&self) -> &RulegenConfig {
        &self.config
    }

    /// The dictionary handle.
    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Closest source words for `password`, best first.
    pub fn generate(&self, password: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for &pre_rule in PreRule::for_config(&self.config) {
            let pre_password = pre_rule.apply(password);
            for word in self.suggestions(&pre_password) {
                let distance = levenshtein(&word, &pre_password);
                candidates.push(Candidate {
                    word,
                    distance,
                    pre_password: pre_password.clone(),
                    pre_rule,
                });
            }
        }

        // stable: dictionary order breaks ties
        candidates.sort_by_key(|candidate| candidate.distance);

        let mut selected = Vec::new();
        let mut best = usize::MAX;
        for candidate in candidates {
            if !self.config.more_words {
                if candidate.distance > best {
                    break;
                }
                best = candidate.distance;
            }
            if candidate.distance > self.config.max_word_distance {
                continue;
            }
            if selected.len() >= self.config.max_words {
                break;
            }
            selected.push(candidate);
        }

        trace!(password, count = selected.len(), "selected candidates");
        selected
    }

    /// Generate candidates, then synthesize and rank rules for each.
    pub fn analyze(&self, password: &str) -> Analysis {
        let style = self.config.rule_style();
        let mut words = Vec::new();

        for candidate in self.generate(password) {
            let sequences = synthesize(&candidate.word, &candidate.pre_password, style);
            let Some(best_rule_len) = sequences.iter().map(|s| s.len()).min() else {
                continue;
            };

            let mut rules = Vec::new();
            for sequence in &sequences {
                if !self.config.more_rules && sequence.len() > best_rule_len {
                    continue;
                }
                if sequence.len() > self.config.max_rule_len {
                    continue;
                }
                if rules.len() >= self.config.max_rules {
                    break;
                }
                match sequence.encode_with(candidate.pre_rule.ops()) {
                    Ok(line) => rules.push(line),
                    Err(err) => debug!(word = %candidate.word, %err, "rule not encodable"),
                }
            }

            if !rules.is_empty() {
                words.push(WordRules {
                    word: candidate.word,
                    best_rule_len,
                    rules,
                });
            }
        }

        words.sort_by_key(|entry| entry.best_rule_len);
        if !self.config.more_rules {
            if let Some(best) = words.first().map(|entry| entry.best_rule_len) {
                words.retain(|entry| entry.best_rule_len == best);
            }
        }

        Analysis {
            password: password.to_string(),
            words,
        }
    }

    fn suggestions(&self, pre_password: &str) -> Vec<String> {
        let mut suggestions = match &self.config.fixed_word {
            Some(word) => vec![word.clone()],
            None if self.config.simple_words => self.dictionary.suggest(pre_password),
            None => self.dictionary.suggest(&clean(pre_password)),
        };

        let limit = self.config.max_words.min(suggestions.len());
        for index in 0..limit {
            let joined: String = suggestions[index]
                .chars()
                .filter(|&c| c != ' ' && c != '-')
                .collect();
            if !suggestions.contains(&joined) {
                suggestions.push(joined);
            }
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;

    fn generator(terms: &[&str], config: RulegenConfig) -> CandidateGenerator<WordList> {
        CandidateGenerator::new(WordList::from_terms(terms), config)
    }

    fn words(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.word.as_str()).collect()
    }

    #[test]
    fn test_pre_rules() {
        let mut config = RulegenConfig::default();
        assert_eq!(PreRule::for_config(&config), &[PreRule::Identity]);
        config.brute_rules = true;
        assert_eq!(
            PreRule::for_config(&config),
            &[PreRule::Identity, PreRule::Reverse]
        );
        assert_eq!(PreRule::Reverse.apply("abc"), "cba");
    }

    #[test]
    fn test_generate_keeps_ties_only() {
        let gen = generator(&["cat", "bat", "cart", "dog"], RulegenConfig::default());
        // query "hat": cat and bat at 1, cart at 2, dog at 3
        assert_eq!(words(&gen.generate("hat")), vec!["cat", "bat"]);
    }

    #[test]
    fn test_generate_more_words() {
        let config = RulegenConfig {
            more_words: true,
            ..RulegenConfig::default()
        };
        let gen = generator(&["cat", "bat", "cart", "dog"], config);
        assert_eq!(words(&gen.generate("hat")), vec!["cat", "bat", "cart", "dog"]);
    }

    #[test]
    fn test_generate_caps() {
        let config = RulegenConfig {
            more_words: true,
            max_words: 2,
            max_word_distance: 1,
            ..RulegenConfig::default()
        };
        let gen = generator(&["cart", "cat", "bat", "dog"], config.clone());
        assert_eq!(words(&gen.generate("hat")), vec!["cat", "bat"]);

        let gen = generator(&["dog"], config);
        assert!(gen.generate("hat").is_empty());
    }

    #[test]
    fn test_generate_scores_against_uncleaned_password() {
        let gen = generator(&["monkey"], RulegenConfig::default());
        let candidates = gen.generate("monkey123");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].distance, 3);
        assert_eq!(candidates[0].pre_rule, PreRule::Identity);
    }

    #[test]
    fn test_simple_words_skips_cleanup() {
        let config = RulegenConfig {
            simple_words: true,
            ..RulegenConfig::default()
        };
        let gen = generator(&["monkey"], config);
        // 6 extra chars is past the dictionary's suggest distance
        assert!(gen.generate("monkey123456").is_empty());

        let gen = generator(&["monkey"], RulegenConfig::default());
        assert_eq!(words(&gen.generate("monkey123456")), vec!["monkey"]);
    }

    #[test]
    fn test_fixed_word() {
        let config = RulegenConfig {
            fixed_word: Some("zebra".to_string()),
            ..RulegenConfig::default()
        };
        let gen = generator(&["monkey"], config);
        assert_eq!(words(&gen.generate("monkey")), vec!["zebra"]);
    }

    #[test]
    fn test_multi_word_expansion() {
        let config = RulegenConfig {
            fixed_word: Some("ice-cream".to_string()),
            more_words: true,
            ..RulegenConfig::default()
        };
        let gen = generator(&[], config);
        // the joined variant is closer and sorts first
        assert_eq!(words(&gen.generate("icecream1")), vec!["icecream", "ice-cream"]);
    }

    #[test]
    fn test_brute_rules_adds_reverse() {
        let config = RulegenConfig {
            brute_rules: true,
            ..RulegenConfig::default()
        };
        let gen = generator(&["dragon"], config);
        let analysis = gen.analyze("nogard");
        assert_eq!(analysis.words.len(), 1);
        assert_eq!(analysis.words[0].best_rule_len, 0);
        assert_eq!(analysis.words[0].rules, vec!["r"]);
    }

    #[test]
    fn test_analyze_password_example() {
        let gen = generator(&["password", "passport"], RulegenConfig::default());
        let analysis = gen.analyze("P@ssw0rd!");
        assert_eq!(analysis.words.len(), 1);
        let entry = &analysis.words[0];
        assert_eq!(entry.word, "password");
        assert_eq!(entry.best_rule_len, 4);
        assert!(entry.rules.contains(&"c sa@ so0 $!".to_string()));
        assert_eq!(
            analysis.emitted(false),
            vec![("password", entry.rules[0].as_str())]
        );
    }

    #[test]
    fn test_analyze_rule_caps() {
        let config = RulegenConfig {
            max_rules: 1,
            ..RulegenConfig::default()
        };
        let gen = generator(&["ab"], config);
        let analysis = gen.analyze("ba");
        assert_eq!(analysis.words[0].rules.len(), 1);

        let config = RulegenConfig {
            max_rule_len: 0,
            ..RulegenConfig::default()
        };
        let gen = generator(&["password"], config);
        assert!(gen.analyze("password1").is_empty());
    }

    #[test]
    fn test_emitted_all_optimal() {
        let analysis = Analysis {
            password: "pw".to_string(),
            words: vec![
                WordRules {
                    word: "a".to_string(),
                    best_rule_len: 1,
                    rules: vec!["$1".to_string(), "^1".to_string()],
                },
                WordRules {
                    word: "b".to_string(),
                    best_rule_len: 1,
                    rules: vec!["$2".to_string()],
                },
            ],
        };
        assert_eq!(analysis.emitted(false), vec![("a", "$1")]);
        assert_eq!(
            analysis.emitted(true),
            vec![("a", "$1"), ("a", "^1"), ("b", "$2")]
        );
    }
}
