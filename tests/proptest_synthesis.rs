//! Property-based tests for edit paths and rule synthesis using proptest
//!
//! Every rule sequence the synthesizer emits must replay to its password;
//! these tests hammer that law with random word/password pairs.

use proptest::prelude::*;
use rulegen::prelude::*;

// Dictionary-like words
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{0,8}"
}

// Password-like strings: mixed case, digits and common symbols
fn password_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!@$ ]{0,10}"
}

// Helper: naive full-table distance for cross-checking
fn naive_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut table = vec![vec![0; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        table[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }
    table[a.len()][b.len()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: both distance implementations agree with the naive table
    #[test]
    fn prop_distances_agree(word in word_strategy(), password in password_strategy()) {
        let expected = naive_distance(&word, &password);
        prop_assert_eq!(levenshtein(&word, &password), expected);
        prop_assert_eq!(EditMatrix::new(&word, &password).distance(), expected);
    }

    /// Property: every enumerated path has exactly the minimum length
    #[test]
    fn prop_path_length_is_distance(word in word_strategy(), password in password_strategy()) {
        let matrix = EditMatrix::new(&word, &password);
        let paths = reverse_paths(&matrix);

        prop_assert!(!paths.is_empty());
        for path in &paths {
            prop_assert_eq!(path.len(), matrix.distance());
        }
    }

    /// Property: synthesized sequences replay to the password
    #[test]
    fn prop_round_trip(word in word_strategy(), password in password_strategy()) {
        for style in [RuleStyle::Advanced, RuleStyle::Simple] {
            let sequences = synthesize(&word, &password, style);
            prop_assert!(!sequences.is_empty());

            for sequence in &sequences {
                prop_assert_eq!(sequence.replay().unwrap(), password.clone());

                // and survive the wire format
                let line = sequence.encode().unwrap();
                let parsed = parse_line(&line).unwrap();
                prop_assert_eq!(apply_all(&word, &parsed).unwrap(), password.clone());
            }
        }
    }

    /// Property: folding an already folded sequence changes nothing
    #[test]
    fn prop_optimize_idempotent(word in word_strategy(), password in password_strategy()) {
        let matrix = EditMatrix::new(&word, &password);
        for path in reverse_paths(&matrix) {
            let translated = translate(&word, &password, &path).unwrap();
            let once = optimize(&translated).unwrap();
            let twice = optimize(&once).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.len() <= translated.len());
        }
    }

    /// Property: building a password from nothing only ever adds characters
    #[test]
    fn prop_empty_word_only_inserts(password in password_strategy()) {
        for sequence in synthesize("", &password, RuleStyle::Advanced) {
            prop_assert!(sequence.ops().iter().all(|op| matches!(
                op,
                RuleOp::InsertAt(..) | RuleOp::Prepend(_) | RuleOp::Append(_)
            )));
        }
    }

    /// Property: reaching the empty password only ever removes characters
    #[test]
    fn prop_empty_password_only_deletes(word in word_strategy()) {
        for sequence in synthesize(&word, "", RuleStyle::Advanced) {
            prop_assert_eq!(sequence.len(), word.len());
            prop_assert!(sequence.ops().iter().all(|op| matches!(
                op,
                RuleOp::DeleteAt(_) | RuleOp::DeleteFirst | RuleOp::DeleteLast
            )));
        }
    }

    /// Property: identical strings need no rules
    #[test]
    fn prop_identity_is_noop(word in password_strategy()) {
        let sequences = synthesize(&word, &word, RuleStyle::Advanced);
        prop_assert_eq!(sequences.len(), 1);
        prop_assert_eq!(sequences[0].encode().unwrap(), ":");
    }
}

#[test]
fn test_password_example() {
    let matrix = EditMatrix::new("password", "P@ssw0rd!");
    assert_eq!(matrix.distance(), 4);

    let sequences = synthesize("password", "P@ssw0rd!", RuleStyle::Advanced);
    let lines: Vec<String> = sequences.iter().map(|s| s.encode().unwrap()).collect();
    assert!(lines.contains(&"c sa@ so0 $!".to_string()), "{:?}", lines);
    for sequence in &sequences {
        assert_eq!(sequence.replay().unwrap(), "P@ssw0rd!");
    }
}

#[test]
fn test_hello_is_noop() {
    let sequences = synthesize("hello", "hello", RuleStyle::Advanced);
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].encode().unwrap(), ":");
}
