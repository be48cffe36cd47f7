//! Password cleanup applied before asking the dictionary for suggestions.

use std::sync::LazyLock;

use regex::Regex;

static AFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^a-z]*(?P<word>[a-z]+)[^a-z]*$").expect("affix pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<word>.+?)@[a-z0-9.-]+\.[a-z]{2,4}").expect("email pattern is valid")
});

/// Leetspeak character to the letter it most often stands for.
pub fn unleet(c: char) -> char {
    match c {
        '1' | '!' | '|' => 'i',
        '2' => 'z',
        '3' => 'e',
        '4' | '@' => 'a',
        '5' | '$' => 's',
        '6' | '8' => 'b',
        '7' | '+' => 't',
        '9' => 'g',
        '0' => 'o',
        other => other,
    }
}

/// Strip a non-alphabetic prefix/suffix, then an e-mail domain, then undo
/// leetspeak.
///
/// ```rust
/// use rulegen::candidate::clean;
///
/// assert_eq!(clean("123password!!"), "password");
/// assert_eq!(clean("john.smith@example.com"), "john.smith");
/// assert_eq!(clean("p4$$w0rd"), "password");
/// ```
pub fn clean(password: &str) -> String {
    let stripped = AFFIX
        .captures(password)
        .and_then(|caps| caps.name("word"))
        .map_or(password, |m| m.as_str());

    let local = EMAIL
        .captures(stripped)
        .and_then(|caps| caps.name("word"))
        .map_or(stripped, |m| m.as_str());

    local.chars().map(unleet).collect()
}
