//! Corpus line filters applied by the producer before enqueueing.

/// Outcome of the producer's rejection filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Worth analyzing
    Accepted,
    /// Digits only
    Numeric,
    /// Fewer than a quarter of the characters are letters
    LowAlpha,
    /// Contains a character outside printable ASCII
    NonAscii,
}

/// Classify one corpus line. Filters apply in order: numeric, low-alpha,
/// non-ASCII.
///
/// ```rust
/// use rulegen::pipeline::{classify, Classification};
///
/// assert_eq!(classify("12345678"), Classification::Numeric);
/// assert_eq!(classify("a1234567"), Classification::LowAlpha);
/// assert_eq!(classify("пароль"), Classification::NonAscii);
/// assert_eq!(classify("correct horse"), Classification::Accepted);
/// ```
pub fn classify(password: &str) -> Classification {
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        return Classification::Numeric;
    }

    let len = password.chars().count();
    let alpha = password.chars().filter(|c| c.is_alphabetic()).count();
    if alpha * 4 < len {
        return Classification::LowAlpha;
    }

    if password.chars().any(|c| !(' '..='~').contains(&c)) {
        return Classification::NonAscii;
    }

    Classification::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric() {
        assert_eq!(classify("0"), Classification::Numeric);
        assert_eq!(classify("123456"), Classification::Numeric);
    }

    #[test]
    fn test_low_alpha_threshold() {
        // 8 chars need 2 letters
        assert_eq!(classify("a!234567"), Classification::LowAlpha);
        assert_eq!(classify("ab!34567"), Classification::Accepted);
        // 9 chars need 3 letters, 22% is not enough
        assert_eq!(classify("ab!345678"), Classification::LowAlpha);
        assert_eq!(classify("abc!45678"), Classification::Accepted);
        assert_eq!(classify("a1!2345"), Classification::LowAlpha);
        // short lines still need a letter
        assert_eq!(classify("1!2"), Classification::LowAlpha);
        assert_eq!(classify("a!2"), Classification::Accepted);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(classify("café"), Classification::NonAscii);
        assert_eq!(classify("tab\there"), Classification::NonAscii);
        assert_eq!(classify("space ok"), Classification::Accepted);
    }

    #[test]
    fn test_unicode_digits_are_not_numeric() {
        assert_eq!(classify("١٢٣٤"), Classification::LowAlpha);
        assert_eq!(classify("١٢٣"), Classification::LowAlpha);
    }
}
