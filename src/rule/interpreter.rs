//! Forward simulation of rule ops.
//!
//! Every op is applied to a `Vec<char>` in place. Positional ops check their
//! bounds and return [`RuleError::OutOfRange`] instead of clamping, so a
//! rule that does not fit the string can never silently produce a different
//! candidate.

use super::{RuleOp, MAX_POSITION};
use crate::error::{Result, RuleError};

/// Apply a single op to `s`.
///
/// ```rust
/// use rulegen::rule::{apply, RuleOp};
///
/// assert_eq!(apply("password", &RuleOp::Capitalize).unwrap(), "Password");
/// assert!(apply("abc", &RuleOp::DeleteAt(3)).is_err());
/// ```
pub fn apply(s: &str, op: &RuleOp) -> Result<String> {
    let mut chars: Vec<char> = s.chars().collect();
    apply_chars(&mut chars, op)?;
    Ok(chars.into_iter().collect())
}

/// Apply `ops` to `word` in order.
pub fn apply_all(word: &str, ops: &[RuleOp]) -> Result<String> {
    let mut chars: Vec<char> = word.chars().collect();
    for op in ops {
        apply_chars(&mut chars, op)?;
    }
    Ok(chars.into_iter().collect())
}

/// Apply a single op to a character buffer in place.
///
/// On error the buffer is left unchanged.
pub fn apply_chars(s: &mut Vec<char>, op: &RuleOp) -> Result<()> {
    let symbol = op.symbol();
    let len = s.len();

    match *op {
        RuleOp::Noop => {}
        RuleOp::Lowercase => *s = s.iter().flat_map(|c| c.to_lowercase()).collect(),
        RuleOp::Uppercase => *s = s.iter().flat_map(|c| c.to_uppercase()).collect(),
        RuleOp::Capitalize => {
            *s = s
                .iter()
                .enumerate()
                .flat_map(|(i, &c)| upper_if(c, i == 0))
                .collect()
        }
        RuleOp::InvertCapitalize => {
            *s = s
                .iter()
                .enumerate()
                .flat_map(|(i, &c)| upper_if(c, i != 0))
                .collect()
        }
        RuleOp::ToggleCase => *s = s.iter().flat_map(|&c| toggle(c)).collect(),
        RuleOp::ToggleAt(n) => {
            check_index(symbol, n, len)?;
            let toggled: Vec<char> = toggle(s[n]).collect();
            s.splice(n..=n, toggled);
        }
        RuleOp::TitleCase => {
            let mut out = Vec::with_capacity(len);
            let mut token_start = true;
            for &c in s.iter() {
                if token_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                token_start = c == ' ';
            }
            *s = out;
        }
        RuleOp::Reverse => s.reverse(),
        RuleOp::RotateLeft => {
            require_len(symbol, 1, len)?;
            s.rotate_left(1);
        }
        RuleOp::RotateRight => {
            require_len(symbol, 1, len)?;
            s.rotate_right(1);
        }
        RuleOp::Duplicate => s.extend_from_within(..),
        RuleOp::DuplicateN(n) => {
            check_count(symbol, n, len)?;
            *s = s.repeat(n);
        }
        RuleOp::Reflect => {
            let reversed: Vec<char> = s.iter().rev().copied().collect();
            s.extend(reversed);
        }
        RuleOp::DuplicateFirst(n) => {
            check_count(symbol, n, len)?;
            require_len(symbol, 1, len)?;
            let first = s[0];
            s.splice(0..0, std::iter::repeat(first).take(n));
        }
        RuleOp::DuplicateLast(n) => {
            check_count(symbol, n, len)?;
            require_len(symbol, 1, len)?;
            let last = s[len - 1];
            s.extend(std::iter::repeat(last).take(n));
        }
        RuleOp::DuplicateAll => *s = s.iter().flat_map(|&c| [c, c]).collect(),
        RuleOp::DuplicatePrefix(n) => {
            check_bound(symbol, n, len)?;
            let prefix: Vec<char> = s[..n].to_vec();
            s.splice(0..0, prefix);
        }
        RuleOp::DuplicateSuffix(n) => {
            check_bound(symbol, n, len)?;
            s.extend_from_within(len - n..);
        }
        RuleOp::DeleteFirst => {
            require_len(symbol, 1, len)?;
            s.remove(0);
        }
        RuleOp::DeleteLast => {
            require_len(symbol, 1, len)?;
            s.pop();
        }
        RuleOp::DeleteAt(n) => {
            check_index(symbol, n, len)?;
            s.remove(n);
        }
        RuleOp::Truncate(n) => {
            check_bound(symbol, n, len)?;
            s.truncate(n);
        }
        RuleOp::DeleteRange(n, m) => {
            let end = checked_end(symbol, n, m, len)?;
            check_bound(symbol, end, len)?;
            s.drain(n..end);
        }
        RuleOp::Purge(x) => s.retain(|&c| c != x),
        RuleOp::Append(x) => s.push(x),
        RuleOp::Prepend(x) => s.insert(0, x),
        RuleOp::InsertAt(n, x) => {
            check_bound(symbol, n, len)?;
            s.insert(n, x);
        }
        RuleOp::Overwrite(n, x) => {
            check_index(symbol, n, len)?;
            s[n] = x;
        }
        RuleOp::Substitute(x, y) => {
            for c in s.iter_mut().filter(|c| **c == x) {
                *c = y;
            }
        }
        RuleOp::ShiftLeft(n) => map_code(s, symbol, n, |code| code.checked_shl(1))?,
        RuleOp::ShiftRight(n) => map_code(s, symbol, n, |code| Some(code >> 1))?,
        RuleOp::Increment(n) => map_code(s, symbol, n, |code| code.checked_add(1))?,
        RuleOp::Decrement(n) => map_code(s, symbol, n, |code| code.checked_sub(1))?,
        RuleOp::CopyNext(n) => {
            let next = checked_end(symbol, n, 1, len)?;
            check_index(symbol, next, len)?;
            s[n] = s[next];
        }
        RuleOp::CopyPrev(n) => {
            if n == 0 {
                return Err(RuleError::OutOfRange {
                    op: symbol,
                    position: n,
                    len,
                });
            }
            check_index(symbol, n, len)?;
            s[n] = s[n - 1];
        }
        RuleOp::SwapFront => {
            require_len(symbol, 2, len)?;
            s.swap(0, 1);
        }
        RuleOp::SwapBack => {
            require_len(symbol, 2, len)?;
            s.swap(len - 2, len - 1);
        }
        RuleOp::SwapAt(n, m) => {
            check_index(symbol, n, len)?;
            check_index(symbol, m, len)?;
            s.swap(n, m);
        }
    }

    Ok(())
}

/// Swap the case of a letter; other characters pass through.
pub(crate) fn toggle(c: char) -> ToggleIter {
    if c.is_lowercase() {
        ToggleIter::Upper(c.to_uppercase())
    } else if c.is_uppercase() {
        ToggleIter::Lower(c.to_lowercase())
    } else {
        ToggleIter::Same(Some(c))
    }
}

pub(crate) enum ToggleIter {
    Upper(std::char::ToUppercase),
    Lower(std::char::ToLowercase),
    Same(Option<char>),
}

impl Iterator for ToggleIter {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            ToggleIter::Upper(it) => it.next(),
            ToggleIter::Lower(it) => it.next(),
            ToggleIter::Same(c) => c.take(),
        }
    }
}

fn upper_if(c: char, upper: bool) -> ToggleIter {
    if upper {
        ToggleIter::Upper(c.to_uppercase())
    } else {
        ToggleIter::Lower(c.to_lowercase())
    }
}

#[inline]
fn check_index(op: char, position: usize, len: usize) -> Result<()> {
    if position < len {
        Ok(())
    } else {
        Err(RuleError::OutOfRange { op, position, len })
    }
}

#[inline]
fn check_bound(op: char, position: usize, len: usize) -> Result<()> {
    if position <= len {
        Ok(())
    } else {
        Err(RuleError::OutOfRange { op, position, len })
    }
}

/// `n + m`, or out of range at `n` when that overflows.
#[inline]
fn checked_end(op: char, n: usize, m: usize, len: usize) -> Result<usize> {
    n.checked_add(m)
        .ok_or(RuleError::OutOfRange { op, position: n, len })
}

/// Repeat counts are capped at what the wire format can express.
#[inline]
fn check_count(op: char, n: usize, len: usize) -> Result<()> {
    if n <= MAX_POSITION {
        Ok(())
    } else {
        Err(RuleError::OutOfRange { op, position: n, len })
    }
}

#[inline]
fn require_len(op: char, min: usize, len: usize) -> Result<()> {
    check_index(op, min - 1, len)
}

fn map_code(
    s: &mut [char],
    op: char,
    n: usize,
    f: impl FnOnce(u32) -> Option<u32>,
) -> Result<()> {
    check_index(op, n, s.len())?;
    let from = s[n];
    s[n] = f(from as u32)
        .and_then(char::from_u32)
        .ok_or(RuleError::InvalidChar { op, from })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str, op: RuleOp) -> String {
        apply(s, &op).unwrap()
    }

    #[test]
    fn test_case_rules() {
        assert_eq!(run("PassWord", RuleOp::Noop), "PassWord");
        assert_eq!(run("PassWord", RuleOp::Lowercase), "password");
        assert_eq!(run("PassWord", RuleOp::Uppercase), "PASSWORD");
        assert_eq!(run("pASSWORD", RuleOp::Capitalize), "Password");
        assert_eq!(run("Password", RuleOp::InvertCapitalize), "pASSWORD");
        assert_eq!(run("PassWord1", RuleOp::ToggleCase), "pASSwORD1");
        assert_eq!(run("password", RuleOp::ToggleAt(4)), "passWord");
        assert_eq!(run("correct horse  battery", RuleOp::TitleCase), "Correct Horse  Battery");
        assert_eq!(run("", RuleOp::Capitalize), "");
    }

    #[test]
    fn test_reordering_rules() {
        assert_eq!(run("abc", RuleOp::Reverse), "cba");
        assert_eq!(run("abc", RuleOp::RotateLeft), "bca");
        assert_eq!(run("abc", RuleOp::RotateRight), "cab");
        assert_eq!(run("abcd", RuleOp::SwapFront), "bacd");
        assert_eq!(run("abcd", RuleOp::SwapBack), "abdc");
        assert_eq!(run("abcd", RuleOp::SwapAt(1, 3)), "adcb");
        assert_eq!(run("abcd", RuleOp::SwapAt(3, 1)), "adcb");
    }

    #[test]
    fn test_duplication_rules() {
        assert_eq!(run("ab", RuleOp::Duplicate), "abab");
        assert_eq!(run("ab", RuleOp::DuplicateN(3)), "ababab");
        assert_eq!(run("ab", RuleOp::Reflect), "abba");
        assert_eq!(run("ab", RuleOp::DuplicateFirst(2)), "aaab");
        assert_eq!(run("ab", RuleOp::DuplicateLast(2)), "abbb");
        assert_eq!(run("ab", RuleOp::DuplicateAll), "aabb");
        assert_eq!(run("abc", RuleOp::DuplicatePrefix(2)), "ababc");
        assert_eq!(run("abc", RuleOp::DuplicateSuffix(2)), "abcbc");
    }

    #[test]
    fn test_deletion_rules() {
        assert_eq!(run("abcd", RuleOp::DeleteFirst), "bcd");
        assert_eq!(run("abcd", RuleOp::DeleteLast), "abc");
        assert_eq!(run("abcd", RuleOp::DeleteAt(1)), "acd");
        assert_eq!(run("abcd", RuleOp::Truncate(2)), "ab");
        assert_eq!(run("abcd", RuleOp::DeleteRange(1, 2)), "ad");
        assert_eq!(run("banana", RuleOp::Purge('a')), "bnn");
    }

    #[test]
    fn test_insertion_rules() {
        assert_eq!(run("abc", RuleOp::Append('1')), "abc1");
        assert_eq!(run("abc", RuleOp::Prepend('1')), "1abc");
        assert_eq!(run("abc", RuleOp::InsertAt(1, 'X')), "aXbc");
        assert_eq!(run("abc", RuleOp::InsertAt(3, 'X')), "abcX");
        assert_eq!(run("abc", RuleOp::Overwrite(1, 'X')), "aXc");
        assert_eq!(run("banana", RuleOp::Substitute('a', '4')), "b4n4n4");
    }

    #[test]
    fn test_character_arithmetic() {
        assert_eq!(run("a0", RuleOp::Increment(1)), "a1");
        assert_eq!(run("a1", RuleOp::Decrement(1)), "a0");
        // '0' (0x30) << 1 == '`' (0x60)
        assert_eq!(run("0", RuleOp::ShiftLeft(0)), "`");
        assert_eq!(run("`", RuleOp::ShiftRight(0)), "0");
        assert_eq!(run("abc", RuleOp::CopyNext(0)), "bbc");
        assert_eq!(run("abc", RuleOp::CopyPrev(2)), "abb");
    }

    #[test]
    fn test_invalid_char_arithmetic() {
        assert_eq!(
            apply("\0", &RuleOp::Decrement(0)),
            Err(RuleError::InvalidChar { op: '-', from: '\0' })
        );
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let out_of_range = [
            RuleOp::ToggleAt(3),
            RuleOp::DeleteAt(3),
            RuleOp::Overwrite(3, 'x'),
            RuleOp::InsertAt(4, 'x'),
            RuleOp::Truncate(4),
            RuleOp::DeleteRange(2, 2),
            RuleOp::DuplicatePrefix(4),
            RuleOp::DuplicateSuffix(4),
            RuleOp::Increment(3),
            RuleOp::CopyNext(2),
            RuleOp::CopyPrev(0),
            RuleOp::SwapAt(0, 3),
        ];
        for op in out_of_range {
            assert!(
                matches!(apply("abc", &op), Err(RuleError::OutOfRange { .. })),
                "{:?} should be out of range",
                op
            );
        }

        for op in [
            RuleOp::DeleteFirst,
            RuleOp::DeleteLast,
            RuleOp::RotateLeft,
            RuleOp::RotateRight,
            RuleOp::DuplicateFirst(1),
        ] {
            assert!(apply("", &op).is_err(), "{:?} on empty string", op);
        }
        assert!(apply("a", &RuleOp::SwapFront).is_err());
        assert!(apply("a", &RuleOp::SwapBack).is_err());
    }

    #[test]
    fn test_huge_positions_do_not_overflow() {
        for op in [
            RuleOp::DeleteRange(usize::MAX, 1),
            RuleOp::DeleteRange(1, usize::MAX),
            RuleOp::CopyNext(usize::MAX),
            RuleOp::DuplicateN(usize::MAX),
            RuleOp::DuplicateFirst(usize::MAX),
            RuleOp::DuplicateLast(MAX_POSITION + 1),
        ] {
            assert!(
                matches!(apply("abc", &op), Err(RuleError::OutOfRange { .. })),
                "{:?} should be out of range",
                op
            );
        }
        assert_eq!(
            apply("ab", &RuleOp::DuplicateLast(MAX_POSITION)).unwrap().len(),
            2 + MAX_POSITION
        );
    }

    #[test]
    fn test_error_leaves_buffer_unchanged() {
        let mut chars: Vec<char> = "abc".chars().collect();
        assert!(apply_chars(&mut chars, &RuleOp::DeleteAt(7)).is_err());
        assert_eq!(chars, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_apply_all() {
        let ops = [
            RuleOp::Capitalize,
            RuleOp::Substitute('a', '@'),
            RuleOp::Substitute('o', '0'),
            RuleOp::Append('!'),
        ];
        assert_eq!(apply_all("password", &ops).unwrap(), "P@ssw0rd!");
        assert_eq!(apply_all("password", &[]).unwrap(), "password");
    }
}
