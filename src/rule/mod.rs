//! The transformation rule language.
//!
//! Rules use the hashcat/John the Ripper mangling-rule syntax: a one-character
//! opcode followed by up to two parameters. Positions and counts are a single
//! symbol (`0`-`9` for 0-9, then `A`-`Z` for 10-35), characters are literal.
//! A rule line is a space-separated list of ops; an empty line is written as
//! the no-op `:`.
//!
//! ```rust
//! use rulegen::rule::{encode_line, parse_line, RuleOp};
//!
//! let ops = vec![RuleOp::Capitalize, RuleOp::Substitute('a', '@'), RuleOp::Append('!')];
//! let line = encode_line(&ops).unwrap();
//! assert_eq!(line, "c sa@ $!");
//! assert_eq!(parse_line(&line).unwrap(), ops);
//! ```

use std::fmt::Write as _;
use std::str::Chars;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

pub mod interpreter;

pub use interpreter::{apply, apply_all, apply_chars};

/// Highest position a single rule symbol can address.
pub const MAX_POSITION: usize = 35;

/// One primitive of the rule language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleOp {
    /// `:` do nothing
    Noop,
    /// `l` lowercase every letter
    Lowercase,
    /// `u` uppercase every letter
    Uppercase,
    /// `c` uppercase the first letter, lowercase the rest
    Capitalize,
    /// `C` lowercase the first letter, uppercase the rest
    InvertCapitalize,
    /// `t` toggle the case of every letter
    ToggleCase,
    /// `TN` toggle the case of the letter at N
    ToggleAt(usize),
    /// `E` uppercase the first letter of every space-separated token
    TitleCase,
    /// `r` reverse
    Reverse,
    /// `{` rotate left
    RotateLeft,
    /// `}` rotate right
    RotateRight,
    /// `d` duplicate the whole string
    Duplicate,
    /// `pN` repeat the whole string N times
    DuplicateN(usize),
    /// `f` append the reversed string
    Reflect,
    /// `zN` prepend the first character N times
    DuplicateFirst(usize),
    /// `ZN` append the last character N times
    DuplicateLast(usize),
    /// `q` duplicate every character
    DuplicateAll,
    /// `yN` prepend a copy of the first N characters
    DuplicatePrefix(usize),
    /// `YN` append a copy of the last N characters
    DuplicateSuffix(usize),
    /// `[` delete the first character
    DeleteFirst,
    /// `]` delete the last character
    DeleteLast,
    /// `DN` delete the character at N
    DeleteAt(usize),
    /// `'N` keep only the first N characters
    Truncate(usize),
    /// `xNM` delete M characters starting at N
    DeleteRange(usize, usize),
    /// `@X` remove every X
    Purge(char),
    /// `$X` append X
    Append(char),
    /// `^X` prepend X
    Prepend(char),
    /// `iNX` insert X before position N
    InsertAt(usize, char),
    /// `oNX` overwrite the character at N with X
    Overwrite(usize, char),
    /// `sXY` replace every X with Y
    Substitute(char, char),
    /// `LN` shift the character code at N left by one bit
    ShiftLeft(usize),
    /// `RN` shift the character code at N right by one bit
    ShiftRight(usize),
    /// `+N` increment the character code at N
    Increment(usize),
    /// `-N` decrement the character code at N
    Decrement(usize),
    /// `.N` overwrite the character at N with the one after it
    CopyNext(usize),
    /// `,N` overwrite the character at N with the one before it
    CopyPrev(usize),
    /// `k` swap the first two characters
    SwapFront,
    /// `K` swap the last two characters
    SwapBack,
    /// `*NM` swap the characters at N and M
    SwapAt(usize, usize),
}

impl RuleOp {
    /// The opcode character.
    pub fn symbol(&self) -> char {
        match self {
            RuleOp::Noop => ':',
            RuleOp::Lowercase => 'l',
            RuleOp::Uppercase => 'u',
            RuleOp::Capitalize => 'c',
            RuleOp::InvertCapitalize => 'C',
            RuleOp::ToggleCase => 't',
            RuleOp::ToggleAt(_) => 'T',
            RuleOp::TitleCase => 'E',
            RuleOp::Reverse => 'r',
            RuleOp::RotateLeft => '{',
            RuleOp::RotateRight => '}',
            RuleOp::Duplicate => 'd',
            RuleOp::DuplicateN(_) => 'p',
            RuleOp::Reflect => 'f',
            RuleOp::DuplicateFirst(_) => 'z',
            RuleOp::DuplicateLast(_) => 'Z',
            RuleOp::DuplicateAll => 'q',
            RuleOp::DuplicatePrefix(_) => 'y',
            RuleOp::DuplicateSuffix(_) => 'Y',
            RuleOp::DeleteFirst => '[',
            RuleOp::DeleteLast => ']',
            RuleOp::DeleteAt(_) => 'D',
            RuleOp::Truncate(_) => '\'',
            RuleOp::DeleteRange(..) => 'x',
            RuleOp::Purge(_) => '@',
            RuleOp::Append(_) => '$',
            RuleOp::Prepend(_) => '^',
            RuleOp::InsertAt(..) => 'i',
            RuleOp::Overwrite(..) => 'o',
            RuleOp::Substitute(..) => 's',
            RuleOp::ShiftLeft(_) => 'L',
            RuleOp::ShiftRight(_) => 'R',
            RuleOp::Increment(_) => '+',
            RuleOp::Decrement(_) => '-',
            RuleOp::CopyNext(_) => '.',
            RuleOp::CopyPrev(_) => ',',
            RuleOp::SwapFront => 'k',
            RuleOp::SwapBack => 'K',
            RuleOp::SwapAt(..) => '*',
        }
    }

    /// Append the wire form of this op to `out`.
    pub fn encode_into(&self, out: &mut String) -> Result<()> {
        out.push(self.symbol());
        match *self {
            RuleOp::ToggleAt(n)
            | RuleOp::DuplicateN(n)
            | RuleOp::DuplicateFirst(n)
            | RuleOp::DuplicateLast(n)
            | RuleOp::DuplicatePrefix(n)
            | RuleOp::DuplicateSuffix(n)
            | RuleOp::DeleteAt(n)
            | RuleOp::Truncate(n)
            | RuleOp::ShiftLeft(n)
            | RuleOp::ShiftRight(n)
            | RuleOp::Increment(n)
            | RuleOp::Decrement(n)
            | RuleOp::CopyNext(n)
            | RuleOp::CopyPrev(n) => out.push(encode_position(n)?),
            RuleOp::DeleteRange(n, m) | RuleOp::SwapAt(n, m) => {
                out.push(encode_position(n)?);
                out.push(encode_position(m)?);
            }
            RuleOp::Purge(x) | RuleOp::Append(x) | RuleOp::Prepend(x) => out.push(x),
            RuleOp::InsertAt(n, x) | RuleOp::Overwrite(n, x) => {
                out.push(encode_position(n)?);
                out.push(x);
            }
            RuleOp::Substitute(x, y) => {
                out.push(x);
                out.push(y);
            }
            _ => {}
        }
        Ok(())
    }

    /// Wire form of this op.
    pub fn encode(&self) -> Result<String> {
        let mut out = String::with_capacity(3);
        self.encode_into(&mut out)?;
        Ok(out)
    }
}

/// Encode a position or count as a rule symbol.
///
/// ```rust
/// use rulegen::rule::encode_position;
///
/// assert_eq!(encode_position(7).unwrap(), '7');
/// assert_eq!(encode_position(10).unwrap(), 'A');
/// assert!(encode_position(36).is_err());
/// ```
pub fn encode_position(n: usize) -> Result<char> {
    match n {
        0..=9 => Ok((b'0' + n as u8) as char),
        10..=MAX_POSITION => Ok((b'A' + (n - 10) as u8) as char),
        _ => Err(RuleError::PositionUnencodable(n)),
    }
}

/// Decode a rule symbol into a position or count.
pub fn decode_position(symbol: char) -> Option<usize> {
    match symbol {
        '0'..='9' => Some(symbol as usize - '0' as usize),
        'A'..='Z' => Some(symbol as usize - 'A' as usize + 10),
        _ => None,
    }
}

/// Encode a sequence of ops as one rule line.
///
/// An empty sequence is written as `:`.
pub fn encode_line(ops: &[RuleOp]) -> Result<String> {
    if ops.is_empty() {
        return Ok(":".to_string());
    }
    let mut line = String::with_capacity(ops.len() * 4);
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        op.encode_into(&mut line)?;
    }
    Ok(line)
}

/// Parse a rule line.
///
/// Ops may be separated by spaces or packed together (`c$1$2`). Parameters
/// are read positionally, so a literal space is a valid character argument
/// (`$ ` appends a space).
pub fn parse_line(line: &str) -> Result<Vec<RuleOp>> {
    let mut ops = Vec::new();
    let mut chars = line.chars();

    while let Some(symbol) = chars.next() {
        if symbol == ' ' || symbol == '\t' {
            continue;
        }

        let op = match symbol {
            ':' => RuleOp::Noop,
            'l' => RuleOp::Lowercase,
            'u' => RuleOp::Uppercase,
            'c' => RuleOp::Capitalize,
            'C' => RuleOp::InvertCapitalize,
            't' => RuleOp::ToggleCase,
            'T' => RuleOp::ToggleAt(next_position(&mut chars, symbol)?),
            'E' => RuleOp::TitleCase,
            'r' => RuleOp::Reverse,
            '{' => RuleOp::RotateLeft,
            '}' => RuleOp::RotateRight,
            'd' => RuleOp::Duplicate,
            'p' => RuleOp::DuplicateN(next_position(&mut chars, symbol)?),
            'f' => RuleOp::Reflect,
            'z' => RuleOp::DuplicateFirst(next_position(&mut chars, symbol)?),
            'Z' => RuleOp::DuplicateLast(next_position(&mut chars, symbol)?),
            'q' => RuleOp::DuplicateAll,
            'y' => RuleOp::DuplicatePrefix(next_position(&mut chars, symbol)?),
            'Y' => RuleOp::DuplicateSuffix(next_position(&mut chars, symbol)?),
            '[' => RuleOp::DeleteFirst,
            ']' => RuleOp::DeleteLast,
            'D' => RuleOp::DeleteAt(next_position(&mut chars, symbol)?),
            '\'' => RuleOp::Truncate(next_position(&mut chars, symbol)?),
            'x' => {
                let n = next_position(&mut chars, symbol)?;
                RuleOp::DeleteRange(n, next_position(&mut chars, symbol)?)
            }
            'L' => RuleOp::ShiftLeft(next_position(&mut chars, symbol)?),
            'R' => RuleOp::ShiftRight(next_position(&mut chars, symbol)?),
            '+' => RuleOp::Increment(next_position(&mut chars, symbol)?),
            '-' => RuleOp::Decrement(next_position(&mut chars, symbol)?),
            '.' => RuleOp::CopyNext(next_position(&mut chars, symbol)?),
            ',' => RuleOp::CopyPrev(next_position(&mut chars, symbol)?),
            'k' => RuleOp::SwapFront,
            'K' => RuleOp::SwapBack,
            '*' => {
                let n = next_position(&mut chars, symbol)?;
                RuleOp::SwapAt(n, next_position(&mut chars, symbol)?)
            }
            'i' => {
                let n = next_position(&mut chars, symbol)?;
                RuleOp::InsertAt(n, next_char(&mut chars, symbol)?)
            }
            'o' => {
                let n = next_position(&mut chars, symbol)?;
                RuleOp::Overwrite(n, next_char(&mut chars, symbol)?)
            }
            '@' => RuleOp::Purge(next_char(&mut chars, symbol)?),
            '$' => RuleOp::Append(next_char(&mut chars, symbol)?),
            '^' => RuleOp::Prepend(next_char(&mut chars, symbol)?),
            's' => {
                let x = next_char(&mut chars, symbol)?;
                RuleOp::Substitute(x, next_char(&mut chars, symbol)?)
            }
            other => {
                return Err(RuleError::Parse {
                    token: other.to_string(),
                    reason: "unknown opcode",
                })
            }
        };
        ops.push(op);
    }

    Ok(ops)
}

fn next_position(chars: &mut Chars<'_>, symbol: char) -> Result<usize> {
    let c = next_char(chars, symbol)?;
    decode_position(c).ok_or(RuleError::Parse {
        token: format!("{}{}", symbol, c),
        reason: "expected a position symbol (0-9, A-Z)",
    })
}

fn next_char(chars: &mut Chars<'_>, symbol: char) -> Result<char> {
    chars.next().ok_or_else(|| truncated(symbol))
}

fn truncated(symbol: char) -> RuleError {
    RuleError::Parse {
        token: symbol.to_string(),
        reason: "missing parameter",
    }
}

/// Render ops for log messages without failing on unencodable positions.
pub(crate) fn describe(ops: &[RuleOp]) -> String {
    let mut out = String::new();
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match op.encode() {
            Ok(wire) => out.push_str(&wire),
            Err(_) => {
                let _ = write!(out, "{:?}", op);
            }
        }
    }
    if out.is_empty() {
        out.push(':');
    }
    out
}
