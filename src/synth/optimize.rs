//! Boundary folds over a translated rule sequence.
//!
//! Positional inserts and deletes at the ends of the string are rewritten as
//! the dedicated prepend/append/truncate rules, which generalize better when
//! the rules are later applied to other words:
//!
//! | before              | after          |
//! |---------------------|----------------|
//! | `i0a i1b ...`       | `^b ^a ...`    |
//! | `... i7x i8y`       | `... $x $y`    |
//! | `D0 D0 ...`         | `[ [ ...`      |
//! | `... D8 D8`         | `... ] ]`      |

use tracing::warn;

use super::RuleSequence;
use crate::error::SynthError;
use crate::rule::{self, RuleOp};

/// Apply all four folds and check the result still replays to the password.
pub fn optimize(sequence: &RuleSequence) -> Result<RuleSequence, SynthError> {
    let password_len = sequence.password().chars().count();

    let mut ops = fold_prefix(sequence.ops());
    ops = fold_suffix(&ops, password_len);
    ops = fold_left_truncate(&ops);
    ops = fold_right_truncate(&ops, password_len);

    let folded = RuleSequence::new(sequence.word(), sequence.password(), ops);
    if folded.is_valid() {
        Ok(folded)
    } else {
        Err(SynthError::OptimizationFailed {
            word: sequence.word().to_string(),
            password: sequence.password().to_string(),
            folded: rule::describe(folded.ops()),
        })
    }
}

/// [`optimize`], falling back to the input when the folded form is invalid.
pub fn optimize_or_keep(sequence: &RuleSequence) -> RuleSequence {
    match optimize(sequence) {
        Ok(folded) => folded,
        Err(err) => {
            warn!(%err, "keeping unoptimized rules");
            sequence.clone()
        }
    }
}

/// Leading `i0X i1Y ...` become `... ^Y ^X`.
fn fold_prefix(ops: &[RuleOp]) -> Vec<RuleOp> {
    let run = ops
        .iter()
        .enumerate()
        .take_while(|&(expected, op)| matches!(*op, RuleOp::InsertAt(n, _) if n == expected))
        .count();

    let mut folded: Vec<RuleOp> = ops[..run]
        .iter()
        .rev()
        .filter_map(|op| match *op {
            RuleOp::InsertAt(_, x) => Some(RuleOp::Prepend(x)),
            _ => None,
        })
        .collect();
    folded.extend_from_slice(&ops[run..]);
    folded
}

/// Trailing `... iNX iN+1Y`, ending at the last password position, become `$X $Y`.
fn fold_suffix(ops: &[RuleOp], password_len: usize) -> Vec<RuleOp> {
    let run = ops
        .iter()
        .rev()
        .enumerate()
        .take_while(|&(offset, op)| {
            matches!(*op, RuleOp::InsertAt(n, _) if offset < password_len && n == password_len - 1 - offset)
        })
        .count();

    let keep = ops.len() - run;
    let mut folded = ops[..keep].to_vec();
    folded.extend(ops[keep..].iter().filter_map(|op| match *op {
        RuleOp::InsertAt(_, x) => Some(RuleOp::Append(x)),
        _ => None,
    }));
    folded
}

/// Leading `D0` become `[`.
fn fold_left_truncate(ops: &[RuleOp]) -> Vec<RuleOp> {
    let run = ops
        .iter()
        .take_while(|op| matches!(op, RuleOp::DeleteAt(0)))
        .count();

    let mut folded = vec![RuleOp::DeleteFirst; run];
    folded.extend_from_slice(&ops[run..]);
    folded
}

/// Trailing deletes at or past the final password length become `]`.
///
/// Each such delete leaves the first `password_len` characters intact, so the
/// run as a whole drops the tail one character per op, exactly like `]`.
fn fold_right_truncate(ops: &[RuleOp], password_len: usize) -> Vec<RuleOp> {
    let run = ops
        .iter()
        .rev()
        .take_while(|op| matches!(**op, RuleOp::DeleteAt(n) if n >= password_len))
        .count();

    let keep = ops.len() - run;
    let mut folded = ops[..keep].to_vec();
    folded.extend(std::iter::repeat(RuleOp::DeleteLast).take(run));
    folded
}
