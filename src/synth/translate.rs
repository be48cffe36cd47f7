//! Edit path to rule sequence translation.
//!
//! Inserts and deletes map one-to-one onto `iNX` and `DN`. Replacements are
//! where the rule language is richer than edit distance: a single case toggle
//! or substitution may fix several positions at once. A global rule is only
//! committed after checking, on a scratch copy, that the rest of the path
//! (replayed with plain insert/delete/overwrite) still lands on the password.

use smallvec::SmallVec;

use super::{check_len, RuleSequence};
use crate::distance::EditOp;
use crate::error::SynthError;
use crate::rule::{self, apply_chars, RuleOp};

/// Translate one edit path into a rule sequence using the full heuristic set.
///
/// Replacements are tried in this order, the first that applies wins:
/// 1. already correct (fixed by an earlier global rule): emit nothing
/// 2. adjacent transposition: `k`, `K`, `*NM`, else `oNX`
/// 3. case change: `t`, `u`/`l`, `c`/`C`, else `TN`
/// 4. letter to non-letter: `sXY`
/// 5. repeated neighbour: `.N`, `,N`
/// 6. character arithmetic: `+N`, `-N`, `LN`, `RN`
/// 7. `oNX`
pub fn translate(word: &str, password: &str, path: &[EditOp]) -> Result<RuleSequence, SynthError> {
    check_len(word)?;
    check_len(password)?;

    let target: SmallVec<[char; 32]> = password.chars().collect();
    let mut working: Vec<char> = word.chars().collect();
    let mut ops = Vec::with_capacity(path.len());

    for (idx, edit) in path.iter().enumerate() {
        let op = match *edit {
            EditOp::Insert { at, ch } => Some(RuleOp::InsertAt(at, ch)),
            EditOp::Delete { at } => Some(RuleOp::DeleteAt(at)),
            EditOp::Replace { at, ch } => replacement(&working, &target, at, ch, &path[idx + 1..]),
        };
        if let Some(op) = op {
            commit(&mut working, &mut ops, op)?;
        }
    }

    finish(word, password, &target, working, ops)
}

/// Translate one edit path using only `iNX`, `DN` and `oNX`.
pub fn translate_simple(
    word: &str,
    password: &str,
    path: &[EditOp],
) -> Result<RuleSequence, SynthError> {
    check_len(word)?;
    check_len(password)?;

    let target: SmallVec<[char; 32]> = password.chars().collect();
    let mut working: Vec<char> = word.chars().collect();
    let mut ops = Vec::with_capacity(path.len());

    for edit in path {
        commit(&mut working, &mut ops, basic(edit))?;
    }

    finish(word, password, &target, working, ops)
}

fn finish(
    word: &str,
    password: &str,
    target: &[char],
    working: Vec<char>,
    ops: Vec<RuleOp>,
) -> Result<RuleSequence, SynthError> {
    if working == target {
        Ok(RuleSequence::new(word, password, ops))
    } else {
        Err(SynthError::TranslationFailed {
            word: word.to_string(),
            password: password.to_string(),
            partial: rule::describe(&ops),
        })
    }
}

fn commit(working: &mut Vec<char>, ops: &mut Vec<RuleOp>, op: RuleOp) -> Result<(), SynthError> {
    if let Err(err) = apply_chars(working, &op) {
        debug_assert!(false, "committed rule {:?} failed: {}", op, err);
        return Err(err.into());
    }
    ops.push(op);
    Ok(())
}

fn basic(edit: &EditOp) -> RuleOp {
    match *edit {
        EditOp::Insert { at, ch } => RuleOp::InsertAt(at, ch),
        EditOp::Delete { at } => RuleOp::DeleteAt(at),
        EditOp::Replace { at, ch } => RuleOp::Overwrite(at, ch),
    }
}

/// Apply `candidate` to a scratch copy of `working`, then replay `remaining`
/// with basic ops and check the result is the password.
fn holds_after(working: &[char], candidate: RuleOp, remaining: &[EditOp], target: &[char]) -> bool {
    let mut scratch = working.to_vec();
    if apply_chars(&mut scratch, &candidate).is_err() {
        return false;
    }
    for edit in remaining {
        if apply_chars(&mut scratch, &basic(edit)).is_err() {
            return false;
        }
    }
    scratch == target
}

fn single_upper(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

fn single_lower(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}

/// Pick the rule for a replacement at `p`, or `None` if nothing is needed.
fn replacement(
    working: &[char],
    target: &[char],
    p: usize,
    ch: char,
    remaining: &[EditOp],
) -> Option<RuleOp> {
    let Some(&current) = working.get(p) else {
        // Not reachable for a path of this pair; the overwrite reports it.
        return Some(RuleOp::Overwrite(p, ch));
    };
    if current == ch {
        return None;
    }

    let holds = |candidate: RuleOp| holds_after(working, candidate, remaining, target);
    let next_target = target.get(p + 1).copied();
    let next_working = working.get(p + 1).copied();

    // Adjacent transposition
    if let (Some(nt), Some(nw)) = (next_target, next_working) {
        if current == nt && nw == ch {
            let candidate = if p == 0 && holds(RuleOp::SwapFront) {
                RuleOp::SwapFront
            } else if p + 2 == working.len() && holds(RuleOp::SwapBack) {
                RuleOp::SwapBack
            } else if holds(RuleOp::SwapAt(p, p + 1)) {
                RuleOp::SwapAt(p, p + 1)
            } else {
                RuleOp::Overwrite(p, ch)
            };
            return Some(candidate);
        }
    }

    let mixed_case = target.iter().any(|c| c.is_uppercase()) && target.iter().any(|c| c.is_lowercase());

    // Lowercase letter became uppercase
    if current.is_lowercase() && single_upper(current) == Some(ch) {
        let candidate = if mixed_case && holds(RuleOp::ToggleCase) {
            RuleOp::ToggleCase
        } else if holds(RuleOp::Uppercase) {
            RuleOp::Uppercase
        } else if p == 0 && holds(RuleOp::Capitalize) {
            RuleOp::Capitalize
        } else {
            RuleOp::ToggleAt(p)
        };
        return Some(candidate);
    }

    // Uppercase letter became lowercase
    if current.is_uppercase() && single_lower(current) == Some(ch) {
        let candidate = if mixed_case && holds(RuleOp::ToggleCase) {
            RuleOp::ToggleCase
        } else if holds(RuleOp::Lowercase) {
            RuleOp::Lowercase
        } else if p == 0 && holds(RuleOp::InvertCapitalize) {
            RuleOp::InvertCapitalize
        } else {
            RuleOp::ToggleAt(p)
        };
        return Some(candidate);
    }

    // Letter replaced by a digit or symbol everywhere it occurs
    if current.is_alphabetic() && !ch.is_alphabetic() && holds(RuleOp::Substitute(current, ch)) {
        return Some(RuleOp::Substitute(current, ch));
    }

    if next_target == Some(ch) && next_working == Some(ch) {
        return Some(RuleOp::CopyNext(p));
    }
    if p > 0 && target.get(p - 1) == Some(&ch) && working.get(p - 1) == Some(&ch) {
        return Some(RuleOp::CopyPrev(p));
    }

    let from = current as u32;
    let to = ch as u32;
    if from.checked_add(1) == Some(to) {
        return Some(RuleOp::Increment(p));
    }
    if from.checked_sub(1) == Some(to) {
        return Some(RuleOp::Decrement(p));
    }
    if from.checked_shl(1) == Some(to) {
        return Some(RuleOp::ShiftLeft(p));
    }
    if from >> 1 == to {
        return Some(RuleOp::ShiftRight(p));
    }

    Some(RuleOp::Overwrite(p, ch))
}
