//! Reverse-path enumeration over an [`EditMatrix`].
//!
//! Starting from the bottom-right cell, every predecessor that achieves the
//! minimum cost is followed, so all minimum-cost edit scripts are recovered,
//! not just one. The walk uses an explicit stack instead of recursion so
//! long passwords cannot exhaust the call stack.

use super::EditMatrix;

/// One single-character edit.
///
/// `at` is a position in the string *being transformed* at the moment the op
/// is applied. Ops of a path are applied left to right, and everything before
/// `at` already matches the password, so `at` is also an index into the
/// password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Insert `ch` before position `at`.
    Insert {
        /// Position in the in-progress string
        at: usize,
        /// Password character being inserted
        ch: char,
    },
    /// Delete the character at `at`.
    Delete {
        /// Position in the in-progress string
        at: usize,
    },
    /// Replace the character at `at` with `ch`.
    Replace {
        /// Position in the in-progress string
        at: usize,
        /// Password character at `at`
        ch: char,
    },
}

impl EditOp {
    /// Position the op applies to.
    #[inline]
    pub fn position(&self) -> usize {
        match *self {
            EditOp::Insert { at, .. } | EditOp::Delete { at } | EditOp::Replace { at, .. } => at,
        }
    }
}

/// Ordered edit script, in forward application order.
pub type EditPath = Vec<EditOp>;

struct Frame {
    i: usize,
    j: usize,
    /// Ops collected so far, last op first.
    ops: Vec<EditOp>,
}

/// Enumerate every minimum-cost edit path through `matrix`.
///
/// Branches are explored insert, delete, then equal-or-replace, and paths
/// come out in that depth-first order. Each returned path has exactly
/// `matrix.distance()` ops.
///
/// # Example
///
/// ```rust
/// use rulegen::distance::{reverse_paths, EditMatrix, EditOp};
///
/// let matrix = EditMatrix::new("pass", "pass1");
/// let paths = reverse_paths(&matrix);
/// assert_eq!(paths, vec![vec![EditOp::Insert { at: 4, ch: '1' }]]);
/// ```
pub fn reverse_paths(matrix: &EditMatrix) -> Vec<EditPath> {
    let distance = matrix.distance();
    let password = matrix.password();

    let mut paths = Vec::new();
    let mut stack = vec![Frame {
        i: password.len(),
        j: matrix.word().len(),
        ops: Vec::new(),
    }];

    while let Some(Frame { i, j, mut ops }) = stack.pop() {
        if i == 0 && j == 0 {
            ops.reverse();
            paths.push(ops);
            continue;
        }
        // Longer than the minimum; the final filter would discard it anyway.
        if ops.len() > distance {
            continue;
        }

        let cost = matrix.get(i, j);
        let cost_insert = if i > 0 { matrix.get(i - 1, j) } else { usize::MAX };
        let cost_delete = if j > 0 { matrix.get(i, j - 1) } else { usize::MAX };
        let cost_diagonal = if i > 0 && j > 0 {
            matrix.get(i - 1, j - 1)
        } else {
            usize::MAX
        };
        let cost_min = cost_insert.min(cost_delete).min(cost_diagonal);

        // Pushed in reverse so the insert branch is popped first.
        if cost_diagonal == cost_min {
            let mut next = ops.clone();
            if cost_diagonal != cost {
                next.push(EditOp::Replace {
                    at: i - 1,
                    ch: password[i - 1],
                });
            }
            stack.push(Frame {
                i: i - 1,
                j: j - 1,
                ops: next,
            });
        }
        if cost_delete == cost_min {
            let mut next = ops.clone();
            next.push(EditOp::Delete { at: i });
            stack.push(Frame { i, j: j - 1, ops: next });
        }
        if cost_insert == cost_min {
            ops.push(EditOp::Insert {
                at: i - 1,
                ch: password[i - 1],
            });
            stack.push(Frame { i: i - 1, j, ops });
        }
    }

    paths.retain(|path| path.len() <= distance);
    paths
}
