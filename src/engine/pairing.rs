//! Line pairing engine: correlate removed/added runs for split rendering.

use super::script::{OpKind, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Equal,
    Change,
}

/// A row group for the side-by-side view. For `Equal`, left and right hold
/// the same lines; for `Change`, at least one side is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeGroup {
    pub kind: GroupKind,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl ChangeGroup {
    /// Row count once the shorter side is padded with blanks.
    pub fn rows(&self) -> usize {
        self.left.len().max(self.right.len())
    }
}

fn owned_lines(op: &Operation) -> Vec<String> {
    op.lines().iter().map(|line| line.to_string()).collect()
}

/// Single forward pass with one-token lookahead: a removal pairs with an
/// immediately following addition, nothing more. Runs of several removed
/// operations followed by several added ones are deliberately NOT merged
/// into one aligned group; widening the lookahead changes row alignment
/// semantics and is out of scope here.
pub fn pair_groups(script: &[Operation]) -> Vec<ChangeGroup> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < script.len() {
        let op = &script[i];
        match op.kind {
            OpKind::Unchanged => {
                let lines = owned_lines(op);
                groups.push(ChangeGroup {
                    kind: GroupKind::Equal,
                    left: lines.clone(),
                    right: lines,
                });
                i += 1;
            }
            OpKind::Removed => {
                let left = owned_lines(op);
                let mut right = Vec::new();
                if let Some(next) = script.get(i + 1) {
                    if next.kind == OpKind::Added {
                        right = owned_lines(next);
                        i += 1;
                    }
                }
                i += 1;
                groups.push(ChangeGroup {
                    kind: GroupKind::Change,
                    left,
                    right,
                });
            }
            OpKind::Added => {
                groups.push(ChangeGroup {
                    kind: GroupKind::Change,
                    left: Vec::new(),
                    right: owned_lines(op),
                });
                i += 1;
            }
        }
    }
    groups
}
