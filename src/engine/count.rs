//! Unit and summary counting.

use std::fmt;

use super::Granularity;
use super::script::{OpKind, Operation};

/// Number of changed units an operation contributes at the given
/// granularity. Pure function of its inputs.
///
/// Line granularity honors the diff layer's explicit token count when
/// present and otherwise falls back to the canonical line breakdown. Word
/// granularity counts whitespace-delimited tokens, so an all-whitespace
/// operation contributes zero.
pub fn unit_count(op: &Operation, granularity: Granularity) -> usize {
    match granularity {
        Granularity::Line => op.count.unwrap_or_else(|| op.line_count()),
        Granularity::Char => op.text.chars().count(),
        Granularity::Word => op.text.split_whitespace().count(),
    }
}

/// Aggregate added/removed totals for the summary display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub added: usize,
    pub removed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.added, self.removed)
    }
}

/// Sum unit counts separately for added and removed operations. Must be run
/// over the operation list that is actually rendered, so the totals reflect
/// the same granularity and windowing as the view.
pub fn summarize(script: &[Operation], granularity: Granularity) -> Summary {
    let mut summary = Summary::default();
    for op in script {
        match op.kind {
            OpKind::Added => summary.added += unit_count(op, granularity),
            OpKind::Removed => summary.removed += unit_count(op, granularity),
            OpKind::Unchanged => {}
        }
    }
    summary
}
