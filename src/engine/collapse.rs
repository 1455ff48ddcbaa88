//! Context collapser and presentation blocks.
//!
//! Line numbers are threaded through an explicit `LineCursor` accumulator:
//! every emitted line, collapsed or not, advances the cursor during the
//! build, and each collapsed placeholder stores the cursor at which its pane
//! content resumes. Expanding a placeholder is a pure method over that
//! stored state, so placeholders can be expanded in any order (or never)
//! without disturbing the numbering of any other block.

use super::pairing::{ChangeGroup, GroupKind};
use super::script::{OpKind, Operation};

/// Running line numbers for the base and target panes (1-based). The
/// unified view uses only the base counter; the split view maintains both
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor {
    pub base: usize,
    pub target: usize,
}

impl LineCursor {
    pub fn new() -> Self {
        Self { base: 1, target: 1 }
    }
}

impl Default for LineCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedRow {
    pub number: usize,
    pub kind: OpKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedContent {
    pub kind: OpKind,
    pub rows: Vec<UnifiedRow>,
}

/// Placeholder for a run of unchanged lines in the unified view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedCollapsed {
    pub count: usize,
    pub resume_line: usize,
    lines: Vec<String>,
}

impl UnifiedCollapsed {
    /// Expand to full content, numbered from the stored resume line.
    /// Idempotent and independent of every other block.
    pub fn expand(&self) -> UnifiedContent {
        UnifiedContent {
            kind: OpKind::Unchanged,
            rows: number_lines(&self.lines, OpKind::Unchanged, self.resume_line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifiedBlock {
    Content(UnifiedContent),
    Collapsed(UnifiedCollapsed),
}

fn number_lines(lines: &[String], kind: OpKind, start: usize) -> Vec<UnifiedRow> {
    lines
        .iter()
        .enumerate()
        .map(|(i, text)| UnifiedRow {
            number: start + i,
            kind,
            text: text.clone(),
        })
        .collect()
}

/// Build unified-view blocks. With `only_changes`, unchanged operations
/// become collapsed placeholders; a single running counter numbers every
/// line of both sides.
pub fn build_unified(script: &[Operation], only_changes: bool) -> Vec<UnifiedBlock> {
    let mut blocks = Vec::with_capacity(script.len());
    let mut line = 1usize;
    for op in script {
        let lines: Vec<String> = op.lines().iter().map(|l| l.to_string()).collect();
        if op.kind == OpKind::Unchanged && only_changes {
            let count = lines.len();
            blocks.push(UnifiedBlock::Collapsed(UnifiedCollapsed {
                count,
                resume_line: line,
                lines,
            }));
            line += count;
        } else {
            let rows = number_lines(&lines, op.kind, line);
            line += rows.len();
            blocks.push(UnifiedBlock::Content(UnifiedContent { kind: op.kind, rows }));
        }
    }
    blocks
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCell {
    pub number: usize,
    pub kind: OpKind,
    pub text: String,
}

/// One aligned row of the side-by-side view; `None` is a blank padding cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRow {
    pub left: Option<SplitCell>,
    pub right: Option<SplitCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitContent {
    pub kind: GroupKind,
    pub rows: Vec<SplitRow>,
}

/// Placeholder for an equal group in the split view; base and target panes
/// resume at independent line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCollapsed {
    pub count: usize,
    pub resume: LineCursor,
    left: Vec<String>,
    right: Vec<String>,
}

impl SplitCollapsed {
    pub fn expand(&self) -> SplitContent {
        let (rows, _) = group_rows(GroupKind::Equal, &self.left, &self.right, self.resume);
        SplitContent {
            kind: GroupKind::Equal,
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitBlock {
    Content(SplitContent),
    Collapsed(SplitCollapsed),
}

/// Number one group's rows starting at the given cursor, padding the
/// shorter side with blanks; returns the rows and the advanced cursor.
fn group_rows(
    kind: GroupKind,
    left: &[String],
    right: &[String],
    at: LineCursor,
) -> (Vec<SplitRow>, LineCursor) {
    let (left_kind, right_kind) = match kind {
        GroupKind::Equal => (OpKind::Unchanged, OpKind::Unchanged),
        GroupKind::Change => (OpKind::Removed, OpKind::Added),
    };
    let mut cursor = at;
    let mut rows = Vec::with_capacity(left.len().max(right.len()));
    for idx in 0..left.len().max(right.len()) {
        let left_cell = left.get(idx).map(|text| {
            let cell = SplitCell {
                number: cursor.base,
                kind: left_kind,
                text: text.clone(),
            };
            cursor.base += 1;
            cell
        });
        let right_cell = right.get(idx).map(|text| {
            let cell = SplitCell {
                number: cursor.target,
                kind: right_kind,
                text: text.clone(),
            };
            cursor.target += 1;
            cell
        });
        rows.push(SplitRow {
            left: left_cell,
            right: right_cell,
        });
    }
    (rows, cursor)
}

/// Build split-view blocks from paired groups. With `only_changes`, equal
/// groups become collapsed placeholders; base and target counters advance
/// by each pane's own line contribution either way.
pub fn build_split(groups: &[ChangeGroup], only_changes: bool) -> Vec<SplitBlock> {
    let mut blocks = Vec::with_capacity(groups.len());
    let mut cursor = LineCursor::new();
    for group in groups {
        if group.kind == GroupKind::Equal && only_changes {
            blocks.push(SplitBlock::Collapsed(SplitCollapsed {
                count: group.rows(),
                resume: cursor,
                left: group.left.clone(),
                right: group.right.clone(),
            }));
            cursor.base += group.left.len();
            cursor.target += group.right.len();
        } else {
            let (rows, next) = group_rows(group.kind, &group.left, &group.right, cursor);
            cursor = next;
            blocks.push(SplitBlock::Content(SplitContent {
                kind: group.kind,
                rows,
            }));
        }
    }
    blocks
}
