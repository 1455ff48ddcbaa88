//! Wrap-around navigation over change anchors.

use super::pairing::GroupKind;
use super::script::OpKind;
use super::{PresentationModel, SplitBlock, UnifiedBlock};

/// Ordered list of changed presentation blocks plus the current position.
/// Rebuilt on every comparison; the position always starts at the first
/// anchor. Collapsed placeholders are never anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    anchors: Vec<usize>,
    current: usize,
}

impl Navigator {
    pub fn new(anchors: Vec<usize>) -> Self {
        Self {
            anchors,
            current: 0,
        }
    }

    /// Collect anchors from a presentation model: content blocks whose
    /// classification is a change. An inline model is a single block that
    /// anchors once if it contains any change at all.
    pub fn from_model(model: &PresentationModel) -> Self {
        let anchors = match model {
            PresentationModel::Unified(blocks) => blocks
                .iter()
                .enumerate()
                .filter_map(|(i, block)| match block {
                    UnifiedBlock::Content(content) if content.kind.is_change() => Some(i),
                    _ => None,
                })
                .collect(),
            PresentationModel::Split(blocks) => blocks
                .iter()
                .enumerate()
                .filter_map(|(i, block)| match block {
                    SplitBlock::Content(content) if content.kind == GroupKind::Change => Some(i),
                    _ => None,
                })
                .collect(),
            PresentationModel::Inline(ops) => {
                if ops.iter().any(|op| op.kind != OpKind::Unchanged) {
                    vec![0]
                } else {
                    Vec::new()
                }
            }
        };
        Self::new(anchors)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Block index of the current anchor, if any.
    pub fn current_anchor(&self) -> Option<usize> {
        self.anchors.get(self.current).copied()
    }

    /// Advance to the next anchor, wrapping past the end. No-op when there
    /// are no anchors.
    pub fn next(&mut self) -> Option<usize> {
        if self.anchors.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.anchors.len();
        self.current_anchor()
    }

    /// Step back to the previous anchor, wrapping before the start.
    pub fn prev(&mut self) -> Option<usize> {
        if self.anchors.is_empty() {
            return None;
        }
        let n = self.anchors.len() as isize;
        self.current = (self.current as isize - 1).rem_euclid(n) as usize;
        self.current_anchor()
    }

    /// Counter display: `"3 / 7"`, or `"0 / 0"` with no anchors.
    pub fn counter(&self) -> String {
        if self.anchors.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.current + 1, self.anchors.len())
        }
    }
}
