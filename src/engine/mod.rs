//! Comparison pipeline.
//!
//! One comparison request runs normalizer → counter → (pairing + collapser
//! or sentence windower) → navigation + summary to completion, producing an
//! immutable `Comparison` that replaces the previous one as a single unit.
//! No state is shared between runs.

mod collapse;
mod compute;
mod count;
mod navigate;
mod pairing;
mod script;
mod sentence;

pub use collapse::{
    LineCursor, SplitBlock, SplitCell, SplitCollapsed, SplitContent, SplitRow, UnifiedBlock,
    UnifiedCollapsed, UnifiedContent, UnifiedRow, build_split, build_unified,
};
pub use compute::{DiffOptions, diff};
pub use count::{Summary, summarize, unit_count};
pub use navigate::Navigator;
pub use pairing::{ChangeGroup, GroupKind, pair_groups};
pub use script::{
    EditScript, NEWLINE_MARKER, OpKind, Operation, normalize, source_text, target_text,
};
pub use sentence::{SentenceSpan, split_sentences, window_ops};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::json;

/// Unit of comparison; fixed for the lifetime of one edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Line,
    #[default]
    Word,
    Char,
}

impl Granularity {
    /// Word and char are the inline pair; line is its own branch of the
    /// pipeline.
    pub fn is_inline(self) -> bool {
        !matches!(self, Granularity::Line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Unified,
    Split,
}

/// How the inputs were interpreted: JSON mode is auto-detected when both
/// sides parse as JSON, and pretty-prints them before diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompareOptions {
    pub view: ViewMode,
    pub granularity: Granularity,
    pub only_changes: bool,
}

/// The rendering units handed to the render collaborator. Carries only
/// semantic classification; styling is entirely the consumer's business.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationModel {
    Unified(Vec<UnifiedBlock>),
    Split(Vec<SplitBlock>),
    Inline(Vec<Operation>),
}

/// The complete result of one comparison run. Replaced wholesale on the
/// next run; never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub mode: InputMode,
    pub view: ViewMode,
    pub granularity: Granularity,
    pub model: PresentationModel,
    pub navigator: Navigator,
    pub summary: Summary,
}

/// Run the full pipeline once. Returns `None` when both inputs are empty:
/// the viewer shows nothing at all then, which is distinct from a
/// comparison of an empty script.
pub fn compare(base: &str, target: &str, options: &CompareOptions) -> Option<Comparison> {
    if base.is_empty() && target.is_empty() {
        return None;
    }

    let mode = if json::is_json(base) && json::is_json(target) {
        InputMode::Json
    } else {
        InputMode::Text
    };
    let (base, target) = match mode {
        InputMode::Json => (json::pretty(base), json::pretty(target)),
        InputMode::Text => (base.to_string(), target.to_string()),
    };

    let script = normalize(diff(
        &base,
        &target,
        options.granularity,
        &DiffOptions::default(),
    ));
    debug!(operations = script.len(), granularity = ?options.granularity, "normalized edit script");

    let (model, summary) = if options.granularity.is_inline() {
        let ops = if options.only_changes {
            window_ops(&script)
        } else {
            script
        };
        let summary = summarize(&ops, options.granularity);
        (PresentationModel::Inline(ops), summary)
    } else {
        let summary = summarize(&script, Granularity::Line);
        let model = match options.view {
            ViewMode::Unified => {
                PresentationModel::Unified(build_unified(&script, options.only_changes))
            }
            ViewMode::Split => {
                let groups = pair_groups(&script);
                PresentationModel::Split(build_split(&groups, options.only_changes))
            }
        };
        (model, summary)
    };

    let navigator = Navigator::from_model(&model);
    debug!(anchors = navigator.len(), "presentation model built");
    Some(Comparison {
        mode,
        view: options.view,
        granularity: options.granularity,
        model,
        navigator,
        summary,
    })
}

/// Owner of the current comparison. Inputs and options live here so that
/// toggling a view option or swapping sides reruns the pipeline over the
/// same texts; each rerun swaps in a complete new result, last write wins.
#[derive(Debug, Default)]
pub struct Session {
    options: CompareOptions,
    base: String,
    target: String,
    current: Option<Comparison>,
}

impl Session {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn inputs(&self) -> (&str, &str) {
        (&self.base, &self.target)
    }

    pub fn current(&self) -> Option<&Comparison> {
        self.current.as_ref()
    }

    /// Set both inputs and run the pipeline.
    pub fn compare(
        &mut self,
        base: impl Into<String>,
        target: impl Into<String>,
    ) -> Option<&Comparison> {
        self.base = base.into();
        self.target = target.into();
        self.rebuild()
    }

    /// Exchange base and target and recompare.
    pub fn swap_inputs(&mut self) -> Option<&Comparison> {
        std::mem::swap(&mut self.base, &mut self.target);
        self.rebuild()
    }

    /// Pretty-print both inputs in place, limited to top-level JSON objects
    /// and arrays, then recompare.
    pub fn beautify_inputs(&mut self) -> Option<&Comparison> {
        if json::is_object_or_array(&self.base) {
            self.base = json::pretty(&self.base);
        }
        if json::is_object_or_array(&self.target) {
            self.target = json::pretty(&self.target);
        }
        self.rebuild()
    }

    pub fn set_view(&mut self, view: ViewMode) -> Option<&Comparison> {
        self.options.view = view;
        self.rebuild()
    }

    pub fn set_granularity(&mut self, granularity: Granularity) -> Option<&Comparison> {
        self.options.granularity = granularity;
        self.rebuild()
    }

    pub fn set_only_changes(&mut self, only_changes: bool) -> Option<&Comparison> {
        self.options.only_changes = only_changes;
        self.rebuild()
    }

    pub fn next_change(&mut self) -> Option<usize> {
        self.current.as_mut()?.navigator.next()
    }

    pub fn prev_change(&mut self) -> Option<usize> {
        self.current.as_mut()?.navigator.prev()
    }

    fn rebuild(&mut self) -> Option<&Comparison> {
        // The new model, navigator and summary land as one value; a consumer
        // can never observe a half-built comparison.
        self.current = compare(&self.base, &self.target, &self.options);
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_inputs_clear_the_comparison() {
        let mut session = Session::new(CompareOptions::default());
        assert!(session.compare("a", "b").is_some());
        assert!(session.compare("", "").is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn one_sided_empty_input_still_compares() {
        let comparison = compare("", "hello", &CompareOptions::default());
        assert!(comparison.is_some());
    }

    #[test]
    fn json_mode_is_detected_and_pretty_printed() {
        let options = CompareOptions {
            granularity: Granularity::Line,
            ..CompareOptions::default()
        };
        let comparison = compare(r#"{"a":1,"b":2}"#, r#"{"a":1,"b":3}"#, &options)
            .expect("non-empty inputs");
        assert_eq!(comparison.mode, InputMode::Json);
        // Pretty-printing puts each member on its own line, so the line diff
        // isolates the changed member.
        assert_eq!(comparison.summary, Summary { added: 1, removed: 1 });
    }

    #[test]
    fn json_mode_requires_both_sides() {
        let comparison =
            compare(r#"{"a":1}"#, "not json", &CompareOptions::default()).expect("non-empty");
        assert_eq!(comparison.mode, InputMode::Text);
    }

    #[test]
    fn line_scenario_end_to_end() {
        let options = CompareOptions {
            view: ViewMode::Split,
            granularity: Granularity::Line,
            only_changes: false,
        };
        let comparison = compare("foo\nbar\n", "foo\nbaz\n", &options).expect("non-empty");
        assert_eq!(comparison.summary, Summary { added: 1, removed: 1 });
        let PresentationModel::Split(blocks) = &comparison.model else {
            panic!("split model expected");
        };
        let SplitBlock::Content(equal) = &blocks[0] else {
            panic!("content block expected");
        };
        assert_eq!(equal.kind, GroupKind::Equal);
        assert_eq!(equal.rows.len(), 1);
        let SplitBlock::Content(change) = &blocks[1] else {
            panic!("content block expected");
        };
        assert_eq!(change.kind, GroupKind::Change);
        assert_eq!(change.rows[0].left.as_ref().map(|c| c.text.as_str()), Some("bar"));
        assert_eq!(change.rows[0].right.as_ref().map(|c| c.text.as_str()), Some("baz"));
        assert_eq!(comparison.navigator.len(), 1);
    }

    #[test]
    fn last_write_wins_across_comparisons() {
        let mut session = Session::new(CompareOptions {
            granularity: Granularity::Line,
            ..CompareOptions::default()
        });
        session.compare("one\n", "two\n");
        let first = session.current().cloned().expect("first comparison");
        session.compare("one\nshared\n", "two\nshared\nthree\n");
        let second = session.current().cloned().expect("second comparison");
        assert_ne!(first, second);
        // Navigation position reset with the replacement; the second text
        // pair has three changed blocks (one/two, plus the appended line).
        assert_eq!(second.navigator.counter(), "1 / 3");
    }

    #[test]
    fn swap_mirrors_the_summary() {
        let mut session = Session::new(CompareOptions {
            granularity: Granularity::Line,
            ..CompareOptions::default()
        });
        session.compare("a\nb\nc\n", "a\nc\n");
        let before = session.current().expect("comparison").summary;
        session.swap_inputs();
        let after = session.current().expect("comparison").summary;
        assert_eq!(before.added, after.removed);
        assert_eq!(before.removed, after.added);
    }

    #[test]
    fn beautify_applies_only_to_objects_and_arrays() {
        let mut session = Session::new(CompareOptions::default());
        session.compare(r#"{"k":[1,2]}"#, "42");
        session.beautify_inputs();
        let (base, target) = session.inputs();
        assert_eq!(base, "{\n  \"k\": [\n    1,\n    2\n  ]\n}");
        assert_eq!(target, "42");
    }

    #[test]
    fn inline_only_changes_windows_the_model() {
        let options = CompareOptions {
            granularity: Granularity::Word,
            only_changes: true,
            ..CompareOptions::default()
        };
        let base = "One. Two. Three. Four. Five.";
        let target = "One. Two. Tree. Four. Five.";
        let comparison = compare(base, target, &options).expect("non-empty");
        let PresentationModel::Inline(ops) = &comparison.model else {
            panic!("inline model expected");
        };
        assert_eq!(target_text(ops), "Two. Tree. Four. ");
        // Summary reflects the windowed list, at the rendered granularity.
        assert_eq!(comparison.summary, Summary { added: 1, removed: 1 });
        assert_eq!(comparison.navigator.len(), 1);
    }

    #[test]
    fn all_unchanged_input_has_zero_anchors() {
        let options = CompareOptions {
            granularity: Granularity::Line,
            ..CompareOptions::default()
        };
        let comparison = compare("same\n", "same\n", &options).expect("non-empty");
        assert_eq!(comparison.navigator.len(), 0);
        assert_eq!(comparison.navigator.counter(), "0 / 0");
        assert_eq!(comparison.summary, Summary::default());
    }
}
