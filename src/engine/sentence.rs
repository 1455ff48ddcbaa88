//! Sentence-context windower for inline diffs.
//!
//! When "only changes" is active at word/char granularity, the rendered
//! operations are clipped to the sentence(s) containing the additions plus
//! one sentence of context on each side. Windowing is defined purely in
//! target-text coordinates: removals occupy zero width there and are kept
//! wholesale when they fall inside the retained range.

use regex::Regex;
use std::sync::OnceLock;

use super::script::{OpKind, Operation, target_text};

/// A byte-offset range into the target text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

/// Sentence terminator heuristic. Not a linguistic splitter: abbreviations,
/// decimals and quoted punctuation are known false-split risks.
fn terminator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[^.!?\n]+[.!?]?\s*").expect("sentence pattern is valid")
    })
}

/// Segment text into sentence spans: maximal terminator-free runs, each
/// optionally followed by one terminator and trailing whitespace. When the
/// pattern matches nowhere, the whole text is one sentence.
pub fn split_sentences(text: &str) -> Vec<SentenceSpan> {
    let spans: Vec<SentenceSpan> = terminator_pattern()
        .find_iter(text)
        .map(|m| SentenceSpan {
            start: m.start(),
            end: m.end(),
        })
        .collect();
    if spans.is_empty() {
        vec![SentenceSpan {
            start: 0,
            end: text.len(),
        }]
    } else {
        spans
    }
}

/// Clip an inline edit script to the changed sentences plus one sentence of
/// context on each side. A script with no additions (pure deletion) is
/// returned unmodified: there is nothing in target space to anchor the
/// window on.
pub fn window_ops(script: &[Operation]) -> Vec<Operation> {
    // Target-coordinate span per operation; removals have zero width.
    let mut offset = 0usize;
    let spans: Vec<SentenceSpan> = script
        .iter()
        .map(|op| {
            let start = offset;
            if op.kind != OpKind::Removed {
                offset += op.text.len();
            }
            SentenceSpan { start, end: offset }
        })
        .collect();

    let first_added = script.iter().position(|op| op.kind == OpKind::Added);
    let last_added = script.iter().rposition(|op| op.kind == OpKind::Added);
    let (Some(first), Some(last)) = (first_added, last_added) else {
        return script.to_vec();
    };
    let change_start = spans[first].start;
    let change_end = spans[last].end;

    let target = target_text(script);
    let sentences = split_sentences(&target);
    let start_idx = sentences
        .iter()
        .position(|s| s.start <= change_start && change_start < s.end)
        .unwrap_or(0);
    let end_idx = sentences
        .iter()
        .skip(start_idx)
        .position(|s| s.start < change_end && change_end <= s.end)
        .map(|i| start_idx + i)
        .unwrap_or(sentences.len() - 1);

    // One sentence of context each side, clamped to document bounds.
    let ctx_start = start_idx.saturating_sub(1);
    let ctx_end = (end_idx + 1).min(sentences.len() - 1);
    let window_start = sentences[ctx_start].start;
    let window_end = sentences[ctx_end].end;

    let first_keep = (0..script.len()).find(|&i| spans[i].end > window_start);
    let last_keep = (0..script.len()).rev().find(|&i| spans[i].start < window_end);
    let (Some(first_keep), Some(last_keep)) = (first_keep, last_keep) else {
        return Vec::new();
    };
    if last_keep < first_keep {
        return Vec::new();
    }

    let mut windowed = Vec::new();
    for i in first_keep..=last_keep {
        let op = &script[i];
        if op.kind == OpKind::Removed {
            windowed.push(op.clone());
            continue;
        }
        // Window boundaries and operation boundaries are both char
        // boundaries of the target text, so byte slicing is safe here.
        let keep_start = window_start.saturating_sub(spans[i].start);
        let keep_end = (window_end - spans[i].start).min(op.text.len());
        if keep_end > keep_start {
            windowed.push(Operation::new(op.kind, &op.text[keep_start..keep_end]));
        }
    }
    windowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Granularity;
    use crate::engine::compute::{DiffOptions, diff};
    use crate::engine::script::normalize;
    use pretty_assertions::assert_eq;

    fn sentence_texts<'a>(text: &'a str) -> Vec<&'a str> {
        split_sentences(text)
            .into_iter()
            .map(|s| &text[s.start..s.end])
            .collect()
    }

    #[test]
    fn sentences_split_on_terminators() {
        assert_eq!(
            sentence_texts("One. Two! Three?"),
            vec!["One. ", "Two! ", "Three?"]
        );
    }

    #[test]
    fn newline_terminates_a_sentence() {
        assert_eq!(sentence_texts("first\nsecond"), vec!["first\n", "second"]);
    }

    #[test]
    fn text_without_match_is_one_sentence() {
        assert_eq!(split_sentences("..."), vec![SentenceSpan { start: 0, end: 3 }]);
        assert_eq!(sentence_texts("no terminator here"), vec!["no terminator here"]);
    }

    fn inline_script(base: &str, target: &str) -> Vec<Operation> {
        normalize(diff(base, target, Granularity::Word, &DiffOptions::default()))
    }

    #[test]
    fn window_bounds_change_to_three_sentences() {
        let base = "One. Two. Three. Four. Five.";
        let target = "One. Two. Tree. Four. Five.";
        let windowed = window_ops(&inline_script(base, target));
        let text = target_text(&windowed);
        assert_eq!(text, "Two. Tree. Four. ");
        assert!(!text.contains("One"));
        assert!(!text.contains("Five"));
    }

    #[test]
    fn window_of_short_document_is_whole_document() {
        let base = "Alpha. Bravo. Charlie.";
        let target = "Alpha. Brave. Charlie.";
        let windowed = window_ops(&inline_script(base, target));
        assert_eq!(target_text(&windowed), target);
    }

    #[test]
    fn pure_deletion_returns_input_unmodified() {
        let script = inline_script("keep this. drop that.", "keep this. ");
        assert!(script.iter().any(|op| op.kind == OpKind::Removed));
        assert!(script.iter().all(|op| op.kind != OpKind::Added));
        assert_eq!(window_ops(&script), script);
    }

    #[test]
    fn removed_spans_inside_window_are_kept_wholesale() {
        let base = "One. Two old. Three.";
        let target = "One. Two new. Three.";
        let script = inline_script(base, target);
        let windowed = window_ops(&script);
        let removed: Vec<&Operation> = windowed
            .iter()
            .filter(|op| op.kind == OpKind::Removed)
            .collect();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].text, "old.");
    }

    #[test]
    fn change_at_document_start_keeps_leading_context_only() {
        let base = "Hey. Two. Three. Four.";
        let target = "Yo. Two. Three. Four.";
        let windowed = window_ops(&inline_script(base, target));
        let text = target_text(&windowed);
        assert_eq!(text, "Yo. Two. ");
        // A removal ahead of the first retained operation is not "between
        // two retained operations" and is dropped with the window.
        assert!(windowed.iter().all(|op| op.kind != OpKind::Removed));
    }

    #[test]
    fn empty_script_windows_to_empty() {
        assert!(window_ops(&[]).is_empty());
    }
}
