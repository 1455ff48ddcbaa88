//! Diff collaborator seam, backed by the `similar` crate.
//!
//! Line granularity tokenizes both inputs into alternating line and `"\n"`
//! tokens and diffs the token slices with Myers LCS, so line boundaries are
//! discrete tokens and a lone changed newline surfaces as its own operation.
//! Word and char granularities use `similar`'s text tokenizers directly.

use similar::{Algorithm, ChangeTag, DiffOp, TextDiff, capture_diff_slices};

use super::Granularity;
use super::script::{EditScript, OpKind, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Tokenize line boundaries as discrete `"\n"` tokens (line granularity
    /// only). On by default; turning it off diffs whole lines with their
    /// trailing newlines attached.
    pub newline_is_token: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            newline_is_token: true,
        }
    }
}

/// Compute the raw edit script between two documents at the given
/// granularity. The result fully reconstructs both inputs: concatenating
/// non-added operation texts yields `base`, non-removed yields `target`.
pub fn diff(base: &str, target: &str, granularity: Granularity, options: &DiffOptions) -> EditScript {
    match granularity {
        Granularity::Line => {
            if options.newline_is_token {
                diff_line_tokens(base, target)
            } else {
                merge_changes(&TextDiff::from_lines(base, target))
            }
        }
        Granularity::Word => merge_changes(&TextDiff::from_words(base, target)),
        Granularity::Char => merge_changes(&TextDiff::from_chars(base, target)),
    }
}

/// Split text into line and newline tokens. An empty line contributes only
/// its newline token, so blank-line edits show up as newline-only operations.
fn line_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        if pos > 0 {
            tokens.push(&rest[..pos]);
        }
        tokens.push("\n");
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        tokens.push(rest);
    }
    tokens
}

fn diff_line_tokens(base: &str, target: &str) -> EditScript {
    let base_tokens = line_tokens(base);
    let target_tokens = line_tokens(target);
    let mut script = EditScript::new();

    for op in capture_diff_slices(Algorithm::Myers, &base_tokens, &target_tokens) {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                push_tokens(&mut script, OpKind::Unchanged, &base_tokens[old_index..old_index + len]);
            }
            DiffOp::Delete { old_index, old_len, .. } => {
                push_tokens(&mut script, OpKind::Removed, &base_tokens[old_index..old_index + old_len]);
            }
            DiffOp::Insert { new_index, new_len, .. } => {
                push_tokens(&mut script, OpKind::Added, &target_tokens[new_index..new_index + new_len]);
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                push_tokens(&mut script, OpKind::Removed, &base_tokens[old_index..old_index + old_len]);
                push_tokens(&mut script, OpKind::Added, &target_tokens[new_index..new_index + new_len]);
            }
        }
    }
    script
}

fn push_tokens(script: &mut EditScript, kind: OpKind, tokens: &[&str]) {
    script.push(Operation::with_count(kind, tokens.concat(), tokens.len()));
}

/// Join runs of same-tagged changes into single operations. Inline
/// granularities leave counts empty; the unit counter derives them.
fn merge_changes<'a>(diff: &TextDiff<'a, 'a, 'a, str>) -> EditScript {
    let mut script = EditScript::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Insert => OpKind::Added,
            ChangeTag::Delete => OpKind::Removed,
            ChangeTag::Equal => OpKind::Unchanged,
        };
        match script.last_mut() {
            Some(op) if op.kind == kind => op.text.push_str(change.value()),
            _ => script.push(Operation::new(kind, change.value())),
        }
    }
    script
}
