//! Terminal rendering of a comparison.
//!
//! This is the render collaborator bundled with the CLI: it maps the
//! semantic classification emitted by the engine onto markers and colors.
//! The engine itself never names either.

use crate::engine::{
    Comparison, OpKind, Operation, PresentationModel, SplitBlock, SplitCell, SplitRow,
    UnifiedBlock, UnifiedRow, ViewMode,
};
use colored::Colorize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Color the classification instead of relying on markers alone
    pub color: bool,
    /// Expand collapsed unchanged runs in place
    pub expand: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            expand: false,
        }
    }
}

pub fn render_comparison(comparison: &Comparison, options: &RenderOptions) -> String {
    let mut out = String::new();
    match &comparison.model {
        PresentationModel::Unified(blocks) => render_unified(&mut out, blocks, options),
        PresentationModel::Split(blocks) => render_split(&mut out, blocks, options),
        PresentationModel::Inline(ops) => render_inline(&mut out, ops, comparison.view, options),
    }
    let _ = writeln!(out, "{} · {}", comparison.summary, comparison.navigator.counter());
    out
}

fn marker(kind: OpKind) -> char {
    match kind {
        OpKind::Added => '+',
        OpKind::Removed => '-',
        OpKind::Unchanged => ' ',
    }
}

fn paint(text: String, kind: OpKind, color: bool) -> String {
    if !color {
        return text;
    }
    match kind {
        OpKind::Added => text.green().to_string(),
        OpKind::Removed => text.red().to_string(),
        OpKind::Unchanged => text,
    }
}

fn placeholder_line(out: &mut String, count: usize) {
    let plural = if count == 1 { "" } else { "s" };
    let _ = writeln!(out, "      ··· {} unchanged line{} ···", count, plural);
}

fn render_unified(out: &mut String, blocks: &[UnifiedBlock], options: &RenderOptions) {
    for block in blocks {
        match block {
            UnifiedBlock::Content(content) => unified_rows(out, &content.rows, options),
            UnifiedBlock::Collapsed(collapsed) => {
                if options.expand {
                    unified_rows(out, &collapsed.expand().rows, options);
                } else {
                    placeholder_line(out, collapsed.count);
                }
            }
        }
    }
}

fn unified_rows(out: &mut String, rows: &[UnifiedRow], options: &RenderOptions) {
    for row in rows {
        let line = format!("{:>5} {} {}", row.number, marker(row.kind), row.text);
        let _ = writeln!(out, "{}", paint(line, row.kind, options.color));
    }
}

fn render_split(out: &mut String, blocks: &[SplitBlock], options: &RenderOptions) {
    // Collect the rows that will actually print, then size the left column.
    enum Item {
        Rows(Vec<SplitRow>),
        Placeholder(usize),
    }
    let items: Vec<Item> = blocks
        .iter()
        .map(|block| match block {
            SplitBlock::Content(content) => Item::Rows(content.rows.clone()),
            SplitBlock::Collapsed(collapsed) => {
                if options.expand {
                    Item::Rows(collapsed.expand().rows)
                } else {
                    Item::Placeholder(collapsed.count)
                }
            }
        })
        .collect();

    let width = items
        .iter()
        .filter_map(|item| match item {
            Item::Rows(rows) => rows
                .iter()
                .filter_map(|row| row.left.as_ref().map(|cell| cell.text.chars().count()))
                .max(),
            Item::Placeholder(_) => None,
        })
        .max()
        .unwrap_or(0)
        .clamp(8, 60);

    for item in &items {
        match item {
            Item::Placeholder(count) => placeholder_line(out, *count),
            Item::Rows(rows) => {
                for row in rows {
                    // Only the left column is padded; the right one runs free.
                    let left = split_cell_text(&row.left, Some(width), options);
                    let right = split_cell_text(&row.right, None, options);
                    let _ = writeln!(out, "{} │ {}", left, right);
                }
            }
        }
    }
}

fn split_cell_text(cell: &Option<SplitCell>, pad_to: Option<usize>, options: &RenderOptions) -> String {
    match (cell, pad_to) {
        (None, None) => String::new(),
        (None, Some(width)) => format!("{:>5}   {:<width$}", "", "", width = width),
        (Some(cell), None) => {
            let line = format!("{:>5} {} {}", cell.number, marker(cell.kind), cell.text);
            paint(line, cell.kind, options.color)
        }
        (Some(cell), Some(width)) => {
            let text = clip(&cell.text, width);
            let line = format!(
                "{:>5} {} {:<width$}",
                cell.number,
                marker(cell.kind),
                text,
                width = width
            );
            paint(line, cell.kind, options.color)
        }
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn render_inline(out: &mut String, ops: &[Operation], view: ViewMode, options: &RenderOptions) {
    match view {
        ViewMode::Unified => {
            for op in ops {
                out.push_str(&inline_span(op, options));
            }
            out.push('\n');
        }
        ViewMode::Split => {
            // Base pane shows removals, target pane shows additions.
            let _ = writeln!(out, "--- base");
            for op in ops.iter().filter(|op| op.kind != OpKind::Added) {
                out.push_str(&inline_span(op, options));
            }
            out.push('\n');
            let _ = writeln!(out, "+++ target");
            for op in ops.iter().filter(|op| op.kind != OpKind::Removed) {
                out.push_str(&inline_span(op, options));
            }
            out.push('\n');
        }
    }
}

fn inline_span(op: &Operation, options: &RenderOptions) -> String {
    match op.kind {
        OpKind::Unchanged => op.text.clone(),
        OpKind::Added => {
            if options.color {
                op.text.green().to_string()
            } else {
                format!("{{+{}+}}", op.text)
            }
        }
        OpKind::Removed => {
            if options.color {
                op.text.red().strikethrough().to_string()
            } else {
                format!("[-{}-]", op.text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CompareOptions, Granularity, ViewMode, compare};

    fn plain() -> RenderOptions {
        RenderOptions {
            color: false,
            expand: false,
        }
    }

    #[test]
    fn unified_render_scenario() {
        let options = CompareOptions {
            granularity: Granularity::Line,
            ..CompareOptions::default()
        };
        let comparison = compare("foo\nbar\n", "foo\nbaz\n", &options).expect("non-empty");
        let text = render_comparison(&comparison, &plain());
        assert!(text.contains("    1   foo"));
        assert!(text.contains("    2 - bar"));
        assert!(text.contains("    3 + baz"));
        // Removed and added blocks are separate anchors in the unified view.
        assert!(text.contains("+1 -1 · 1 / 2"));
    }

    #[test]
    fn collapsed_placeholder_renders_count() {
        let options = CompareOptions {
            granularity: Granularity::Line,
            only_changes: true,
            ..CompareOptions::default()
        };
        let comparison =
            compare("a\nb\nx\nc\nd\n", "a\nb\ny\nc\nd\n", &options).expect("non-empty");
        let text = render_comparison(&comparison, &plain());
        assert!(text.contains("unchanged line"));
        assert!(!text.contains("  a"), "collapsed content must not print: {text}");
    }

    #[test]
    fn expanded_render_matches_full_numbering() {
        let options_collapsed = CompareOptions {
            granularity: Granularity::Line,
            only_changes: true,
            ..CompareOptions::default()
        };
        let options_full = CompareOptions {
            granularity: Granularity::Line,
            only_changes: false,
            ..CompareOptions::default()
        };
        let base = "a\nb\nx\nc\nd\n";
        let target = "a\nb\ny\nc\nd\n";
        let collapsed = compare(base, target, &options_collapsed).expect("non-empty");
        let full = compare(base, target, &options_full).expect("non-empty");
        let expand = RenderOptions {
            color: false,
            expand: true,
        };
        assert_eq!(
            render_comparison(&collapsed, &expand),
            render_comparison(&full, &plain())
        );
    }

    #[test]
    fn inline_render_uses_wdiff_markers_without_color() {
        let options = CompareOptions {
            granularity: Granularity::Word,
            ..CompareOptions::default()
        };
        let comparison = compare("hello cat", "hello dog", &options).expect("non-empty");
        let text = render_comparison(&comparison, &plain());
        assert!(text.contains("hello [-cat-]{+dog+}"));
    }

    #[test]
    fn inline_split_render_separates_panes() {
        let options = CompareOptions {
            granularity: Granularity::Word,
            view: ViewMode::Split,
            ..CompareOptions::default()
        };
        let comparison = compare("hello cat", "hello dog", &options).expect("non-empty");
        let text = render_comparison(&comparison, &plain());
        assert!(text.contains("--- base\nhello [-cat-]\n"));
        assert!(text.contains("+++ target\nhello {+dog+}\n"));
    }
}
