//! Edit script data model and normalizer.
//!
//! The diff layer produces raw operations; `normalize` canonicalizes them so
//! every operation has an unambiguous line breakdown before the rest of the
//! pipeline runs.

/// How a newline-only operation is displayed: one visible unit rather than
/// two empty lines.
pub const NEWLINE_MARKER: &str = "\\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Added,
    Removed,
    Unchanged,
}

impl OpKind {
    pub fn is_change(self) -> bool {
        !matches!(self, OpKind::Unchanged)
    }
}

/// One contiguous span of the edit script.
///
/// `count` is the explicit unit count supplied by the diff layer (token
/// count at line granularity); when absent it is derived from the line
/// breakdown during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OpKind,
    pub text: String,
    pub count: Option<usize>,
}

impl Operation {
    pub fn new(kind: OpKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            count: None,
        }
    }

    pub fn with_count(kind: OpKind, text: impl Into<String>, count: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            count: Some(count),
        }
    }

    /// Canonical line breakdown of this operation.
    ///
    /// A newline-only operation is a single visible unit; otherwise the text
    /// splits on newline boundaries, without a phantom final segment when the
    /// text ends with a newline. A zero-length operation is one empty line:
    /// it carries semantic weight (a trailing empty line) and is never
    /// dropped.
    pub fn lines(&self) -> Vec<&str> {
        if self.text == "\n" {
            return vec![NEWLINE_MARKER];
        }
        let mut lines: Vec<&str> = self.text.split('\n').collect();
        if self.text.ends_with('\n') {
            lines.pop();
        }
        lines
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }
}

/// Ordered sequence of operations; rebuilt from scratch on every comparison.
pub type EditScript = Vec<Operation>;

/// Canonicalize a raw operation list: merge adjacent same-kind operations
/// and fill in missing counts from the line breakdown. Zero-length
/// operations are preserved.
pub fn normalize(raw: EditScript) -> EditScript {
    let mut script: EditScript = Vec::with_capacity(raw.len());
    for op in raw {
        match script.last_mut() {
            Some(prev) if prev.kind == op.kind => {
                prev.text.push_str(&op.text);
                prev.count = match (prev.count, op.count) {
                    (Some(a), Some(b)) => Some(a + b),
                    _ => None,
                };
            }
            _ => script.push(op),
        }
    }
    for op in &mut script {
        if op.count.is_none() {
            op.count = Some(op.line_count());
        }
    }
    script
}

/// Concatenation of all non-added operation texts: the original source
/// document, byte for byte.
pub fn source_text(script: &[Operation]) -> String {
    script
        .iter()
        .filter(|op| op.kind != OpKind::Added)
        .map(|op| op.text.as_str())
        .collect()
}

/// Concatenation of all non-removed operation texts: the target document.
pub fn target_text(script: &[Operation]) -> String {
    script
        .iter()
        .filter(|op| op.kind != OpKind::Removed)
        .map(|op| op.text.as_str())
        .collect()
}
