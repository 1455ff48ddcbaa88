//! JSON pretty-printer collaborator
//!
//! Used to normalize JSON input before diffing. Invalid syntax never fails
//! the pipeline: the raw text passes through unchanged.

use serde_json::Value;

/// Pretty-print a JSON document with two-space indentation.
/// Returns the input unchanged when it is not valid JSON.
pub fn pretty(input: &str) -> String {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| input.to_string()),
        Err(_) => input.to_string(),
    }
}

/// Is the given string a valid JSON document?
pub fn is_json(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    serde_json::from_str::<Value>(trimmed).is_ok()
}

/// Beautify guard: only top-level objects and arrays are reformatted,
/// so bare primitives are not surprised into pretty-printed form.
pub fn is_object_or_array(input: &str) -> bool {
    let trimmed = input.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return false;
    }
    matches!(
        serde_json::from_str::<Value>(trimmed),
        Ok(Value::Object(_)) | Ok(Value::Array(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_valid_json() {
        assert_eq!(pretty(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn pretty_invalid_json_passes_through() {
        assert_eq!(pretty("not json {"), "not json {");
        assert_eq!(pretty(""), "");
    }

    #[test]
    fn is_json_detection() {
        assert!(is_json(r#"{"a":1}"#));
        assert!(is_json("[1, 2, 3]"));
        assert!(is_json("42"));
        assert!(is_json("  null  "));
        assert!(!is_json(""));
        assert!(!is_json("   "));
        assert!(!is_json("hello world"));
    }

    #[test]
    fn beautify_guard_rejects_primitives() {
        assert!(is_object_or_array(r#"{"a":1}"#));
        assert!(is_object_or_array("[1]"));
        assert!(!is_object_or_array("42"));
        assert!(!is_object_or_array(r#""str""#));
        assert!(!is_object_or_array("{broken"));
    }
}
