//! Human-readable dumps of markup subtrees and JSON values.
//!
//! Used for `trace`-level output when a page no longer matches what an
//! extractor expects.

use crate::text::{escape_control, join};
use scraper::ElementRef;
use serde_json::Value;

/// Indented outline of `root`: one line per element (its tag name) and per
/// non-blank text node (quoted, control characters escaped).
pub fn tree(root: ElementRef<'_>) -> String {
    let mut lines = Vec::new();
    outline(&mut lines, root, 0);
    join(&lines, "\n")
}

fn outline(lines: &mut Vec<String>, element: ElementRef<'_>, depth: usize) {
    let indent = "    ".repeat(depth);
    lines.push(format!("{indent}{}", element.value().name()));

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            outline(lines, child_element, depth + 1);
        } else if let Some(text) = child.value().as_text() {
            if !text.trim().is_empty() {
                lines.push(format!("{indent}    \"{}\"", escape_control(text)));
            }
        }
    }
}

/// Pretty-printed JSON.
pub fn json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
