//! Locate JSON literals embedded in JavaScript source.
//!
//! Both sites ship their data as script assignments (`var ytInitialData = {...};`,
//! `trackinfo: [{...}],`) rather than markup. The literal is found by fixed
//! anchor strings and handed to `serde_json`; no attempt is made to parse
//! the surrounding JavaScript.

use crate::error::ExtractError;
use serde_json::{Deserializer, Value};

/// Literal text anchors around an embedded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Text preceding the value.
    pub prefix: &'static str,
    /// Number of trailing bytes of `prefix` that already belong to the value.
    pub prefix_keep: usize,
    /// Text following the value, searched from the value start, and the
    /// number of its leading bytes that belong to the value. Without a
    /// terminator the first complete JSON value is parsed and anything after
    /// it is ignored.
    pub terminator: Option<(&'static str, usize)>,
}

impl Anchor {
    /// Value starts right after `prefix` and runs to the end of the first
    /// complete JSON value.
    pub const fn after(prefix: &'static str) -> Self {
        Self {
            prefix,
            prefix_keep: 0,
            terminator: None,
        }
    }
}

/// Slice the JSON text out of `text` without parsing it.
pub fn slice<'t>(text: &'t str, anchor: &Anchor) -> Result<&'t str, ExtractError> {
    let pos = text
        .find(anchor.prefix)
        .ok_or(ExtractError::AnchorNotFound(anchor.prefix))?;
    let start = pos + anchor.prefix.len() - anchor.prefix_keep.min(anchor.prefix.len());
    let rest = text.get(start..).ok_or(ExtractError::AnchorNotFound(anchor.prefix))?;

    match anchor.terminator {
        Some((terminator, keep)) => {
            let end = rest
                .find(terminator)
                .ok_or(ExtractError::AnchorNotFound(terminator))?;
            rest.get(..end + keep.min(terminator.len()))
                .ok_or(ExtractError::AnchorNotFound(terminator))
        }
        None => Ok(rest),
    }
}

/// Find and parse the JSON value marked by `anchor`.
pub fn locate(text: &str, anchor: &Anchor) -> Result<Value, ExtractError> {
    let json = slice(text, anchor)?;

    match anchor.terminator {
        Some(_) => Ok(serde_json::from_str(json)?),
        None => parse_first_value(json),
    }
}

/// Parse the first complete JSON value at the start of `text`, ignoring any
/// trailing non-JSON text (`;</script>` and so on).
pub fn parse_first_value(text: &str) -> Result<Value, ExtractError> {
    let mut values = Deserializer::from_str(text).into_iter::<Value>();
    match values.next() {
        Some(value) => Ok(value?),
        None => Err(ExtractError::Parse {
            line: 1,
            column: 0,
            message: "no JSON value after anchor".to_string(),
        }),
    }
}

/// Every value stored under a member named `key`, at any depth, in document
/// order. Matched values are not searched further.
pub fn find_members<'v>(value: &'v Value, key: &str) -> Vec<&'v Value> {
    let mut out = Vec::new();
    gather_members(&mut out, value, key);
    out
}

fn gather_members<'v>(out: &mut Vec<&'v Value>, value: &'v Value, key: &str) {
    match value {
        Value::Object(map) => {
            for (name, member) in map {
                if name == key {
                    out.push(member);
                } else {
                    gather_members(out, member, key);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                gather_members(out, item, key);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TRACKINFO: Anchor = Anchor {
        prefix: "trackinfo: [{",
        prefix_keep: 2,
        terminator: Some(("}],", 2)),
    };

    #[test]
    fn test_slice_with_terminator() {
        let js = r#"var TralbumData = { current: {}, trackinfo: [{"a":1},{"b":2}], url: "x" };"#;
        assert_eq!(slice(js, &TRACKINFO).unwrap(), r#"[{"a":1},{"b":2}]"#);
        assert_eq!(locate(js, &TRACKINFO).unwrap(), json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_missing_prefix() {
        let err = locate("var nothing = 1;", &TRACKINFO).unwrap_err();
        assert_eq!(err, ExtractError::AnchorNotFound("trackinfo: [{"));
    }

    #[test]
    fn test_missing_terminator() {
        let err = locate(r#"trackinfo: [{"a":1}"#, &TRACKINFO).unwrap_err();
        assert_eq!(err, ExtractError::AnchorNotFound("}],"));
    }

    #[test]
    fn test_parse_stops_after_first_value() {
        let js = r#"var ytInitialData = {"a":[1,2]};var other = {"b":1};"#;
        let value = locate(js, &Anchor::after("var ytInitialData = ")).unwrap();
        assert_eq!(value, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_parse_error_reports_position() {
        let js = "var ytInitialData = {\"a\": oops};";
        match locate(js, &Anchor::after("var ytInitialData = ")) {
            Err(ExtractError::Parse { line, column, .. }) => {
                assert_eq!(line, 1);
                assert!(column > 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nothing_after_anchor() {
        let err = locate("var ytInitialData = ", &Anchor::after("var ytInitialData = ")).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_find_members_any_depth() {
        let value = json!({
            "contents": [
                {"videoRenderer": {"videoId": "a"}},
                {"shelf": {"items": [{"videoRenderer": {"videoId": "b"}}]}}
            ],
            "videoRenderer": {"videoId": "c", "videoRenderer": {"videoId": "nested"}}
        });

        let found = find_members(&value, "videoRenderer");
        let ids: Vec<_> = found.iter().map(|v| v["videoId"].as_str().unwrap()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&"a"));
        assert!(ids.contains(&"b"));
        assert!(ids.contains(&"c"));
        assert!(!ids.contains(&"nested"));
    }
}
