//! Predicate search over a parsed markup tree.
//!
//! The tree is owned by a `scraper::Html` document; everything here borrows
//! it for the duration of one extraction call and never mutates it.

use scraper::ElementRef;

/// Attribute constraints: `(name, value)` pairs. An empty value only requires
/// the attribute to be present.
pub type Attrs<'q> = [(&'q str, &'q str)];

/// Pre-order depth-first search for elements named `tag` whose attributes
/// satisfy every constraint. `root` itself is a candidate.
///
/// With `recursive == false` the search does not descend into a matched
/// element, so only the outermost match of each branch is returned.
pub fn find<'a>(root: ElementRef<'a>, tag: &str, attrs: &Attrs<'_>, recursive: bool) -> Vec<ElementRef<'a>> {
    let mut out = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if matches(node, tag, attrs) {
            out.push(node);
            if !recursive {
                continue;
            }
        }
        // Reversed so the leftmost child is visited first.
        stack.extend(node.children().rev().filter_map(ElementRef::wrap));
    }

    out
}

/// The first non-recursive match, if any.
pub fn find_first<'a>(root: ElementRef<'a>, tag: &str, attrs: &Attrs<'_>) -> Option<ElementRef<'a>> {
    find(root, tag, attrs, false).into_iter().next()
}

/// Raw text of the first text node below `node`, in document order.
///
/// Whitespace-only text nodes (indentation between tags) are not text.
pub fn first_text<'a>(node: ElementRef<'a>) -> Option<&'a str> {
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|text| &**text)
        .find(|text| !is_whitespace(text))
}

/// Like [`first_text`], falling back to `default`.
pub fn first_text_or<'a>(node: ElementRef<'a>, default: &'a str) -> &'a str {
    first_text(node).unwrap_or(default)
}

/// Attribute value, or `""` when absent.
pub fn attr<'a>(node: ElementRef<'a>, name: &str) -> &'a str {
    node.value().attr(name).unwrap_or("")
}

fn matches(node: ElementRef<'_>, tag: &str, attrs: &Attrs<'_>) -> bool {
    let element = node.value();
    element.name() == tag
        && attrs.iter().all(|(name, value)| match element.attr(name) {
            Some(actual) => value.is_empty() || actual == *value,
            None => false,
        })
}

fn is_whitespace(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_whitespace())
}
