//! Small string helpers shared by the extractors.
//!
//! Splitting works on literal substrings rather than characters because the
//! sites render relations as prose ("Album by Band", "Track from Album by Band").

/// Reserved characters and their percent-encoded replacements.
const PERCENT_ENCODING: [(char, &str); 20] = [
    (' ', "%20"),
    ('!', "%21"),
    ('#', "%23"),
    ('$', "%24"),
    ('%', "%25"),
    ('&', "%26"),
    ('\'', "%27"),
    ('(', "%28"),
    (')', "%29"),
    ('*', "%2A"),
    ('+', "%2B"),
    (',', "%2C"),
    ('/', "%2F"),
    (':', "%3A"),
    (';', "%3B"),
    ('=', "%3D"),
    ('?', "%3F"),
    ('@', "%40"),
    ('[', "%5B"),
    (']', "%5D"),
];

/// Percent-encode a search query.
///
/// Each reserved character maps to its `%XX` form, every other byte up to
/// `0x20` becomes `%20`, everything else (including non-ASCII) is copied
/// through. Encoding is a single left-to-right pass, so encoding twice
/// re-encodes the `%` signs.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for ch in s.chars() {
        if (ch as u32) <= 0x20 {
            out.push_str("%20");
        } else if let Some((_, code)) = PERCENT_ENCODING.iter().find(|(c, _)| *c == ch) {
            out.push_str(code);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Trim leading and trailing whitespace into an owned string.
pub fn trimmed(s: &str) -> String {
    s.trim().to_string()
}

/// Split on a literal substring, dropping empty pieces.
///
/// `"a by b"` split on `"by"` yields `["a ", " b"]`; `"by b"` yields `[" b"]`.
pub fn split_nonempty<'a>(s: &'a str, pattern: &str) -> Vec<&'a str> {
    s.split(pattern).filter(|part| !part.is_empty()).collect()
}

/// Join pieces with a separator.
pub fn join<S: AsRef<str>>(parts: &[S], separator: &str) -> String {
    let len = parts.iter().map(|p| p.as_ref().len()).sum::<usize>()
        + separator.len() * parts.len().saturating_sub(1);

    let mut out = String::with_capacity(len);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(part.as_ref());
    }
    out
}

/// Make newlines and tabs visible for single-line log output.
pub fn escape_control(s: &str) -> String {
    s.replace('\n', "\\n").replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode_table() {
        assert_eq!(
            percent_encode(" !#$%&'()*+,/:;=?@[]"),
            "%20%21%23%24%25%26%27%28%29%2A%2B%2C%2F%3A%3B%3D%3F%40%5B%5D"
        );
    }

    #[test]
    fn test_percent_encode_control_bytes() {
        assert_eq!(percent_encode("a\tb\nc\r\u{1}d"), "a%20b%20c%20%20d");
        assert_eq!(percent_encode("\0"), "%20");
    }

    #[test]
    fn test_percent_encode_passthrough() {
        assert_eq!(percent_encode("cloudkicker"), "cloudkicker");
        assert_eq!(percent_encode("AZaz09-_.~\"<>{}|^`\\"), "AZaz09-_.~\"<>{}|^`\\");
        assert_eq!(percent_encode("Sigur Rós"), "Sigur%20Rós");
        assert_eq!(percent_encode("\u{7f}"), "\u{7f}");
    }

    #[test]
    fn test_percent_encode_not_idempotent() {
        let once = percent_encode("a b");
        assert_eq!(once, "a%20b");
        assert_eq!(percent_encode(&once), "a%2520b");
    }

    #[test]
    fn test_percent_encode_encodes_every_occurrence() {
        assert_eq!(percent_encode("a b c"), "a%20b%20c");
        assert_eq!(percent_encode("??"), "%3F%3F");
    }

    #[test]
    fn test_split_nonempty() {
        assert_eq!(split_nonempty("New Album by BandName", "by"), vec!["New Album ", " BandName"]);
        assert_eq!(split_nonempty("by BandName", "by"), vec![" BandName"]);
        assert_eq!(split_nonempty("Abbey Road by X", "by"), vec!["Ab", "ey Road ", " X"]);
        assert!(split_nonempty("", "by").is_empty());
        assert_eq!(split_nonempty("no delimiter", "from"), vec!["no delimiter"]);
    }

    #[test]
    fn test_trimmed_and_join() {
        assert_eq!(trimmed("  \n Band \t"), "Band");
        assert_eq!(join(&["a", "b", "c"], ", "), "a, b, c");
        assert_eq!(join::<&str>(&[], ", "), "");
    }

    #[test]
    fn test_escape_control() {
        assert_eq!(escape_control("a\nb\tc"), "a\\nb\\tc");
    }
}
