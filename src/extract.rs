//! Tag extractor — pulls the text between two markers out of raw document
//! text without parsing it.
//!
//! The scan is deliberately non-validating: it does not understand nesting,
//! comments, CDATA or markers that appear inside attribute values. On a
//! malformed document it returns a wrong slice, never an out-of-bounds one.

/// Return the text strictly between the first `open` marker and the first
/// `close` marker that follows it.
///
/// A missing marker is a normal outcome and yields `None`.
pub fn extract<'a>(haystack: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = haystack.find(open)? + open.len();
    let len = haystack[start..].find(close)?;
    Some(&haystack[start..start + len])
}

/// Like [`extract`], but the result is truncated to at most `capacity` bytes.
///
/// Truncation backs off to the previous character boundary so the slice is
/// always valid UTF-8.
pub fn extract_bounded<'a>(
    haystack: &'a str,
    open: &str,
    close: &str,
    capacity: usize,
) -> Option<&'a str> {
    extract(haystack, open, close).map(|value| truncate_to_boundary(value, capacity))
}

/// Byte offset of the first `marker` at or after `from`, or `None`.
pub fn find_from(haystack: &str, from: usize, marker: &str) -> Option<usize> {
    haystack.get(from..)?.find(marker).map(|i| from + i)
}

/// Longest prefix of `s` that fits in `capacity` bytes without splitting a
/// character.
pub fn truncate_to_boundary(s: &str, capacity: usize) -> &str {
    if s.len() <= capacity {
        return s;
    }
    let mut end = capacity;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_between_markers() {
        let xml = "<note><step>E</step><type>quarter</type></note>";
        assert_eq!(extract(xml, "<step>", "</step>"), Some("E"));
        assert_eq!(extract(xml, "<type>", "</type>"), Some("quarter"));
    }

    #[test]
    fn missing_open_or_close_is_none() {
        assert_eq!(extract("<step>E", "<step>", "</step>"), None);
        assert_eq!(extract("E</step>", "<step>", "</step>"), None);
        assert_eq!(extract("", "<step>", "</step>"), None);
    }

    #[test]
    fn close_is_searched_after_open() {
        // A close marker before the open marker must not be used.
        let s = "</step><step>G</step>";
        assert_eq!(extract(s, "<step>", "</step>"), Some("G"));
    }

    #[test]
    fn empty_value_is_some() {
        assert_eq!(extract("<text></text>", "<text>", "</text>"), Some(""));
    }

    #[test]
    fn bounded_extraction_truncates() {
        let s = "<text>abcdefgh</text>";
        assert_eq!(extract_bounded(s, "<text>", "</text>", 3), Some("abc"));
        assert_eq!(extract_bounded(s, "<text>", "</text>", 64), Some("abcdefgh"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "é" is two bytes; cutting at 1 must back off to 0.
        assert_eq!(truncate_to_boundary("é", 1), "");
        assert_eq!(truncate_to_boundary("aé", 2), "a");
        assert_eq!(truncate_to_boundary("童年", 4), "童");
    }

    #[test]
    fn find_from_is_offset_aware() {
        let s = "<a/><a/>";
        assert_eq!(find_from(s, 0, "<a/>"), Some(0));
        assert_eq!(find_from(s, 1, "<a/>"), Some(4));
        assert_eq!(find_from(s, 5, "<a/>"), None);
        assert_eq!(find_from(s, 100, "<a/>"), None);
    }
}
