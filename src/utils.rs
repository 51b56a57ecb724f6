//! String helpers for logging and terminal output.
//!
//! - Truncation of provider payloads before they are logged
//! - Character-aware shortening and padding of table cells

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` bytes (backing off to the previous
/// character boundary) with an ellipsis and the number of dropped bytes
/// appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Shorten `s` to at most `max` characters, ending with `…` when cut.
///
/// Newlines and runs of whitespace are collapsed so that a cell stays on one line.
pub fn ellipsize(s: &str, max: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = flat.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Pad `s` with spaces on the right to `width` characters.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        // "ë" spans bytes 5..7; cutting at byte 6 would split it
        let result = truncate_for_log("Citroën C4", 6);
        assert_eq!(result, "Citro…(+6 bytes)");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("Model Y", 10), "Model Y");
        assert_eq!(ellipsize("Tesla Model Y gets price cut", 10), "Tesla Mod…");
        assert_eq!(ellipsize("line one\nline   two", 40), "line one line two");
        assert_eq!(ellipsize("Citroën ë-C4", 8), "Citroën…");
        assert_eq!(ellipsize("anything", 0), "");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("Citroën", 8), "Citroën ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
