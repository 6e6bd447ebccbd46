//! String helpers used when rendering program cards.
//!
//! Lengths are counted in characters, so truncation never splits a
//! multi-byte character.

pub const ELLIPSIS: &str = "...";

/// Identifiers longer than this are truncated on cards
pub const ID_DISPLAY_LEN: usize = 8;

/// Source previews longer than this are truncated on cards
pub const SOURCE_PREVIEW_LEN: usize = 100;

/// Keep the first `max_chars` characters, appending an ellipsis if anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Short form of a program name or version id (e.g. "3f2a9c1b...")
pub fn truncate_id(id: &str) -> String {
    truncate_chars(id, ID_DISPLAY_LEN)
}

/// Preview of program source shown on a summary card
pub fn source_preview(source: &str) -> String {
    truncate_chars(source, SOURCE_PREVIEW_LEN)
}

/// "1 Version" / "N Versions"
pub fn version_count_label(count: usize) -> String {
    if count == 1 {
        "1 Version".to_string()
    } else {
        format!("{} Versions", count)
    }
}

/// Ordinal of the version at `index` in a newest-first list, counted from the oldest (1-based).
pub fn version_ordinal(total: usize, index: usize) -> usize {
    total.saturating_sub(index)
}

/// Pluralize a unit for counts like "3 minutes".
pub fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Clamp the left pane's share (percent) of a two-pane split so both panes
/// keep their minimum sizes.
pub fn clamp_split(left_percent: f64, left_min: f64, right_min: f64) -> f64 {
    let upper = (100.0 - right_min).max(left_min);
    if left_percent.is_nan() {
        return left_min;
    }
    left_percent.clamp(left_min, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_id_short_unchanged() {
        assert_eq!(truncate_id(""), "");
        assert_eq!(truncate_id("abc"), "abc");
        assert_eq!(truncate_id("12345678"), "12345678");
    }

    #[test]
    fn test_truncate_id_long() {
        assert_eq!(truncate_id("123456789"), "12345678...");
        assert_eq!(
            truncate_id("3f2a9c1b7d4e5f60718293a4b5c6d7e8"),
            "3f2a9c1b..."
        );
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_id("ééééééééé"), "éééééééé...");
        assert_eq!(truncate_id("日本語"), "日本語");
    }

    #[test]
    fn test_source_preview() {
        let short = "def hello(): return 'hi'";
        assert_eq!(source_preview(short), short);

        let exact = "x".repeat(100);
        assert_eq!(source_preview(&exact), exact);

        let long = "y".repeat(150);
        let preview = source_preview(&long);
        assert_eq!(preview, format!("{}...", "y".repeat(100)));
    }

    #[test]
    fn test_version_count_label() {
        assert_eq!(version_count_label(1), "1 Version");
        assert_eq!(version_count_label(2), "2 Versions");
        assert_eq!(version_count_label(0), "0 Versions");
    }

    #[test]
    fn test_version_ordinal_counts_from_oldest() {
        // newest-first list of three versions
        assert_eq!(version_ordinal(3, 0), 3);
        assert_eq!(version_ordinal(3, 1), 2);
        assert_eq!(version_ordinal(3, 2), 1);
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "hour"), "1 hour");
        assert_eq!(plural(5, "hour"), "5 hours");
    }

    #[test]
    fn test_clamp_split() {
        assert_eq!(clamp_split(70.0, 30.0, 20.0), 70.0);
        assert_eq!(clamp_split(10.0, 30.0, 20.0), 30.0);
        assert_eq!(clamp_split(95.0, 30.0, 20.0), 80.0);
        assert_eq!(clamp_split(f64::NAN, 30.0, 20.0), 30.0);
    }
}
