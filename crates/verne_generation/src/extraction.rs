//! Title, year, and word-count extraction from generated prose.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use verne_core::{ContentKind, default_title};

/// The machine-parseable title marker the text prompt mandates.
static TITLE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Title:\s*(.+?)\*\*").expect("Valid title marker regex")
});

/// Standalone 4-digit numbers, candidate setting years.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{4})\b").expect("Valid year regex"));

/// Longest first line still treated as a title.
const MAX_TITLE_LINE_CHARS: usize = 80;

/// Remove the leading title marker so downstream passes see prose only.
pub(crate) fn strip_title_marker(text: &str) -> Cow<'_, str> {
    TITLE_MARKER_RE.replace(text, "")
}

/// Extract a display title from generated prose.
///
/// Prefers the mandated `**Title: …**` marker, falls back to a short
/// first line, then to a timestamped placeholder.
pub fn extract_title(text: &str, kind: ContentKind) -> String {
    if let Some(caps) = TITLE_MARKER_RE.captures(text)
        && let Some(m) = caps.get(1)
    {
        let title = m.as_str().trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    if let Some(line) = text.lines().find(|l| !l.trim().is_empty()) {
        let line = line.trim().trim_matches('*').trim();
        let line = line.strip_prefix("Title:").map(str::trim).unwrap_or(line);
        if !line.is_empty() && line.chars().count() <= MAX_TITLE_LINE_CHARS {
            return line.to_string();
        }
    }

    default_title(kind)
}

/// First standalone 4-digit number that reads as a calendar year.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_RE.captures_iter(text).find_map(|caps| {
        caps.get(1)?
            .as_str()
            .parse::<i32>()
            .ok()
            .filter(|year| (1000..=9999).contains(year))
    })
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_title_wins_over_everything() {
        let text = "**Title: Mars Dawn**\n\nDr. Vasquez stood at the airlock.";
        assert_eq!(extract_title(text, ContentKind::Fiction), "Mars Dawn");
    }

    #[test]
    fn short_first_line_is_the_fallback() {
        let text = "The Last Transmission\n\nIt began with static on every channel.";
        assert_eq!(
            extract_title(text, ContentKind::Fiction),
            "The Last Transmission"
        );
    }

    #[test]
    fn bold_first_line_loses_its_markers() {
        let text = "**Title: Signal Fade**";
        assert_eq!(extract_title(text, ContentKind::Fiction), "Signal Fade");
        let text = "*Emphasis Only*\n\nProse follows.";
        assert_eq!(extract_title(text, ContentKind::Fiction), "Emphasis Only");
    }

    #[test]
    fn long_first_line_falls_back_to_placeholder() {
        let text = "a ".repeat(60) + "\nsecond line";
        let title = extract_title(&text, ContentKind::Combined);
        assert!(title.starts_with("Untitled combined"));
    }

    #[test]
    fn empty_text_gets_a_placeholder() {
        assert!(extract_title("", ContentKind::Image).starts_with("Untitled image"));
    }

    #[test]
    fn year_skips_non_year_digit_runs() {
        assert_eq!(extract_year("Registry 0042 was retired in 2150."), Some(2150));
        assert_eq!(extract_year("Serial 123456 has no year."), None);
        assert_eq!(extract_year("No digits at all."), None);
    }

    #[test]
    fn first_year_wins() {
        assert_eq!(extract_year("From 2150 until 2199 the colony grew."), Some(2150));
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count("one  two\nthree"), 3);
        assert_eq!(word_count(""), 0);
    }
}
