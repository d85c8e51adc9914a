//! Cell content adapter: raw cell strings may carry inline image markers of
//! the form `|||IMG:<payload>|||` (payload is a URL or data URI). This module
//! splits a raw string into displayable text plus the ordered image list, and
//! appends new markers.
//!
//! The marker string is the stored representation — it is what the
//! persistence layer round-trips — so parsing lives here rather than in the
//! renderer.

const MARKER_OPEN: &str = "|||IMG:";

/// Parsed view of a raw cell string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellContent {
    pub text: String,
    pub images: Vec<String>,
}

/// Extract all image markers from `raw`, in order of appearance. The payload
/// runs greedily up to the next `|`. Remaining text has the marker substrings
/// removed and leading/trailing newlines trimmed; interior whitespace is
/// preserved.
pub fn parse_cell_content(raw: &str) -> CellContent {
    let mut text = String::with_capacity(raw.len());
    let mut images = Vec::new();
    let mut rest = raw;

    while let Some(open) = rest.find(MARKER_OPEN) {
        text.push_str(&rest[..open]);
        let after_open = &rest[open + MARKER_OPEN.len()..];

        match after_open.find('|') {
            Some(end) => {
                images.push(after_open[..end].to_string());
                // Skip the closing pipes (at most three)
                let mut tail = &after_open[end..];
                let closing = tail.chars().take_while(|&c| c == '|').count().min(3);
                tail = &tail[closing..];
                rest = tail;
            }
            None => {
                // Unterminated marker: treat the rest as the payload
                images.push(after_open.to_string());
                rest = "";
            }
        }
    }
    text.push_str(rest);

    CellContent {
        text: text.trim_matches('\n').to_string(),
        images,
    }
}

/// Append an image marker to a raw cell string, separated from existing
/// content by a newline.
pub fn insert_image(raw: &str, payload: &str) -> String {
    let marker = format!("{MARKER_OPEN}{payload}|||");
    if raw.is_empty() {
        marker
    } else {
        format!("{raw}\n{marker}")
    }
}

/// Number of image markers embedded in a raw cell string.
pub fn image_count(raw: &str) -> usize {
    parse_cell_content(raw).images.len()
}
