use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// Matches a single marker line such as `=== File: src/main.rs ===`.
///
/// Fences may be any run of three or more `=` or `-`, mixed freely between the
/// opening and closing side, with arbitrary spacing around `File:`.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*[=-]{3,}[ \t]*File:[ \t]*(.*?)[ \t]*[=-]{3,}[ \t]*\r?$")
        .expect("Invalid regex")
});

/// A recognized marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Path as written between the fences, trimmed of whitespace and quoting.
    pub raw_path: String,
    /// Byte offset where the marker line starts.
    pub line_start: usize,
    /// Byte offset just past the marker text, before its line break.
    pub content_start: usize,
}

/// Returns the path captured by a marker line, if the line is one.
pub fn parse_marker_line(line: &str) -> Option<String> {
    let caps = MARKER_RE.captures(line)?;
    let path = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    Some(clean_marker_path(path))
}

fn clean_marker_path(path: &str) -> String {
    path.trim()
        .trim_matches(|c| matches!(c, '`' | '"' | '\'' | '*'))
        .trim()
        .to_string()
}

/// Scans text line by line and collects every marker, in order.
pub fn find_markers(text: &str) -> Vec<Marker> {
    let start_time = std::time::Instant::now();
    let mut markers = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        if let Some(raw_path) = parse_marker_line(body) {
            trace!("Found marker for '{}' at byte {}", raw_path, offset);
            markers.push(Marker {
                raw_path,
                line_start: offset,
                content_start: offset + body.trim_end_matches('\r').len(),
            });
        }
        offset += line.len();
    }

    debug!(
        "Marker scan found {} markers in {:?}",
        markers.len(),
        start_time.elapsed()
    );
    markers
}
