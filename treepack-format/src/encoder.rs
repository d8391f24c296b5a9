use crate::entry::{normalize_separators, FileEntry};
use crate::tree::render_tree;
use tracing::{debug, trace};

pub const HEADER: &str = "Project Structure:\n";
pub const SEPARATOR_WIDTH: usize = 48;

/// Builds the marker line that opens a file frame, without its line break.
pub fn marker_line(path: &str) -> String {
    format!("=== File: {} ===", normalize_separators(path))
}

/// Encodes entries, in order, into bundle text.
///
/// The `selected` flag is not consulted here; callers pass the entries they
/// want bundled.
pub fn encode<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a FileEntry>,
{
    let entries: Vec<&FileEntry> = entries.into_iter().collect();
    let paths: Vec<String> = entries
        .iter()
        .map(|entry| normalize_separators(&entry.path))
        .collect();

    let mut bundle = String::new();
    bundle.push_str(HEADER);
    bundle.push_str(&render_tree(&paths));
    bundle.push_str("\n\n");
    bundle.push_str(&"=".repeat(SEPARATOR_WIDTH));
    bundle.push_str("\n\n");

    for (entry, path) in entries.iter().zip(&paths) {
        trace!("Framing file: {} ({} bytes)", path, entry.content.len());
        bundle.push_str(&marker_line(path));
        bundle.push('\n');
        bundle.push_str(&entry.content);
        bundle.push_str("\n\n");
    }

    debug!(
        "Encoded {} files into a {} byte bundle",
        entries.len(),
        bundle.len()
    );
    bundle
}
