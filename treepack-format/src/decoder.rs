use crate::entry::DecodedFile;
use crate::errors::FormatError;
use crate::marker::find_markers;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info, trace, warn};

/// Why a recognized marker produced no file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The path was empty or named a directory after sanitization.
    EmptyOrUnsafePath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub raw_path: String,
    pub reason: SkipReason,
}

/// Result of decoding bundle text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedBundle {
    pub files: Vec<DecodedFile>,
    /// Number of marker lines recognized, including skipped ones.
    pub recognized: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Advisory name taken from the first path segment of the first file.
    pub project_name: Option<String>,
}

impl DecodedBundle {
    pub fn summary(&self) -> String {
        format!(
            "decoded {} of {} recognized entries",
            self.files.len(),
            self.recognized
        )
    }
}

/// Decodes bundle text back into files, in marker order.
///
/// Fails only when no marker is recognized at all; individual markers whose
/// path is unusable are skipped and reported in [`DecodedBundle::skipped`].
pub fn decode(text: &str) -> Result<DecodedBundle, FormatError> {
    let text = unmangle(text);
    let markers = find_markers(&text);
    if markers.is_empty() {
        warn!("No file markers found in {} bytes of input", text.len());
        return Err(FormatError::NoMarkersFound);
    }

    let mut bundle = DecodedBundle {
        recognized: markers.len(),
        ..DecodedBundle::default()
    };

    for (i, marker) in markers.iter().enumerate() {
        let span_end = markers
            .get(i + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len());

        let Some(path) = sanitize_path(&marker.raw_path) else {
            warn!("Skipping entry with unusable path: '{}'", marker.raw_path);
            bundle.skipped.push(SkippedEntry {
                raw_path: marker.raw_path.clone(),
                reason: SkipReason::EmptyOrUnsafePath,
            });
            continue;
        };

        let content = clean_content(&text[marker.content_start..span_end]);
        trace!("Decoded file {} ({} bytes)", path, content.len());
        bundle.files.push(DecodedFile {
            path,
            content: content.to_string(),
        });
    }

    bundle.project_name = bundle
        .files
        .first()
        .and_then(|file| file.path.split('/').next())
        .map(str::to_string);

    info!("{}", bundle.summary());
    Ok(bundle)
}

/// Normalizes a marker path so it stays below the extraction root.
///
/// Separators become `/` and leading `./` and `/` are dropped. `..` and `.`
/// segments are blanked, so a path whose last segment ends up empty names a
/// directory and yields `None`. Remaining empty segments collapse away.
pub fn sanitize_path(raw: &str) -> Option<String> {
    let mut path = raw.trim().replace('\\', "/");
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest.to_string();
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest.to_string();
        } else {
            break;
        }
    }

    let segments: Vec<&str> = path
        .split('/')
        .map(|segment| match segment {
            "." | ".." => "",
            other => other,
        })
        .collect();
    if segments.last().map_or(true, |last| last.is_empty()) {
        return None;
    }

    Some(
        segments
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// Removes the line break after a marker and the blank line closing a frame.
///
/// The marker's own line break decides the separator: after a `\r\n` marker
/// the closing breaks are stripped as `\r\n` pairs, otherwise only `\n` is
/// stripped and a `\r` before it stays part of the content.
pub fn clean_content(span: &str) -> &str {
    let after_ws = span.trim_start_matches([' ', '\t']);
    let (start, line_break) = if let Some(rest) = after_ws.strip_prefix("\r\n") {
        (rest, "\r\n")
    } else if let Some(rest) = after_ws.strip_prefix('\n') {
        (rest, "\n")
    } else {
        (span, "\n")
    };

    let mut end = start;
    for _ in 0..2 {
        let trimmed = end.trim_end_matches([' ', '\t']);
        match trimmed.strip_suffix(line_break) {
            Some(rest) => end = rest,
            None => break,
        }
    }
    end
}

/// Undoes transport damage commonly seen in pasted bundles: a byte-order
/// mark, JSON string quoting, literal `\n` escapes and an outer code fence.
pub fn unmangle(text: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text));

    let trimmed = text.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        if let Ok(unquoted) = serde_json::from_str::<String>(trimmed) {
            debug!("Input was a quoted JSON string, unquoting");
            text = Cow::Owned(unquoted);
        }
    }

    if !text.contains('\n') && text.contains("\\n") {
        debug!("Input has escaped line breaks only, unescaping");
        text = Cow::Owned(unescape(&text));
    }

    if let Some(inner) = strip_outer_fence(&text) {
        debug!("Input was wrapped in a code fence, unwrapping");
        text = Cow::Owned(inner.to_string());
    }

    text
}

fn unescape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some('"') => output.push('"'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

fn strip_outer_fence(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return None;
    }
    let (_, body) = trimmed.split_once('\n')?;
    let body = body.trim_end().strip_suffix("```")?;
    Some(body)
}
