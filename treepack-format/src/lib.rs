//! The treepack bundle format.
//!
//! A bundle is a plain-text rendering of a file tree: a `Project Structure:`
//! header, a box-drawing tree, a separator line, and one frame per file:
//!
//! ```text
//! === File: src/main.rs ===
//! fn main() {}
//!
//! ```
//!
//! Everything here is synchronous and side-effect free. Reading files,
//! writing archives and clipboard access belong to the caller.

pub mod decoder;
pub mod encoder;
pub mod entry;
pub mod errors;
pub mod filter;
pub mod ignore;
pub mod marker;
pub mod tokens;
pub mod tree;
pub mod trie;

pub use decoder::{decode, sanitize_path, DecodedBundle, SkipReason, SkippedEntry};
pub use encoder::encode;
pub use entry::{DecodedFile, FileEntry};
pub use errors::FormatError;
pub use filter::PathFilter;
pub use ignore::{parse_ignore_rules, IgnoreRule};
pub use tokens::estimate_tokens;
pub use tree::render_tree;
