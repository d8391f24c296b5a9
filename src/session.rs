use crate::config::{oversized_placeholder, DEFAULT_PROJECT_NAME};
use std::collections::HashMap;
use tracing::{debug, trace};
use treepack_format::{
    encode, estimate_tokens, parse_ignore_rules, DecodedFile, FileEntry, PathFilter,
};

/// State for one bundling session: the files collected so far, the active
/// ignore rules and the advisory project name.
///
/// Files are keyed by path. Inserting an existing path replaces its content in
/// place, so encode order stays the order paths were first added.
#[derive(Debug, Clone)]
pub struct BundleSession {
    entries: Vec<FileEntry>,
    index: HashMap<String, usize>,
    filter: PathFilter,
    project_name: Option<String>,
}

impl Default for BundleSession {
    fn default() -> Self {
        BundleSession::new(PathFilter::default())
    }
}

impl BundleSession {
    pub fn new(filter: PathFilter) -> Self {
        debug!("Creating new BundleSession");
        BundleSession {
            entries: Vec::new(),
            index: HashMap::new(),
            filter,
            project_name: None,
        }
    }

    /// Replaces the active ignore rules with those parsed from `text`.
    pub fn load_ignore_file(&mut self, text: &str) -> usize {
        let rules = parse_ignore_rules(text);
        let count = rules.len();
        self.filter.set_rules(rules);
        count
    }

    pub fn should_ignore(&self, path: &str) -> bool {
        self.filter.should_ignore(path)
    }

    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    /// Adds or replaces a file. New files start selected.
    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        let entry = FileEntry::new(path, content);
        let existing = self.index.get(&entry.path).copied();
        match existing {
            Some(position) => {
                trace!("Replacing existing entry: {}", entry.path);
                self.entries[position] = entry;
            }
            None => {
                trace!("Adding entry: {}", entry.path);
                self.index.insert(entry.path.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Adds a file that was too large to read, with a placeholder note.
    pub fn insert_oversized(&mut self, path: &str, size: u64, limit: u64) {
        self.insert(path, oversized_placeholder(size, limit));
    }

    /// Adds files recovered from a bundle, keeping their order.
    pub fn extend_decoded(&mut self, files: Vec<DecodedFile>) {
        for file in files {
            self.insert(&file.path, file.content);
        }
    }

    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.index.get(path).map(|&position| &self.entries[position])
    }

    /// Returns `false` if no entry has that path.
    pub fn set_selected(&mut self, path: &str, selected: bool) -> bool {
        match self.index.get(path).copied() {
            Some(position) => {
                self.entries[position].selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self, selected: bool) {
        for entry in &mut self.entries {
            entry.selected = selected;
        }
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn selected(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|entry| entry.selected)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The explicit name if one was set, else the first path segment of the
    /// first entry, else a generic default.
    pub fn project_name(&self) -> String {
        self.project_name
            .clone()
            .or_else(|| {
                self.entries
                    .first()
                    .and_then(|entry| entry.path.split('/').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = Some(name.into());
    }

    /// Encodes the selected entries.
    pub fn encode(&self) -> String {
        encode(self.selected())
    }

    /// Approximate token count of the encoded bundle.
    pub fn estimate_tokens(&self) -> usize {
        estimate_tokens(&self.encode())
    }
}
