use crate::ignore::IgnoreRule;
use tracing::{debug, trace};

/// Directory names that are never bundled, wherever they appear in a path.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Dependency caches
    "node_modules",
    "bower_components",
    "vendor",
    ".venv",
    "venv",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".gradle",
    ".bundle",
    // Build output
    "target",
    "dist",
    "build",
    "obj",
    ".next",
    ".nuxt",
    ".cache",
    "coverage",
    // Editors
    ".idea",
    ".vscode",
];

/// File name suffixes (matched case-insensitively) that are never bundled.
pub const DEFAULT_IGNORED_SUFFIXES: &[&str] = &[
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".tiff", ".psd",
    // Audio and video
    ".mp3", ".wav", ".ogg", ".flac", ".mp4", ".avi", ".mov", ".mkv", ".webm",
    // Archives
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar", ".jar",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // Fonts
    ".woff", ".woff2", ".ttf", ".otf", ".eot",
    // Compiled artifacts
    ".exe", ".dll", ".so", ".dylib", ".o", ".a", ".lib", ".class", ".pyc", ".pyo",
    ".wasm", ".bin",
    // Databases
    ".db", ".sqlite", ".sqlite3",
    // Lock files
    ".lock", "package-lock.json", "pnpm-lock.yaml", "go.sum",
    // OS metadata
    ".ds_store",
];

/// Decides which relative paths are excluded from a bundle.
///
/// The static lists are fixed at construction; the dynamic rules come from an
/// ignore-pattern file and are replaced wholesale by [`PathFilter::with_rules`].
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignored_dirs: Vec<String>,
    ignored_suffixes: Vec<String>,
    rules: Vec<IgnoreRule>,
}

impl Default for PathFilter {
    fn default() -> Self {
        PathFilter::new(
            DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_IGNORED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl PathFilter {
    pub fn new(ignored_dirs: Vec<String>, ignored_suffixes: Vec<String>) -> Self {
        let ignored_suffixes = ignored_suffixes
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();
        debug!("Using ignored directories: {:?}", ignored_dirs);
        PathFilter {
            ignored_dirs,
            ignored_suffixes,
            rules: Vec::new(),
        }
    }

    /// Returns a filter with the same static lists and `rules` as its only dynamic rules.
    pub fn with_rules(mut self, rules: Vec<IgnoreRule>) -> Self {
        self.set_rules(rules);
        self
    }

    pub fn set_rules(&mut self, rules: Vec<IgnoreRule>) {
        debug!("Replacing {} ignore rules with {}", self.rules.len(), rules.len());
        self.rules = rules;
    }

    pub fn add_ignored_dir(&mut self, dir: impl Into<String>) {
        self.ignored_dirs.push(dir.into());
    }

    pub fn add_ignored_suffix(&mut self, suffix: &str) {
        self.ignored_suffixes.push(suffix.to_lowercase());
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn should_ignore(&self, path: &str) -> bool {
        let path = path.replace('\\', "/");
        let segments: Vec<&str> = path.split('/').collect();
        let file_name = segments.last().copied().unwrap_or("");

        if let Some(dir) = segments
            .iter()
            .find(|segment| self.ignored_dirs.iter().any(|d| d == *segment))
        {
            trace!("Ignoring {} (denied directory {})", path, dir);
            return true;
        }

        let lower_name = file_name.to_lowercase();
        if self
            .ignored_suffixes
            .iter()
            .any(|suffix| lower_name.ends_with(suffix.as_str()))
        {
            trace!("Ignoring {} (denied suffix)", path);
            return true;
        }

        if let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule_matches(rule, &path, &segments, file_name))
        {
            trace!("Ignoring {} (rule '{}')", path, rule.pattern);
            return true;
        }

        false
    }
}

fn rule_matches(rule: &IgnoreRule, path: &str, segments: &[&str], file_name: &str) -> bool {
    let pattern = rule.pattern.as_str();

    if segments.iter().any(|segment| *segment == pattern) {
        return true;
    }

    if pattern.contains('/') {
        let nested = pattern.strip_prefix('/').unwrap_or(pattern);
        if !nested.is_empty()
            && (path == nested
                || path.starts_with(&format!("{}/", nested))
                || path.contains(&format!("/{}/", nested)))
        {
            return true;
        }
    }

    if file_name == pattern {
        return true;
    }

    match pattern.strip_prefix('*') {
        Some(rest) => file_name.ends_with(rest),
        None => false,
    }
}
