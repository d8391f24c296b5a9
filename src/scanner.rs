use crate::config::{ScanConfig, IGNORE_FILE_NAME};
use crate::errors::TreepackError;
use crate::session::BundleSession;
use async_trait::async_trait;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info, trace, warn};
use treepack_format::PathFilter;
use walkdir::WalkDir;

/// How much of a file is checked for NUL bytes when sniffing for binary content.
const BINARY_SNIFF_LEN: usize = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Text(String),
    /// Size in bytes of a file over the ceiling; its content was not read.
    Oversized(u64),
    /// Binary, non-UTF-8 or unreadable; carries the reason.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: SourceContent,
}

#[derive(Debug, Default)]
pub struct SourceListing {
    pub files: Vec<SourceFile>,
    pub ignored: usize,
}

/// Supplies files for a bundle.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Raw text of the ignore-pattern file at the scan root, if there is one.
    async fn ignore_file(&self) -> Result<Option<String>, TreepackError>;

    /// Lists and reads every file `filter` does not exclude, in a stable order.
    async fn files(&self, filter: &PathFilter) -> Result<SourceListing, TreepackError>;
}

/// Outcome of feeding a source into a session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub included: usize,
    pub ignored: usize,
    pub rules_loaded: usize,
    pub unreadable: Vec<(String, String)>,
    pub oversized: Vec<String>,
}

/// Reads a directory tree from disk.
pub struct DirectoryScanner {
    root: PathBuf,
    prefix: Option<String>,
    config: ScanConfig,
    excludes: Vec<Pattern>,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>, config: ScanConfig) -> Result<Self, TreepackError> {
        let root = root.into();
        let excludes = config
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Creating DirectoryScanner for {} with {} exclude patterns",
            root.display(),
            excludes.len()
        );
        Ok(DirectoryScanner {
            root,
            prefix: None,
            config,
            excludes,
        })
    }

    /// Prefixes every listed path with `prefix/`, usually the root folder name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let relative = relative.to_string_lossy().replace('\\', "/");
        if relative.is_empty() {
            return None;
        }
        Some(relative)
    }

    fn is_excluded(&self, relative: &str, filter: &PathFilter) -> bool {
        filter.should_ignore(relative)
            || self.excludes.iter().any(|pattern| pattern.matches(relative))
    }

    fn display_path(&self, relative: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}/{}", prefix, relative),
            None => relative.to_string(),
        }
    }

    async fn read_source(&self, path: &Path) -> SourceContent {
        let metadata = match async_fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) => return SourceContent::Unreadable(e.to_string()),
        };
        if metadata.len() > self.config.max_file_size {
            return SourceContent::Oversized(metadata.len());
        }

        let bytes = match async_fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => return SourceContent::Unreadable(e.to_string()),
        };
        if bytes[..bytes.len().min(BINARY_SNIFF_LEN)].contains(&0) {
            return SourceContent::Unreadable("binary content".to_string());
        }
        match String::from_utf8(bytes) {
            Ok(text) => SourceContent::Text(text),
            Err(_) => SourceContent::Unreadable("not valid UTF-8".to_string()),
        }
    }
}

#[async_trait]
impl FileSource for DirectoryScanner {
    async fn ignore_file(&self) -> Result<Option<String>, TreepackError> {
        if !self.config.use_ignore_file {
            return Ok(None);
        }
        let path = self.root.join(IGNORE_FILE_NAME);
        match async_fs::read_to_string(&path).await {
            Ok(text) => {
                debug!("Found ignore file at {}", path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!("Failed to read ignore file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    async fn files(&self, filter: &PathFilter) -> Result<SourceListing, TreepackError> {
        if !self.root.is_dir() {
            return Err(TreepackError::ScanError(
                self.root.display().to_string(),
                "not a directory".to_string(),
            ));
        }

        let mut listing = SourceListing::default();
        let mut candidates = Vec::new();
        {
            let mut walker = WalkDir::new(&self.root).sort_by_file_name().into_iter();
            while let Some(entry) = walker.next() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Error walking {}: {}", self.root.display(), e);
                        continue;
                    }
                };
                let Some(relative) = self.relative_path(entry.path()) else {
                    continue;
                };

                if self.is_excluded(&relative, filter) {
                    trace!("Ignoring {}", relative);
                    listing.ignored += 1;
                    if entry.file_type().is_dir() {
                        walker.skip_current_dir();
                    }
                    continue;
                }
                if entry.file_type().is_file() {
                    candidates.push((relative, entry.into_path()));
                }
            }
        }

        for (relative, path) in candidates {
            let content = self.read_source(&path).await;
            listing.files.push(SourceFile {
                path: self.display_path(&relative),
                content,
            });
        }

        debug!(
            "Listed {} files under {} ({} ignored)",
            listing.files.len(),
            self.root.display(),
            listing.ignored
        );
        Ok(listing)
    }
}

/// Loads the source's ignore file, then reads its files into `session`.
pub async fn scan_into_session<S: FileSource + ?Sized>(
    source: &S,
    session: &mut BundleSession,
    max_file_size: u64,
) -> Result<ScanReport, TreepackError> {
    let mut report = ScanReport::default();

    if let Some(text) = source.ignore_file().await? {
        report.rules_loaded = session.load_ignore_file(&text);
        info!("Loaded {} ignore rules", report.rules_loaded);
    }

    let listing = source.files(session.filter()).await?;
    report.ignored = listing.ignored;

    for file in listing.files {
        match file.content {
            SourceContent::Text(text) => {
                session.insert(&file.path, text);
                report.included += 1;
            }
            SourceContent::Oversized(size) => {
                warn!("File {} is {} bytes, using a placeholder", file.path, size);
                session.insert_oversized(&file.path, size, max_file_size);
                report.included += 1;
                report.oversized.push(file.path);
            }
            SourceContent::Unreadable(reason) => {
                warn!("Skipping unreadable file {}: {}", file.path, reason);
                report.unreadable.push((file.path, reason));
            }
        }
    }

    info!(
        "Scanned {} files ({} ignored, {} unreadable, {} oversized)",
        report.included,
        report.ignored,
        report.unreadable.len(),
        report.oversized.len()
    );
    Ok(report)
}
