use std::path::PathBuf;

/// Files above this many bytes are replaced with a placeholder.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_PROJECT_NAME: &str = "project";
pub const IGNORE_FILE_NAME: &str = ".gitignore";
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 1000;

/// Placeholder content for a file over the size ceiling.
pub fn oversized_placeholder(size: u64, limit: u64) -> String {
    format!(
        "[File too large to include: {} bytes exceeds the {} byte limit]",
        size, limit
    )
}

/// Where a packed bundle goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
    Clipboard,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub max_file_size: u64,
    pub use_ignore_file: bool,
    pub exclude_patterns: Vec<String>,
    pub extra_ignored_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            use_ignore_file: true,
            exclude_patterns: Vec::new(),
            extra_ignored_dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackConfig {
    pub root: PathBuf,
    pub scan: ScanConfig,
    pub output: OutputTarget,
    pub no_stats: bool,
    /// Prefix bundled paths with the root folder's name.
    pub root_prefix: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        PackConfig {
            root: PathBuf::from("."),
            scan: ScanConfig::default(),
            output: OutputTarget::default(),
            no_stats: false,
            root_prefix: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnpackConfig {
    pub out_dir: PathBuf,
    /// Overrides the project name suggested by the bundle.
    pub name: Option<String>,
    pub logs_path: PathBuf,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        UnpackConfig {
            out_dir: PathBuf::from("."),
            name: None,
            logs_path: PathBuf::from("./logs"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub interval_ms: u64,
    pub unpack: UnpackConfig,
    pub once: bool,
    /// Skip clipboard text that starts with the bundle header. Off by default,
    /// since a reply that reproduces the full format starts the same way.
    pub skip_packed: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        WatcherConfig {
            interval_ms: DEFAULT_WATCH_INTERVAL_MS,
            unpack: UnpackConfig::default(),
            once: false,
            skip_packed: false,
        }
    }
}
