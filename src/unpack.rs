use crate::config::{UnpackConfig, DEFAULT_PROJECT_NAME};
use crate::diagnostics::log_unpack_failures;
use crate::errors::TreepackError;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, error, info, trace, warn};
use treepack_format::{decode, sanitize_path, DecodedBundle, DecodedFile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Default, Clone)]
pub struct WriteReport {
    pub root: PathBuf,
    pub written: Vec<String>,
    pub failures: Vec<WriteFailure>,
}

/// Materializes decoded files.
#[async_trait]
pub trait ArchiveWriter: Send + Sync {
    /// Writes every file, continuing past per-file failures.
    async fn write(
        &self,
        base_name: &str,
        files: &[DecodedFile],
    ) -> Result<WriteReport, TreepackError>;
}

/// Writes decoded files into a directory on disk.
///
/// Files land below `<out_dir>/<base_name>/`, unless every path already starts
/// with `<base_name>/`, in which case they land below `<out_dir>/`.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    out_dir: PathBuf,
}

impl DirectoryWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        let out_dir = out_dir.into();
        debug!("Creating DirectoryWriter for {}", out_dir.display());
        DirectoryWriter { out_dir }
    }

    fn root_for(&self, base_name: &str, files: &[DecodedFile]) -> PathBuf {
        let prefix = format!("{}/", base_name);
        if !files.is_empty() && files.iter().all(|f| f.path.starts_with(&prefix)) {
            self.out_dir.clone()
        } else {
            self.out_dir.join(base_name)
        }
    }

    async fn write_file(&self, root: &Path, file: &DecodedFile) -> Result<(), TreepackError> {
        let relative = Path::new(&file.path);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(TreepackError::UnpackError(format!(
                "refusing to write outside the output root: {}",
                file.path
            )));
        }

        let target = root.join(relative);
        if let Some(parent) = target.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&target, &file.content).await?;
        trace!("Wrote {}", target.display());
        Ok(())
    }
}

#[async_trait]
impl ArchiveWriter for DirectoryWriter {
    async fn write(
        &self,
        base_name: &str,
        files: &[DecodedFile],
    ) -> Result<WriteReport, TreepackError> {
        let root = self.root_for(base_name, files);
        async_fs::create_dir_all(&root).await?;

        let mut report = WriteReport {
            root: root.clone(),
            ..WriteReport::default()
        };
        for file in files {
            match self.write_file(&root, file).await {
                Ok(()) => report.written.push(file.path.clone()),
                Err(e) => {
                    error!("Failed to write {}: {}", file.path, e);
                    report.failures.push(WriteFailure {
                        path: file.path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Wrote {} of {} files to {}",
            report.written.len(),
            files.len(),
            root.display()
        );
        Ok(report)
    }
}

#[derive(Debug, Clone)]
pub struct UnpackReport {
    pub base_name: String,
    pub bundle: DecodedBundle,
    pub write: WriteReport,
    pub diagnostics: Option<PathBuf>,
}

impl UnpackReport {
    pub fn summary(&self) -> String {
        let mut summary = self.bundle.summary();
        if !self.write.failures.is_empty() {
            summary.push_str(&format!(
                ", {} failed to write",
                self.write.failures.len()
            ));
        }
        summary
    }
}

/// Picks the archive name: an explicit override, else the bundle's suggested
/// project name when the first file sits in a directory, else a default.
pub fn base_name_for(bundle: &DecodedBundle, name_override: Option<&str>) -> String {
    if let Some(name) = name_override.and_then(sanitize_path) {
        return name;
    }
    let nested = bundle
        .files
        .first()
        .is_some_and(|file| file.path.contains('/'));
    match &bundle.project_name {
        Some(name) if nested => name.clone(),
        _ => DEFAULT_PROJECT_NAME.to_string(),
    }
}

/// Decodes bundle text and writes its files with `writer`.
pub async fn unpack_bundle<W: ArchiveWriter + ?Sized>(
    writer: &W,
    text: &str,
    config: &UnpackConfig,
) -> Result<UnpackReport, TreepackError> {
    let bundle = decode(text)?;
    for skipped in &bundle.skipped {
        warn!("Skipped entry '{}': {:?}", skipped.raw_path, skipped.reason);
    }

    let base_name = base_name_for(&bundle, config.name.as_deref());
    let write = writer.write(&base_name, &bundle.files).await?;

    let diagnostics = if write.failures.is_empty() {
        None
    } else {
        match log_unpack_failures(
            &config.logs_path,
            &base_name,
            &write.root,
            bundle.recognized,
            &write.failures,
        )
        .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not write unpack diagnostics: {}", e);
                None
            }
        }
    };

    let report = UnpackReport {
        base_name,
        bundle,
        write,
        diagnostics,
    };
    info!("{}", report.summary());
    Ok(report)
}
