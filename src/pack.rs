use crate::config::{OutputTarget, PackConfig};
use crate::errors::TreepackError;
use crate::reporting::print_stats;
use crate::scanner::{scan_into_session, DirectoryScanner, ScanReport};
use crate::session::BundleSession;
use arboard::Clipboard;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::fs as async_fs;
use tracing::{debug, info};
use treepack_format::PathFilter;

#[derive(Debug)]
pub struct PackOutcome {
    pub bundle: String,
    pub project_name: String,
    pub scan: ScanReport,
    pub estimated_tokens: usize,
}

/// Scans `config.root` into a fresh session.
pub async fn build_session(
    config: &PackConfig,
) -> Result<(BundleSession, ScanReport), TreepackError> {
    let mut filter = PathFilter::default();
    for dir in &config.scan.extra_ignored_dirs {
        filter.add_ignored_dir(dir.clone());
    }
    let mut session = BundleSession::new(filter);

    let mut scanner = DirectoryScanner::new(&config.root, config.scan.clone())?;
    if let Some(name) = root_name(&config.root).await {
        if config.root_prefix {
            scanner = scanner.with_prefix(name.clone());
        }
        session.set_project_name(name);
    }

    let report = scan_into_session(&scanner, &mut session, config.scan.max_file_size).await?;
    Ok((session, report))
}

/// Packs a directory into a bundle and delivers it to the configured output.
pub async fn pack_directory(config: PackConfig) -> Result<PackOutcome, TreepackError> {
    let (session, scan) = build_session(&config).await?;
    if session.is_empty() {
        return Err(TreepackError::ScanError(
            config.root.display().to_string(),
            "no files left to bundle after filtering".to_string(),
        ));
    }

    let bundle = session.encode();
    let estimated_tokens = session.estimate_tokens();
    debug!("Bundle length: {} bytes", bundle.len());

    if !config.no_stats {
        print_stats(session.selected());
    }

    write_output(&config.output, &bundle).await?;
    info!(
        "Packed {} files from {} (~{} tokens, approximate)",
        session.len(),
        session.project_name(),
        estimated_tokens
    );

    Ok(PackOutcome {
        bundle,
        project_name: session.project_name(),
        scan,
        estimated_tokens,
    })
}

pub async fn write_output(target: &OutputTarget, bundle: &str) -> Result<(), TreepackError> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bundle.as_bytes())?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => write_file_atomically(path, bundle)?,
        OutputTarget::Clipboard => {
            let mut clipboard = Clipboard::new()
                .map_err(|e| TreepackError::ClipboardInitError(e.to_string()))?;
            clipboard
                .set_text(bundle.to_string())
                .map_err(|e| TreepackError::ClipboardWriteError(e.to_string()))?;
            info!("Bundle copied to clipboard.");
        }
    }
    Ok(())
}

fn write_file_atomically(path: &Path, contents: &str) -> Result<(), TreepackError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.persist(path)
        .map_err(|e| TreepackError::IoError(format!("{}: {}", path.display(), e)))?;
    info!("Bundle written to {}", path.display());
    Ok(())
}

async fn root_name(root: &Path) -> Option<String> {
    let canonical = async_fs::canonicalize(root).await.ok()?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
