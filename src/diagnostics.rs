use crate::errors::TreepackError;
use crate::unpack::WriteFailure;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::error;
use uuid::Uuid;

#[derive(Serialize)]
struct UnpackDiagnostics<'a> {
    base_name: &'a str,
    output_root: String,
    recognized: usize,
    failures: &'a [WriteFailure],
}

/// Writes a JSON report of per-file write failures into `logs_path` and
/// returns the report's path.
pub async fn log_unpack_failures(
    logs_path: &Path,
    base_name: &str,
    output_root: &Path,
    recognized: usize,
    failures: &[WriteFailure],
) -> Result<PathBuf, TreepackError> {
    async_fs::create_dir_all(logs_path).await.map_err(|e| {
        TreepackError::IoError(format!("{}: {}", logs_path.display(), e))
    })?;

    let timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let uuid = Uuid::new_v4();
    let diagnostics_path = logs_path.join(format!(
        "{}_{}_failed_unpack_diagnostics.json",
        timestamp, uuid
    ));

    let diagnostics = UnpackDiagnostics {
        base_name,
        output_root: output_root.display().to_string(),
        recognized,
        failures,
    };
    let diagnostic_json = serde_json::to_string_pretty(&diagnostics).map_err(|e| {
        TreepackError::IoError(format!("{}: {}", diagnostics_path.display(), e))
    })?;

    async_fs::write(&diagnostics_path, diagnostic_json)
        .await
        .map_err(|e| TreepackError::IoError(format!("{}: {}", diagnostics_path.display(), e)))?;

    error!(
        "Logged unpack failure diagnostics: {}",
        diagnostics_path.display()
    );
    Ok(diagnostics_path)
}
