use async_trait::async_trait;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;
use treepack::config::UnpackConfig;
use treepack::errors::TreepackError;
use treepack::unpack::{
    base_name_for, unpack_bundle, ArchiveWriter, DirectoryWriter, WriteFailure, WriteReport,
};
use treepack_format::{decode, DecodedFile, FormatError};

fn config_for(dir: &std::path::Path) -> UnpackConfig {
    UnpackConfig {
        out_dir: dir.join("out"),
        name: None,
        logs_path: dir.join("logs"),
    }
}

#[tokio::test]
async fn test_unpack_writes_nested_files() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());
    let writer = DirectoryWriter::new(config.out_dir.clone());
    let text = "=== File: app/src/main.rs ===\nfn main() {}\n\n=== File: app/README.md ===\n# App\n\n";

    let report = unpack_bundle(&writer, text, &config)
        .await
        .unwrap_or_else(|e| panic!("Unpack failed: {:?}", e));

    assert_eq!(report.base_name, "app");
    assert_eq!(report.write.root, config.out_dir);
    assert_eq!(
        fs::read_to_string(config.out_dir.join("app/src/main.rs")).unwrap(),
        "fn main() {}"
    );
    assert_eq!(report.summary(), "decoded 2 of 2 recognized entries");
    assert!(report.diagnostics.is_none());
}

#[tokio::test]
async fn test_unpack_nests_loose_files_under_base_name() {
    let dir = tempdir().unwrap();
    let mut config = config_for(dir.path());
    config.name = Some("restored".to_string());
    let writer = DirectoryWriter::new(config.out_dir.clone());

    let report = unpack_bundle(&writer, "=== File: notes.txt ===\nhello\n", &config)
        .await
        .unwrap();

    assert_eq!(report.write.root, config.out_dir.join("restored"));
    assert_eq!(
        fs::read_to_string(config.out_dir.join("restored/notes.txt")).unwrap(),
        "hello"
    );
}

#[tokio::test]
async fn test_unpack_traversal_stays_inside_root() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());
    let writer = DirectoryWriter::new(config.out_dir.clone());

    let report = unpack_bundle(&writer, "=== File: ../../escape.txt ===\ngotcha\n", &config)
        .await
        .unwrap();

    assert_eq!(report.bundle.files[0].path, "escape.txt");
    assert!(!dir.path().join("escape.txt").exists());
    assert!(config.out_dir.join("project/escape.txt").exists());
}

#[tokio::test]
async fn test_unpack_without_markers_fails() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());
    let writer = DirectoryWriter::new(config.out_dir.clone());

    let result = unpack_bundle(&writer, "just some text", &config).await;
    assert!(matches!(
        result,
        Err(TreepackError::Format(FormatError::NoMarkersFound))
    ));
    assert!(!config.out_dir.exists(), "Nothing should be written");
}

#[tokio::test]
async fn test_write_failure_is_per_entry() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());
    // A file where a directory is needed makes the nested write fail.
    fs::create_dir_all(config.out_dir.join("p")).unwrap();
    fs::write(config.out_dir.join("p/blocker"), "file").unwrap();
    let writer = DirectoryWriter::new(config.out_dir.clone());
    let text = "=== File: p/blocker/inner.txt ===\nx\n\n=== File: p/ok.txt ===\nfine\n\n";

    let report = unpack_bundle(&writer, text, &config).await.unwrap();

    assert_eq!(report.write.written, vec!["p/ok.txt".to_string()]);
    assert_eq!(report.write.failures.len(), 1);
    assert_eq!(report.write.failures[0].path, "p/blocker/inner.txt");
    assert!(report.summary().ends_with("1 failed to write"));

    let diagnostics = report.diagnostics.expect("Expected a diagnostics file");
    let json = fs::read_to_string(diagnostics).unwrap();
    assert!(json.contains("p/blocker/inner.txt"));
}

struct RecordingWriter {
    calls: Mutex<Vec<(String, Vec<DecodedFile>)>>,
}

#[async_trait]
impl ArchiveWriter for RecordingWriter {
    async fn write(
        &self,
        base_name: &str,
        files: &[DecodedFile],
    ) -> Result<WriteReport, TreepackError> {
        self.calls
            .lock()
            .unwrap()
            .push((base_name.to_string(), files.to_vec()));
        Ok(WriteReport {
            written: files.iter().map(|f| f.path.clone()).collect(),
            failures: vec![WriteFailure {
                path: "none".to_string(),
                error: "simulated".to_string(),
            }],
            ..WriteReport::default()
        })
    }
}

#[tokio::test]
async fn test_custom_writer_receives_ordered_files() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());
    let writer = RecordingWriter {
        calls: Mutex::new(Vec::new()),
    };

    let report = unpack_bundle(&writer, "--- File: z/b ---\n2\n--- File: z/a ---\n1\n", &config)
        .await
        .unwrap();

    let calls = writer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "z");
    let paths: Vec<&str> = calls[0].1.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["z/b", "z/a"]);
    assert!(report.diagnostics.is_some());
}

#[tokio::test]
async fn test_base_name_for() {
    let nested = decode("=== File: proj/a.txt ===\n").unwrap();
    assert_eq!(base_name_for(&nested, None), "proj");
    assert_eq!(base_name_for(&nested, Some("../other")), "other");

    let flat = decode("=== File: a.txt ===\n").unwrap();
    assert_eq!(base_name_for(&flat, None), "project");
}
