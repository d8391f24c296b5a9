use crate::config::WatcherConfig;
use crate::errors::TreepackError;
use crate::unpack::{unpack_bundle, ArchiveWriter, DirectoryWriter, UnpackReport};
use arboard::Clipboard;
use async_trait::async_trait;
use tokio::{
    signal,
    time::{self, Duration},
};
use tracing::{debug, error, info, trace};
use treepack_format::encoder::HEADER;
use treepack_format::FormatError;

#[async_trait(?Send)]
pub trait ClipboardWatcher {
    async fn watch_clipboard(&self) -> Result<(), TreepackError>;
}

/// Polls the clipboard and unpacks any new bundle text found there.
pub struct BasicClipboardWatcher {
    config: WatcherConfig,
    writer: DirectoryWriter,
}

impl BasicClipboardWatcher {
    pub fn new(config: WatcherConfig) -> Self {
        let writer = DirectoryWriter::new(config.unpack.out_dir.clone());
        BasicClipboardWatcher { config, writer }
    }

    /// Handles one clipboard snapshot. Returns `None` when it was skipped.
    pub async fn process_content(
        &self,
        content: &str,
    ) -> Result<Option<UnpackReport>, TreepackError> {
        process_clipboard_text(&self.writer, &self.config, content).await
    }
}

/// Unpacks `content` unless it holds no markers, or is skipped for starting
/// with the bundle header.
pub async fn process_clipboard_text<W: ArchiveWriter + ?Sized>(
    writer: &W,
    config: &WatcherConfig,
    content: &str,
) -> Result<Option<UnpackReport>, TreepackError> {
    if config.skip_packed && content.starts_with(HEADER) {
        trace!("Skipping text that starts with the bundle header");
        return Ok(None);
    }
    match unpack_bundle(writer, content, &config.unpack).await {
        Ok(report) => Ok(Some(report)),
        Err(TreepackError::Format(FormatError::NoMarkersFound)) => {
            debug!("Clipboard content has no file markers");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[async_trait(?Send)]
impl ClipboardWatcher for BasicClipboardWatcher {
    async fn watch_clipboard(&self) -> Result<(), TreepackError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| TreepackError::ClipboardInitError(e.to_string()))?;
        let mut interval = time::interval(Duration::from_millis(self.config.interval_ms));
        // Whatever is already on the clipboard predates the watcher.
        let mut last_content = clipboard.get_text().unwrap_or_default();

        debug!("Watching clipboard for bundle text");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    trace!("Checking clipboard content");
                    match clipboard.get_text() {
                        Ok(content) => {
                            if content != last_content {
                                info!("New clipboard content detected");
                                match self.process_content(&content).await {
                                    Ok(Some(report)) => info!(
                                        "Unpacked into {}: {}",
                                        report.write.root.display(),
                                        report.summary()
                                    ),
                                    Ok(None) => {}
                                    Err(e) => error!("Failed to unpack clipboard content: {}", e),
                                }
                                last_content = content;
                            }
                        }
                        Err(e) => {
                            error!("Failed to read clipboard content: {}", e);
                        }
                    }
                    if self.config.once {
                        break;
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Terminating clipboard watch.");
                    break;
                }
            }
        }
        Ok(())
    }
}

pub async fn watch_clipboard(config: WatcherConfig) -> Result<(), TreepackError> {
    let watcher = BasicClipboardWatcher::new(config);
    watcher.watch_clipboard().await
}
