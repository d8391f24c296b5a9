use serde::Serialize;

/// A file held in a bundle session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
    pub selected: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        FileEntry {
            path: normalize_separators(&path.into()),
            content: content.into(),
            selected: true,
        }
    }
}

/// A file recovered from bundle text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedFile {
    pub path: String,
    pub content: String,
}

impl From<DecodedFile> for FileEntry {
    fn from(file: DecodedFile) -> Self {
        FileEntry {
            path: file.path,
            content: file.content,
            selected: true,
        }
    }
}

pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
