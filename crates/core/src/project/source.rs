use clientspec_java::model::JavaFileModel;
use std::path::PathBuf;

/// Identity of a source file as last seen on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content_hash: u64,
    /// Milliseconds since the UNIX epoch.
    pub last_modified: u64,
    pub len: u64,
}

impl SourceFile {
    pub fn new(path: PathBuf, content_hash: u64, last_modified: u64, len: u64) -> Self {
        Self {
            path,
            content_hash,
            last_modified,
            len,
        }
    }

    /// Cheap check that skips reading the file when nothing observable changed.
    pub fn is_unchanged(&self, last_modified: u64, len: u64) -> bool {
        self.last_modified == last_modified && self.len == len
    }
}

/// A source file together with its parsed declarations.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub file: SourceFile,
    pub model: JavaFileModel,
}
