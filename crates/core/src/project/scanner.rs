use super::source::{ParsedSource, SourceFile};
use super::{is_pruned_dir, is_relevant_path};
use clientspec_java::JavaParser;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;
use xxhash_rust::xxh3::Xxh3;

/// Outcome of one pass over the project tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Every relevant file currently on disk, changed or not.
    pub present: Vec<PathBuf>,
    /// Files that are new or whose content changed, freshly parsed.
    pub changed: Vec<ParsedSource>,
    /// Files with a new timestamp but the same content; not re-parsed.
    pub touched: Vec<SourceFile>,
    /// Files that could not be read or parsed. Any earlier model of these is stale.
    pub failed: Vec<PathBuf>,
}

enum FileOutcome {
    Unchanged,
    Touched(SourceFile),
    Parsed(Box<ParsedSource>),
    Failed(PathBuf),
}

pub struct Scanner;

impl Scanner {
    /// Finds the Java sources under `root` and parses those that differ from
    /// `existing`.
    pub fn scan_and_parse(
        root: &Path,
        existing: &HashMap<PathBuf, SourceFile>,
        parser: &JavaParser,
    ) -> ScanResult {
        let present = Self::collect_paths(root);

        let outcomes: Vec<FileOutcome> = present
            .par_iter()
            .map(|path| Self::process_path(path, existing.get(path), parser))
            .collect();

        let mut result = ScanResult {
            present,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Unchanged => {}
                FileOutcome::Touched(file) => result.touched.push(file),
                FileOutcome::Parsed(parsed) => result.changed.push(*parsed),
                FileOutcome::Failed(path) => result.failed.push(path),
            }
        }
        result
    }

    pub fn collect_paths(root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(is_dir
                    && entry.depth() > 0
                    && entry.file_name().to_str().map(is_pruned_dir).unwrap_or(false))
            })
            .build()
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                if path.is_file() && is_relevant_path(root, path) {
                    return Some(path.to_path_buf());
                }
                None
            })
            .collect();
        paths.sort();
        paths
    }

    fn process_path(
        path: &Path,
        existing: Option<&SourceFile>,
        parser: &JavaParser,
    ) -> FileOutcome {
        let Ok(metadata) = fs::metadata(path) else {
            warn!("Cannot stat {}", path.display());
            return FileOutcome::Failed(path.to_path_buf());
        };
        let modified = metadata
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::ZERO)
            .as_millis() as u64;

        if existing.is_some_and(|e| e.is_unchanged(modified, metadata.len())) {
            return FileOutcome::Unchanged;
        }

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                return FileOutcome::Failed(path.to_path_buf());
            }
        };
        let file = SourceFile::new(
            path.to_path_buf(),
            Self::hash(&content),
            modified,
            content.len() as u64,
        );

        // Touched but identical content
        if existing.is_some_and(|e| e.content_hash == file.content_hash) {
            return FileOutcome::Touched(file);
        }

        let Ok(source) = String::from_utf8(content) else {
            warn!("Skipping {}: not valid UTF-8", path.display());
            return FileOutcome::Failed(path.to_path_buf());
        };

        match parser.parse_file(&source, Some(path)) {
            Ok(model) => FileOutcome::Parsed(Box::new(ParsedSource { file, model })),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                FileOutcome::Failed(path.to_path_buf())
            }
        }
    }

    pub fn hash(content: &[u8]) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(content);
        hasher.finish()
    }
}
