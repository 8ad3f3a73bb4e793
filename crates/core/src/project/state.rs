use super::scanner::Scanner;
use super::source::{ParsedSource, SourceFile};
use crate::error::Result;
use clientspec_java::JavaParser;
use clientspec_java::model::JavaFileModel;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a [`ProjectState::refresh`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub scanned: usize,
    pub parsed: usize,
    pub removed: usize,
    pub failed: usize,
}

impl RefreshStats {
    pub fn is_unchanged(&self) -> bool {
        self.parsed == 0 && self.removed == 0
    }
}

/// Parsed models of every Java source under a project root, kept up to date
/// incrementally.
pub struct ProjectState {
    root: PathBuf,
    parser: JavaParser,
    files: BTreeMap<PathBuf, ParsedSource>,
}

impl ProjectState {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            parser: JavaParser::new()?,
            files: BTreeMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-parses new and modified files and forgets deleted ones. A file
    /// that can no longer be read or parsed is forgotten too.
    pub fn refresh(&mut self) -> RefreshStats {
        let existing: HashMap<PathBuf, SourceFile> = self
            .files
            .iter()
            .map(|(path, parsed)| (path.clone(), parsed.file.clone()))
            .collect();

        let scan = Scanner::scan_and_parse(&self.root, &existing, &self.parser);

        let present: HashSet<&PathBuf> = scan.present.iter().collect();
        let before = self.files.len();
        self.files.retain(|path, _| present.contains(path));
        for path in &scan.failed {
            self.files.remove(path);
        }
        let removed = before - self.files.len();

        for file in scan.touched {
            if let Some(parsed) = self.files.get_mut(&file.path) {
                parsed.file = file;
            }
        }

        let parsed = scan.changed.len();
        for source in scan.changed {
            debug!(
                "Parsed {} ({} types)",
                source.file.path.display(),
                source.model.types.len()
            );
            self.files.insert(source.file.path.clone(), source);
        }

        let stats = RefreshStats {
            scanned: scan.present.len(),
            parsed,
            removed,
            failed: scan.failed.len(),
        };
        info!(
            "Refreshed {}: {} files, {} parsed, {} removed, {} failed",
            self.root.display(),
            stats.scanned,
            stats.parsed,
            stats.removed,
            stats.failed
        );
        stats
    }

    /// Models ordered by file path.
    pub fn models(&self) -> impl Iterator<Item = &JavaFileModel> {
        self.files.values().map(|p| &p.model)
    }

    pub fn get(&self, path: &Path) -> Option<&ParsedSource> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
