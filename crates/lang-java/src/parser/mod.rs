use crate::error::{JavaError, Result};
use crate::model::JavaFileModel;
use crate::queries::java_declarations::{DeclarationIndices, JAVA_DECLARATIONS_SCM};
use std::path::Path;
use std::sync::Arc;
use tree_sitter::{Parser, Query, QueryCursor, StreamingIterator, Tree};
use tracing::{debug, warn};

mod annotations;
mod declarations;
mod types;
pub mod utils;

use utils::node_text;

/// Parses Java sources into owned [`JavaFileModel`]s.
///
/// The compiled query is shared between clones; a fresh tree-sitter `Parser` is
/// created per file so the parser can be used from many threads at once.
pub struct JavaParser {
    pub language: tree_sitter::Language,
    pub(crate) declaration_query: Arc<Query>,
    pub(crate) indices: DeclarationIndices,
}

impl Clone for JavaParser {
    fn clone(&self) -> Self {
        Self {
            language: self.language.clone(),
            declaration_query: Arc::clone(&self.declaration_query),
            indices: self.indices.clone(),
        }
    }
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();

        let declaration_query = utils::load_query(&language, JAVA_DECLARATIONS_SCM)?;
        let indices = DeclarationIndices::new(&declaration_query)?;

        Ok(Self {
            language,
            declaration_query: Arc::new(declaration_query),
            indices,
        })
    }

    pub fn parse_tree(&self, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| JavaError::Language(e.to_string()))?;
        parser
            .parse(source, None)
            .ok_or_else(|| JavaError::Parse("tree-sitter produced no tree".to_string()))
    }

    /// Parses one compilation unit into its declaration model.
    pub fn parse_file(&self, source: &str, path: Option<&Path>) -> Result<JavaFileModel> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();

        let has_errors = root.has_error();
        if has_errors {
            warn!(
                "Syntax errors in {}; extracting what is recoverable",
                path.map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<memory>".to_string())
            );
        }

        let mut model = JavaFileModel {
            path: path.map(Path::to_path_buf),
            has_errors,
            ..Default::default()
        };

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.declaration_query, root, source.as_bytes());
        while let Some(mat) = matches.next() {
            for cap in mat.captures {
                if cap.index == self.indices.pkg {
                    model.package = Some(node_text(cap.node, source).to_string());
                } else if cap.index == self.indices.import_name {
                    model.imports.push(node_text(cap.node, source).to_string());
                } else if cap.index == self.indices.type_def {
                    if let Some(decl) = self.build_declaration(cap.node, source) {
                        debug!("found {:?} {} at line {}", decl.kind, decl.name, decl.line);
                        model.types.push(decl);
                    }
                }
            }
        }

        Ok(model)
    }
}
