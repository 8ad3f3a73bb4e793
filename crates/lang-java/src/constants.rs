use crate::error::{JavaError, Result};
use crate::model::{AnnotationValue, DeclarationKind, JavaFileModel, simple_name};
use std::collections::HashMap;

const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone)]
struct ConstantEntry {
    /// Qualified name of the declaring type.
    owner: String,
    value: AnnotationValue,
}

/// Compile-time string constants declared in the project, so that annotation
/// arguments such as `@GetMapping(Routes.USERS + "/{id}")` can be evaluated.
///
/// Entries are keyed by `pkg.Owner.NAME`. Shorter spellings are looked up
/// through `by_owner` (`Owner.NAME`) and `by_name` (`NAME`) and only resolve
/// when they are unambiguous.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    entries: HashMap<String, ConstantEntry>,
    by_owner: HashMap<String, Vec<String>>,
    by_name: HashMap<String, Vec<String>>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a JavaFileModel>) -> Self {
        let mut table = Self::new();
        for file in files {
            table.add_file(file);
        }
        table
    }

    pub fn add_file(&mut self, file: &JavaFileModel) {
        for decl in &file.types {
            let implicit = decl.kind == DeclarationKind::Interface;
            let qualified_owner = file.qualified_name(decl);
            for field in &decl.fields {
                let is_constant = implicit || (field.is_static() && field.is_final());
                let Some(value) = field.initializer.as_ref().filter(|_| is_constant) else {
                    continue;
                };

                let key = format!("{}.{}", qualified_owner, field.name);
                let entry = ConstantEntry {
                    owner: qualified_owner.clone(),
                    value: value.clone(),
                };
                if self.entries.insert(key.clone(), entry).is_some() {
                    continue;
                }
                self.by_owner
                    .entry(format!("{}.{}", decl.name, field.name))
                    .or_default()
                    .push(key.clone());
                self.by_name.entry(field.name.clone()).or_default().push(key);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluates a value to the list of strings it denotes. Arrays are flattened.
    /// `scope` is the qualified name of the type the value appears in.
    pub fn resolve_strings(&self, value: &AnnotationValue, scope: &str) -> Result<Vec<String>> {
        self.resolve_strings_at(value, scope, 0)
    }

    /// Evaluates a value expected to denote exactly one string.
    pub fn resolve_string(&self, value: &AnnotationValue, scope: &str) -> Result<String> {
        self.resolve_single(value, scope, 0)
    }

    fn resolve_strings_at(
        &self,
        value: &AnnotationValue,
        scope: &str,
        depth: usize,
    ) -> Result<Vec<String>> {
        match value {
            AnnotationValue::Array(items) => {
                let mut out = Vec::new();
                for item in items {
                    out.extend(self.resolve_strings_at(item, scope, depth)?);
                }
                Ok(out)
            }
            AnnotationValue::Constant(reference) => {
                let entry = self.lookup(reference, scope, depth)?;
                self.resolve_strings_at(&entry.value, &entry.owner, depth + 1)
            }
            AnnotationValue::Annotation(_) => Ok(Vec::new()),
            other => Ok(vec![self.resolve_single(other, scope, depth)?]),
        }
    }

    fn resolve_single(&self, value: &AnnotationValue, scope: &str, depth: usize) -> Result<String> {
        match value {
            AnnotationValue::Str(s) => Ok(s.clone()),
            AnnotationValue::Bool(b) => Ok(b.to_string()),
            AnnotationValue::Other(text) => Ok(text.clone()),
            AnnotationValue::Constant(reference) => {
                let entry = self.lookup(reference, scope, depth)?;
                self.resolve_single(&entry.value, &entry.owner, depth + 1)
            }
            AnnotationValue::Concat(parts) => {
                let mut out = String::new();
                for part in parts {
                    out.push_str(&self.resolve_single(part, scope, depth)?);
                }
                Ok(out)
            }
            AnnotationValue::Array(items) if items.len() == 1 => {
                self.resolve_single(&items[0], scope, depth)
            }
            other => Err(JavaError::UnresolvedConstant {
                constant: other.source_text(),
                owner: scope.to_string(),
            }),
        }
    }

    fn lookup(&self, reference: &str, scope: &str, depth: usize) -> Result<&ConstantEntry> {
        let unresolved = || JavaError::UnresolvedConstant {
            constant: reference.to_string(),
            owner: scope.to_string(),
        };
        if depth >= MAX_DEPTH {
            return Err(unresolved());
        }

        if let Some((owner_path, name)) = reference.rsplit_once('.') {
            if let Some(entry) = self.entries.get(reference) {
                return Ok(entry);
            }
            // `Routes.USERS` written inside `Routes` itself
            let owner = simple_name(owner_path);
            if simple_name(scope) == owner {
                if let Some(entry) = self.entries.get(&format!("{}.{}", scope, name)) {
                    return Ok(entry);
                }
            }
            // `web.Routes.USERS` or `Outer.Routes.USERS` against `com.acme.web.Routes.USERS`
            let suffix = format!(".{}", reference);
            let candidates: Vec<&String> = self
                .by_owner
                .get(&format!("{}.{}", owner, name))
                .map(|keys| keys.iter().filter(|k| k.ends_with(&suffix)).collect())
                .unwrap_or_default();
            return match candidates.as_slice() {
                [only] => self.entries.get(*only).ok_or_else(unresolved),
                _ => Err(unresolved()),
            };
        }

        if let Some(entry) = self.entries.get(&format!("{}.{}", scope, reference)) {
            return Ok(entry);
        }
        match self.by_name.get(reference).map(Vec::as_slice) {
            Some([only]) => self.entries.get(only).ok_or_else(unresolved),
            _ => Err(unresolved()),
        }
    }
}
