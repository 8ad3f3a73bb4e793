use crate::constants::ConstantTable;
use crate::dynamic::{DynamicTypeMapper, TypeScope};
use crate::error::{JavaError, Result};
use crate::model::{AnnotationValue, JavaAnnotation, JavaMethod, JavaParameter, find_annotation};
use crate::spring;
use clientspec_api::{EndpointTemplate, RequestValue};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

/// `{id}`, `{ id }`, `{id:[0-9]+}` and `{year:\d{4}}`.
static PATH_VARIABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*(?::(?:[^{}]|\{[^{}]*\})*)?\}")
        .expect("path variable pattern compiles")
});

/// Rewrites `{name}` groups to `{{name}}`.
pub fn render_template(path: &str) -> String {
    PATH_VARIABLE_RE.replace_all(path, "{{$1}}").into_owned()
}

/// Names of the variables a path mentions, in order of appearance.
pub fn template_variables(path: &str) -> Vec<&str> {
    PATH_VARIABLE_RE
        .captures_iter(path)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// The `required` attribute of a binding annotation, `true` when absent.
pub(crate) fn required_attribute(annotation: &JavaAnnotation) -> Result<bool> {
    match annotation.get("required") {
        None => Ok(true),
        Some(AnnotationValue::Bool(required)) => Ok(*required),
        Some(other) => Err(JavaError::InvalidAnnotationValue {
            annotation: annotation.simple_name().to_string(),
            attribute: "required".to_string(),
            found: other.source_text(),
        }),
    }
}

/// Lifts path and query variables out of a handler signature.
pub struct EndpointTemplateParser<'a> {
    constants: &'a ConstantTable,
    mapper: DynamicTypeMapper,
}

impl<'a> EndpointTemplateParser<'a> {
    pub fn new(constants: &'a ConstantTable) -> Self {
        Self {
            constants,
            mapper: DynamicTypeMapper::new(),
        }
    }

    /// `owner` is the qualified name of the declaring class, for constant lookup.
    pub fn parse(
        &self,
        path: &str,
        method: &JavaMethod,
        scope: &TypeScope<'_>,
        owner: &str,
    ) -> Result<EndpointTemplate> {
        let path_variables =
            self.collect_variables(method, spring::PATH_VARIABLE, scope, owner)?;
        let query_variables =
            self.collect_variables(method, spring::REQUEST_PARAM, scope, owner)?;

        for name in template_variables(path) {
            if !path_variables.contains_key(name) {
                warn!(
                    "Path {} of {}.{} mentions {{{}}} but no parameter binds it",
                    path, owner, method.name, name
                );
            }
        }

        Ok(EndpointTemplate {
            template: render_template(path),
            path_variables,
            query_variables,
        })
    }

    fn collect_variables(
        &self,
        method: &JavaMethod,
        annotation: &str,
        scope: &TypeScope<'_>,
        owner: &str,
    ) -> Result<IndexMap<String, RequestValue>> {
        let mut variables = IndexMap::new();
        let mut seen = HashSet::new();

        for param in &method.parameters {
            let Some((name, value)) = self.variable(param, annotation, scope, owner)? else {
                continue;
            };
            if !seen.insert(name.clone()) {
                warn!(
                    "Duplicate @{} '{}' on {}.{}; keeping the first",
                    annotation, name, owner, method.name
                );
                continue;
            }
            variables.insert(name, value);
        }

        Ok(variables)
    }

    fn variable(
        &self,
        param: &JavaParameter,
        annotation: &str,
        scope: &TypeScope<'_>,
        owner: &str,
    ) -> Result<Option<(String, RequestValue)>> {
        let Some(found) = find_annotation(&param.annotations, annotation) else {
            return Ok(None);
        };

        let name = match found.first_non_empty(&["name", "value"]) {
            Some(value) => self.constants.resolve_string(value, owner)?,
            None => param.name.clone(),
        };

        // Spring treats any explicit default as optional
        let required = required_attribute(found)? && found.get("defaultValue").is_none();

        let value_type = self.mapper.map(&param.effective_type(), scope);
        Ok(Some((name, RequestValue::new(value_type, required))))
    }
}
