use crate::constants::ConstantTable;
use crate::error::{JavaError, Result};
use crate::model::{AnnotationValue, JavaAnnotation, simple_name};
use crate::spring;
use clientspec_api::{EndpointMetadata, HttpMethod};

/// Maps `RequestMethod` constants onto HTTP methods.
pub struct HttpMethodConverter;

impl HttpMethodConverter {
    /// Accepts `RequestMethod.GET`, a statically imported `GET`, or a fully
    /// qualified reference.
    pub fn from_request_method(value: &AnnotationValue) -> Option<HttpMethod> {
        match value {
            AnnotationValue::Constant(reference) => simple_name(reference).parse().ok(),
            _ => None,
        }
    }

    /// The first method listed on a `@RequestMapping`. Only the first is taken
    /// when several are given.
    pub fn http_method(request_mapping: &JavaAnnotation) -> Option<HttpMethod> {
        request_mapping
            .get("method")?
            .elements()
            .first()
            .and_then(|first| Self::from_request_method(first))
    }
}

/// Reduces any handler annotation to an [`EndpointMetadata`].
pub struct RequestMappingDecomposer<'a> {
    constants: &'a ConstantTable,
}

impl<'a> RequestMappingDecomposer<'a> {
    pub fn new(constants: &'a ConstantTable) -> Self {
        Self { constants }
    }

    /// Returns `Ok(None)` for annotations that are not request mappings.
    ///
    /// `handler` names the method for error reporting; `scope` is the simple
    /// name of the declaring class, used to resolve constants.
    pub fn convert(
        &self,
        annotation: &JavaAnnotation,
        handler: &str,
        scope: &str,
    ) -> Result<Option<EndpointMetadata>> {
        let method = match annotation.simple_name() {
            spring::REQUEST_MAPPING => HttpMethodConverter::http_method(annotation).ok_or_else(
                || JavaError::MissingRequestMethod {
                    handler: handler.to_string(),
                },
            )?,
            spring::GET_MAPPING => HttpMethod::Get,
            spring::POST_MAPPING => HttpMethod::Post,
            spring::PUT_MAPPING => HttpMethod::Put,
            spring::PATCH_MAPPING => HttpMethod::Patch,
            spring::DELETE_MAPPING => HttpMethod::Delete,
            _ => return Ok(None),
        };

        Ok(Some(EndpointMetadata {
            endpoint: self.paths(annotation, scope)?,
            method,
        }))
    }

    /// `path` and `value` are aliases; `path` wins when both are given.
    pub fn paths(&self, annotation: &JavaAnnotation, scope: &str) -> Result<Vec<String>> {
        match annotation.first_non_empty(&["path", "value"]) {
            Some(value) => self.constants.resolve_strings(value, scope),
            None => Ok(Vec::new()),
        }
    }
}
