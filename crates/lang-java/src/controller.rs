use crate::constants::ConstantTable;
use crate::dynamic::{DynamicTypeMapper, TypeScope};
use crate::error::{JavaError, Result};
use crate::mapping::RequestMappingDecomposer;
use crate::model::{
    DeclarationKind, JavaAnnotation, JavaFileModel, JavaMethod, JavaTypeDeclaration,
    find_annotation,
};
use crate::spring;
use crate::template::{EndpointTemplateParser, required_attribute};
use clientspec_api::{ApiEndpoint, DynamicType, RequestValue, ServiceSpec};
use tracing::{debug, warn};

/// A handler that could not be turned into an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedHandler {
    /// `Controller.method`
    pub handler: String,
    pub reason: String,
}

/// The outcome of visiting one controller.
#[derive(Debug, Clone)]
pub struct ControllerVisit {
    pub service: ServiceSpec,
    pub skipped: Vec<SkippedHandler>,
}

/// Turns `@RestController` classes into [`ServiceSpec`]s.
pub struct ControllerVisitor<'a> {
    constants: &'a ConstantTable,
    mapper: DynamicTypeMapper,
}

impl<'a> ControllerVisitor<'a> {
    pub fn new(constants: &'a ConstantTable) -> Self {
        Self {
            constants,
            mapper: DynamicTypeMapper::new(),
        }
    }

    pub fn accept(decl: &JavaTypeDeclaration) -> bool {
        decl.kind == DeclarationKind::Class && decl.has_annotation(spring::REST_CONTROLLER)
    }

    /// Visits `decl`, a type declared in `file`.
    pub fn visit_controller(
        &self,
        file: &JavaFileModel,
        decl: &JavaTypeDeclaration,
    ) -> Result<ControllerVisit> {
        if decl.kind != DeclarationKind::Class {
            return Err(JavaError::NotAClass(decl.name.clone()));
        }

        let owner = file.qualified_name(decl);
        let root = self.root_path(decl, &owner)?;
        debug!("Visiting controller {} with root '{}'", decl.name, root);

        let class_scope = TypeScope::new().with(&decl.type_parameters);
        let mut service = ServiceSpec::new(decl.name.clone());
        let mut skipped = Vec::new();

        for method in &decl.methods {
            let Some(annotation) = Self::handler_annotation(method) else {
                continue;
            };
            let scope = class_scope.clone().with(&method.type_parameters);

            match self.visit_handler(decl, &owner, method, annotation, &root, &scope) {
                Ok(Some(endpoint)) => {
                    debug!(
                        "  {} {} -> {}",
                        endpoint.method, endpoint.endpoint, endpoint.name
                    );
                    service.add_endpoint(endpoint);
                }
                Ok(None) => {}
                Err(e) => {
                    let handler = format!("{}.{}", decl.name, method.name);
                    warn!("Skipping handler {} (line {}): {}", handler, method.line, e);
                    skipped.push(SkippedHandler {
                        handler,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(ControllerVisit { service, skipped })
    }

    /// Builds the endpoint for one handler method. `owner` is the qualified
    /// name of `decl`, used to resolve constants.
    pub fn visit_handler(
        &self,
        decl: &JavaTypeDeclaration,
        owner: &str,
        method: &JavaMethod,
        annotation: &JavaAnnotation,
        root: &str,
        scope: &TypeScope<'_>,
    ) -> Result<Option<ApiEndpoint>> {
        let decomposer = RequestMappingDecomposer::new(self.constants);
        let Some(metadata) = decomposer.convert(annotation, &method.name, owner)? else {
            return Ok(None);
        };

        let path = join_handler_path(root, &metadata.endpoint);
        let template =
            EndpointTemplateParser::new(self.constants).parse(&path, method, scope, owner)?;

        let response_body = RequestValue::new(self.mapper.map(&method.return_type, scope), true);
        let request_body = self.request_body(method, scope)?;

        Ok(Some(ApiEndpoint {
            name: method.name.clone(),
            endpoint: template.template,
            method: metadata.method,
            path_variables: template.path_variables,
            query_variables: template.query_variables,
            request_body,
            response_body,
        }))
    }

    fn root_path(&self, decl: &JavaTypeDeclaration, owner: &str) -> Result<String> {
        let Some(mapping) = decl.annotation(spring::REQUEST_MAPPING) else {
            return Ok(String::new());
        };
        let paths = RequestMappingDecomposer::new(self.constants).paths(mapping, owner)?;
        Ok(first_non_blank(&paths).unwrap_or_default().to_string())
    }

    /// The first `@RequestBody` parameter, or an optional `VOID`.
    fn request_body(&self, method: &JavaMethod, scope: &TypeScope<'_>) -> Result<RequestValue> {
        for param in &method.parameters {
            if let Some(body) = find_annotation(&param.annotations, spring::REQUEST_BODY) {
                return Ok(RequestValue::new(
                    self.mapper.map(&param.effective_type(), scope),
                    required_attribute(body)?,
                ));
            }
        }
        Ok(RequestValue::new(DynamicType::void(), false))
    }

    fn handler_annotation(method: &JavaMethod) -> Option<&JavaAnnotation> {
        spring::HANDLER_ANNOTATIONS
            .iter()
            .find_map(|name| find_annotation(&method.annotations, name))
    }
}

fn first_non_blank(components: &[String]) -> Option<&str> {
    components
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
}

/// Joins a controller root with the first non-blank handler path.
pub fn join_handler_path(prefix: &str, components: &[String]) -> String {
    let prefix = prefix.trim();
    let suffix = first_non_blank(components).unwrap_or_default();

    if prefix.is_empty() {
        return suffix.to_string();
    }
    if suffix.is_empty() {
        return prefix.to_string();
    }

    match (prefix.ends_with('/'), suffix.starts_with('/')) {
        (true, true) => format!("{}{}", prefix, &suffix[1..]),
        (false, false) => format!("{}/{}", prefix, suffix),
        _ => format!("{}{}", prefix, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn join_uses_whichever_side_is_present() {
        assert_eq!(join_handler_path("", &[]), "");
        assert_eq!(join_handler_path("/api", &[]), "/api");
        assert_eq!(join_handler_path("", &paths(&["/users"])), "/users");
        assert_eq!(join_handler_path("/api", &paths(&["", "  "])), "/api");
    }

    #[test]
    fn join_inserts_or_collapses_the_separator() {
        assert_eq!(join_handler_path("/api", &paths(&["users"])), "/api/users");
        assert_eq!(join_handler_path("/api", &paths(&["/users"])), "/api/users");
        assert_eq!(join_handler_path("/api/", &paths(&["users"])), "/api/users");
        assert_eq!(join_handler_path("/api/", &paths(&["/users"])), "/api/users");
    }

    #[test]
    fn join_takes_the_first_non_blank_component() {
        assert_eq!(
            join_handler_path("/api", &paths(&[" ", "/a", "/b"])),
            "/api/a"
        );
    }

    #[test]
    fn accepts_only_annotated_classes() {
        let mut controller = JavaTypeDeclaration::new("UserController", DeclarationKind::Class);
        assert!(!ControllerVisitor::accept(&controller));

        controller
            .annotations
            .push(JavaAnnotation::marker("org.springframework.web.bind.annotation.RestController"));
        assert!(ControllerVisitor::accept(&controller));

        let mut iface = JavaTypeDeclaration::new("UserApi", DeclarationKind::Interface);
        iface.annotations.push(JavaAnnotation::marker("RestController"));
        assert!(!ControllerVisitor::accept(&iface));

        let constants = ConstantTable::new();
        let file = JavaFileModel::default();
        assert!(matches!(
            ControllerVisitor::new(&constants).visit_controller(&file, &iface),
            Err(JavaError::NotAClass(name)) if name == "UserApi"
        ));
    }
}
