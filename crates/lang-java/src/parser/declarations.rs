use super::JavaParser;
use super::utils::node_text;
use crate::model::{DeclarationKind, JavaField, JavaMethod, JavaTypeDeclaration, TypeRef};
use tree_sitter::Node;

impl JavaParser {
    /// Builds the owned model of a class, record, enum or interface declaration node.
    ///
    /// Nested type declarations are not descended into here; the declaration query
    /// reports them separately.
    pub(crate) fn build_declaration(&self, node: Node, source: &str) -> Option<JavaTypeDeclaration> {
        let kind = DeclarationKind::from_node_kind(node.kind())?;
        let name = node_text(node.child_by_field_name("name")?, source).to_string();

        let mut decl = JavaTypeDeclaration::new(name, kind);
        decl.line = node.start_position().row + 1;
        decl.enclosing = Self::enclosing_type_name(node, source);
        (decl.annotations, decl.modifiers) = self.read_modifiers(node, source);
        decl.type_parameters = self.parse_type_parameters(node, source);

        if kind == DeclarationKind::Record {
            if let Some(params) = node.child_by_field_name("parameters") {
                decl.record_components = self.parse_parameters(params, source);
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.read_body(body, source, &mut decl);
        }

        Some(decl)
    }

    fn read_body(&self, body: Node, source: &str, decl: &mut JavaTypeDeclaration) {
        let implicit_constants = decl.kind == DeclarationKind::Interface;
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    decl.fields
                        .extend(self.read_fields(member, source, implicit_constants));
                }
                "method_declaration" => {
                    if let Some(method) = self.read_method(member, source) {
                        decl.methods.push(method);
                    }
                }
                "enum_constant" => {
                    if let Some(name) = member.child_by_field_name("name") {
                        decl.enum_constants.push(node_text(name, source).to_string());
                    }
                }
                "enum_body_declarations" => self.read_body(member, source, decl),
                _ => {}
            }
        }
    }

    /// One field per declarator: `int a, b[];` yields `a: int` and `b: int[]`.
    fn read_fields(&self, node: Node, source: &str, implicit_constants: bool) -> Vec<JavaField> {
        let (annotations, mut modifiers) = self.read_modifiers(node, source);
        if implicit_constants {
            for implied in ["static", "final"] {
                if !modifiers.iter().any(|m| m == implied) {
                    modifiers.push(implied.to_string());
                }
            }
        }

        let base_type = node
            .child_by_field_name("type")
            .map(|t| self.parse_type_node(t, source))
            .unwrap_or(TypeRef::Unknown);

        let mut fields = Vec::new();
        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            let type_ref = match declarator.child_by_field_name("dimensions") {
                Some(dims) => TypeRef::Array {
                    element: Box::new(base_type.clone()),
                    dimensions: node_text(dims, source).matches('[').count().max(1),
                },
                None => base_type.clone(),
            };
            let initializer = declarator
                .child_by_field_name("value")
                .map(|v| self.parse_element_value(v, source));

            fields.push(JavaField {
                name: node_text(name_node, source).to_string(),
                type_ref,
                annotations: annotations.clone(),
                modifiers: modifiers.clone(),
                initializer,
            });
        }
        fields
    }

    fn read_method(&self, node: Node, source: &str) -> Option<JavaMethod> {
        let name = node_text(node.child_by_field_name("name")?, source).to_string();
        let (annotations, modifiers) = self.read_modifiers(node, source);
        let return_type = node
            .child_by_field_name("type")
            .map(|t| self.parse_type_node(t, source))
            .unwrap_or_else(|| TypeRef::raw("void"));
        let parameters = node
            .child_by_field_name("parameters")
            .map(|p| self.parse_parameters(p, source))
            .unwrap_or_default();

        Some(JavaMethod {
            name,
            annotations,
            modifiers,
            type_parameters: self.parse_type_parameters(node, source),
            return_type,
            parameters,
            line: node.start_position().row + 1,
        })
    }

    fn enclosing_type_name(node: Node, source: &str) -> Option<String> {
        let mut current = node.parent();
        while let Some(parent) = current {
            if DeclarationKind::from_node_kind(parent.kind()).is_some() {
                return parent
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string());
            }
            current = parent.parent();
        }
        None
    }
}
