use super::JavaParser;
use super::utils::{compact_text, node_text};
use crate::model::{JavaParameter, TypeParameter, TypeRef};
use tree_sitter::Node;

impl JavaParser {
    pub fn parse_type_node(&self, node: Node, source: &str) -> TypeRef {
        match node.kind() {
            "generic_type" => {
                let mut base = TypeRef::Unknown;
                let mut args = Vec::new();
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        "type_identifier" | "scoped_type_identifier" => {
                            base = self.parse_type_node(child, source);
                        }
                        "type_arguments" => {
                            let mut args_cursor = child.walk();
                            for arg in child.named_children(&mut args_cursor) {
                                args.push(self.parse_type_node(arg, source));
                            }
                        }
                        _ => {}
                    }
                }

                TypeRef::Generic {
                    base: Box::new(base),
                    args,
                }
            }
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .map(|e| self.parse_type_node(e, source))
                    .unwrap_or(TypeRef::Unknown);

                let dimensions = node
                    .child_by_field_name("dimensions")
                    .map(|d| node_text(d, source).matches('[').count())
                    .unwrap_or(1)
                    .max(1);

                wrap_array(element, dimensions)
            }
            "wildcard" => {
                let mut bound = None;
                let mut is_upper = true;

                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        "super" => is_upper = false,
                        "extends" => is_upper = true,
                        _ if child.is_named() && child.kind() != "annotation" => {
                            bound = Some(Box::new(self.parse_type_node(child, source)));
                        }
                        _ => {}
                    }
                }

                TypeRef::Wildcard {
                    bound,
                    is_upper_bound: is_upper,
                }
            }
            "annotated_type" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .filter(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
                    .last();
                inner
                    .map(|n| self.parse_type_node(n, source))
                    .unwrap_or(TypeRef::Unknown)
            }
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type"
            | "type_identifier" | "scoped_type_identifier" => {
                let text = compact_text(node, source);
                if text.is_empty() {
                    TypeRef::Unknown
                } else {
                    TypeRef::Raw(text)
                }
            }
            _ => TypeRef::Unknown,
        }
    }

    /// Reads `<T, U extends Bound & Other>` into type parameters.
    pub(crate) fn parse_type_parameters(&self, owner: Node, source: &str) -> Vec<TypeParameter> {
        let type_params_node = owner.child_by_field_name("type_parameters").or_else(|| {
            let mut cursor = owner.walk();
            owner
                .children(&mut cursor)
                .find(|n| n.kind() == "type_parameters")
        });

        let Some(type_params_node) = type_params_node else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut cursor = type_params_node.walk();
        for child in type_params_node.named_children(&mut cursor) {
            if child.kind() != "type_parameter" {
                continue;
            }

            let mut name = None;
            let mut bounds = Vec::new();
            let mut param_cursor = child.walk();
            for gc in child.named_children(&mut param_cursor) {
                match gc.kind() {
                    "type_identifier" | "identifier" if name.is_none() => {
                        name = Some(node_text(gc, source).to_string());
                    }
                    "type_bound" => {
                        let mut bound_cursor = gc.walk();
                        for bound in gc.named_children(&mut bound_cursor) {
                            bounds.push(self.parse_type_node(bound, source));
                        }
                    }
                    _ => {}
                }
            }

            if let Some(name) = name {
                result.push(TypeParameter { name, bounds });
            }
        }

        result
    }

    /// Extracts the parameters of a method declaration or the components of a record.
    pub(crate) fn parse_parameters(&self, params_node: Node, source: &str) -> Vec<JavaParameter> {
        let mut result = Vec::new();
        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameter" => {
                    let Some(type_node) = child.child_by_field_name("type") else {
                        continue;
                    };
                    let mut type_ref = self.parse_type_node(type_node, source);
                    // C-style `String names[]`
                    if let Some(dims) = child.child_by_field_name("dimensions") {
                        let count = node_text(dims, source).matches('[').count().max(1);
                        type_ref = wrap_array(type_ref, count);
                    }
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| node_text(n, source).to_string())
                        .unwrap_or_else(|| "arg".to_string());

                    result.push(JavaParameter {
                        name,
                        type_ref,
                        annotations: self.read_modifiers(child, source).0,
                        is_varargs: false,
                    });
                }
                "spread_parameter" => {
                    let mut type_ref = TypeRef::Unknown;
                    let mut name = "arg".to_string();

                    let mut inner_cursor = child.walk();
                    for gc in child.named_children(&mut inner_cursor) {
                        match gc.kind() {
                            "variable_declarator" => {
                                if let Some(n) = gc.child_by_field_name("name") {
                                    name = node_text(n, source).to_string();
                                }
                            }
                            "modifiers" => {}
                            _ => type_ref = self.parse_type_node(gc, source),
                        }
                    }

                    result.push(JavaParameter {
                        name,
                        type_ref,
                        annotations: self.read_modifiers(child, source).0,
                        is_varargs: true,
                    });
                }
                _ => {}
            }
        }
        result
    }
}

fn wrap_array(element: TypeRef, dimensions: usize) -> TypeRef {
    match element {
        // `int[][]` may arrive as an array of arrays; fold into one node
        TypeRef::Array {
            element,
            dimensions: inner,
        } => TypeRef::Array {
            element,
            dimensions: inner + dimensions,
        },
        other => TypeRef::Array {
            element: Box::new(other),
            dimensions,
        },
    }
}
