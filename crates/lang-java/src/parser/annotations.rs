use super::JavaParser;
use super::utils::{compact_text, node_text, unquote};
use crate::model::{AnnotationValue, JavaAnnotation};
use indexmap::IndexMap;
use tree_sitter::Node;

impl JavaParser {
    /// Splits the `modifiers` child of a declaration into annotations and keywords.
    pub(crate) fn read_modifiers(
        &self,
        owner: Node,
        source: &str,
    ) -> (Vec<JavaAnnotation>, Vec<String>) {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();

        let mut cursor = owner.walk();
        let Some(mods_node) = owner
            .children(&mut cursor)
            .find(|c| c.kind() == "modifiers")
        else {
            return (annotations, modifiers);
        };

        let mut mods_cursor = mods_node.walk();
        for child in mods_node.children(&mut mods_cursor) {
            match child.kind() {
                "annotation" | "marker_annotation" => {
                    if let Some(annotation) = self.parse_annotation(child, source) {
                        annotations.push(annotation);
                    }
                }
                _ => {
                    let text = node_text(child, source).trim();
                    if !text.is_empty() && !modifiers.iter().any(|m| m == text) {
                        modifiers.push(text.to_string());
                    }
                }
            }
        }

        (annotations, modifiers)
    }

    pub(crate) fn parse_annotation(&self, node: Node, source: &str) -> Option<JavaAnnotation> {
        let name_node = node.child_by_field_name("name")?;
        let name = compact_text(name_node, source);
        let mut arguments = IndexMap::new();

        if let Some(args_node) = node.child_by_field_name("arguments") {
            let mut cursor = args_node.walk();
            for arg in args_node.named_children(&mut cursor) {
                match arg.kind() {
                    "element_value_pair" => {
                        let key = arg
                            .child_by_field_name("key")
                            .map(|k| node_text(k, source).to_string());
                        let value = arg
                            .child_by_field_name("value")
                            .map(|v| self.parse_element_value(v, source));
                        if let (Some(key), Some(value)) = (key, value) {
                            arguments.insert(key, value);
                        }
                    }
                    "line_comment" | "block_comment" => {}
                    _ => {
                        arguments.insert("value".to_string(), self.parse_element_value(arg, source));
                    }
                }
            }
        }

        Some(JavaAnnotation { name, arguments })
    }

    /// Converts an element value or constant expression into an `AnnotationValue`.
    pub(crate) fn parse_element_value(&self, node: Node, source: &str) -> AnnotationValue {
        match node.kind() {
            "string_literal" => AnnotationValue::Str(unquote(node_text(node, source))),
            "true" => AnnotationValue::Bool(true),
            "false" => AnnotationValue::Bool(false),
            "identifier" | "field_access" | "scoped_identifier" => {
                AnnotationValue::Constant(compact_text(node, source))
            }
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node.named_children(&mut cursor).next();
                inner
                    .map(|n| self.parse_element_value(n, source))
                    .unwrap_or_else(|| AnnotationValue::Other(node_text(node, source).to_string()))
            }
            "binary_expression" => {
                let is_concat = node
                    .child_by_field_name("operator")
                    .map(|op| node_text(op, source) == "+")
                    .unwrap_or(false);
                match (
                    is_concat,
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) {
                    (true, Some(left), Some(right)) => {
                        let mut parts = Vec::new();
                        for side in [left, right] {
                            match self.parse_element_value(side, source) {
                                AnnotationValue::Concat(inner) => parts.extend(inner),
                                other => parts.push(other),
                            }
                        }
                        AnnotationValue::Concat(parts)
                    }
                    _ => AnnotationValue::Other(node_text(node, source).to_string()),
                }
            }
            "element_value_array_initializer" | "array_initializer" => {
                let mut cursor = node.walk();
                let items = node
                    .named_children(&mut cursor)
                    .filter(|c| !matches!(c.kind(), "line_comment" | "block_comment"))
                    .map(|c| self.parse_element_value(c, source))
                    .collect();
                AnnotationValue::Array(items)
            }
            "annotation" | "marker_annotation" => match self.parse_annotation(node, source) {
                Some(annotation) => AnnotationValue::Annotation(Box::new(annotation)),
                None => AnnotationValue::Other(node_text(node, source).to_string()),
            },
            _ => AnnotationValue::Other(node_text(node, source).to_string()),
        }
    }
}
