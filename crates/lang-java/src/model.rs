use indexmap::IndexMap;
use std::path::PathBuf;

/// A syntactic type reference, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Primitive keyword, simple or qualified name (`int`, `String`, `java.util.UUID`).
    Raw(String),
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool,
    },
    Unknown,
}

impl TypeRef {
    pub fn raw(name: impl Into<String>) -> Self {
        TypeRef::Raw(name.into())
    }

    /// Last segment of the (base) type name, e.g. `List` for `java.util.List<String>`.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Raw(name) => Some(simple_name(name)),
            TypeRef::Generic { base, .. } => base.simple_name(),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Raw(name) if PRIMITIVES.contains(&name.as_str()))
    }
}

pub const PRIMITIVES: [&str; 9] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Strips any package or outer-type qualification from a dotted name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name).trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Record,
    Enum,
    Interface,
}

impl DeclarationKind {
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(DeclarationKind::Class),
            "record_declaration" => Some(DeclarationKind::Record),
            "enum_declaration" => Some(DeclarationKind::Enum),
            "interface_declaration" => Some(DeclarationKind::Interface),
            _ => None,
        }
    }
}

/// An annotation argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    Str(String),
    Bool(bool),
    /// A reference to a constant: `NAME`, `Routes.USERS` or `RequestMethod.GET`.
    Constant(String),
    /// String concatenation with `+`.
    Concat(Vec<AnnotationValue>),
    Array(Vec<AnnotationValue>),
    Annotation(Box<JavaAnnotation>),
    /// Any other literal or expression, kept as source text.
    Other(String),
}

impl AnnotationValue {
    /// Flattens arrays; a scalar becomes a one-element slice.
    pub fn elements(&self) -> Vec<&AnnotationValue> {
        match self {
            AnnotationValue::Array(items) => items.iter().flat_map(|i| i.elements()).collect(),
            other => vec![other],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnnotationValue::Array(items) => items.iter().all(|i| i.is_empty()),
            AnnotationValue::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn source_text(&self) -> String {
        match self {
            AnnotationValue::Str(s) => format!("\"{}\"", s),
            AnnotationValue::Bool(b) => b.to_string(),
            AnnotationValue::Constant(c) | AnnotationValue::Other(c) => c.clone(),
            AnnotationValue::Concat(parts) => parts
                .iter()
                .map(|p| p.source_text())
                .collect::<Vec<_>>()
                .join(" + "),
            AnnotationValue::Array(items) => format!(
                "{{{}}}",
                items
                    .iter()
                    .map(|i| i.source_text())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            AnnotationValue::Annotation(a) => format!("@{}", a.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaAnnotation {
    /// Name as written, possibly qualified.
    pub name: String,
    /// Arguments keyed by element name; a lone unnamed argument is stored as `value`.
    pub arguments: IndexMap<String, AnnotationValue>,
}

impl JavaAnnotation {
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn is(&self, simple: &str) -> bool {
        self.simple_name() == simple
    }

    pub fn get(&self, attribute: &str) -> Option<&AnnotationValue> {
        self.arguments.get(attribute)
    }

    /// Returns the first attribute in `attributes` holding a non-empty value.
    pub fn first_non_empty(&self, attributes: &[&str]) -> Option<&AnnotationValue> {
        attributes
            .iter()
            .filter_map(|a| self.get(a))
            .find(|v| !v.is_empty())
    }
}

pub fn find_annotation<'a>(annotations: &'a [JavaAnnotation], simple: &str) -> Option<&'a JavaAnnotation> {
    annotations.iter().find(|a| a.is(simple))
}

pub fn has_annotation(annotations: &[JavaAnnotation], simple: &str) -> bool {
    find_annotation(annotations, simple).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaParameter {
    pub name: String,
    pub type_ref: TypeRef,
    pub annotations: Vec<JavaAnnotation>,
    pub is_varargs: bool,
}

impl JavaParameter {
    /// The declared type, with varargs widened to an array.
    pub fn effective_type(&self) -> TypeRef {
        if self.is_varargs {
            TypeRef::Array {
                element: Box::new(self.type_ref.clone()),
                dimensions: 1,
            }
        } else {
            self.type_ref.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaMethod {
    pub name: String,
    pub annotations: Vec<JavaAnnotation>,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub return_type: TypeRef,
    pub parameters: Vec<JavaParameter>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaField {
    pub name: String,
    pub type_ref: TypeRef,
    pub annotations: Vec<JavaAnnotation>,
    pub modifiers: Vec<String>,
    /// Initializer expression, when it is something an annotation could reference.
    pub initializer: Option<AnnotationValue>,
}

impl JavaField {
    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.iter().any(|m| m == "final")
    }

    pub fn is_transient(&self) -> bool {
        self.modifiers.iter().any(|m| m == "transient")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaTypeDeclaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Simple name of the directly enclosing type, for nested declarations.
    pub enclosing: Option<String>,
    pub annotations: Vec<JavaAnnotation>,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub fields: Vec<JavaField>,
    pub methods: Vec<JavaMethod>,
    pub record_components: Vec<JavaParameter>,
    pub enum_constants: Vec<String>,
    pub line: usize,
}

impl JavaTypeDeclaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enclosing: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            record_components: Vec::new(),
            enum_constants: Vec::new(),
            line: 0,
        }
    }

    pub fn has_annotation(&self, simple: &str) -> bool {
        has_annotation(&self.annotations, simple)
    }

    pub fn annotation(&self, simple: &str) -> Option<&JavaAnnotation> {
        find_annotation(&self.annotations, simple)
    }
}

/// Everything the processor needs from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaFileModel {
    pub path: Option<PathBuf>,
    pub package: Option<String>,
    pub imports: Vec<String>,
    /// Declarations in source order, outer types before their nested types.
    pub types: Vec<JavaTypeDeclaration>,
    pub has_errors: bool,
}

impl JavaFileModel {
    pub fn qualified_name(&self, decl: &JavaTypeDeclaration) -> String {
        let mut name = decl.name.clone();
        if let Some(outer) = &decl.enclosing {
            name = format!("{}.{}", outer, name);
        }
        match &self.package {
            Some(pkg) => format!("{}.{}", pkg, name),
            None => name,
        }
    }
}
