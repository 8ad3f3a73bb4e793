crate::decl_indices!(DeclarationIndices, {
    pkg => "package",
    import_name => "import.name",
    type_def => "type.def",
    type_name => "type.name",
});

pub const JAVA_DECLARATIONS_SCM: &str = include_str!("java_declarations.scm");
