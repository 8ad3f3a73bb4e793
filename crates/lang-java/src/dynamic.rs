use crate::model::{TypeParameter, TypeRef, simple_name};
use clientspec_api::{DynamicType, DynamicTypeId};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static WELL_KNOWN_SCALARS: Lazy<HashMap<&'static str, DynamicTypeId>> = Lazy::new(|| {
    HashMap::from([
        ("Object", DynamicTypeId::Any),
        ("Character", DynamicTypeId::Char),
        ("Byte", DynamicTypeId::Char),
        ("String", DynamicTypeId::String),
        ("Short", DynamicTypeId::Integer),
        ("Integer", DynamicTypeId::Integer),
        ("Long", DynamicTypeId::Integer),
        ("Float", DynamicTypeId::Float),
        ("Double", DynamicTypeId::Float),
        ("Boolean", DynamicTypeId::Boolean),
        ("Void", DynamicTypeId::Void),
    ])
});

static WELL_KNOWN_SEQUENCES: Lazy<HashMap<&'static str, DynamicTypeId>> = Lazy::new(|| {
    HashMap::from([("Set", DynamicTypeId::Array), ("List", DynamicTypeId::Array)])
});

fn primitive_id(keyword: &str) -> Option<DynamicTypeId> {
    match keyword {
        "boolean" => Some(DynamicTypeId::Boolean),
        "byte" | "char" => Some(DynamicTypeId::Char),
        "short" | "int" | "long" => Some(DynamicTypeId::Integer),
        "float" | "double" => Some(DynamicTypeId::Float),
        "void" => Some(DynamicTypeId::Void),
        _ => None,
    }
}

/// Type variables visible at a use site. Inner scopes shadow outer ones.
#[derive(Debug, Clone, Default)]
pub struct TypeScope<'a> {
    frames: Vec<&'a [TypeParameter]>,
}

impl<'a> TypeScope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, parameters: &'a [TypeParameter]) -> Self {
        self.frames.push(parameters);
        self
    }

    fn lookup(&self, name: &str) -> Option<&'a TypeParameter> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.iter().find(|p| p.name == name))
    }
}

/// Maps syntactic Java types onto [`DynamicType`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicTypeMapper;

impl DynamicTypeMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, type_ref: &TypeRef, scope: &TypeScope<'_>) -> DynamicType {
        let mut resolving = Vec::new();
        self.map_in(type_ref, scope, &mut resolving)
    }

    fn map_in(
        &self,
        type_ref: &TypeRef,
        scope: &TypeScope<'_>,
        resolving: &mut Vec<String>,
    ) -> DynamicType {
        match type_ref {
            TypeRef::Raw(name) => self.map_declared(name, scope, resolving),
            TypeRef::Generic { base, args } => {
                let Some(base_name) = base.simple_name() else {
                    return DynamicType::any();
                };

                if WELL_KNOWN_SEQUENCES.contains_key(base_name) {
                    let element = args
                        .first()
                        .map(|a| self.map_in(a, scope, resolving))
                        .unwrap_or_else(DynamicType::any);
                    return DynamicType::array(element);
                }

                let params = args
                    .iter()
                    .map(|a| self.map_in(a, scope, resolving))
                    .collect();
                DynamicType::generic(base_name, params)
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut mapped = self.map_in(element, scope, resolving);
                for _ in 0..(*dimensions).max(1) {
                    mapped = DynamicType::array(mapped);
                }
                mapped
            }
            TypeRef::Wildcard { .. } | TypeRef::Unknown => DynamicType::any(),
        }
    }

    fn map_declared(
        &self,
        name: &str,
        scope: &TypeScope<'_>,
        resolving: &mut Vec<String>,
    ) -> DynamicType {
        if let Some(id) = primitive_id(name) {
            return DynamicType::primitive(id);
        }

        let simple = simple_name(name);

        // Type variables only ever appear unqualified
        if simple == name {
            if let Some(param) = scope.lookup(simple) {
                if resolving.iter().any(|r| r == simple) {
                    return DynamicType::any();
                }
                let Some(bound) = param.bounds.first() else {
                    return DynamicType::any();
                };
                resolving.push(simple.to_string());
                let mapped = self.map_in(bound, scope, resolving);
                resolving.pop();
                return mapped;
            }
        }

        if let Some(id) = WELL_KNOWN_SCALARS.get(simple) {
            return DynamicType::primitive(*id);
        }

        DynamicType::user(simple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(base: &str, args: Vec<TypeRef>) -> TypeRef {
        TypeRef::Generic {
            base: Box::new(TypeRef::raw(base)),
            args,
        }
    }

    #[test]
    fn primitives_and_boxes() {
        let mapper = DynamicTypeMapper::new();
        let scope = TypeScope::new();
        let cases = [
            ("boolean", DynamicTypeId::Boolean),
            ("char", DynamicTypeId::Char),
            ("byte", DynamicTypeId::Char),
            ("long", DynamicTypeId::Integer),
            ("double", DynamicTypeId::Float),
            ("void", DynamicTypeId::Void),
            ("java.lang.String", DynamicTypeId::String),
            ("Object", DynamicTypeId::Any),
            ("Long", DynamicTypeId::Integer),
            ("Boolean", DynamicTypeId::Boolean),
        ];
        for (name, expected) in cases {
            assert_eq!(
                mapper.map(&TypeRef::raw(name), &scope),
                DynamicType::primitive(expected),
                "mapping {}",
                name
            );
        }
    }

    #[test]
    fn sequences_become_arrays_and_other_generics_stay_generic() {
        let mapper = DynamicTypeMapper::new();
        let scope = TypeScope::new();

        let list = generic("java.util.List", vec![TypeRef::raw("User")]);
        assert_eq!(
            mapper.map(&list, &scope),
            DynamicType::array(DynamicType::user("User"))
        );

        let map = generic("Map", vec![TypeRef::raw("String"), TypeRef::raw("Integer")]);
        assert_eq!(
            mapper.map(&map, &scope),
            DynamicType::generic(
                "Map",
                vec![
                    DynamicType::primitive(DynamicTypeId::String),
                    DynamicType::primitive(DynamicTypeId::Integer)
                ]
            )
        );

        // A raw List has no type arguments and is treated like any declared type
        assert_eq!(
            mapper.map(&TypeRef::raw("List"), &scope),
            DynamicType::user("List")
        );
    }

    #[test]
    fn arrays_nest_per_dimension() {
        let mapper = DynamicTypeMapper::new();
        let matrix = TypeRef::Array {
            element: Box::new(TypeRef::raw("int")),
            dimensions: 2,
        };
        assert_eq!(
            mapper.map(&matrix, &TypeScope::new()),
            DynamicType::array(DynamicType::array(DynamicType::primitive(
                DynamicTypeId::Integer
            )))
        );
    }

    #[test]
    fn type_variables_map_to_their_bound() {
        let mapper = DynamicTypeMapper::new();
        let class_params = vec![TypeParameter {
            name: "T".into(),
            bounds: vec![],
        }];
        let method_params = vec![
            TypeParameter {
                name: "T".into(),
                bounds: vec![TypeRef::raw("Number")],
            },
            TypeParameter {
                name: "S".into(),
                bounds: vec![generic("Comparable", vec![TypeRef::raw("S")])],
            },
        ];

        let class_scope = TypeScope::new().with(&class_params);
        assert_eq!(mapper.map(&TypeRef::raw("T"), &class_scope), DynamicType::any());

        let method_scope = TypeScope::new().with(&class_params).with(&method_params);
        assert_eq!(
            mapper.map(&TypeRef::raw("T"), &method_scope),
            DynamicType::user("Number")
        );
        assert_eq!(
            mapper.map(&TypeRef::raw("S"), &method_scope),
            DynamicType::generic("Comparable", vec![DynamicType::any()])
        );
    }

    #[test]
    fn wildcards_are_any() {
        let mapper = DynamicTypeMapper::new();
        let wildcard = TypeRef::Wildcard {
            bound: Some(Box::new(TypeRef::raw("User"))),
            is_upper_bound: true,
        };
        assert_eq!(
            mapper.map(&generic("List", vec![wildcard]), &TypeScope::new()),
            DynamicType::array(DynamicType::any())
        );
    }
}
