use crate::dynamic::{DynamicTypeMapper, TypeScope};
use crate::model::{
    AnnotationValue, DeclarationKind, JavaAnnotation, JavaFileModel, JavaTypeDeclaration, TypeRef,
    find_annotation, has_annotation,
};
use crate::spring;
use clientspec_api::{DynamicType, EntitySpec, PropertySpec, ServiceSpec};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Collects the project types reachable from a set of endpoints.
pub struct EntityCollector<'a> {
    declarations: HashMap<&'a str, &'a JavaTypeDeclaration>,
    mapper: DynamicTypeMapper,
}

impl<'a> EntityCollector<'a> {
    pub fn new(files: impl IntoIterator<Item = &'a JavaFileModel>) -> Self {
        let mut declarations: HashMap<&'a str, &'a JavaTypeDeclaration> = HashMap::new();
        for file in files {
            for decl in &file.types {
                if let Some(existing) = declarations.get(decl.name.as_str()) {
                    warn!(
                        "Type name {} is declared more than once (line {} and {} in {}); keeping the first",
                        decl.name,
                        existing.line,
                        decl.line,
                        file.path
                            .as_ref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default()
                    );
                    continue;
                }
                declarations.insert(decl.name.as_str(), decl);
            }
        }
        Self {
            declarations,
            mapper: DynamicTypeMapper::new(),
        }
    }

    /// Breadth-first over type references, starting from every value the
    /// services exchange.
    pub fn collect(&self, services: &[ServiceSpec]) -> Vec<EntitySpec> {
        let seeds = services
            .iter()
            .flat_map(|s| s.endpoints.iter())
            .flat_map(|e| e.values())
            .map(|v| &v.value_type);
        self.collect_from(seeds)
    }

    pub fn collect_from<'t>(&self, seeds: impl IntoIterator<Item = &'t DynamicType>) -> Vec<EntitySpec> {
        let mut queue: VecDeque<String> = VecDeque::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut enqueue = |ty: &DynamicType, queue: &mut VecDeque<String>| {
            for name in ty.referenced_names() {
                if seen.insert(name.to_string()) {
                    queue.push_back(name.to_string());
                }
            }
        };

        for seed in seeds {
            enqueue(seed, &mut queue);
        }

        let mut entities = Vec::new();
        while let Some(name) = queue.pop_front() {
            let Some(decl) = self.declarations.get(name.as_str()) else {
                continue;
            };
            let entity = self.describe(decl);
            debug!(
                "Entity {} with {} properties",
                entity.name,
                entity.properties.len()
            );
            for property in entity.properties.values() {
                enqueue(&property.value_type, &mut queue);
            }
            entities.push(entity);
        }
        entities
    }

    /// The wire shape of one declaration.
    pub fn describe(&self, decl: &JavaTypeDeclaration) -> EntitySpec {
        let scope = TypeScope::new().with(&decl.type_parameters);

        match decl.kind {
            DeclarationKind::Enum => {
                EntitySpec::enumeration(decl.name.clone(), decl.enum_constants.clone())
            }
            DeclarationKind::Interface => EntitySpec::new(decl.name.clone()),
            DeclarationKind::Record => {
                let mut entity = EntitySpec::new(decl.name.clone());
                for component in &decl.record_components {
                    if has_annotation(&component.annotations, spring::JSON_IGNORE) {
                        continue;
                    }
                    let name = property_name(&component.annotations, &component.name);
                    let property = self.property(
                        &component.effective_type(),
                        &component.annotations,
                        &scope,
                    );
                    entity.properties.entry(name).or_insert(property);
                }
                entity
            }
            DeclarationKind::Class => {
                let mut entity = EntitySpec::new(decl.name.clone());
                for field in &decl.fields {
                    if field.is_static()
                        || field.is_transient()
                        || has_annotation(&field.annotations, spring::JSON_IGNORE)
                    {
                        continue;
                    }
                    let name = property_name(&field.annotations, &field.name);
                    let property = self.property(&field.type_ref, &field.annotations, &scope);
                    entity.properties.entry(name).or_insert(property);
                }
                entity
            }
        }
    }

    fn property(
        &self,
        type_ref: &TypeRef,
        annotations: &[JavaAnnotation],
        scope: &TypeScope<'_>,
    ) -> PropertySpec {
        let required = type_ref.is_primitive()
            || spring::NOT_NULL_ANNOTATIONS
                .iter()
                .any(|a| has_annotation(annotations, a));
        PropertySpec::new(self.mapper.map(type_ref, scope), required)
    }
}

fn property_name(annotations: &[JavaAnnotation], declared: &str) -> String {
    find_annotation(annotations, spring::JSON_PROPERTY)
        .and_then(|a| a.first_non_empty(&["value"]))
        .and_then(|v| match v {
            AnnotationValue::Str(s) => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(|| declared.to_string())
}
