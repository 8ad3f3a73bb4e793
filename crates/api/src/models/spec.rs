use super::endpoint::{ApiEndpoint, HttpMethod};
use super::types::DynamicType;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_NAME: &str = "service";

/// Defines an entire API: the entities needed to consume it and the services it provides.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ApiSpec {
    pub name: String,
    pub entities: Vec<EntitySpec>,
    pub services: Vec<ServiceSpec>,
}

impl ApiSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: EntitySpec) {
        self.entities.push(entity);
    }

    pub fn add_service(&mut self, service: ServiceSpec) {
        self.services.push(service);
    }

    pub fn endpoint_count(&self) -> usize {
        self.services.iter().map(|s| s.endpoints.len()).sum()
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySpec> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Flattened view of every endpoint, in document order.
    pub fn routes(&self) -> impl Iterator<Item = Route<'_>> {
        self.services.iter().flat_map(|service| {
            service.endpoints.iter().map(move |endpoint| Route {
                service: &service.name,
                handler: &endpoint.name,
                method: endpoint.method,
                path: &endpoint.endpoint,
            })
        })
    }
}

impl Default for ApiSpec {
    fn default() -> Self {
        Self::new(DEFAULT_API_NAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'a> {
    pub service: &'a str,
    pub handler: &'a str,
    pub method: HttpMethod,
    pub path: &'a str,
}

/// The endpoints of a single controller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ServiceSpec {
    pub name: String,
    pub endpoints: Vec<ApiEndpoint>,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
        }
    }

    pub fn add_endpoint(&mut self, endpoint: ApiEndpoint) {
        self.endpoints.push(endpoint);
    }

    pub fn endpoint(&self, name: &str) -> Option<&ApiEndpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }
}

/// A data type exchanged by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct EntitySpec {
    pub name: String,
    pub properties: IndexMap<String, PropertySpec>,
    /// Constant names, for enumerations only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl EntitySpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            values: None,
        }
    }

    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            values: Some(values),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub value_type: DynamicType,
    pub required: bool,
}

impl PropertySpec {
    pub fn new(value_type: DynamicType, required: bool) -> Self {
        Self {
            value_type,
            required,
        }
    }
}
