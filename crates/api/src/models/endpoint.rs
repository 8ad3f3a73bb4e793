use super::types::DynamicType;
use crate::error::ApiError;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ApiError::UnknownHttpMethod(s.to_string()))
    }
}

/// A typed value in a request or response, with whether the caller must supply it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct RequestValue {
    #[serde(rename = "type")]
    pub value_type: DynamicType,
    pub required: bool,
}

impl RequestValue {
    pub fn new(value_type: DynamicType, required: bool) -> Self {
        Self {
            value_type,
            required,
        }
    }
}

/// Normalized form of any handler mapping annotation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct EndpointMetadata {
    pub endpoint: Vec<String>,
    pub method: HttpMethod,
}

/// A handler path with its variables lifted out of the method signature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointTemplate {
    pub template: String,
    pub path_variables: IndexMap<String, RequestValue>,
    pub query_variables: IndexMap<String, RequestValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub name: String,
    pub endpoint: String,
    pub method: HttpMethod,
    pub path_variables: IndexMap<String, RequestValue>,
    pub query_variables: IndexMap<String, RequestValue>,
    pub request_body: RequestValue,
    pub response_body: RequestValue,
}

impl ApiEndpoint {
    /// Every value the endpoint exchanges: variables first, then the bodies.
    pub fn values(&self) -> impl Iterator<Item = &RequestValue> {
        self.path_variables
            .values()
            .chain(self.query_variables.values())
            .chain(std::iter::once(&self.request_body))
            .chain(std::iter::once(&self.response_body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::DynamicTypeId;
    use serde_json::json;

    #[test]
    fn http_method_parses_any_case() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("CONNECT".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn endpoint_uses_camel_case_keys() {
        let mut path_variables = IndexMap::new();
        path_variables.insert(
            "id".to_string(),
            RequestValue::new(DynamicType::primitive(DynamicTypeId::Integer), true),
        );
        let endpoint = ApiEndpoint {
            name: "getUser".to_string(),
            endpoint: "/users/{{id}}".to_string(),
            method: HttpMethod::Get,
            path_variables,
            query_variables: IndexMap::new(),
            request_body: RequestValue::new(DynamicType::void(), false),
            response_body: RequestValue::new(DynamicType::user("User"), true),
        };

        let value = serde_json::to_value(&endpoint).unwrap();
        assert_eq!(value["method"], json!("GET"));
        assert_eq!(value["pathVariables"]["id"]["type"]["typeID"], json!("INTEGER"));
        assert_eq!(value["queryVariables"], json!({}));
        assert_eq!(value["requestBody"]["required"], json!(false));
        assert_eq!(value["responseBody"]["type"]["reference"], json!("User"));
        assert_eq!(endpoint.values().count(), 3);
    }
}
