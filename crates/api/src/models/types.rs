use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language-neutral category of a value exchanged with the API.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DynamicTypeId {
    Void,
    Char,
    String,
    Integer,
    Float,
    Boolean,
    User,
    Array,
    Generic,
    Any,
}

impl DynamicTypeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DynamicTypeId::Void => "VOID",
            DynamicTypeId::Char => "CHAR",
            DynamicTypeId::String => "STRING",
            DynamicTypeId::Integer => "INTEGER",
            DynamicTypeId::Float => "FLOAT",
            DynamicTypeId::Boolean => "BOOLEAN",
            DynamicTypeId::User => "USER",
            DynamicTypeId::Array => "ARRAY",
            DynamicTypeId::Generic => "GENERIC",
            DynamicTypeId::Any => "ANY",
        }
    }
}

impl fmt::Display for DynamicTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mapped type.
///
/// Scalars serialize with `reference` and `nested` set to `null`. `USER`
/// carries the simple type name and an empty `nested`. `ARRAY` carries an
/// empty reference and its element type. `GENERIC` carries the raw type
/// name and its type arguments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct DynamicType {
    #[serde(rename = "typeID")]
    pub type_id: DynamicTypeId,
    pub reference: Option<String>,
    pub nested: Option<Vec<DynamicType>>,
}

impl DynamicType {
    pub fn primitive(type_id: DynamicTypeId) -> Self {
        Self {
            type_id,
            reference: None,
            nested: None,
        }
    }

    pub fn void() -> Self {
        Self::primitive(DynamicTypeId::Void)
    }

    pub fn any() -> Self {
        Self::primitive(DynamicTypeId::Any)
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self {
            type_id: DynamicTypeId::User,
            reference: Some(name.into()),
            nested: Some(Vec::new()),
        }
    }

    pub fn array(element: DynamicType) -> Self {
        Self {
            type_id: DynamicTypeId::Array,
            reference: Some(String::new()),
            nested: Some(vec![element]),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<DynamicType>) -> Self {
        Self {
            type_id: DynamicTypeId::Generic,
            reference: Some(name.into()),
            nested: Some(args),
        }
    }

    pub fn nested(&self) -> &[DynamicType] {
        self.nested.as_deref().unwrap_or(&[])
    }

    /// Names of the user-defined types this type mentions, outermost first.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        if matches!(self.type_id, DynamicTypeId::User | DynamicTypeId::Generic) {
            if let Some(reference) = self.reference.as_deref().filter(|r| !r.is_empty()) {
                if !out.contains(&reference) {
                    out.push(reference);
                }
            }
        }
        for inner in self.nested() {
            inner.collect_names(out);
        }
    }
}

impl fmt::Display for DynamicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_id {
            DynamicTypeId::User => write!(f, "{}", self.reference.as_deref().unwrap_or("?")),
            DynamicTypeId::Array => match self.nested().first() {
                Some(element) => write!(f, "{}[]", element),
                None => f.write_str("[]"),
            },
            DynamicTypeId::Generic => {
                write!(f, "{}<", self.reference.as_deref().unwrap_or("?"))?;
                for (i, arg) in self.nested().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            scalar => write!(f, "{}", scalar.as_str().to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_serializes_with_null_reference_and_nested() {
        let value = serde_json::to_value(DynamicType::primitive(DynamicTypeId::Integer)).unwrap();
        assert_eq!(
            value,
            json!({ "typeID": "INTEGER", "reference": null, "nested": null })
        );
    }

    #[test]
    fn array_of_user_type_shape() {
        let value = serde_json::to_value(DynamicType::array(DynamicType::user("User"))).unwrap();
        assert_eq!(
            value,
            json!({
                "typeID": "ARRAY",
                "reference": "",
                "nested": [{ "typeID": "USER", "reference": "User", "nested": [] }]
            })
        );
    }

    #[test]
    fn referenced_names_walks_generic_arguments() {
        let ty = DynamicType::generic(
            "Page",
            vec![DynamicType::array(DynamicType::user("Order")), DynamicType::any()],
        );
        assert_eq!(ty.referenced_names(), vec!["Page", "Order"]);
        assert_eq!(ty.to_string(), "Page<Order[], any>");
    }
}
