//! Permission descriptors: the plaintext of a scoped key.
//!
//! A descriptor carries the query filters that the scoped key forces onto
//! every request, and optionally the operations the key may perform.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScopedKeyError};

/// Well-known operation names.
pub mod operations {
    pub const READ: &str = "read";
    pub const WRITE: &str = "write";
    pub const CACHED_QUERIES: &str = "cached_queries";
    pub const SAVED_QUERIES: &str = "saved_queries";
}

/// The plaintext payload of a scoped key.
///
/// Serializes as `{"filters": [...]}` with `"allowed_operations"` appended
/// only when at least one operation is allowed. Field order is part of the
/// wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    /// Filter clauses, passed through verbatim.
    pub filters: Vec<Value>,

    /// Operations the key may perform. Empty means unrestricted by the key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_operations: Vec<String>,
}

impl PermissionDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a descriptor from raw filter clauses.
    pub fn with_filters(filters: Vec<Value>) -> Self {
        Self {
            filters,
            allowed_operations: Vec::new(),
        }
    }

    /// Append a filter clause.
    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Allow an operation. Duplicates are ignored.
    pub fn allow(mut self, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        if !self.allowed_operations.contains(&operation) {
            self.allowed_operations.push(operation);
        }
        self
    }

    /// Check whether `operation` is explicitly allowed.
    pub fn allows(&self, operation: &str) -> bool {
        self.allowed_operations.iter().any(|op| op == operation)
    }

    /// Serialize to the canonical JSON plaintext.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ScopedKeyError::EncodingError(e.to_string()))
    }

    /// Parse from JSON plaintext. `filters` must be present.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ScopedKeyError::DecodingError(e.to_string()))
    }
}

/// Filter operators understood by the analytics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Exists,
    In,
    Contains,
    NotContains,
    StartsWith,
    Within,
    Regex,
}

/// A typed filter clause.
///
/// Converts into the opaque JSON value stored in a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub property_name: String,
    pub operator: Operator,
    pub property_value: Value,
}

impl Filter {
    /// Create a filter clause.
    pub fn new(property_name: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            property_name: property_name.into(),
            operator,
            property_value: value.into(),
        }
    }

    /// `property_name == value`.
    pub fn eq(property_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(property_name, Operator::Eq, value)
    }
}

impl From<Filter> for Value {
    fn from(filter: Filter) -> Self {
        serde_json::json!({
            "property_name": filter.property_name,
            "operator": filter.operator,
            "property_value": filter.property_value,
        })
    }
}

impl TryFrom<&Value> for Filter {
    type Error = ScopedKeyError;

    fn try_from(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| ScopedKeyError::DecodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_operations_omitted() {
        let descriptor = PermissionDescriptor::new().filter(Filter::eq("user_id", 42));
        let json = String::from_utf8(descriptor.to_json_bytes().unwrap()).unwrap();

        assert!(!json.contains("allowed_operations"));
        assert_eq!(
            json,
            r#"{"filters":[{"property_name":"user_id","operator":"eq","property_value":42}]}"#
        );
    }

    #[test]
    fn test_raw_filter_key_order_kept() {
        let raw = r#"{"property_name":"user_id","operator":"eq","property_value":42}"#;
        let descriptor =
            PermissionDescriptor::with_filters(vec![serde_json::from_str(raw).unwrap()]);
        let json = String::from_utf8(descriptor.to_json_bytes().unwrap()).unwrap();

        assert_eq!(json, format!(r#"{{"filters":[{raw}]}}"#));

        let decoded = PermissionDescriptor::from_json_bytes(json.as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&decoded.filters[0]).unwrap(), raw);
    }

    #[test]
    fn test_operations_follow_filters() {
        let descriptor = PermissionDescriptor::new().allow(operations::READ);
        let json = String::from_utf8(descriptor.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"filters":[],"allowed_operations":["read"]}"#);
    }

    #[test]
    fn test_allow_deduplicates() {
        let descriptor = PermissionDescriptor::new()
            .allow(operations::READ)
            .allow(operations::WRITE)
            .allow(operations::READ);
        assert_eq!(descriptor.allowed_operations, vec!["read", "write"]);
        assert!(descriptor.allows("write"));
        assert!(!descriptor.allows("cached_queries"));
    }

    #[test]
    fn test_filters_pass_through_verbatim() {
        let raw = json!({"property_name": "geo", "operator": "within", "property_value": {"max_distance_miles": 10}, "extra": true});
        let descriptor = PermissionDescriptor::with_filters(vec![raw.clone()]);
        let bytes = descriptor.to_json_bytes().unwrap();
        let parsed = PermissionDescriptor::from_json_bytes(&bytes).unwrap();
        assert_eq!(parsed.filters, vec![raw]);
    }

    #[test]
    fn test_missing_filters_is_decoding_error() {
        let err = PermissionDescriptor::from_json_bytes(br#"{"allowed_operations":["read"]}"#)
            .unwrap_err();
        assert!(matches!(err, ScopedKeyError::DecodingError(_)));
    }

    #[test]
    fn test_malformed_json_is_decoding_error() {
        let err = PermissionDescriptor::from_json_bytes(b"{\"filters\": [").unwrap_err();
        assert!(matches!(err, ScopedKeyError::DecodingError(_)));
    }

    #[test]
    fn test_filter_value_roundtrip() {
        let filter = Filter::new("count", Operator::NotContains, json!(["a", "b"]));
        let value: Value = filter.clone().into();
        assert_eq!(value["operator"], "not_contains");
        assert_eq!(Filter::try_from(&value).unwrap(), filter);
    }
}
