//! Field rule declarations.
//!
//! A rule set describes the payload fields of a resource once; the
//! per-operation schemas are derived from it (see [`crate::derive`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Primitive type a field rule constrains its value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    /// Check a JSON value against this type.
    ///
    /// `Integer` accepts any JSON number without a fractional part;
    /// `Number` accepts all JSON numbers.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        };
        f.write_str(name)
    }
}

/// A single field constraint record.
///
/// Beyond `type` and `required`, constraint keys are opaque to this crate:
/// they travel through rule derivation unchanged and are left to whatever
/// validation middleware the host wires in.
///
/// ## Example
///
/// ```rust
/// use verapi_validate::FieldRule;
///
/// let rule = FieldRule::string().required().constraint("max_length", 120);
/// assert!(rule.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(rename = "type")]
    kind: FieldType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(flatten)]
    constraints: BTreeMap<String, Value>,
}

impl FieldRule {
    /// Create a rule for the given type, optional and unconstrained.
    pub fn new(kind: FieldType) -> Self {
        Self {
            kind,
            required: false,
            constraints: BTreeMap::new(),
        }
    }

    /// Rule for a string field.
    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    /// Rule for an integer field.
    pub fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    /// Rule for a number field.
    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    /// Rule for a boolean field.
    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    /// Rule for an array field.
    pub fn array() -> Self {
        Self::new(FieldType::Array)
    }

    /// Rule for an object field.
    pub fn object() -> Self {
        Self::new(FieldType::Object)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Strip the required flag.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach an opaque constraint key.
    pub fn constraint(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.insert(key.into(), value.into());
        self
    }

    /// The declared field type.
    pub fn kind(&self) -> FieldType {
        self.kind
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The opaque constraint keys.
    pub fn constraints(&self) -> &BTreeMap<String, Value> {
        &self.constraints
    }
}

/// Mapping from field name to its rule.
pub type RuleSet = BTreeMap<String, FieldRule>;
