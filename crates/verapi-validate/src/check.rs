//! Payload checking against a derived rule set.
//!
//! Enforces the two constraint keys this crate interprets itself:
//! `required` and `type`. Opaque constraint keys are left to the host's
//! validation middleware.

use crate::error::{FieldError, ValidationError};
use crate::rules::RuleSet;
use serde_json::Value;

/// Check a JSON payload against a rule set.
///
/// Required fields must be present; present fields must match their rule's
/// declared type. `null` counts as absent. Failures are collected across
/// all fields rather than short-circuiting on the first.
pub fn check_payload(rules: &RuleSet, payload: &Value) -> Result<(), ValidationError> {
    let object = payload.as_object();
    let mut failures = Vec::new();

    for (name, rule) in rules {
        let value = object.and_then(|map| map.get(name)).filter(|v| !v.is_null());

        match value {
            Some(value) if !rule.kind().matches(value) => {
                failures.push(FieldError::new(
                    name,
                    "type",
                    format!("{} must be of type {}", name, rule.kind()),
                ));
            }
            None if rule.is_required() => {
                failures.push(FieldError::new(
                    name,
                    "required",
                    format!("{} is required", name),
                ));
            }
            _ => {}
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FieldRule;
    use serde_json::json;

    fn rules() -> RuleSet {
        RuleSet::from([
            ("name".to_string(), FieldRule::string().required()),
            ("count".to_string(), FieldRule::integer()),
        ])
    }

    #[test]
    fn valid_payload_passes() {
        assert!(check_payload(&rules(), &json!({"name": "a", "count": 3})).is_ok());
    }

    #[test]
    fn optional_field_may_be_absent() {
        assert!(check_payload(&rules(), &json!({"name": "a"})).is_ok());
    }

    #[test]
    fn missing_required_field_fails() {
        let err = check_payload(&rules(), &json!({"count": 3})).unwrap_err();

        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "name");
        assert_eq!(err.fields[0].code, "required");
    }

    #[test]
    fn type_mismatch_fails() {
        let err = check_payload(&rules(), &json!({"name": "a", "count": "three"})).unwrap_err();

        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "count");
        assert_eq!(err.fields[0].code, "type");
        assert_eq!(err.fields[0].message, "count must be of type integer");
    }

    #[test]
    fn null_counts_as_absent() {
        assert!(check_payload(&rules(), &json!({"name": "a", "count": null})).is_ok());

        let err = check_payload(&rules(), &json!({"name": null})).unwrap_err();
        assert_eq!(err.fields[0].code, "required");
    }

    #[test]
    fn failures_are_collected_not_short_circuited() {
        let err = check_payload(&rules(), &json!({"count": []})).unwrap_err();
        assert_eq!(err.fields.len(), 2);
    }

    #[test]
    fn non_object_payload_misses_every_required_field() {
        let err = check_payload(&rules(), &json!("not an object")).unwrap_err();

        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "name");
    }

    #[test]
    fn unknown_payload_fields_are_ignored() {
        assert!(check_payload(&rules(), &json!({"name": "a", "extra": true})).is_ok());
    }
}
