//! # VerAPI Validate
//!
//! Field rules for VerAPI resources and the per-operation derivation that
//! turns one declared rule set into the effective schema of each CRUD-style
//! operation.
//!
//! A resource declares its payload fields once:
//!
//! ```rust
//! use verapi_validate::{check_payload, derive_rules, FieldRule, OperationKind, RuleSet};
//!
//! let rules = RuleSet::from([
//!     ("name".to_string(), FieldRule::string().required()),
//!     ("count".to_string(), FieldRule::integer()),
//! ]);
//!
//! // Partial updates never require declared fields, but do require the id.
//! let patch = derive_rules(&rules, OperationKind::Patch, "_id", &FieldRule::integer());
//! assert!(patch["_id"].is_required());
//! assert!(!patch["name"].is_required());
//!
//! // The derived set can be applied to a payload directly.
//! let payload = serde_json::json!({"_id": 7, "count": 3});
//! assert!(check_payload(&patch, &payload).is_ok());
//! ```

mod check;
mod derive;
mod error;
mod rules;

pub use check::check_payload;
pub use derive::{derive_rules, OperationKind};
pub use error::{FieldError, ValidationError};
pub use rules::{FieldRule, FieldType, RuleSet};
