//! Effective rule derivation per operation.
//!
//! A resource declares one rule set; each operation sees a different
//! effective schema. Creation keeps `required` flags, partial updates
//! strip them, identifier-addressed operations gain the id attribute with
//! `required` forced on.

use crate::rules::{FieldRule, RuleSet};

/// The CRUD-style operations a resource exposes.
///
/// Each kind carries a fixed signature: whether requests of this kind have
/// a payload body and whether they address a single record by identifier.
/// `Action` covers named custom operations, which are treated as carrying
/// a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Patch,
    Remove,
    GetOne,
    Get,
    Action,
}

impl OperationKind {
    /// Whether requests of this kind carry a payload body.
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            OperationKind::Create | OperationKind::Patch | OperationKind::Action
        )
    }

    /// Whether requests of this kind address a single record by identifier.
    pub fn has_id(&self) -> bool {
        matches!(
            self,
            OperationKind::Patch | OperationKind::Remove | OperationKind::GetOne
        )
    }
}

/// Compute the effective rule set for one operation kind.
///
/// Body-carrying operations take a copy of every declared rule; the
/// `required` flag survives only on [`OperationKind::Create`], so partial
/// updates never demand a field the client did not send. Identifier
/// operations gain `id_rule` under `id_name` with `required` forced true,
/// overriding a declared field of the same name.
///
/// The result never aliases `declared`: repeated calls yield structurally
/// equal, independently mutable maps.
pub fn derive_rules(
    declared: &RuleSet,
    kind: OperationKind,
    id_name: &str,
    id_rule: &FieldRule,
) -> RuleSet {
    let mut derived = RuleSet::new();

    if kind.has_body() {
        for (name, rule) in declared {
            let rule = if kind == OperationKind::Create {
                rule.clone()
            } else {
                rule.clone().optional()
            };
            derived.insert(name.clone(), rule);
        }
    }

    if kind.has_id() {
        derived.insert(id_name.to_string(), id_rule.clone().required());
    }

    derived
}
