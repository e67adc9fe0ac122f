//! Cross-version fallback composition.
//!
//! For every declared version the composer precomputes the mount prefix
//! and the chain of route tables consulted under it. For versions
//! `1.0, 1.1, 2.0` and root `/entities` the mount graph is:
//!
//! ```text
//! /1.0/entities -> [1.0]
//! /1.1/entities -> [1.1, 1.0]
//! /2.0/entities -> [2.0, 1.1, 1.0]
//! ```
//!
//! A version with no matching registration falls through to the nearest
//! lower declared version that has one; fallback never goes to a higher
//! version. The topology is fixed at construction.

use crate::route::{MatchOptions, RouteTable, TableMatch};
use crate::version::VersionSet;
use http::Method;

/// Static mount topology computed once from the declared version set.
///
/// Entry `i` corresponds to the `i`-th version in descending order;
/// `fallbacks[i]` holds the indices of every declared version less than or
/// equal to it, also descending, so the version's own table is consulted
/// first.
#[derive(Debug)]
pub(crate) struct CascadeRouter {
    literals: Vec<String>,
    prefixes: Vec<String>,
    fallbacks: Vec<Vec<usize>>,
    options: MatchOptions,
}

/// Outcome of structural resolution against the mount graph.
pub(crate) enum Resolution {
    /// A route in some table of the addressed version's fallback chain
    /// matched.
    Matched(TableMatch),
    /// A version prefix matched but no table in its fallback chain had a
    /// route for the method and remainder.
    NoRoute,
    /// The path does not address any declared version surface.
    NoVersion,
}

impl CascadeRouter {
    pub(crate) fn new(versions: &VersionSet, root: &str, options: MatchOptions) -> Self {
        let entries = versions.entries();

        let literals: Vec<String> =
            entries.iter().map(|e| e.literal().to_string()).collect();
        let prefixes = entries
            .iter()
            .map(|e| format!("/{}{}", e.literal(), root))
            .collect();
        // Entries are descending, so each filtered chain comes out
        // descending as well.
        let fallbacks = entries
            .iter()
            .map(|entry| {
                entries
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| other.coerced() <= entry.coerced())
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();

        Self {
            literals,
            prefixes,
            fallbacks,
            options,
        }
    }

    /// Resolve a method + path against the mount graph.
    pub(crate) fn resolve(
        &self,
        tables: &[RouteTable],
        method: &Method,
        path: &str,
    ) -> Resolution {
        for (version, prefix) in self.prefixes.iter().enumerate() {
            let Some(rest) = strip_mount_prefix(path, prefix, self.options.case_sensitive)
            else {
                continue;
            };

            for &served_by in &self.fallbacks[version] {
                if let Some(matched) = tables[served_by].find(method, rest, self.options) {
                    tracing::debug!(
                        version = %self.literals[version],
                        served_by = %self.literals[served_by],
                        %method,
                        path,
                        "route resolved"
                    );
                    return Resolution::Matched(matched);
                }
            }

            tracing::debug!(
                version = %self.literals[version],
                %method,
                path,
                "no route in fallback chain"
            );
            return Resolution::NoRoute;
        }

        Resolution::NoVersion
    }

    #[cfg(test)]
    pub(crate) fn fallbacks(&self) -> &[Vec<usize>] {
        &self.fallbacks
    }
}

/// Strip a mount prefix, requiring a segment boundary after it so
/// `/1.0/entities` never swallows `/1.0.1/entities`.
fn strip_mount_prefix<'a>(path: &'a str, prefix: &str, case_sensitive: bool) -> Option<&'a str> {
    if path.len() < prefix.len() || !path.is_char_boundary(prefix.len()) {
        return None;
    }

    let (head, rest) = path.split_at(prefix.len());
    let hit = if case_sensitive {
        head == prefix
    } else {
        head.eq_ignore_ascii_case(prefix)
    };
    if !hit || (!rest.is_empty() && !rest.starts_with('/')) {
        return None;
    }

    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(literals: &[&str]) -> VersionSet {
        VersionSet::new(literals.iter().copied()).unwrap()
    }

    #[test]
    fn fallback_chains_are_descending_suffixes() {
        let set = versions(&["1.0", "1.1", "2.0"]);
        let cascade = CascadeRouter::new(&set, "/entities", MatchOptions::default());

        // Descending order: 2.0 (0), 1.1 (1), 1.0 (2).
        assert_eq!(cascade.fallbacks(), [vec![0, 1, 2], vec![1, 2], vec![2]]);
    }

    #[test]
    fn lowest_version_falls_back_to_itself_only() {
        let set = versions(&["3.0"]);
        let cascade = CascadeRouter::new(&set, "/things", MatchOptions::default());

        assert_eq!(cascade.fallbacks(), [vec![0]]);
    }

    #[test]
    fn prefix_requires_segment_boundary() {
        assert_eq!(
            strip_mount_prefix("/1.0/entities/5", "/1.0/entities", true),
            Some("/5")
        );
        assert_eq!(strip_mount_prefix("/1.0/entities", "/1.0/entities", true), Some(""));
        assert_eq!(strip_mount_prefix("/1.0/entitiesx", "/1.0/entities", true), None);
        assert_eq!(strip_mount_prefix("/1.0/enti", "/1.0/entities", true), None);
    }

    #[test]
    fn prefix_case_sensitivity_follows_flag() {
        assert!(strip_mount_prefix("/1.0/ENTITIES", "/1.0/entities", false).is_some());
        assert!(strip_mount_prefix("/1.0/ENTITIES", "/1.0/entities", true).is_none());
    }
}
