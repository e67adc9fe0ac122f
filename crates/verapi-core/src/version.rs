//! Semantic version coercion and declared-set ordering.
//!
//! Version identifiers are opaque strings as far as URLs are concerned;
//! for ordering they are coerced to a (major, minor, patch) triple.
//! Supported literal forms:
//!
//! - `1`, `1.0`, `1.0.0`
//! - `v1`, `V1.2` (prefix stripped before parsing)

use crate::error::ResourceError;
use std::fmt;
use std::str::FromStr;

/// Coerced form of a declared version literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number (defaults to 0)
    pub minor: u32,
    /// Patch version number (defaults to 0)
    pub patch: u32,
}

impl ApiVersion {
    /// Create a new version.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResourceError::InvalidVersion(s.to_string());

        let trimmed = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .unwrap_or(s);
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut numbers = [0u32; 3];
        let mut count = 0;
        for part in trimmed.split('.') {
            if count == 3 {
                return Err(invalid());
            }
            numbers[count] = part.parse().map_err(|_| invalid())?;
            count += 1;
        }

        Ok(ApiVersion::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// One declared version: the literal used verbatim in URLs plus its
/// coerced form used for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    literal: String,
    coerced: ApiVersion,
}

impl VersionEntry {
    /// The literal as declared (and as it appears in mount paths).
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The coerced semantic version.
    pub fn coerced(&self) -> ApiVersion {
        self.coerced
    }
}

/// The declared version set, held in strictly descending coerced order.
///
/// The descending order is established once at construction and every
/// consumer iterates it as-is: fallback chains, error messages, and the
/// introspection surface all present versions newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSet {
    entries: Vec<VersionEntry>,
}

impl VersionSet {
    /// Coerce and sort the given literals into descending order.
    ///
    /// Fails with [`ResourceError::InvalidVersion`] when a literal does not
    /// parse, and with [`ResourceError::AmbiguousVersion`] when two
    /// literals coerce to the same triple (`"1.0"` vs `"1.0.0"`), since no
    /// fallback order between them would be defined.
    pub fn new<I, S>(literals: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<VersionEntry> = literals
            .into_iter()
            .map(|literal| {
                let literal = literal.into();
                let coerced = literal.parse()?;
                Ok(VersionEntry { literal, coerced })
            })
            .collect::<Result<_, ResourceError>>()?;

        entries.sort_by(|a, b| b.coerced.cmp(&a.coerced));

        for pair in entries.windows(2) {
            if pair[0].coerced == pair[1].coerced {
                return Err(ResourceError::AmbiguousVersion(
                    pair[0].literal.clone(),
                    pair[1].literal.clone(),
                ));
            }
        }

        Ok(Self { entries })
    }

    /// Number of declared versions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The declared versions, descending.
    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Position of a literal in the descending order.
    pub fn index_of(&self, literal: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.literal == literal)
    }

    /// Declared literals joined for error messages, descending.
    pub fn join(&self, separator: &str) -> String {
        self.entries
            .iter()
            .map(VersionEntry::literal)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_forms() {
        assert_eq!("1".parse::<ApiVersion>().unwrap(), ApiVersion::new(1, 0, 0));
        assert_eq!(
            "1.2".parse::<ApiVersion>().unwrap(),
            ApiVersion::new(1, 2, 0)
        );
        assert_eq!(
            "1.2.3".parse::<ApiVersion>().unwrap(),
            ApiVersion::new(1, 2, 3)
        );
        assert_eq!(
            "v2.1".parse::<ApiVersion>().unwrap(),
            ApiVersion::new(2, 1, 0)
        );
        assert_eq!("V3".parse::<ApiVersion>().unwrap(), ApiVersion::new(3, 0, 0));
    }

    #[test]
    fn rejects_malformed_literals() {
        for literal in ["", "v", "x", "1.2.3.4", "1.x", "one.two"] {
            assert_eq!(
                literal.parse::<ApiVersion>(),
                Err(ResourceError::InvalidVersion(literal.to_string())),
                "literal {literal:?} should be rejected"
            );
        }
    }

    #[test]
    fn ordering_is_major_minor_patch() {
        assert!(ApiVersion::new(2, 0, 0) > ApiVersion::new(1, 9, 9));
        assert!(ApiVersion::new(1, 1, 0) > ApiVersion::new(1, 0, 9));
        assert!(ApiVersion::new(1, 0, 1) > ApiVersion::new(1, 0, 0));
    }

    #[test]
    fn set_sorts_descending_regardless_of_input_order() {
        let set = VersionSet::new(["1.0", "2.0", "1.1"]).unwrap();

        let literals: Vec<_> = set.entries().iter().map(VersionEntry::literal).collect();
        assert_eq!(literals, ["2.0", "1.1", "1.0"]);
    }

    #[test]
    fn index_follows_descending_order() {
        let set = VersionSet::new(["1.0", "2.0", "1.1"]).unwrap();

        assert_eq!(set.index_of("2.0"), Some(0));
        assert_eq!(set.index_of("1.1"), Some(1));
        assert_eq!(set.index_of("1.0"), Some(2));
        assert_eq!(set.index_of("3.0"), None);
    }

    #[test]
    fn join_is_descending() {
        let set = VersionSet::new(["1.0", "2.0"]).unwrap();
        assert_eq!(set.join(", "), "2.0, 1.0");
    }

    #[test]
    fn semver_equal_literals_are_ambiguous() {
        let err = VersionSet::new(["1.0", "1.0.0"]).unwrap_err();
        assert_eq!(
            err,
            ResourceError::AmbiguousVersion("1.0".to_string(), "1.0.0".to_string())
        );

        assert!(matches!(
            VersionSet::new(["2.0", "2.0"]),
            Err(ResourceError::AmbiguousVersion(..))
        ));
    }

    #[test]
    fn invalid_literal_fails_construction() {
        assert_eq!(
            VersionSet::new(["1.0", "latest"]),
            Err(ResourceError::InvalidVersion("latest".to_string()))
        );
    }

    #[test]
    fn empty_set_is_allowed() {
        let set = VersionSet::new(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.join(", "), "");
    }
}
