//! Error types for resource construction and registration.
//!
//! Everything here is a programmer error surfaced synchronously at the
//! call site. A dispatch-time miss is routine control flow and surfaces as
//! [`RouteOutcome::NotFound`](crate::RouteOutcome::NotFound), never as an
//! error.

use thiserror::Error;

/// Result type alias for resource operations.
pub type Result<T, E = ResourceError> = std::result::Result<T, E>;

/// Errors raised while building a resource or registering routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// Construction without a mount root.
    #[error("root is required")]
    MissingRoot,

    /// A declared version literal does not coerce to a semantic version.
    #[error("invalid version {0}")]
    InvalidVersion(String),

    /// Two declared literals coerce to the same semantic version, so the
    /// fallback order between them would be undefined.
    #[error("ambiguous versions {0} and {1}")]
    AmbiguousVersion(String, String),

    /// A registration call referenced an undeclared version.
    #[error("unknown version {version}, expected one of {expected}")]
    UnknownVersion {
        /// The version the caller asked for
        version: String,
        /// Declared versions, descending, comma-joined
        expected: String,
    },
}
