//! # VerAPI Core
//!
//! Routing composition for resources that expose several semantic-version
//! API surfaces at once. A handler registered for an older version keeps
//! serving newer versions until a newer registration overrides it — the
//! cascade makes APIs backward-compatible by default, override by
//! declaring a new handler.
//!
//! The crate owns no server: a host loop builds a [`Request`] per inbound
//! call and hands it to [`Resource::dispatch`] (or mounts the resource as
//! a [`Handler`] inside a larger chain). Version ordering, the fallback
//! topology, and the effective per-operation validation rules are all
//! fixed when the resource is built.
//!
//! ```rust,ignore
//! use verapi_core::{Next, Request, Resource};
//! use verapi_validate::FieldRule;
//!
//! let mut entities = Resource::builder("entities")
//!     .versions(["1.0", "1.1", "2.0"])
//!     .rule("name", FieldRule::string().required())
//!     .build()?;
//!
//! entities.get("1.0", |_req: Request, _next: Next| async move { "v1" })?;
//! entities.get("2.0", |_req: Request, _next: Next| async move { "v2" })?;
//!
//! // GET /1.0/entities -> "v1"
//! // GET /1.1/entities -> "v1"   (falls through to the 1.0 handler)
//! // GET /2.0/entities -> "v2"
//! ```

mod cascade;
mod error;
mod handler;
mod request;
mod resource;
mod response;
mod route;
mod version;

pub use error::{ResourceError, Result};
pub use handler::{Handler, HandlerChain, HandlerFuture, IntoHandlerChain, Next};
pub use request::Request;
pub use resource::{Endpoint, Resource, ResourceBuilder, RouteOutcome};
pub use response::{IntoResponse, Json, Response};
pub use route::{MatchOptions, PathPattern, Route, RouteTable};
pub use version::{ApiVersion, VersionEntry, VersionSet};

pub use verapi_validate as validate;
