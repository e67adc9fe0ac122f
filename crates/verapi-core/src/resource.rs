//! The public resource facade.
//!
//! A [`Resource`] exposes one logical collection under several declared
//! version surfaces at once. Registrations land on exactly one version's
//! table; the cascade makes older registrations serve newer surfaces until
//! a newer registration overrides them.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut entities = Resource::builder("entities")
//!     .versions(["1.0", "1.1", "2.0"])
//!     .rule("name", FieldRule::string().required())
//!     .build()?;
//!
//! entities.get("1.0", |_req: Request, _next: Next| async move { "v1 list" })?;
//! entities.get("2.0", |_req: Request, _next: Next| async move { "v2 list" })?;
//!
//! // GET /1.1/entities is served by the 1.0 handler,
//! // GET /2.0/entities by its own.
//! ```

use crate::cascade::{CascadeRouter, Resolution};
use crate::error::{ResourceError, Result};
use crate::handler::{Handler, HandlerFuture, IntoHandlerChain, Next};
use crate::request::Request;
use crate::route::{MatchOptions, RouteTable};
use crate::version::VersionSet;
use http::Method;
use verapi_validate::{derive_rules, FieldRule, OperationKind, RuleSet};

/// Builder for [`Resource`].
///
/// Only the root is mandatory; everything else has the conventional
/// defaults (single `1.0` version, case-insensitive non-strict matching,
/// `_id` integer identifier, no field rules).
pub struct ResourceBuilder {
    root: String,
    versions: Vec<String>,
    case_sensitive: bool,
    strict: bool,
    rules: RuleSet,
    id_attribute_name: String,
    id_attribute_schema: FieldRule,
}

impl ResourceBuilder {
    fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            versions: vec!["1.0".to_string()],
            case_sensitive: false,
            strict: false,
            rules: RuleSet::new(),
            id_attribute_name: "_id".to_string(),
            id_attribute_schema: FieldRule::integer(),
        }
    }

    /// Declare the version surfaces. Replaces the default `["1.0"]`.
    pub fn versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions = versions.into_iter().map(Into::into).collect();
        self
    }

    /// Match literal path segments case-sensitively.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Treat trailing slashes as significant when matching.
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Declare one payload field rule.
    pub fn rule(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// Replace the whole declared rule set.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Configure the identifier attribute and its rule.
    pub fn id_attribute(mut self, name: impl Into<String>, schema: FieldRule) -> Self {
        self.id_attribute_name = name.into();
        self.id_attribute_schema = schema;
        self
    }

    /// Build the resource: normalize the root, coerce and order the
    /// declared versions, and wire the cascade.
    pub fn build(self) -> Result<Resource> {
        if self.root.is_empty() {
            return Err(ResourceError::MissingRoot);
        }
        let root = if self.root.starts_with('/') {
            self.root
        } else {
            format!("/{}", self.root)
        };

        let versions = VersionSet::new(self.versions)?;
        let options = MatchOptions {
            case_sensitive: self.case_sensitive,
            strict: self.strict,
        };
        let tables = (0..versions.len()).map(|_| RouteTable::new()).collect();
        let cascade = CascadeRouter::new(&versions, &root, options);

        Ok(Resource {
            root,
            versions,
            tables,
            cascade,
            rules: self.rules,
            id_attribute_name: self.id_attribute_name,
            id_attribute_schema: self.id_attribute_schema,
        })
    }
}

/// Outcome of dispatching one request.
pub enum RouteOutcome {
    /// A route matched somewhere in the applicable fallback chain; the
    /// future resolves to the chain's response.
    Handled(HandlerFuture),
    /// No route matched. The request is handed back so an outer layer can
    /// continue with its own not-found handling.
    NotFound(Request),
}

/// One registered endpoint, flattened for tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Declared version literal
    pub version: String,
    /// HTTP method
    pub method: Method,
    /// Full mount pattern, `/{version}{root}{pattern}`
    pub path: String,
}

/// A logical resource exposing several version surfaces simultaneously.
///
/// Registration methods take `&mut self` and dispatch takes `&self`:
/// finish registering before the resource starts serving. The mount
/// topology itself is fixed at construction.
#[derive(Debug)]
pub struct Resource {
    root: String,
    versions: VersionSet,
    // Aligned with `versions` (descending order).
    tables: Vec<RouteTable>,
    cascade: CascadeRouter,
    rules: RuleSet,
    id_attribute_name: String,
    id_attribute_schema: FieldRule,
}

impl Resource {
    /// Start building a resource mounted at `root`.
    pub fn builder(root: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(root)
    }

    /// Build a resource with default options.
    pub fn new(root: impl Into<String>) -> Result<Self> {
        Self::builder(root).build()
    }

    /// The normalized mount root (always starts with `/`).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Declared version literals, descending.
    pub fn versions(&self) -> Vec<&str> {
        self.versions.entries().iter().map(|e| e.literal()).collect()
    }

    /// The route table of one declared version.
    pub fn table(&self, version: &str) -> Option<&RouteTable> {
        self.versions.index_of(version).map(|i| &self.tables[i])
    }

    /// All (version literal, table) pairs, descending by version.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &RouteTable)> {
        self.versions
            .entries()
            .iter()
            .map(|e| e.literal())
            .zip(self.tables.iter())
    }

    /// The declared field rules.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The identifier attribute name.
    pub fn id_attribute_name(&self) -> &str {
        &self.id_attribute_name
    }

    /// The identifier attribute rule.
    pub fn id_attribute_schema(&self) -> &FieldRule {
        &self.id_attribute_schema
    }

    /// Effective rule set for one operation kind.
    ///
    /// Delegates to [`verapi_validate::derive_rules`] with this resource's
    /// declared rules and identifier attribute.
    pub fn derive_rules(&self, kind: OperationKind) -> RuleSet {
        derive_rules(
            &self.rules,
            kind,
            &self.id_attribute_name,
            &self.id_attribute_schema,
        )
    }

    /// Every registered endpoint with its full mount pattern, grouped by
    /// version descending, insertion order within a version.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();
        for (entry, table) in self.versions.entries().iter().zip(&self.tables) {
            for route in table.routes() {
                endpoints.push(Endpoint {
                    version: entry.literal().to_string(),
                    method: route.method().clone(),
                    path: format!("/{}{}{}", entry.literal(), self.root, route.pattern()),
                });
            }
        }
        endpoints
    }

    /// Validate a version argument against the declared set.
    ///
    /// Fails with [`ResourceError::UnknownVersion`] naming the offending
    /// version and listing the declared set, descending.
    pub fn check_version(&self, version: &str) -> Result<()> {
        self.version_index(version).map(|_| ())
    }

    fn version_index(&self, version: &str) -> Result<usize> {
        self.versions
            .index_of(version)
            .ok_or_else(|| ResourceError::UnknownVersion {
                version: version.to_string(),
                expected: self.versions.join(", "),
            })
    }

    fn id_pattern(&self) -> String {
        format!("/{{{}}}", self.id_attribute_name)
    }

    fn register<M>(
        &mut self,
        version: &str,
        method: Method,
        pattern: &str,
        handlers: impl IntoHandlerChain<M>,
    ) -> Result<()> {
        let index = self.version_index(version)?;
        self.tables[index].register(method, pattern, handlers.into_chain());
        Ok(())
    }

    /// Register a POST handler chain on the collection of one version.
    pub fn create<M>(&mut self, version: &str, handlers: impl IntoHandlerChain<M>) -> Result<()> {
        self.register(version, Method::POST, "", handlers)
    }

    /// Register a PATCH handler chain on `/{id}` of one version
    /// (partial update).
    pub fn patch<M>(&mut self, version: &str, handlers: impl IntoHandlerChain<M>) -> Result<()> {
        let pattern = self.id_pattern();
        self.register(version, Method::PATCH, &pattern, handlers)
    }

    /// Register a DELETE handler chain on `/{id}` of one version.
    pub fn remove<M>(&mut self, version: &str, handlers: impl IntoHandlerChain<M>) -> Result<()> {
        let pattern = self.id_pattern();
        self.register(version, Method::DELETE, &pattern, handlers)
    }

    /// Register a GET handler chain on `/{id}` of one version.
    pub fn get_one<M>(&mut self, version: &str, handlers: impl IntoHandlerChain<M>) -> Result<()> {
        let pattern = self.id_pattern();
        self.register(version, Method::GET, &pattern, handlers)
    }

    /// Register a GET handler chain on the collection of one version.
    pub fn get<M>(&mut self, version: &str, handlers: impl IntoHandlerChain<M>) -> Result<()> {
        self.register(version, Method::GET, "", handlers)
    }

    /// Register a named custom action: a PUT handler chain on `/{name}`
    /// of one version.
    pub fn action<M>(
        &mut self,
        name: &str,
        version: &str,
        handlers: impl IntoHandlerChain<M>,
    ) -> Result<()> {
        let pattern = format!("/{name}");
        self.register(version, Method::PUT, &pattern, handlers)
    }

    /// Dispatch a request through the cascaded route tables.
    ///
    /// On a match the captured path parameters are stored on the request
    /// and the route's handler chain starts running. A miss hands the
    /// request back untouched.
    pub fn dispatch(&self, mut req: Request) -> RouteOutcome {
        match self.cascade.resolve(&self.tables, req.method(), req.path()) {
            Resolution::Matched(matched) => {
                req.set_params(matched.params);
                RouteOutcome::Handled(Next::new(matched.chain).run(req))
            }
            Resolution::NoRoute | Resolution::NoVersion => RouteOutcome::NotFound(req),
        }
    }
}

// A resource is itself a handler, so it nests under an outer routing layer:
// misses continue through the outer chain instead of answering 404 here.
impl Handler for Resource {
    fn call(&self, req: Request, next: Next) -> HandlerFuture {
        match self.dispatch(req) {
            RouteOutcome::Handled(future) => future,
            RouteOutcome::NotFound(req) => next.run(req),
        }
    }
}
