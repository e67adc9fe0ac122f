//! Per-version ordered route tables.
//!
//! Each declared version owns one [`RouteTable`]. Registrations are
//! append-only and matched in insertion order: the first entry whose
//! method and pattern fit the request wins, and a miss is simply `None`.

use crate::handler::HandlerChain;
use http::Method;
use std::collections::HashMap;

/// Path-matching flags, fixed at resource construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Compare literal segments case-sensitively.
    pub case_sensitive: bool,
    /// Treat a trailing slash as significant.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path pattern.
///
/// Patterns are small by construction: `""` (or `"/"`) for the collection,
/// `"/{name}"` capturing an identifier segment, `"/literal"` for a named
/// action. Multi-segment patterns compose from the same two segment kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. `{name}` segments capture, everything else is
    /// matched literally.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(s.to_string()),
                }
            })
            .collect();

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a path, capturing parameter segments.
    pub fn match_path(
        &self,
        path: &str,
        options: MatchOptions,
    ) -> Option<HashMap<String, String>> {
        if options.strict && has_trailing_slash(&self.raw) != has_trailing_slash(path) {
            return None;
        }

        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) => {
                    let hit = if options.case_sensitive {
                        literal == part
                    } else {
                        literal.eq_ignore_ascii_case(part)
                    };
                    if !hit {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }

        Some(params)
    }
}

fn has_trailing_slash(path: &str) -> bool {
    path.len() > 1 && path.ends_with('/')
}

/// One registered (method, pattern, handler chain) entry.
pub struct Route {
    method: Method,
    pattern: PathPattern,
    chain: HandlerChain,
}

impl Route {
    /// The HTTP method this route answers.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The registered path pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub(crate) fn chain(&self) -> HandlerChain {
        self.chain.clone()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Successful structural match within one table.
pub(crate) struct TableMatch {
    pub(crate) chain: HandlerChain,
    pub(crate) params: HashMap<String, String>,
}

/// Ordered route registrations scoped to a single declared version.
///
/// Registration is expected to finish before dispatch begins; the table
/// does not guard against interleaving.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub(crate) fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a registration. Duplicate method + pattern pairs are legal;
    /// the earlier one shadows the later at dispatch.
    pub(crate) fn register(&mut self, method: Method, pattern: &str, chain: HandlerChain) {
        self.routes.push(Route {
            method,
            pattern: PathPattern::parse(pattern),
            chain,
        });
    }

    /// First structural match in insertion order, if any.
    pub(crate) fn find(
        &self,
        method: &Method,
        path: &str,
        options: MatchOptions,
    ) -> Option<TableMatch> {
        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route.pattern.match_path(path, options).map(|params| TableMatch {
                chain: route.chain(),
                params,
            })
        })
    }

    /// The registered routes, in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{IntoHandlerChain, Next};
    use crate::request::Request;
    use std::sync::Arc;

    fn chain(tag: &'static str) -> HandlerChain {
        (move |_req: Request, _next: Next| async move { tag }).into_chain()
    }

    fn options() -> MatchOptions {
        MatchOptions::default()
    }

    #[test]
    fn collection_pattern_matches_empty_remainder() {
        let pattern = PathPattern::parse("");

        assert!(pattern.match_path("", options()).is_some());
        assert!(pattern.match_path("/", options()).is_some());
        assert!(pattern.match_path("/5", options()).is_none());
    }

    #[test]
    fn param_pattern_captures() {
        let pattern = PathPattern::parse("/{_id}");

        let params = pattern.match_path("/42", options()).unwrap();
        assert_eq!(params.get("_id"), Some(&"42".to_string()));

        assert!(pattern.match_path("", options()).is_none());
        assert!(pattern.match_path("/42/extra", options()).is_none());
    }

    #[test]
    fn literal_pattern_is_case_insensitive_by_default() {
        let pattern = PathPattern::parse("/activate");

        assert!(pattern.match_path("/ACTIVATE", options()).is_some());
        assert!(pattern
            .match_path(
                "/ACTIVATE",
                MatchOptions {
                    case_sensitive: true,
                    ..options()
                }
            )
            .is_none());
    }

    #[test]
    fn strict_mode_distinguishes_trailing_slash() {
        let pattern = PathPattern::parse("/activate");
        let strict = MatchOptions {
            strict: true,
            ..options()
        };

        assert!(pattern.match_path("/activate", strict).is_some());
        assert!(pattern.match_path("/activate/", strict).is_none());
        // Non-strict collapses the difference.
        assert!(pattern.match_path("/activate/", options()).is_some());
    }

    #[test]
    fn first_registration_wins() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "", chain("first"));
        table.register(Method::GET, "", chain("second"));

        let found = table.find(&Method::GET, "", options()).unwrap();
        // Chains are Arc-shared: pointer identity tells the entries apart.
        assert!(Arc::ptr_eq(
            &found.chain[0],
            &table.routes()[0].chain()[0]
        ));
    }

    #[test]
    fn method_must_match() {
        let mut table = RouteTable::new();
        table.register(Method::POST, "", chain("create"));

        assert!(table.find(&Method::GET, "", options()).is_none());
        assert!(table.find(&Method::POST, "", options()).is_some());
    }

    #[test]
    fn miss_is_none_not_error() {
        let table = RouteTable::new();
        assert!(table.find(&Method::GET, "/anything", options()).is_none());
    }
}
