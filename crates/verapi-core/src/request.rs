//! Request type handed through handler chains.

use bytes::Bytes;
use http::{Extensions, HeaderMap, Method, Uri};
use std::collections::HashMap;

/// HTTP request as seen by resource handlers.
///
/// The host server loop builds one per inbound request and hands it to the
/// resource's dispatch entry point; dispatch fills in captured path
/// parameters before the handler chain runs. The body can be taken exactly
/// once.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Bytes>,
    params: HashMap<String, String>,
    extensions: Extensions,
}

impl Request {
    /// Build a request for dispatch.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: None,
            params: HashMap::new(),
            extensions: Extensions::new(),
        }
    }

    /// Attach a payload body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Get the request path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the query string.
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get mutable headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Take the body bytes (can only be taken once).
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }

    /// Path parameters captured by the matched route pattern.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Get a specific captured path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    /// Get request extensions.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Get mutable extensions.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;

    #[test]
    fn body_can_be_taken_once() {
        let mut req = Request::new(Method::POST, Uri::from_static("/1.0/entities"))
            .with_body("{\"name\":\"a\"}");

        assert_eq!(req.take_body(), Some(Bytes::from("{\"name\":\"a\"}")));
        assert_eq!(req.take_body(), None);
    }

    #[test]
    fn path_and_query() {
        let req = Request::new(Method::GET, Uri::from_static("/1.0/entities?limit=5"));

        assert_eq!(req.path(), "/1.0/entities");
        assert_eq!(req.query_string(), Some("limit=5"));
    }

    #[test]
    fn extensions_carry_values_through_the_chain() {
        #[derive(Debug, PartialEq, Clone)]
        struct Tag(&'static str);

        let mut req = Request::new(Method::GET, Uri::from_static("/"));
        req.extensions_mut().insert(Tag("seen"));

        assert_eq!(req.extensions().get::<Tag>(), Some(&Tag("seen")));
    }
}
