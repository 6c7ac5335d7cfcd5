//! Request normalization.
//!
//! Two request shapes are accepted at the boundary:
//! - a standard immutable [`http::Request`] carrying a [`BodyStream`], and
//! - a [`LegacyRequest`], the streaming shape whose url may be a bare path
//!   and whose headers are a plain string map.
//!
//! Both convert into one [`CanonicalRequest`], the only representation the
//! extraction logic operates on. Normalization never fails: malformed urls
//! are kept verbatim and surface later in
//! [`extract_params`](crate::extract_params).

use crate::body::BodyStream;
use http::header::{AsHeaderName, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request};
use std::collections::HashMap;

/// Scheme and host prepended to legacy urls that only carry a path.
const DEFAULT_ORIGIN: &str = "http://localhost";

/// The legacy streaming request shape.
#[derive(Debug)]
pub struct LegacyRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: BodyStream,
}

impl LegacyRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: HashMap::new(), body: BodyStream::empty() }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<BodyStream>) -> Self {
        self.body = body.into();
        self
    }
}

/// The closed set of request shapes this crate accepts.
#[derive(Debug)]
pub enum RequestSource {
    Standard(Request<BodyStream>),
    Legacy(LegacyRequest),
}

impl From<Request<BodyStream>> for RequestSource {
    fn from(req: Request<BodyStream>) -> Self {
        Self::Standard(req)
    }
}

impl From<LegacyRequest> for RequestSource {
    fn from(req: LegacyRequest) -> Self {
        Self::Legacy(req)
    }
}

/// The normalized request all extraction logic operates on.
///
/// Exactly one canonical form exists per input request. The url is kept as a
/// string: it is guaranteed absolute for legacy inputs, but not guaranteed
/// parseable — that check belongs to the parameter extractor.
#[derive(Debug)]
pub struct CanonicalRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<BodyStream>,
}

impl CanonicalRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header value as a string, `None` if absent or not valid text.
    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Consumes the request and returns its body stream, if any.
    pub fn into_body(self) -> Option<BodyStream> {
        self.body
    }
}

/// Standard requests are taken apart as-is: no url completion, no body policy.
impl From<Request<BodyStream>> for CanonicalRequest {
    fn from(req: Request<BodyStream>) -> Self {
        let (parts, body) = req.into_parts();
        Self { method: parts.method, url: parts.uri.to_string(), headers: parts.headers, body: Some(body) }
    }
}

impl From<LegacyRequest> for CanonicalRequest {
    fn from(legacy: LegacyRequest) -> Self {
        let url = if legacy.url.starts_with("http") {
            legacy.url
        } else {
            format!("{DEFAULT_ORIGIN}{}", legacy.url)
        };

        // GET and HEAD never carry a body on the wire; the match is exact,
        // extension methods like `get` keep theirs.
        let body = if legacy.method == Method::GET || legacy.method == Method::HEAD {
            None
        } else {
            Some(legacy.body)
        };

        let mut headers = HeaderMap::with_capacity(legacy.headers.len());
        for (name, value) in legacy.headers {
            let Ok(name) = HeaderName::try_from(name.as_str()) else { continue };
            let Ok(value) = HeaderValue::try_from(value) else { continue };
            // last value wins on duplicate names
            headers.insert(name, value);
        }

        Self { method: legacy.method, url, headers, body }
    }
}

impl From<RequestSource> for CanonicalRequest {
    fn from(source: RequestSource) -> Self {
        match source {
            RequestSource::Standard(req) => req.into(),
            RequestSource::Legacy(req) => req.into(),
        }
    }
}
