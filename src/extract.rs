use crate::error::ExtractError;
use crate::params::params_from_url;
use crate::parse::{ParseOptions, ParsedBody, parse_body};
use crate::request::CanonicalRequest;
use std::collections::HashMap;

/// Combined result of parameter extraction and body parsing.
#[derive(Debug, PartialEq)]
pub struct BodyData {
    pub params: HashMap<String, String>,
    pub body: ParsedBody,
}

/// Extracts query parameters and the parsed body in one call.
///
/// The request is normalized once and both extractors run against it. The
/// two halves keep their own error policies: a malformed url propagates,
/// while body-parsing failures are contained by [`parse_body`] and show up
/// as [`ParsedBody::Empty`].
pub async fn extract_all(
    req: impl Into<CanonicalRequest>,
    options: ParseOptions,
) -> Result<BodyData, ExtractError> {
    let req = req.into();
    let params = params_from_url(req.url())?;
    let body = parse_body(req, options).await;
    Ok(BodyData { params, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::LegacyRequest;
    use http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn returns_params_and_body_together() {
        let req = LegacyRequest::new(Method::POST, "/submit?tag=a&tag=b")
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#);

        let data = extract_all(req, ParseOptions::default()).await.unwrap();
        assert_eq!(data.params["tag"], "b");
        assert_eq!(data.body, ParsedBody::Json(json!({"ok": true})));
    }

    #[tokio::test]
    async fn malformed_url_propagates() {
        let req = LegacyRequest::new(Method::POST, "http://exa mple.com/?a=1").with_body("a=1");
        let err = extract_all(req, ParseOptions::default()).await.unwrap_err();
        assert!(matches!(err, ExtractError::MalformedUrl { .. }));
    }

    #[tokio::test]
    async fn body_failure_is_contained_but_params_survive() {
        let req = LegacyRequest::new(Method::POST, "/submit?a=1")
            .with_header("content-type", "application/json")
            .with_body("{not json");

        let data = extract_all(req, ParseOptions::default()).await.unwrap();
        assert_eq!(data.params["a"], "1");
        assert_eq!(data.body, ParsedBody::Empty);
    }

    #[tokio::test]
    async fn fresh_equivalent_requests_extract_identically() {
        let make = || {
            LegacyRequest::new(Method::POST, "/x?k=v")
                .with_header("content-type", "application/x-www-form-urlencoded")
                .with_body("a=1")
        };

        let first = extract_all(make(), ParseOptions::default()).await.unwrap();
        let second = extract_all(make(), ParseOptions::default()).await.unwrap();
        assert_eq!(first, second);
    }
}
