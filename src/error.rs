use crate::body::BoxError;
use thiserror::Error;

/// Fail-loud errors from parameter extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed url `{url}`: {reason}")]
    MalformedUrl { url: String, reason: String },
}

impl ExtractError {
    pub fn malformed_url<S: ToString>(url: &str, reason: S) -> Self {
        Self::MalformedUrl { url: url.to_string(), reason: reason.to_string() }
    }
}

/// Fail-soft errors from body parsing.
///
/// These never escape [`parse_body`](crate::parse_body); they are only
/// observable through the `on_error` hook of
/// [`ParseOptions`](crate::ParseOptions).
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body read failed: {source}")]
    Read { source: BoxError },

    #[error("unknown encoding label `{label}`")]
    Decode { label: String },

    #[error("invalid json body: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid form body: {source}")]
    Form {
        #[from]
        source: serde_urlencoded::de::Error,
    },
}

impl BodyError {
    pub fn read<E: Into<BoxError>>(e: E) -> Self {
        Self::Read { source: e.into() }
    }

    pub fn decode<S: ToString>(label: S) -> Self {
        Self::Decode { label: label.to_string() }
    }
}
