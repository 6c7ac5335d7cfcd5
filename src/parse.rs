//! Body parsing.
//!
//! [`parse_body`] drains the request body to memory, decodes it to text, and
//! dispatches to a decoder picked by the effective content type. It is total
//! with respect to failure: every internal error is contained, optionally
//! reported through [`ParseOptions::on_error`], and degrades the result to
//! [`ParsedBody::Empty`]. Callers that need to tell an empty body apart from
//! a malformed one must install the hook.

use crate::error::BodyError;
use bytes::Bytes;
use crate::request::CanonicalRequest;
use encoding_rs::Encoding;
use http::header;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

const DEFAULT_ENCODING: &str = "utf-8";

/// Observer invoked with every contained body-parsing failure.
pub type ErrorHook = Box<dyn Fn(&BodyError) + Send + Sync>;

/// Per-call options for [`parse_body`]. All fields are optional.
#[derive(Default)]
pub struct ParseOptions {
    /// Text-decoding charset label, `"utf-8"` when absent.
    pub encoding: Option<String>,
    /// Force raw-string passthrough, bypassing content-type dispatch.
    pub raw: bool,
    /// Explicit content-type override; beats the request header.
    pub content_type: Option<String>,
    /// Fallback content type, used only when no header and no override exist.
    pub back_content_type: Option<String>,
    /// Error observer; return value ignored.
    pub on_error: Option<ErrorHook>,
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("encoding", &self.encoding)
            .field("raw", &self.raw)
            .field("content_type", &self.content_type)
            .field("back_content_type", &self.back_content_type)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// A parsed request body, discriminated by the content type that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// Empty body, or any contained parsing failure.
    Empty,
    Json(serde_json::Value),
    Form(HashMap<String, String>),
    Text(String),
    /// Decoded but unparsed text: forced by [`ParseOptions::raw`], or the
    /// fallback for multipart and unrecognized content types.
    Raw(String),
}

impl ParsedBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Drains and parses the request body.
///
/// Always resolves; no error escapes this function. See the module docs for
/// the containment policy and [`ParsedBody`] for the dispatch table.
pub async fn parse_body(req: impl Into<CanonicalRequest>, options: ParseOptions) -> ParsedBody {
    let req = req.into();
    match try_parse(req, &options).await {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(error = %err, "body parsing failed, yielding empty body");
            if let Some(hook) = &options.on_error {
                hook(&err);
            }
            ParsedBody::Empty
        }
    }
}

async fn try_parse(req: CanonicalRequest, options: &ParseOptions) -> Result<ParsedBody, BodyError> {
    let header_type = req.header(header::CONTENT_TYPE).map(str::to_owned);

    let bytes = match req.into_body() {
        Some(body) => body.into_bytes().await.map_err(BodyError::read)?,
        None => Bytes::new(),
    };

    let label = options.encoding.as_deref().unwrap_or(DEFAULT_ENCODING);
    let text = decode(&bytes, label)?;

    if text.is_empty() {
        return Ok(ParsedBody::Empty);
    }
    if options.raw {
        return Ok(ParsedBody::Raw(text));
    }

    // first non-empty wins: explicit override, request header, fallback
    let content_type = [options.content_type.as_deref(), header_type.as_deref(), options.back_content_type.as_deref()]
        .into_iter()
        .flatten()
        .find(|ct| !ct.is_empty())
        .unwrap_or("");

    dispatch(content_type, text)
}

/// Decodes bytes by charset label, replacing invalid sequences rather than
/// failing on them. Only an unknown label is an error.
fn decode(bytes: &[u8], label: &str) -> Result<String, BodyError> {
    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| BodyError::decode(label))?;
    let (text, _, _) = encoding.decode(bytes);
    Ok(text.into_owned())
}

/// Picks a decoder by the leading type/subtype of the declared content type;
/// trailing parameters such as `; charset=utf-8` are ignored.
fn dispatch(content_type: &str, text: String) -> Result<ParsedBody, BodyError> {
    let essence = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

    if essence == mime::APPLICATION_JSON.essence_str() {
        trace!("parsing body as json");
        Ok(ParsedBody::Json(serde_json::from_str(&text)?))
    } else if essence == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() {
        trace!("parsing body as urlencoded form");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&text)?;
        // same duplicate policy as the query string: last value wins
        Ok(ParsedBody::Form(pairs.into_iter().collect()))
    } else if essence == mime::TEXT_PLAIN.essence_str() {
        Ok(ParsedBody::Text(text))
    } else {
        // multipart is deliberately left unparsed; so is anything unknown,
        // so no data is silently dropped
        trace!(content_type = %essence, "passing body through raw");
        Ok(ParsedBody::Raw(text))
    }
}
