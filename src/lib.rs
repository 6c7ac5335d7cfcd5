//! Uniform extraction of query parameters and parsed bodies from
//! heterogeneous HTTP request representations.
//!
//! Two request shapes are accepted: a standard [`http::Request`] and the
//! legacy streaming [`LegacyRequest`]. Both normalize into one
//! [`CanonicalRequest`], from which [`extract_params`] reads the url query
//! string and [`parse_body`] drains and decodes the body, dispatching on the
//! effective content type. [`extract_all`] combines the two.
//!
//! The two halves fail differently on purpose: parameter extraction fails
//! loud with [`ExtractError`], while body parsing contains every failure and
//! degrades to [`ParsedBody::Empty`], optionally observed through
//! [`ParseOptions::on_error`].
//!
//! ```
//! use http::Method;
//! use reqdata::{LegacyRequest, ParseOptions, ParsedBody, extract_all};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let req = LegacyRequest::new(Method::POST, "/submit?tag=a")
//!     .with_header("content-type", "application/json")
//!     .with_body(r#"{"ok":true}"#);
//!
//! let data = extract_all(req, ParseOptions::default()).await.unwrap();
//! assert_eq!(data.params["tag"], "a");
//! assert!(matches!(data.body, ParsedBody::Json(_)));
//! # }
//! ```

mod body;
mod error;
mod extract;
mod params;
mod parse;
mod request;

pub use body::{BodyStream, BoxError};
pub use error::{BodyError, ExtractError};
pub use extract::{BodyData, extract_all};
pub use params::extract_params;
pub use parse::{ErrorHook, ParseOptions, ParsedBody, parse_body};
pub use request::{CanonicalRequest, LegacyRequest, RequestSource};
