use crate::error::ExtractError;
use crate::request::CanonicalRequest;
use http::Uri;
use std::collections::HashMap;

/// Extracts the url query string of a request as a flat key-value map.
///
/// Duplicate keys collapse to the last value seen. Unlike body parsing, this
/// fails loud: an unparseable url is an [`ExtractError::MalformedUrl`].
pub fn extract_params(req: impl Into<CanonicalRequest>) -> Result<HashMap<String, String>, ExtractError> {
    let req = req.into();
    params_from_url(req.url())
}

pub(crate) fn params_from_url(url: &str) -> Result<HashMap<String, String>, ExtractError> {
    let uri = url.parse::<Uri>().map_err(|e| ExtractError::malformed_url(url, e))?;
    let Some(query) = uri.query() else {
        return Ok(HashMap::new());
    };

    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).map_err(|e| ExtractError::malformed_url(url, e))?;
    // folding in parse order collapses duplicate keys to the last value
    Ok(pairs.into_iter().collect())
}
