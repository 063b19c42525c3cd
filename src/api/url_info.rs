//! URL info endpoint
//!
//! `GET /urlinfo/{request_id}/{hostname_and_port}/{original_path}[?scheme=..]`
//!
//! Path segments are read from the raw request URI: only `original_path` is
//! percent-decoded, so an encoded slash stays inside the path instead of
//! splitting the route, and the request id is echoed exactly as sent.

use axum::{
    extract::{RawQuery, State},
    http::{StatusCode, Uri},
    response::Response,
};
use tracing::debug;

use super::state::AppState;
use super::types::{json_line, to_json_line, UrlInfoError, UrlInfoResponse};
use crate::domain::reputation::percent_decode;
use crate::domain::{UrlError, UrlKey};

pub const URL_INFO_ROUTE: &str = "/urlinfo/{request_id}/{hostname_and_port}/{original_path}";

const URL_INFO_PREFIX: &str = "/urlinfo/";

const SCHEME_PARAM: &str = "scheme";

/// Reconstructs the caller's URL and reports its reputation
pub async fn get_url_info(
    State(state): State<AppState>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Result<Response, UrlInfoError> {
    let (request_id, host, original_path) = raw_segments(uri.path())?;

    let path = percent_decode(original_path, false)?;
    let scheme = parse_scheme(query.as_deref())?;
    let key = UrlKey::from_parts(scheme.as_deref(), host, &path)?;

    let record = state.reputation_service.lookup(&key).await;
    debug!(
        request_id = %request_id,
        url = %key,
        risk = %record.risk,
        category = %record.category,
        "Resolved URL reputation"
    );

    let body = to_json_line(&UrlInfoResponse::new(request_id, record))
        .map_err(|e| UrlInfoError::Serialization(e.to_string()))?;

    Ok(json_line(StatusCode::OK, body))
}

/// Splits `/urlinfo/{request_id}/{hostname_and_port}/{original_path}` into
/// its still-encoded segments
fn raw_segments(path: &str) -> Result<(&str, &str, &str), UrlInfoError> {
    let mut segments = path
        .strip_prefix(URL_INFO_PREFIX)
        .map(|rest| rest.splitn(3, '/'))
        .ok_or_else(missing_segments)?;

    match (segments.next(), segments.next(), segments.next()) {
        (Some(request_id), Some(host), Some(original_path)) => {
            Ok((request_id, host, original_path))
        }
        _ => Err(missing_segments()),
    }
}

fn missing_segments() -> UrlInfoError {
    UrlInfoError::Decode("missing URL info path segments".to_string())
}

/// Extracts the first `scheme` value from a raw query string.
///
/// Every pair is form-decoded, so a malformed escape anywhere in the query
/// fails the request even when it is not the scheme.
fn parse_scheme(raw_query: Option<&str>) -> Result<Option<String>, UrlInfoError> {
    let Some(query) = raw_query else {
        return Ok(None);
    };

    let mut scheme = None;

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        if pair.contains(';') {
            return Err(UrlInfoError::QueryParse(
                "invalid semicolon separator in query".to_string(),
            ));
        }

        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = percent_decode(key, true).map_err(query_error)?;
        let value = percent_decode(value, true).map_err(query_error)?;

        if key == SCHEME_PARAM && scheme.is_none() {
            scheme = Some(value);
        }
    }

    Ok(scheme)
}

fn query_error(err: UrlError) -> UrlInfoError {
    UrlInfoError::QueryParse(err.to_string())
}
