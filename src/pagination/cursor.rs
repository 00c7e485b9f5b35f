//! Next-page cursor extraction
//!
//! The listing API advertises the next page in a `Link` header such as
//! `<https://host/api/v1/datatransport?dataTarget=parts&after=abc>; rel="next"`.
//! Only the `after=` token matters; the rest of the header is ignored.

use crate::types::Cursor;
use regex::Regex;
use reqwest::header::{HeaderMap, LINK};
use std::sync::LazyLock;

static AFTER_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[?&;\s])after=([^&>;,\s]*)").expect("valid cursor pattern"));

/// Extract the `after=<token>` cursor from a `Link` header value
///
/// Returns `None` when the header carries no token, which marks the last page.
/// The token is opaque and returned exactly as matched.
pub fn extract_after_cursor(link: &str) -> Option<Cursor> {
    let token = AFTER_PARAM.captures(link)?.get(1)?.as_str();
    (!token.is_empty()).then(|| token.to_string())
}

/// Extract the next-page cursor from response headers
pub fn next_cursor(headers: &HeaderMap) -> Option<Cursor> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(extract_after_cursor)
}
