//! Pagination resolution for the Cvent response envelope
//!
//! The API exposes two inconsistent pagination idioms: a link-based one
//! (`paging._links.next.href` carrying a `token=` query parameter) and a
//! counter-based one (`paging.currentToken` + `paging.totalCount`). The
//! resolver tolerates both and degrades to "no more pages" on anything
//! malformed — an extraction job must terminate, never hang or abort on a
//! bad final page.

use serde_json::Value;
use tracing::{debug, warn};

/// Decide the token for the next page, or `None` if the stream is done
///
/// Pure function of the raw response body and the previous cursor. A body
/// that is not valid JSON is treated as the last page rather than an error.
pub fn next_page_token(body: &str, previous_token: Option<&str>) -> Option<String> {
    let data: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse response as JSON: {e}");
            return None;
        }
    };
    next_page_token_from_value(&data, previous_token)
}

/// Same as [`next_page_token`], for an already-parsed body
pub fn next_page_token_from_value(data: &Value, _previous_token: Option<&str>) -> Option<String> {
    let Some(paging) = data.get("paging") else {
        debug!("No paging information in response");
        return None;
    };

    // Link-based idiom wins when both are present
    if let Some(href) = paging
        .get("_links")
        .and_then(|links| links.get("next"))
        .and_then(|next| next.get("href"))
        .and_then(Value::as_str)
    {
        return match extract_token_param(href) {
            Some(token) => Some(token),
            None => {
                warn!("Next link found but no token parameter: {href}");
                None
            }
        };
    }

    // Counter-based fallback: compare this page's record count against the
    // reported total
    if let Some(current_token) = paging.get("currentToken").and_then(Value::as_str) {
        let total_count = paging
            .get("totalCount")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let current_count = data
            .get("data")
            .and_then(Value::as_array)
            .map_or(0, Vec::len) as u64;

        if current_count >= total_count {
            debug!("Reached end of data: {current_count}/{total_count}");
            return None;
        }
        return Some(current_token.to_string());
    }

    debug!("No pagination token found");
    None
}

/// Extract the value of the `token` query parameter from an href
fn extract_token_param(href: &str) -> Option<String> {
    let (_, after) = href.rsplit_once("token=")?;
    let token = after.split('&').next().unwrap_or(after);
    Some(token.to_string())
}

#[cfg(test)]
mod tests;
