//! Input checks applied before any request is built

use crate::error::{SterlingError, SterlingResult};
use regex::Regex;
use std::sync::LazyLock;

/// Word characters, whitespace and hyphen
static SEARCH_FILTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w\s-]+$").unwrap());

/// Characters that would change the meaning of a URL path segment
const PATH_BREAKING: &[char] = &['/', '\\', '?', '#', '%'];

/// Validate a trading partner search filter and wrap it in wildcard markers.
///
/// The filter ends up inside the remote `searchFor` parameter whose parsing
/// we do not control, so only `[\w\s-]` is accepted and control characters
/// are refused even though `\s` would admit some of them. A filter made of
/// spaces alone is refused as well.
pub fn validate_search_filter(filter: &str) -> SterlingResult<String> {
    if filter.trim().is_empty()
        || filter.chars().any(char::is_control)
        || !SEARCH_FILTER.is_match(filter)
    {
        return Err(SterlingError::InvalidSearchFilter(filter.to_string()));
    }
    Ok(format!("%{}%", filter))
}

/// Validate an identifier that will become a single URL path segment
pub fn validate_partner_id(id: &str) -> SterlingResult<&str> {
    let invalid = id.trim().is_empty()
        || id == "."
        || id == ".."
        || id.contains(PATH_BREAKING)
        || id.chars().any(char::is_control);

    if invalid {
        return Err(SterlingError::InvalidPartnerId(id.to_string()));
    }
    Ok(id)
}
