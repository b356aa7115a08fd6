//! Value validation for settings and path parameters.

use regex::Regex;
use std::sync::LazyLock;

static RE_BASE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+(/[^\s?#]*)?$").unwrap());
static RE_LABEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap());

/// Validate the public base URL. Returns `Ok(())` if valid, or an error message.
pub fn validate_base_url(value: &str) -> Result<(), String> {
    if !RE_BASE_URL.is_match(value) {
        return Err("must be an absolute http(s) URL without query or fragment".into());
    }
    Ok(())
}

/// Label ids become a URL path segment unescaped, so only URL-safe ids pass.
pub fn validate_label_id(value: &str) -> Result<(), String> {
    if !RE_LABEL_ID.is_match(value) {
        return Err("label id must be 1-128 characters of [A-Za-z0-9_-]".into());
    }
    Ok(())
}

pub fn validate_port(value: &str) -> Result<u16, String> {
    let port: u16 = value.parse().map_err(|_| "must be an integer")?;
    if port == 0 {
        return Err("must be between 1 and 65535".into());
    }
    Ok(port)
}
