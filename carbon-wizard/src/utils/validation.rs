// Input validation utilities

use anyhow::Result;
use regex::Regex;
use url::Url;

/// Parse a numeric answer the way the wizard accepts it: finite and not negative.
///
/// Surrounding whitespace is ignored. `NaN`, infinities and negative values are rejected.
pub fn parse_non_negative_number(value: &str) -> Option<f64> {
    let n = value.trim().parse::<f64>().ok()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n)
}

/// True when an answer counts as "not filled in".
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a form field name. Names become JSON keys in the `/results` payload, so only
/// simple identifiers (letters/numbers/underscore) are allowed.
pub fn validate_field_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow::anyhow!("Field name is required"));
    }

    let ident_re = Regex::new(r"^[A-Za-z0-9_]+$").map_err(|e| {
        anyhow::anyhow!("Internal error: failed to compile identifier regex: {}", e)
    })?;
    if !ident_re.is_match(name) {
        return Err(anyhow::anyhow!(
            "Field name contains invalid characters: '{}'",
            name
        ));
    }

    Ok(())
}

/// Validate the server base URL (scheme must be http or https).
pub fn validate_server_url(raw: &str) -> Result<Url> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Server URL cannot be empty"));
    }

    let url = Url::parse(s).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", s, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow::anyhow!(
            "Server URL must use http or https (got '{}')",
            other
        )),
    }
}

/// Validate the results endpoint path and normalize it to start with a single '/'.
pub fn validate_endpoint_path(path: &str) -> Result<String> {
    let p = path.trim();
    if p.is_empty() {
        return Err(anyhow::anyhow!("Results path cannot be empty"));
    }
    if p.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(anyhow::anyhow!("Results path contains invalid characters"));
    }
    if p.contains("://") {
        return Err(anyhow::anyhow!(
            "Results path must be a path, not an absolute URL"
        ));
    }

    Ok(format!("/{}", p.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_non_negative_number_accepts_plain_values() {
        assert_eq!(parse_non_negative_number("5"), Some(5.0));
        assert_eq!(parse_non_negative_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_non_negative_number("0"), Some(0.0));
    }

    #[test]
    fn parse_non_negative_number_rejects_negative_and_garbage() {
        assert_eq!(parse_non_negative_number("-5"), None);
        assert_eq!(parse_non_negative_number("abc"), None);
        assert_eq!(parse_non_negative_number(""), None);
        assert_eq!(parse_non_negative_number("NaN"), None);
        assert_eq!(parse_non_negative_number("inf"), None);
    }

    #[test]
    fn parse_non_negative_number_rejects_partial_numbers() {
        assert_eq!(parse_non_negative_number("12abc"), None);
        assert_eq!(parse_non_negative_number("3 km"), None);
        assert_eq!(parse_non_negative_number("Infinity"), None);
    }

    #[test]
    fn is_blank_treats_whitespace_as_empty() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn validate_field_name_rules() {
        assert!(validate_field_name("monthly_electricity").is_ok());
        assert!(validate_field_name("").is_err());
        assert!(validate_field_name("daily travel").is_err());
        assert!(validate_field_name("a\"b").is_err());
    }

    #[test]
    fn validate_server_url_requires_http_scheme() {
        assert!(validate_server_url("http://127.0.0.1:5000").is_ok());
        assert!(validate_server_url("https://example.org").is_ok());
        assert!(validate_server_url("ftp://example.org").is_err());
        assert!(validate_server_url("   ").is_err());
        assert!(validate_server_url("not a url").is_err());
    }

    #[test]
    fn validate_endpoint_path_normalizes_leading_slash() {
        assert_eq!(validate_endpoint_path("results").unwrap(), "/results");
        assert_eq!(validate_endpoint_path("//results").unwrap(), "/results");
        assert_eq!(validate_endpoint_path("/api/results").unwrap(), "/api/results");
        assert!(validate_endpoint_path("").is_err());
        assert!(validate_endpoint_path("/results?x=1").is_err());
        assert!(validate_endpoint_path("http://evil/results").is_err());
    }
}
