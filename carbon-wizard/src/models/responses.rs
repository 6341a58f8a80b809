// Response bodies returned by the results server

use serde::{Deserialize, Serialize};

/// Reply to `POST /results`. Every member is optional; a present `redirect` means
/// "navigate there".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultsResponse {
    /// The redirect target, ignoring blank strings.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// The server's error text, ignoring blank strings.
    pub fn server_error(&self) -> Option<&str> {
        self.error.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_reply_with_redirect() {
        let r: ResultsResponse =
            serde_json::from_str(r#"{"success": true, "redirect": "/results"}"#).unwrap();
        assert_eq!(r.success, Some(true));
        assert_eq!(r.redirect_target(), Some("/results"));
    }

    #[test]
    fn missing_or_blank_redirect_is_none() {
        let r: ResultsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(r.redirect_target(), None);

        let r: ResultsResponse = serde_json::from_str(r#"{"redirect": "  "}"#).unwrap();
        assert_eq!(r.redirect_target(), None);
    }

    #[test]
    fn server_error_ignores_blank_text() {
        let r: ResultsResponse =
            serde_json::from_str(r#"{"success": false, "error": "quota exceeded"}"#).unwrap();
        assert_eq!(r.server_error(), Some("quota exceeded"));
        assert_eq!(r.success, Some(false));

        let r: ResultsResponse = serde_json::from_str(r#"{"error": " "}"#).unwrap();
        assert_eq!(r.server_error(), None);
    }

    #[test]
    fn unknown_members_are_ignored() {
        let r: ResultsResponse =
            serde_json::from_str(r#"{"redirect": "/summary", "extra": [1, 2]}"#).unwrap();
        assert_eq!(r.redirect_target(), Some("/summary"));
    }
}
