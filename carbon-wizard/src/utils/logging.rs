// Logging utilities
// Structured logging with JSON and human-readable formats

use log::Level;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

/// Mask a user-entered value before it is written to a log.
///
/// Short values are fully hidden; longer values keep their first and last two characters.
pub fn mask_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }

    let visible = 2;
    let start: String = chars[..visible].iter().collect();
    let end: String = chars[chars.len() - visible..].iter().collect();

    format!("{}...{}", start, end)
}

/// Render a submission payload for logs: field names stay visible, answers are masked.
pub fn mask_payload_for_log(payload: &BTreeMap<String, String>) -> String {
    let masked: BTreeMap<&str, String> = payload
        .iter()
        .map(|(k, v)| (k.as_str(), mask_sensitive(v)))
        .collect();
    serde_json::to_string(&masked).unwrap_or_else(|_| "{}".to_string())
}

/// Parse phase and step from log message
/// Extracts [PHASE: ...] and [STEP: ...] patterns
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let mut phase = None;
    let mut step = None;
    let mut cleaned_message = message.to_string();

    if let Some((value, rest)) = extract_tag(&cleaned_message, "[PHASE:") {
        phase = Some(value);
        cleaned_message = rest;
    }

    if let Some((value, rest)) = extract_tag(&cleaned_message, "[STEP:") {
        step = Some(value);
        cleaned_message = rest;
    }

    (phase, step, cleaned_message)
}

fn extract_tag(message: &str, marker: &str) -> Option<(String, String)> {
    let start = message.find(marker)?;
    let end = message[start..].find(']')?;
    let value = message[start + marker.len()..start + end].trim().to_string();
    let rest = format!("{} {}", &message[..start], &message[start + end + 1..])
        .trim()
        .to_string();
    Some((value, rest))
}

/// Structured details pulled out of a message: currently the `correlation_id=<id>` token.
pub fn extract_log_details(message: &str) -> Option<HashMap<String, serde_json::Value>> {
    let id = message
        .split_whitespace()
        .find_map(|token| token.strip_prefix("correlation_id="))
        .filter(|id| !id.is_empty() && *id != "none")?;
    let mut details = HashMap::new();
    details.insert("correlation_id".to_string(), json!(id));
    Some(details)
}

/// Format log entry as JSON for structured logging
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
    details: Option<&HashMap<String, serde_json::Value>>,
) -> String {
    let mut log_entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });

    if let Some(phase) = phase {
        log_entry["phase"] = json!(phase);
    }

    if let Some(step) = step {
        log_entry["step"] = json!(step);
    }

    if let Some(details) = details {
        log_entry["details"] = json!(details);
    }

    serde_json::to_string(&log_entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut log_line = format!("[{}] [{}]", timestamp, level.as_str());

    if let Some(phase) = phase {
        log_line.push_str(&format!(" [PHASE: {}]", phase));
    }

    if let Some(step) = step {
        log_line.push_str(&format!(" [STEP: {}]", step));
    }

    log_line.push_str(&format!(" [{}] {}", target, message));
    log_line
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Masking of user answers
    // -------------------------------------------------------------------------

    #[test]
    fn mask_sensitive_short_values_fully_masked() {
        assert_eq!(mask_sensitive(""), "***");
        assert_eq!(mask_sensitive("42"), "***");
        assert_eq!(mask_sensitive("Mumbai"), "***");
    }

    #[test]
    fn mask_sensitive_long_values_partially_masked() {
        let masked = mask_sensitive("Bengaluru North");
        assert_eq!(masked, "Be...th");
    }

    #[test]
    fn mask_sensitive_handles_multibyte_text() {
        // Must not split inside a UTF-8 sequence.
        let masked = mask_sensitive("₹₹₹₹₹₹₹₹");
        assert_eq!(masked, "₹₹...₹₹");
    }

    #[test]
    fn mask_payload_keeps_names_and_hides_values() {
        let mut payload = BTreeMap::new();
        payload.insert("name".to_string(), "Asha Raghunathan".to_string());
        payload.insert("age".to_string(), "34".to_string());

        let out = mask_payload_for_log(&payload);
        assert!(out.contains("\"name\""), "field name should stay: {}", out);
        assert!(out.contains("\"age\":\"***\""), "short value hidden: {}", out);
        assert!(!out.contains("Raghunathan"), "raw value leaked: {}", out);
    }

    // -------------------------------------------------------------------------
    // Metadata parsing + formatting
    // -------------------------------------------------------------------------

    #[test]
    fn parse_log_metadata_extracts_phase_and_step() {
        let (phase, step, msg) =
            parse_log_metadata("[PHASE: submit] [STEP: post] Sending form to /results");
        assert_eq!(phase.as_deref(), Some("submit"));
        assert_eq!(step.as_deref(), Some("post"));
        assert_eq!(msg, "Sending form to /results");
    }

    #[test]
    fn parse_log_metadata_without_tags_is_passthrough() {
        let (phase, step, msg) = parse_log_metadata("plain message");
        assert!(phase.is_none());
        assert!(step.is_none());
        assert_eq!(msg, "plain message");
    }

    #[test]
    fn format_json_log_includes_optional_fields() {
        let line = format_json_log(
            "2026-01-01T00:00:00Z",
            Level::Info,
            "carbon_wizard",
            "hello",
            Some("tui"),
            None,
            None,
        );
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["phase"], "tui");
        assert!(v.get("step").is_none());
    }

    #[test]
    fn correlation_id_lands_in_json_details() {
        let message = "correlation_id=5f0c8a7e-1b2d-4c3e-9f00-123456789abc accepted without redirect";
        let details = extract_log_details(message);
        let line = format_json_log(
            "2026-01-01T00:00:00Z",
            Level::Info,
            "carbon_wizard::wizard",
            message,
            Some("submit"),
            Some("done"),
            details.as_ref(),
        );
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            v["details"]["correlation_id"],
            "5f0c8a7e-1b2d-4c3e-9f00-123456789abc"
        );

        assert!(extract_log_details("plain message").is_none());
        assert!(extract_log_details("correlation_id=none failed").is_none());
    }

    #[test]
    fn format_human_readable_log_layout() {
        let line = format_human_readable_log(
            "2026-01-01 00:00:00.000",
            Level::Warn,
            "carbon_wizard::wizard",
            "blocked",
            Some("wizard"),
            Some("advance"),
        );
        assert_eq!(
            line,
            "[2026-01-01 00:00:00.000] [WARN] [PHASE: wizard] [STEP: advance] [carbon_wizard::wizard] blocked"
        );
    }
}
