//! Hook response protocol.
//!
//! The wire contract at the process boundary: the last non-empty line of a
//! hook's stdout is a JSON `HookOutcome`. Everything before it is the hook's
//! own log noise and is discarded. Absent or malformed output is an implicit
//! continue; silence is a valid signal, not an error.

use crate::types::HookOutcome;

/// Parse captured stdout into an outcome.
pub fn parse_response(stdout: &str) -> HookOutcome {
    let Some(line) = stdout.lines().rev().find(|l| !l.trim().is_empty()) else {
        return HookOutcome::continue_chain();
    };
    serde_json::from_str(line.trim()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HookAction;

    #[test]
    fn test_empty_output_is_continue() {
        let outcome = parse_response("");
        assert_eq!(outcome.action, HookAction::Continue);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_whitespace_only_output_is_continue() {
        assert_eq!(parse_response("  \n\t\n  \n").action, HookAction::Continue);
    }

    #[test]
    fn test_last_line_wins_over_log_noise() {
        let stdout = "loading config\nchecking files\n{\"action\":\"stop\",\"message\":\"halt\"}\n";
        let outcome = parse_response(stdout);
        assert!(outcome.is_stop());
        assert_eq!(outcome.message.as_deref(), Some("halt"));
    }

    #[test]
    fn test_trailing_blank_lines_are_skipped() {
        let stdout = "{\"action\":\"stop\"}\n\n  \n";
        assert!(parse_response(stdout).is_stop());
    }

    #[test]
    fn test_malformed_last_line_is_continue_even_with_earlier_json() {
        // Only the last non-empty line participates in the protocol.
        let stdout = "{\"action\":\"stop\"}\nnot json at all\n";
        let outcome = parse_response(stdout);
        assert_eq!(outcome.action, HookAction::Continue);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_unknown_action_value_is_continue() {
        assert_eq!(
            parse_response("{\"action\":\"explode\"}").action,
            HookAction::Continue
        );
    }

    #[test]
    fn test_non_object_json_is_continue() {
        assert_eq!(parse_response("42").action, HookAction::Continue);
        assert_eq!(parse_response("null").action, HookAction::Continue);
        assert_eq!(parse_response("[1,2]").action, HookAction::Continue);
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let stdout = "{\"action\":\"continue\",\"error\":\"lint failed\",\"took_ms\":12}";
        let outcome = parse_response(stdout);
        assert_eq!(outcome.action, HookAction::Continue);
        assert_eq!(outcome.error.as_deref(), Some("lint failed"));
    }

    #[test]
    fn test_indented_protocol_line_is_trimmed() {
        assert!(parse_response("  {\"action\":\"stop\"}  ").is_stop());
    }
}
