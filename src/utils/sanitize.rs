//! Utilities for sanitizing error messages.
//!
//! Removes control characters from error text before it is shown in a
//! terminal, and truncates runaway messages.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F except tab, newline and carriage return,
/// plus DEL) can corrupt terminal output. Non-ASCII text is kept.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| matches!(c, '\t' | '\n' | '\r') || !c.is_ascii_control())
        .collect()
}

/// Sanitizes and truncates an error message to [`MAX_ERROR_MESSAGE_LENGTH`]
/// characters.
///
/// Truncated messages end with a note carrying the original length.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let char_count = sanitized.chars().count();

    if char_count > MAX_ERROR_MESSAGE_LENGTH {
        // leave room for the truncation note
        let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncated: String = sanitized.chars().take(keep).collect();
        format!(
            "{}... (truncated, original length: {} chars)",
            truncated, char_count
        )
    } else {
        sanitized
    }
}
