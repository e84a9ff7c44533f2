//! Request extractors that answer rejections with the clinic error envelope.
//!
//! Drop-in replacements for the axum extractors of the same name. A
//! rejection becomes an [`Error`] with a readable message instead of axum's
//! plain-text body.
//!
//! [`Error`]: crate::handler::Error

mod enhanced_json;
mod enhanced_path;
mod enhanced_query;
mod validated_json;

pub use self::enhanced_json::{Json, MAX_JSON_PAYLOAD_SIZE};
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Trims a rejection message to its first lines.
fn sanitize_error_message(message: &str, max_lines: usize, max_chars: usize) -> String {
    message
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

/// Best-effort field name from a serde error message.
///
/// Handles both "missing field `name`" and "duplicate field name at ...".
fn field_name_from_error(message: &str) -> Option<&str> {
    if let Some(start) = message.find('`')
        && let Some(end) = message[start + 1..].find('`')
    {
        return Some(&message[start + 1..start + 1 + end]).filter(|name| !name.is_empty());
    }

    let field_part = &message[message.find("field ")? + "field ".len()..];
    field_part.split(' ').next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_is_extracted() {
        assert_eq!(
            field_name_from_error("missing field `patient_name` at line 1 column 2"),
            Some("patient_name")
        );
        assert_eq!(
            field_name_from_error("duplicate field limit at line 1"),
            Some("limit")
        );
        assert_eq!(field_name_from_error("invalid type: string"), None);
    }

    #[test]
    fn messages_are_trimmed() {
        let message = "first\nsecond\nthird";
        assert_eq!(sanitize_error_message(message, 2, 200), "first second");
        assert_eq!(sanitize_error_message(message, 3, 4), "firs");
    }
}
