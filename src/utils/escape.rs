//! Escaping helpers for values spliced into the generated HTML report.
//!
//! Two contexts exist in the template: HTML text/attribute content and
//! JSON literals inside an inline `<script>` block.

use crate::utils::error::Result;
use serde::Serialize;

/// Escape a value for HTML text or a quoted attribute.
pub fn html_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serialize a value as a JSON literal that is safe inside an inline script.
///
/// `</script>` cannot terminate the block because `<` and `>` never appear
/// unescaped; U+2028/U+2029 are escaped for pre-ES2019 parsers.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(ch),
        }
    }
    Ok(escaped)
}
