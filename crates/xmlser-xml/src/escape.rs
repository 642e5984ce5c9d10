//! Character-level escaping for XML text content and attribute values.
//!
//! Only the characters that would change the document structure are
//! rewritten. Everything else, including non-ASCII text, passes through
//! untouched; output is assumed to be interpreted in the same encoding as the
//! input strings.

use std::borrow::Cow;

/// Escape `&`, `<` and `>` for use as element text content.
#[must_use]
pub fn escape_text(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(raw)
}

/// Escape `&`, `<`, `>` and `"` for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attr(raw: &str) -> Cow<'_, str> {
    let Some(first) = raw.bytes().position(is_attr_special) else {
        return Cow::Borrowed(raw);
    };

    let mut escaped = String::with_capacity(raw.len() + 8);
    escaped.push_str(&raw[..first]);
    for ch in raw[first..].chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn is_attr_special(b: u8) -> bool {
    matches!(b, b'&' | b'<' | b'>' | b'"')
}
