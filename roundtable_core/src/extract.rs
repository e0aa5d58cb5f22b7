//! Text extraction from arbitrary input records.
//!
//! Input records arrive as JSON objects; the selector names the field that
//! carries the message text. Resolution order: direct field match, a
//! bracketed path expression naming a field, then the first available field
//! as a fallback.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no usable content found in input record (selector `{selector}`)")]
    NoContentFound { selector: String },
}

/// Pull a single text payload out of an input record.
///
/// String values pass through verbatim; other values are rendered as JSON.
/// Null fields count as absent. Fails with [`ExtractError::NoContentFound`]
/// when the record carries no usable field at all.
pub fn extract_content(record: &Value, selector: &str) -> Result<String, ExtractError> {
    let no_content = || ExtractError::NoContentFound {
        selector: selector.to_string(),
    };

    let fields = record.as_object().ok_or_else(no_content)?;

    // 1. direct field match
    if let Some(text) = fields.get(selector).and_then(value_to_text) {
        return Ok(text);
    }

    // 2. bracketed path expression, e.g. `item["text"]`
    if let Some(field) = bracketed_field(selector) {
        if let Some(text) = fields.get(field).and_then(value_to_text) {
            debug!("content resolved via bracketed path field `{field}`");
            return Ok(text);
        }
    }

    // 3. first available field
    if let Some((name, text)) = fields
        .iter()
        .find_map(|(name, value)| value_to_text(value).map(|text| (name, text)))
    {
        debug!("selector `{selector}` missed, falling back to field `{name}`");
        return Ok(text);
    }

    Err(no_content())
}

/// Extract the field name from a bracketed path expression such as
/// `["message"]` or `['message']` anywhere in the selector.
fn bracketed_field(selector: &str) -> Option<&str> {
    let open = selector.find('[')?;
    let rest = &selector[open + 1..];
    let close = rest.find(']')?;
    let inner = rest[..close].trim();
    let field = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(inner);
    (!field.is_empty()).then_some(field)
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        // empty text is not usable content; absence is an error upstream
        Value::String(text) => (!text.is_empty()).then(|| text.clone()),
        other => Some(other.to_string()),
    }
}
