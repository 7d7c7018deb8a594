//! Extraction of the structured payload from raw AI response text.
//!
//! Models wrap their JSON in prose ("Sure! Here is the result: ... Hope
//! this helps!") or markdown fences. The extractor walks the text with a
//! balanced-brace scan that is string- and escape-aware, so nested objects
//! and stray braces in surrounding prose do not confuse it. Schema
//! conformance is not checked here; that is the sanitizer's job.

use serde_json::Value;
use tracing::debug;

use crate::error::AiError;

/// Extract the first balanced, syntactically valid JSON object from raw text.
///
/// Candidate regions are tried in order of their opening brace; the first
/// one that parses as a JSON object wins. Returns `MalformedResponse` if
/// the text contains no parseable object at all.
pub fn extract_payload(raw: &str) -> Result<Value, AiError> {
    let mut search_from = 0;
    while let Some(offset) = raw[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = find_matching_brace(&raw[start..]) {
            let candidate = &raw[start..start + end + 1];
            match serde_json::from_str::<Value>(candidate) {
                Ok(value) if value.is_object() => {
                    debug!(start, len = candidate.len(), "Extracted payload from response");
                    return Ok(value);
                }
                Ok(_) | Err(_) => {}
            }
        }
        search_from = start + 1;
    }

    Err(AiError::MalformedResponse {
        message: "no balanced JSON object found in response".to_string(),
    })
}

/// Find the byte offset of the brace closing the object that opens at
/// offset 0, tracking string literals and escapes. Returns `None` if the
/// input does not start with `{` or the object never closes.
fn find_matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
