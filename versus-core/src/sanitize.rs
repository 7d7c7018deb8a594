//! Sanitization of untyped AI payloads into a fully populated result.
//!
//! This is the component that absorbs all upstream unreliability: the
//! payload is overlaid field by field onto the canonical defaults, and any
//! field that is missing, wrong-shaped, or of an unexpected type falls back
//! to its default. The output always satisfies the full-population
//! invariant on [`ComparisonResult`], and sanitization never fails.
//!
//! Defaulting only fills gaps inside an otherwise parsed payload; it never
//! masks a pipeline-level failure, which propagates as an error instead.

use serde_json::Value;

use crate::types::{
    CONFIDENCE_MAX, CONFIDENCE_MIN, ComparisonResult, MAX_PROS_CONS, ProductOverview,
    ProductPair, ProsCons, Recommendation, Winner,
};

/// Overlay `payload` onto the canonical defaults, producing a fully
/// populated `ComparisonResult`. Never fails.
pub fn sanitize(payload: &Value) -> ComparisonResult {
    let defaults = ComparisonResult::default();

    ComparisonResult {
        overview: ProductPair {
            product1: sanitize_overview(&payload["overview"]["product1"], defaults.overview.product1),
            product2: sanitize_overview(&payload["overview"]["product2"], defaults.overview.product2),
        },
        pros_cons: ProductPair {
            product1: sanitize_pros_cons(&payload["pros_cons"]["product1"]),
            product2: sanitize_pros_cons(&payload["pros_cons"]["product2"]),
        },
        analysis: string_or(&payload["analysis"], defaults.analysis),
        recommendation: sanitize_recommendation(&payload["recommendation"]),
        customer_sentiment: ProductPair {
            product1: string_or(
                &payload["customer_sentiment"]["product1"],
                defaults.customer_sentiment.product1,
            ),
            product2: string_or(
                &payload["customer_sentiment"]["product2"],
                defaults.customer_sentiment.product2,
            ),
        },
    }
}

fn sanitize_overview(value: &Value, default: ProductOverview) -> ProductOverview {
    ProductOverview {
        name: string_or(&value["name"], default.name),
        key_features: string_list(&value["key_features"], usize::MAX),
        price_range: string_or(&value["price_range"], default.price_range),
    }
}

fn sanitize_pros_cons(value: &Value) -> ProsCons {
    ProsCons {
        pros: string_list(&value["pros"], MAX_PROS_CONS),
        cons: string_list(&value["cons"], MAX_PROS_CONS),
    }
}

fn sanitize_recommendation(value: &Value) -> Recommendation {
    let default = Recommendation::default();

    let winner = value["winner"]
        .as_str()
        .and_then(Winner::from_wire)
        .unwrap_or(Winner::Tie);

    let confidence = value["confidence"]
        .as_i64()
        .unwrap_or(i64::from(CONFIDENCE_MIN))
        .clamp(i64::from(CONFIDENCE_MIN), i64::from(CONFIDENCE_MAX)) as u8;

    Recommendation {
        winner,
        reason: string_or(&value["reason"], default.reason),
        confidence,
    }
}

/// Accept a non-empty JSON string; anything else falls back to the default.
///
/// Empty strings count as absent, matching the original fallback behavior
/// and keeping placeholder text visible instead of blank fields.
fn string_or(value: &Value, default: String) -> String {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => default,
    }
}

/// Accept a JSON array, retaining only its non-empty string elements,
/// capped at `max`. Anything else yields an empty list.
fn string_list(value: &Value, max: usize) -> Vec<String> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .take(max)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
