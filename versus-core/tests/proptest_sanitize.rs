//! Property-based tests for payload sanitization using proptest.

use proptest::prelude::*;
use serde_json::{Value, json};

use versus_core::sanitize::sanitize;
use versus_core::types::{CONFIDENCE_MAX, CONFIDENCE_MIN, MAX_PROS_CONS, Winner};

/// Arbitrary JSON values a misbehaving model might emit for any field.
fn arb_json(depth: u32) -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 {}\"\\\\]{0,40}".prop_map(Value::from),
    ];
    if depth == 0 {
        leaf.boxed()
    } else {
        prop_oneof![
            leaf,
            prop::collection::vec(arb_json(depth - 1), 0..4).prop_map(Value::from),
            prop::collection::hash_map("[a-z_]{1,12}", arb_json(depth - 1), 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
        .boxed()
    }
}

/// Payloads with arbitrary subsets of the schema present, each field
/// holding either plausible or garbage data.
fn arb_payload() -> impl Strategy<Value = Value> {
    prop::collection::hash_map(
        prop_oneof![
            Just("overview".to_string()),
            Just("pros_cons".to_string()),
            Just("analysis".to_string()),
            Just("recommendation".to_string()),
            Just("customer_sentiment".to_string()),
            "[a-z_]{1,12}",
        ],
        arb_json(3),
        0..6,
    )
    .prop_map(|m| Value::Object(m.into_iter().collect()))
}

proptest! {
    // Any payload at all sanitizes to a fully populated result.
    #[test]
    fn sanitized_result_is_always_fully_populated(payload in arb_payload()) {
        let result = sanitize(&payload);
        prop_assert!(!result.overview.product1.name.is_empty());
        prop_assert!(!result.overview.product2.name.is_empty());
        prop_assert!(!result.overview.product1.price_range.is_empty());
        prop_assert!(!result.overview.product2.price_range.is_empty());
        prop_assert!(!result.analysis.is_empty());
        prop_assert!(!result.recommendation.reason.is_empty());
        prop_assert!(!result.customer_sentiment.product1.is_empty());
        prop_assert!(!result.customer_sentiment.product2.is_empty());
        prop_assert!(result.pros_cons.product1.pros.len() <= MAX_PROS_CONS);
        prop_assert!(result.pros_cons.product1.cons.len() <= MAX_PROS_CONS);
        prop_assert!(result.pros_cons.product2.pros.len() <= MAX_PROS_CONS);
        prop_assert!(result.pros_cons.product2.cons.len() <= MAX_PROS_CONS);
    }

    // The serialized result never contains a JSON null anywhere.
    #[test]
    fn sanitized_result_serializes_without_nulls(payload in arb_payload()) {
        fn has_null(value: &Value) -> bool {
            match value {
                Value::Null => true,
                Value::Array(items) => items.iter().any(has_null),
                Value::Object(map) => map.values().any(has_null),
                _ => false,
            }
        }
        let result = sanitize(&payload);
        let serialized = serde_json::to_value(&result).unwrap();
        prop_assert!(!has_null(&serialized));
    }

    // Sanitizing an already sanitized result changes nothing.
    #[test]
    fn sanitize_is_idempotent(payload in arb_payload()) {
        let first = sanitize(&payload);
        let second = sanitize(&serde_json::to_value(&first).unwrap());
        prop_assert_eq!(first, second);
    }

    // Confidence always lands in range; in-range values are preserved.
    #[test]
    fn confidence_is_always_in_range(confidence in any::<i64>()) {
        let payload = json!({"recommendation": {"confidence": confidence}});
        let sanitized = sanitize(&payload).recommendation.confidence;
        prop_assert!(sanitized >= CONFIDENCE_MIN && sanitized <= CONFIDENCE_MAX);
    }

    #[test]
    fn in_range_confidence_is_preserved(confidence in 50u8..=95) {
        let payload = json!({"recommendation": {"confidence": confidence}});
        prop_assert_eq!(sanitize(&payload).recommendation.confidence, confidence);
    }

    // Any winner value outside the exact enumeration becomes a tie.
    #[test]
    fn unknown_winner_becomes_tie(winner in "[a-zA-Z0-9 ]{0,20}") {
        prop_assume!(!matches!(winner.as_str(), "product1" | "product2" | "tie"));
        let payload = json!({"recommendation": {"winner": winner}});
        prop_assert_eq!(sanitize(&payload).recommendation.winner, Winner::Tie);
    }

    #[test]
    fn exact_winner_values_are_kept(pick in 0usize..3) {
        let (wire, expected) = [
            ("product1", Winner::Product1),
            ("product2", Winner::Product2),
            ("tie", Winner::Tie),
        ][pick];
        let payload = json!({"recommendation": {"winner": wire}});
        prop_assert_eq!(sanitize(&payload).recommendation.winner, expected);
    }
}
