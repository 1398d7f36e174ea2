//! Property tests for comparison invariants.

use indexmap::IndexMap;
use proptest::prelude::*;
use treematch::compare::{compare, ModeConfig};
use treematch::document::{JsonNumber, JsonValue};
use treematch::matcher::MatcherRegistry;

fn arb_scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Boolean),
        any::<i64>().prop_map(|n| JsonValue::Number(JsonNumber::from(n))),
        "[a-z]{0,6}".prop_map(JsonValue::String),
    ]
}

fn arb_value() -> impl Strategy<Value = JsonValue> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::vec(("[a-d]", inner), 0..4).prop_map(|entries| {
                JsonValue::Object(entries.into_iter().collect::<IndexMap<_, _>>())
            }),
        ]
    })
}

/// Adds a `zz_extra` key to every object and `extra` to every array.
fn widen(value: &JsonValue, extra: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(fields) => {
            let mut widened: IndexMap<String, JsonValue> = fields
                .iter()
                .map(|(key, item)| (key.clone(), widen(item, extra)))
                .collect();
            widened.insert("zz_extra".to_string(), extra.clone());
            JsonValue::Object(widened)
        }
        JsonValue::Array(items) => {
            let mut widened: Vec<JsonValue> =
                items.iter().map(|item| widen(item, extra)).collect();
            widened.push(extra.clone());
            JsonValue::Array(widened)
        }
        other => other.clone(),
    }
}

/// An object built from `fields` plus an optional `zz` entry.
fn with_zz(fields: &IndexMap<String, JsonValue>, zz: Option<JsonValue>) -> JsonValue {
    let mut object = fields.clone();
    if let Some(zz) = zz {
        object.insert("zz".to_string(), zz);
    }
    JsonValue::Object(object)
}

fn arb_fields() -> impl Strategy<Value = IndexMap<String, JsonValue>> {
    prop::collection::vec(("[a-d]", arb_value()), 0..4)
        .prop_map(|entries| entries.into_iter().collect::<IndexMap<_, _>>())
}

fn modes() -> Vec<ModeConfig> {
    vec![
        ModeConfig::strict(),
        ModeConfig::lenient(),
        ModeConfig::strict().with_array_order(false),
        ModeConfig::lenient().with_array_order(true),
    ]
}

proptest! {
    /// Every document satisfies itself under every mode.
    #[test]
    fn test_reflexivity(value in arb_value()) {
        let registry = MatcherRegistry::with_defaults();
        for mode in modes() {
            prop_assert!(compare(&value, &value, &mode, &registry).is_ok());
        }
    }

    /// Repeated validation gives the same outcome.
    #[test]
    fn test_idempotence(actual in arb_value(), expected in arb_value()) {
        let registry = MatcherRegistry::with_defaults();
        for mode in modes() {
            let first = compare(&actual, &expected, &mode, &registry);
            let second = compare(&actual, &expected, &mode, &registry);
            prop_assert_eq!(first, second);
        }
    }

    /// Whatever passes strictly also passes leniently with the same order flag.
    #[test]
    fn test_lenient_monotonicity(actual in arb_value(), expected in arb_value(), ordered in any::<bool>()) {
        let registry = MatcherRegistry::with_defaults();
        let strict = ModeConfig::strict().with_array_order(ordered);
        let lenient = ModeConfig::lenient().with_array_order(ordered);
        if compare(&actual, &expected, &strict, &registry).is_ok() {
            prop_assert!(compare(&actual, &expected, &lenient, &registry).is_ok());
        }
    }

    /// Extra keys in nested objects and extra array elements never break a
    /// lenient comparison, with or without array order.
    #[test]
    fn test_lenient_tolerates_extra_content(value in arb_value(), extra in arb_value()) {
        let registry = MatcherRegistry::with_defaults();
        let actual = widen(&value, &extra);
        for mode in [ModeConfig::lenient(), ModeConfig::lenient().with_array_order(true)] {
            let outcome = compare(&actual, &value, &mode, &registry);
            prop_assert!(outcome.is_ok(), "{:?}", outcome);
        }
    }

    /// An ignored key makes no difference whatever it holds on either side,
    /// including when it is absent from the actual document.
    #[test]
    fn test_ignored_key_is_absorbed(
        fields in arb_fields(),
        expected_zz in arb_value(),
        actual_zz in prop::option::of(arb_value()),
        nested in any::<bool>(),
    ) {
        let registry = MatcherRegistry::with_defaults();
        let mut expected = with_zz(&fields, Some(expected_zz));
        let mut actual = with_zz(&fields, actual_zz);
        if nested {
            let wrap = |object: JsonValue| {
                let items = JsonValue::Array(vec![object]);
                JsonValue::Object(IndexMap::from([("wrap".to_string(), items)]))
            };
            expected = wrap(expected);
            actual = wrap(actual);
        }
        for mode in [ModeConfig::lenient(), ModeConfig::strict()] {
            let mode = mode.with_ignore_expressions(["$..zz"]).unwrap();
            let outcome = compare(&actual, &expected, &mode, &registry);
            prop_assert!(outcome.is_ok(), "{:?}", outcome);
        }
    }

    /// Reversing an array is accepted exactly when order is not checked.
    #[test]
    fn test_order_sensitivity(items in prop::collection::vec(any::<i64>(), 2..6)) {
        let registry = MatcherRegistry::with_defaults();
        let expected = JsonValue::Array(items.iter().map(|&n| JsonValue::from(n)).collect());
        let actual = JsonValue::Array(items.iter().rev().map(|&n| JsonValue::from(n)).collect());

        let unordered = ModeConfig::strict().with_array_order(false);
        prop_assert!(compare(&actual, &expected, &unordered, &registry).is_ok());

        let reversed_equal = items.iter().eq(items.iter().rev());
        let ordered = compare(&actual, &expected, &ModeConfig::strict(), &registry);
        prop_assert_eq!(ordered.is_ok(), reversed_equal);
    }
}
