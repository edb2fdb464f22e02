//! Property-based tests for the matcher.
//!
//! These generate arbitrary values and check the algebraic statements the
//! combinators promise: scalar descriptors partition values by type,
//! `optional` always admits nullish values, `one_of` is a disjunction and
//! `integer` accepts exactly the signed 32-bit integers.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use shapecheck_pattern::{integer, matches, one_of, optional, Pattern};
use shapecheck_value::{Object, Value};

// -- Value Generation Strategies --

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|fields| Value::from(fields.into_iter().collect::<Object>())),
        ]
    })
}

fn pattern_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        Just(Pattern::string()),
        Just(Pattern::number()),
        Just(Pattern::boolean()),
        Just(Pattern::array()),
        Just(Pattern::object()),
        Just(integer()),
        Just(Pattern::sequence(Pattern::number())),
        Just(Pattern::literal(Value::Null)),
    ]
}

proptest! {
    #[test]
    fn string_descriptor_matches_only_text(value in value_strategy()) {
        let is_text = matches!(value, Value::String(_));
        prop_assert_eq!(matches(&value, &Pattern::string(), true), is_text);
    }

    #[test]
    fn optional_admits_nullish(pattern in pattern_strategy(), is_null in any::<bool>()) {
        let value = if is_null { Value::Null } else { Value::Undefined };
        prop_assert!(matches(&value, &optional(pattern), true));
    }

    #[test]
    fn one_of_is_disjunction(
        value in value_strategy(),
        first in pattern_strategy(),
        second in pattern_strategy(),
    ) {
        let either = matches(&value, &first, true)
            || matches(&value, &second, true);
        prop_assert_eq!(
            matches(&value, &one_of([first, second]), true),
            either
        );
    }

    #[test]
    fn integer_accepts_every_i32(n in any::<i32>()) {
        prop_assert!(matches(&Value::from(n), &integer(), true));
    }

    #[test]
    fn integer_rejects_fractions(n in any::<i32>(), fraction in 0.001f64..0.999) {
        let value = Value::from(f64::from(n) + fraction);
        prop_assert!(!matches(&value, &integer(), true));
    }

    #[test]
    fn integer_rejects_out_of_range(n in (i64::from(i32::MAX) + 1)..i64::MAX) {
        prop_assert!(!matches(&Value::from(n), &integer(), true));
        prop_assert!(!matches(&Value::from(-n), &integer(), true));
    }

    #[test]
    fn sequence_requires_every_element(items in prop::collection::vec(any::<i32>(), 0..8), bad in any::<bool>()) {
        let mut values: Vec<Value> = items.into_iter().map(Value::from).collect();
        if bad {
            values.push(Value::from("x"));
        }
        let pattern = Pattern::sequence(Pattern::number());
        prop_assert_eq!(matches(&Value::Array(values), &pattern, true), !bad);
    }

    #[test]
    fn undeclared_fields_fail_only_when_strict(key in "[a-z]{1,6}") {
        prop_assume!(key != "foo");
        let value = Value::from(Object::new().with("foo", "bar").with(key.as_str(), 1));
        let pattern = Pattern::shape([("foo", Pattern::string())]);
        prop_assert!(!matches(&value, &pattern, true));
        prop_assert!(matches(&value, &pattern, false));
    }
}
