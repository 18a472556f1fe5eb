//! Property-based tests for the round-trip guarantees.
//!
//! The generated trees cover every value variant, arbitrary Unicode strings
//! (including newlines, tabs, quotes and leading whitespace that trigger
//! folding) and arbitrary mapping keys.

use kyaml::encoder::fold;
use kyaml::{dump, from_str, load, to_string, Mapping, Value};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

/// Strings biased towards the characters the encoder treats specially.
fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ \t\n\\\\\"a-z0-9:{}\\[\\],.-]{0,24}",
    ]
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn value_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        finite_f64().prop_map(Value::Float),
        text().prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((text(), inner), 0..6)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_value_roundtrip(value in value_tree()) {
        let text = dump(&value).unwrap();
        let back = load(&text).unwrap();
        prop_assert_eq!(back, value, "document was {:?}", text);
    }

    #[test]
    fn prop_dump_is_canonical(value in value_tree()) {
        let text = dump(&value).unwrap();
        let again = dump(&load(&text).unwrap()).unwrap();
        prop_assert_eq!(again, text);
    }

    #[test]
    fn prop_fold_then_load_restores_string(
        s in (text(), text()).prop_map(|(head, tail)| format!("{}\n{}", head, tail))
    ) {
        let document = format!("---\n{}\n", fold(&s));
        prop_assert_eq!(load(&document).unwrap(), Value::String(s));
    }

    #[test]
    fn prop_garbage_never_panics(s in any::<String>()) {
        let _ = load(&s);
        let _ = load(&format!("---\n{}", s));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_vec_string(v in prop::collection::vec(text(), 0..10)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_f64(opt in proptest::option::of(finite_f64())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple(t in (any::<i32>(), any::<bool>(), text())) {
        prop_assert!(roundtrip(&t));
    }
}
