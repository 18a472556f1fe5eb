/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals and keep the order they are written
/// in. Any other expression goes through [`to_value`](crate::to_value).
///
/// ```rust
/// use kyaml::{kyaml, Value};
///
/// let value = kyaml!({
///     "kind": "Service",
///     "ports": [80, 443],
///     "selector": {},
/// });
/// assert_eq!(value["ports"][0], Value::Int(80));
/// ```
#[macro_export]
macro_rules! kyaml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::kyaml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::kyaml!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Value};

    #[test]
    fn test_kyaml_macro_scalars() {
        assert_eq!(kyaml!(null), Value::Null);
        assert_eq!(kyaml!(true), Value::Bool(true));
        assert_eq!(kyaml!(42), Value::Int(42));
        assert_eq!(kyaml!(0.5), Value::Float(0.5));
        assert_eq!(kyaml!("hi"), Value::String("hi".to_string()));
    }

    #[test]
    fn test_kyaml_macro_keeps_key_order() {
        let value = kyaml!({"zeta": 1, "alpha": 2, "mid": 3});
        let keys: Vec<_> = value
            .as_mapping()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_kyaml_macro_nesting() {
        let value = kyaml!({"items": [{"a": null}, []], "empty": {}});
        assert_eq!(value["items"][0]["a"], Value::Null);
        assert_eq!(value["items"][1], Value::Sequence(vec![]));
        assert_eq!(value["empty"], Value::Mapping(Mapping::new()));
    }
}
