/// Builds a [`Value`](crate::Value) from KSON-like syntax.
///
/// Object keys are written bare, as in a KSON document. Negative numbers and
/// other multi-token expressions need parentheses.
///
/// ```rust
/// use kson::{kson, Value};
///
/// let config = kson!({
///     name: "server",
///     port: 8080,
///     offset: (-3),
///     tags: ["a", "b"],
///     extra: NULL
/// });
///
/// assert_eq!(config.get("port").and_then(Value::as_i64), Some(8080));
/// assert_eq!(config.get("offset").and_then(Value::as_i64), Some(-3));
/// assert!(config.get("extra").map_or(false, Value::is_null));
/// ```
#[macro_export]
macro_rules! kson {
    (null) => {
        $crate::Value::Null
    };

    (NULL) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (TRUE) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    (FALSE) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::kson!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::KsonMap::new())
    };

    ({ $($key:ident : $value:tt),* $(,)? }) => {{
        let mut object = $crate::KsonMap::new();
        $(
            object.insert(stringify!($key).to_string(), $crate::kson!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Quoted keys, for names that are not valid identifiers in Rust.
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::KsonMap::new();
        $(
            object.insert($key.to_string(), $crate::kson!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
