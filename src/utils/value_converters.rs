// vuex_common/src/utils/value_converters.rs
//
// Shorthand constructors for scalar values

use crate::types::Value;

/// Create a null Value
pub fn null_value() -> Value {
    Value::Null
}

/// Create a Value from a string
pub fn string_value(s: impl Into<String>) -> Value {
    Value::String(s.into())
}

/// Create a Value from a number
pub fn number_value(n: f64) -> Value {
    Value::Number(n)
}

/// Create a Value from a boolean
pub fn bool_value(b: bool) -> Value {
    Value::Bool(b)
}
