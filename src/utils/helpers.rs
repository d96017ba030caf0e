// vuex_common/src/utils/helpers.rs
//
// Search, predicate, iteration and assertion helpers

use crate::errors::PreconditionError;
use crate::logging::{default_logger, Component};
use crate::types::{MapRef, PropertyKey, Value};

/// Get the first item that passes `predicate`, scanning in order
///
/// Returns `None` when nothing matches or the slice is empty.
pub fn find<T, P>(list: &[T], mut predicate: P) -> Option<&T>
where
    P: FnMut(&T) -> bool,
{
    list.iter().find(|item| predicate(*item))
}

/// True for mappings, lists, dates and patterns; false for null, scalars and functions
pub fn is_object(value: &Value) -> bool {
    value.is_composite()
}

/// Best-effort check for a deferred result: a mapping whose own `then`
/// member is a function
///
/// This inspects shape only. Nothing is invoked.
pub fn is_promise(value: &Value) -> bool {
    match value {
        Value::Map(map) => matches!(map.get("then"), Some(Value::Function(_))),
        _ => false,
    }
}

/// Fail with a namespaced [`PreconditionError`] when `condition` is false
pub fn assert(condition: bool, message: impl Into<String>) -> Result<(), PreconditionError> {
    if condition {
        return Ok(());
    }
    let err = PreconditionError::new(message);
    default_logger(Component::Assert).error(err.to_string());
    Err(err)
}

/// Call `f(value, key)` for every own enumerable string key of `map`
///
/// The key list is snapshotted first, so every key present at the start is
/// visited even if the callback mutates `map`. Each value is read when its
/// key is dispatched; a key removed by an earlier call yields `Value::Null`.
pub fn for_each_value<F>(map: &MapRef, mut f: F)
where
    F: FnMut(&Value, &PropertyKey),
{
    for key in map.keys() {
        let key = PropertyKey::String(key);
        let value = map.get(key.clone()).unwrap_or(Value::Null);
        f(&value, &key);
    }
}

/// Bind `arg` to `f`, returning a zero-argument closure
///
/// `arg` is moved in now and cloned on every call. For composite values the
/// clone is a handle clone, so the callee sees the live composite.
pub fn partial<F, A, R>(f: F, arg: A) -> impl Fn() -> R
where
    F: Fn(A) -> R,
    A: Clone,
{
    move || f(arg.clone())
}
