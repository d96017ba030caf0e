// vuex_common/src/macros/mod.rs
//
// Declarative macros for building values and guarding preconditions

/// Create a mapping `Value` from key/value pairs
///
/// Keys are added in the order written and are enumerable. Values go through
/// `Value::from`, so scalars, lists, maps and other `Value`s all work.
///
/// # Examples
///
/// ```
/// use vuex_common::object;
///
/// let user = object! {
///     "name" => "Ada",
///     "age" => 36,
///     "admin" => true
/// };
/// assert_eq!(user.get("age").and_then(|v| v.as_f64()), Some(36.0));
///
/// let empty = object! {};
/// assert!(empty.as_map().unwrap().is_empty());
/// ```
#[macro_export]
macro_rules! object {
    {} => {
        $crate::types::Value::new_map()
    };

    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let map = $crate::types::MapRef::new();
            $(
                map.set($key, $crate::types::Value::from($value));
            )+
            $crate::types::Value::Map(map)
        }
    };
}

/// Create a list `Value` from elements
///
/// ```
/// use vuex_common::list;
///
/// let items = list![1, "two", 3.0];
/// assert_eq!(items.as_list().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::types::Value::new_list()
    };

    ($($item:expr),+ $(,)?) => {
        $crate::types::Value::List($crate::types::ListRef::from_vec(vec![
            $($crate::types::Value::from($item)),+
        ]))
    };
}

/// Return early with a namespaced precondition error when `cond` is false
///
/// The error is converted with `?`, so the enclosing function may return any
/// error type that implements `From<PreconditionError>`.
///
/// ```
/// use vuex_common::errors::PreconditionError;
/// use vuex_common::vuex_assert;
///
/// fn commit(kind: &str) -> Result<(), PreconditionError> {
///     vuex_assert!(!kind.is_empty(), "mutation type must be a string, got {:?}", kind);
///     Ok(())
/// }
///
/// assert!(commit("increment").is_ok());
/// assert_eq!(
///     commit("").unwrap_err().to_string(),
///     "[vuex] mutation type must be a string, got \"\""
/// );
/// ```
#[macro_export]
macro_rules! vuex_assert {
    ($cond:expr, $($arg:tt)+) => {
        $crate::utils::assert($cond, format!($($arg)+))?
    };
}
