// vuex_common/src/types/value.rs
//
// Dynamic value definition for the Vuex store

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde_json::Value as JsonValue;

use super::object::{ListRef, MapRef};
use super::special::{DateObject, Function, Pattern};
use crate::errors::ValueError;

/// Categorizes the value for efficient dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCategory {
    Null,
    Primitive,
    Function,
    List,
    Map,
    Date,
    Pattern,
}

/// A dynamically typed store value
///
/// Scalars (`Null`, `Bool`, `Number`, `String`) and `Function` are treated
/// as immutable. `List`, `Map`, `Date` and `Pattern` are composites with
/// reference identity: cloning a `Value` clones the handle, so both clones
/// observe the same composite.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Function(Function),
    List(ListRef),
    Map(MapRef),
    Date(Arc<DateObject>),
    Pattern(Arc<Pattern>),
}

impl Value {
    /// Create a new empty mapping value
    pub fn new_map() -> Self {
        Value::Map(MapRef::new())
    }

    /// Create a new empty list value
    pub fn new_list() -> Self {
        Value::List(ListRef::new())
    }

    pub fn date(instant: DateTime<Utc>) -> Self {
        Value::Date(Arc::new(DateObject::new(instant)))
    }

    /// Create a date from milliseconds since the Unix epoch
    pub fn date_from_millis(millis: i64) -> Result<Self, ValueError> {
        Ok(Value::Date(Arc::new(DateObject::from_millis(millis)?)))
    }

    pub fn pattern(source: &str, flags: &str) -> Result<Self, ValueError> {
        Ok(Value::Pattern(Arc::new(Pattern::new(source, flags)?)))
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(Function::new(f))
    }

    /// Get the value category
    pub fn category(&self) -> ValueCategory {
        match self {
            Value::Null => ValueCategory::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => ValueCategory::Primitive,
            Value::Function(_) => ValueCategory::Function,
            Value::List(_) => ValueCategory::List,
            Value::Map(_) => ValueCategory::Map,
            Value::Date(_) => ValueCategory::Date,
            Value::Pattern(_) => ValueCategory::Pattern,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for values with reference identity
    pub fn is_composite(&self) -> bool {
        self.identity().is_some()
    }

    /// Address of the shared allocation behind a composite
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::List(list) => Some(list.addr()),
            Value::Map(map) => Some(map.addr()),
            Value::Date(date) => Some(Arc::as_ptr(date) as usize),
            Value::Pattern(pattern) => Some(Arc::as_ptr(pattern) as usize),
            _ => None,
        }
    }

    /// Strict identity: composites and functions by reference, scalars by value
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (a, b) if a.is_composite() || b.is_composite() => a.identity() == b.identity(),
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// Deep equality over the reachable graph
    ///
    /// Pairs of composites already under comparison are assumed equal, so
    /// cyclic values compare without looping.
    pub fn structural_eq(&self, other: &Value) -> bool {
        let mut in_progress = FxHashSet::default();
        structural_eq_inner(self, other, &mut in_progress)
    }

    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateObject> {
        match self {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(pattern) => Some(pattern),
            _ => None,
        }
    }

    /// Member lookup on a mapping; `None` for anything else
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Create a Value from a JSON value
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(ListRef::from_vec(
                items.into_iter().map(Value::from_json).collect(),
            )),
            JsonValue::Object(object) => {
                let map = MapRef::new();
                for (key, value) in object {
                    map.set(key, Value::from_json(value));
                }
                Value::Map(map)
            }
        }
    }

    /// Convert this Value to a JSON value
    ///
    /// Only enumerable string-keyed members are exported. Shared subtrees are
    /// written once per occurrence; a cycle is an error.
    pub fn to_json(&self) -> Result<JsonValue, ValueError> {
        let mut ancestors = FxHashSet::default();
        to_json_inner(self, &mut ancestors)
    }
}

fn structural_eq_inner(a: &Value, b: &Value, in_progress: &mut FxHashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        (Value::Date(x), Value::Date(y)) => x.instant() == y.instant(),
        (Value::Pattern(x), Value::Pattern(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) || !in_progress.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xs, ys) = (x.to_vec(), y.to_vec());
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(l, r)| structural_eq_inner(l, r, in_progress))
        }
        (Value::Map(x), Value::Map(y)) => {
            if x.ptr_eq(y) || !in_progress.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xs, ys) = (x.own_properties(), y.own_properties());
            xs.len() == ys.len()
                && xs.iter().all(|(key, left)| {
                    ys.iter().any(|(other_key, right)| {
                        key == other_key
                            && left.enumerable == right.enumerable
                            && structural_eq_inner(&left.value, &right.value, in_progress)
                    })
                })
        }
        _ => false,
    }
}

fn to_json_inner(value: &Value, ancestors: &mut FxHashSet<usize>) -> Result<JsonValue, ValueError> {
    if let Some(id) = value.identity() {
        if !ancestors.insert(id) {
            return Err(ValueError::CircularStructure("JSON".to_string()));
        }
    }
    let json = match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Function(_) => {
            return Err(ValueError::Unsupported("function".to_string(), "JSON".to_string()))
        }
        Value::Date(date) => JsonValue::String(date.to_rfc3339()),
        Value::Pattern(pattern) => JsonValue::String(pattern.to_string()),
        Value::List(list) => JsonValue::Array(
            list.to_vec()
                .iter()
                .map(|item| to_json_inner(item, ancestors))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Map(map) => {
            let mut object = serde_json::Map::new();
            for (key, member) in map.entries() {
                if let Some(name) = key.as_str() {
                    object.insert(name.to_string(), to_json_inner(&member, ancestors)?);
                }
            }
            JsonValue::Object(object)
        }
    };
    if let Some(id) = value.identity() {
        ancestors.remove(&id);
    }
    Ok(json)
}

// Integral numbers export as JSON integers so they compare equal to parsed input
fn number_to_json(n: f64) -> JsonValue {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    // -0.0 keeps its sign, so it stays a float
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && (n != 0.0 || n.is_sign_positive()) {
        return JsonValue::from(n as i64);
    }
    // For NaN or infinity, represent as null
    serde_json::Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

// Shallow for composites: a value graph may be cyclic
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::List(list) => fmt::Debug::fmt(list, f),
            Value::Map(map) => fmt::Debug::fmt(map, f),
            Value::Date(date) => write!(f, "Date({})", date.to_rfc3339()),
            Value::Pattern(pattern) => write!(f, "Pattern({})", pattern),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(ListRef::from_vec(values))
    }
}

impl From<ListRef> for Value {
    fn from(list: ListRef) -> Self {
        Value::List(list)
    }
}

impl From<MapRef> for Value {
    fn from(map: MapRef) -> Self {
        Value::Map(map)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Value::date(instant)
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::Pattern(Arc::new(pattern))
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Value::from_json(value)
    }
}
