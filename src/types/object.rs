// vuex_common/src/types/object.rs
//
// Shared composite containers: keyed mappings and ordered lists

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::value::Value;

/// A unique property key compared by identity, never by description
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<Option<String>>,
}

impl Symbol {
    /// Create a new symbol; two symbols with the same description are distinct
    pub fn new(description: Option<&str>) -> Self {
        Self {
            inner: Arc::new(description.map(str::to_string)),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.inner) as usize).hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// Key of a mapping member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl PropertyKey {
    /// The key text, if this is a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => f.write_str(s),
            PropertyKey::Symbol(sym) => write!(f, "{:?}", sym),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(key: &str) -> Self {
        PropertyKey::String(key.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(key: String) -> Self {
        PropertyKey::String(key)
    }
}

impl From<&String> for PropertyKey {
    fn from(key: &String) -> Self {
        PropertyKey::String(key.clone())
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(symbol: &Symbol) -> Self {
        PropertyKey::Symbol(symbol.clone())
    }
}

/// A mapping member: its value plus whether plain key listing reports it
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

impl Property {
    pub fn new(value: Value, enumerable: bool) -> Self {
        Self { value, enumerable }
    }
}

type Entries = Vec<(PropertyKey, Property)>;

/// Shared handle to a mapping with insertion-ordered keys
///
/// Cloning the handle never clones the mapping; two handles are the same
/// mapping iff `ptr_eq` holds.
#[derive(Clone, Default)]
pub struct MapRef {
    inner: Arc<RwLock<Entries>>,
}

impl MapRef {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the value of an own property, enumerable or not
    pub fn get(&self, key: impl Into<PropertyKey>) -> Option<Value> {
        self.get_property(key).map(|property| property.value)
    }

    pub fn get_property(&self, key: impl Into<PropertyKey>) -> Option<Property> {
        let key = key.into();
        self.read()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, property)| property.clone())
    }

    /// Assign a value; a new key becomes enumerable, an existing key keeps
    /// its enumerability and position
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, property)) => property.value = value,
            None => entries.push((key, Property::new(value, true))),
        }
    }

    /// Define a property with explicit enumerability, replacing any existing one
    pub fn define(&self, key: impl Into<PropertyKey>, value: impl Into<Value>, enumerable: bool) {
        let key = key.into();
        let property = Property::new(value.into(), enumerable);
        let mut entries = self.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = property,
            None => entries.push((key, property)),
        }
    }

    pub fn remove(&self, key: impl Into<PropertyKey>) -> Option<Value> {
        let key = key.into();
        let mut entries = self.write();
        let index = entries.iter().position(|(k, _)| *k == key)?;
        Some(entries.remove(index).1.value)
    }

    pub fn contains_key(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        self.read().iter().any(|(k, _)| *k == key)
    }

    /// Number of own properties, including hidden and symbol-keyed ones
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Own enumerable string keys, in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .iter()
            .filter(|(_, property)| property.enumerable)
            .filter_map(|(key, _)| key.as_str().map(str::to_string))
            .collect()
    }

    /// Snapshot of the own enumerable string-keyed entries, in insertion order
    pub fn entries(&self) -> Vec<(PropertyKey, Value)> {
        self.read()
            .iter()
            .filter(|(key, property)| property.enumerable && !key.is_symbol())
            .map(|(key, property)| (key.clone(), property.value.clone()))
            .collect()
    }

    /// Every own key: string keys first, then symbol keys
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.own_properties().into_iter().map(|(key, _)| key).collect()
    }

    /// Snapshot of every own property in `own_keys` order
    pub fn own_properties(&self) -> Vec<(PropertyKey, Property)> {
        let entries = self.read();
        let strings = entries.iter().filter(|(key, _)| !key.is_symbol());
        let symbols = entries.iter().filter(|(key, _)| key.is_symbol());
        strings.chain(symbols).cloned().collect()
    }

    /// Drop every property. Also the way to break a reference cycle.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

// Shallow on purpose: a mapping may contain itself
impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.read();
        f.debug_struct("MapRef")
            .field("keys", &entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("size", &entries.len())
            .finish()
    }
}

/// Shared handle to an ordered sequence of values
#[derive(Clone, Default)]
pub struct ListRef {
    inner: Arc<RwLock<Vec<Value>>>,
}

impl ListRef {
    /// Create a new empty list
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(values)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.write().push(value.into());
    }

    /// Store at `index`, padding any gap with nulls
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut items = self.write();
        if index >= items.len() {
            items.resize(index + 1, Value::Null);
        }
        items[index] = value.into();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of the elements (handles, not copies)
    pub fn to_vec(&self) -> Vec<Value> {
        self.read().clone()
    }

    /// First element matching `predicate`, scanning in order
    pub fn find<P>(&self, predicate: P) -> Option<Value>
    where
        P: FnMut(&Value) -> bool,
    {
        crate::utils::find(&self.to_vec(), predicate).cloned()
    }

    /// Drop every element. Also the way to break a reference cycle.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl From<Vec<Value>> for ListRef {
    fn from(values: Vec<Value>) -> Self {
        ListRef::from_vec(values)
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRef").field("len", &self.len()).finish()
    }
}
