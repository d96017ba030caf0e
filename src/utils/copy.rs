// vuex_common/src/utils/copy.rs
//
// Cycle-safe deep copying of value graphs

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ValueError};
use crate::logging::{default_logger, Component, Logger};
use crate::types::{ListRef, MapRef, Value};

/// Identity-keyed record of the copies produced during one copy operation
///
/// Each entry keeps a handle to the original so its address cannot be
/// reused while the set is alive. The first copy registered for an identity
/// wins.
#[derive(Default)]
pub struct VisitedSet {
    entries: FxHashMap<usize, (Value, Value)>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The copy already produced for `original`, if any
    pub fn get(&self, original: &Value) -> Option<Value> {
        let id = original.identity()?;
        self.entries.get(&id).map(|(_, copy)| copy.clone())
    }

    /// Register `copy` for `original`. Returns false (and keeps the existing
    /// copy) if the identity is already registered or `original` is a scalar.
    pub fn insert(&mut self, original: &Value, copy: Value) -> bool {
        let Some(id) = original.identity() else {
            return false;
        };
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, (original.clone(), copy));
        true
    }

    /// Forget the copy registered for `original`, returning it
    pub fn remove(&mut self, original: &Value) -> Option<Value> {
        let id = original.identity()?;
        self.entries.remove(&id).map(|(_, copy)| copy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitedSet")
            .field("size", &self.entries.len())
            .finish()
    }
}

/// Which members a copy carries over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    /// Enumerable string keys only; dates and patterns become empty mappings
    #[default]
    Basic,
    /// Every own key; dates and patterns are rebuilt as new instances
    Extended,
}

/// Options for a [`DeepCopier`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyOptions {
    pub mode: CopyMode,
    /// Maximum number of nested composite levels, root included
    pub max_depth: Option<usize>,
}

impl CopyOptions {
    pub fn basic() -> Self {
        Self::default()
    }

    pub fn extended() -> Self {
        Self {
            mode: CopyMode::Extended,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidValue(
                "max_depth".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse options from a JSON document, e.g. `{"mode": "extended", "max_depth": 64}`
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let options: CopyOptions =
            serde_json::from_str(document).map_err(|err| ConfigError::FileError(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

/// A configured deep copy operation
#[derive(Clone)]
pub struct DeepCopier {
    options: CopyOptions,
    logger: Logger,
}

impl DeepCopier {
    pub fn new(options: CopyOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            logger: default_logger(Component::Copy),
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    pub fn copy(&self, value: &Value) -> Result<Value, ValueError> {
        self.copy_with(value, &mut VisitedSet::new())
    }

    /// Copy using a caller-owned visited set, so several related values can
    /// share one aliasing context
    ///
    /// On error every entry this call registered is removed again, so the
    /// set never hands out a partially filled copy to a later call. Entries
    /// from earlier calls are left as they were.
    pub fn copy_with(&self, value: &Value, visited: &mut VisitedSet) -> Result<Value, ValueError> {
        let mut run = CopyRun::new(self.options.mode, self.options.max_depth, visited);
        match run.copy(value, 0) {
            Ok(copy) => {
                run.report(&self.logger);
                Ok(copy)
            }
            Err(err) => {
                let discarded = run.rollback();
                self.logger.warn(format!(
                    "deep copy aborted: {} ({} partial copies discarded)",
                    err, discarded
                ));
                Err(err)
            }
        }
    }
}

impl Default for DeepCopier {
    fn default() -> Self {
        Self {
            options: CopyOptions::default(),
            logger: default_logger(Component::Copy),
        }
    }
}

/// Deep copy `value`, preserving shared and circular structure
///
/// Only enumerable string keys are copied. Dates and patterns are not
/// special-cased: each becomes an empty mapping. Use [`deep_clone`] for a
/// faithful copy of those.
pub fn deep_copy(value: &Value) -> Value {
    deep_copy_with(value, &mut VisitedSet::new())
}

/// [`deep_copy`] with a caller-owned visited set
pub fn deep_copy_with(value: &Value, visited: &mut VisitedSet) -> Value {
    copy_unbounded(value, CopyMode::Basic, visited)
}

/// Deep copy that also rebuilds dates and patterns and carries every own
/// key, including symbol-keyed and non-enumerable members
pub fn deep_clone(value: &Value) -> Value {
    deep_clone_with(value, &mut VisitedSet::new())
}

/// [`deep_clone`] with a caller-owned visited set
pub fn deep_clone_with(value: &Value, visited: &mut VisitedSet) -> Value {
    copy_unbounded(value, CopyMode::Extended, visited)
}

fn copy_unbounded(value: &Value, mode: CopyMode, visited: &mut VisitedSet) -> Value {
    let mut run = CopyRun::new(mode, None, visited);
    // Without a depth limit the traversal has no failure path
    let copy = run
        .copy(value, 0)
        .unwrap_or_else(|err| unreachable!("unbounded copy failed: {}", err));
    run.report(&default_logger(Component::Copy));
    copy
}

/// State of one top-level copy
struct CopyRun<'a> {
    mode: CopyMode,
    max_depth: Option<usize>,
    visited: &'a mut VisitedSet,
    /// Originals registered by this run, in registration order
    registered: Vec<Value>,
    copied: usize,
    aliased: usize,
}

impl<'a> CopyRun<'a> {
    fn new(mode: CopyMode, max_depth: Option<usize>, visited: &'a mut VisitedSet) -> Self {
        Self {
            mode,
            max_depth,
            visited,
            registered: Vec::new(),
            copied: 0,
            aliased: 0,
        }
    }

    fn copy(&mut self, value: &Value, depth: usize) -> Result<Value, ValueError> {
        if !value.is_composite() {
            return Ok(value.clone());
        }
        if let Some(hit) = self.visited.get(value) {
            self.aliased += 1;
            return Ok(hit);
        }
        if let Some(limit) = self.max_depth {
            if depth >= limit {
                return Err(ValueError::DepthExceeded(limit));
            }
        }

        let extended = self.mode == CopyMode::Extended;
        let copy = match value {
            Value::Date(date) if extended => Value::Date(Arc::new(date.as_ref().clone())),
            Value::Pattern(pattern) if extended => Value::Pattern(Arc::new(pattern.as_ref().clone())),
            Value::List(_) => Value::List(ListRef::new()),
            _ => Value::Map(MapRef::new()),
        };
        // Register before descending so cycles resolve to this copy
        self.visited.insert(value, copy.clone());
        self.registered.push(value.clone());
        self.copied += 1;

        match (value, &copy) {
            (Value::List(source), Value::List(target)) => {
                for item in source.to_vec() {
                    target.push(self.copy(&item, depth + 1)?);
                }
            }
            (Value::Map(source), Value::Map(target)) if extended => {
                for (key, property) in source.own_properties() {
                    let member = self.copy(&property.value, depth + 1)?;
                    target.define(key, member, property.enumerable);
                }
            }
            (Value::Map(source), Value::Map(target)) => {
                for (key, member) in source.entries() {
                    target.set(key, self.copy(&member, depth + 1)?);
                }
            }
            _ => {}
        }
        Ok(copy)
    }

    /// Remove every entry this run registered; returns how many were removed
    fn rollback(&mut self) -> usize {
        let registered = std::mem::take(&mut self.registered);
        for original in &registered {
            self.visited.remove(original);
        }
        registered.len()
    }

    fn report(&self, logger: &Logger) {
        logger.debug(format!(
            "{:?} copy: {} composites copied, {} aliases resolved",
            self.mode, self.copied, self.aliased
        ));
    }
}
