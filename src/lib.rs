// vuex_common/src/lib.rs
//
// Common value utilities for the Vuex state store

// Export modules
pub mod errors;
pub mod logging;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export the everyday surface at the root level
pub use errors::{ConfigError, PreconditionError, ValueError};
pub use logging::{Component, Logger};
pub use types::{ListRef, MapRef, PropertyKey, Symbol, Value, ValueCategory};
pub use utils::{
    assert, deep_clone, deep_copy, find, for_each_value, is_object, is_promise, partial,
    CopyMode, CopyOptions, DeepCopier, VisitedSet,
};
