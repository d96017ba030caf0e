// vuex_common/src/types/mod.rs
//
// The dynamic value model shared by every utility in this crate

mod object;
mod special;
mod value;

pub use object::{ListRef, MapRef, Property, PropertyKey, Symbol};
pub use special::{DateObject, Function, Pattern};
pub use value::{Value, ValueCategory};
