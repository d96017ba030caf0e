// vuex_common/src/utils/mod.rs
//
// Value utilities: search, predicates, iteration, assertion, partial
// application and deep copying

mod copy;
mod helpers;
mod value_converters;

pub use copy::*;
pub use helpers::*;
pub use value_converters::*;
