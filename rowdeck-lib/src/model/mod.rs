//! Data model: rows, keys, and column descriptors.

mod column;
mod row;

pub use column::*;
pub use row::*;
