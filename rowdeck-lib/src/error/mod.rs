//! Error types

mod config;
mod predicate;
mod store;

pub use config::*;
pub use predicate::*;
pub use store::*;
