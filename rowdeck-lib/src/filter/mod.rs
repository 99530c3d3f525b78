//! Visibility filtering.
//!
//! [`FilterEvaluator`] is predicate-agnostic: it only runs whatever predicate
//! it was given. [`FilterSet`] is the caller-side helper that composes the
//! usual admin-table predicate out of text fields and flag requirements.

mod evaluator;
mod text;

pub use evaluator::{FilterEvaluator, Predicate};
pub use text::{FieldFilter, FilterSet};
