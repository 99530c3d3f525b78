//! Selection, sort and filter engine for interactive admin tables.
//!
//! A [`Table`](table::Table) keeps three pieces of per-row state consistent
//! across re-renders: visibility (from the filter), order (from the sort
//! criteria) and selection (from user clicks). Markup, network calls and
//! notifications stay with the host, which drives the table through named
//! transitions and reads back [`RenderOutput`](table::RenderOutput)s.

pub mod error;
pub mod export;
pub mod filter;
pub mod input;
pub mod model;
pub mod schedule;
pub mod selection;
pub mod sort;
pub mod store;
pub mod table;

pub mod prelude {
    pub use crate::error::{ConfigError, PredicateError, StoreError};
    pub use crate::filter::FilterSet;
    pub use crate::input::Modifiers;
    pub use crate::model::{Column, Row, RowData, RowKey, SortValue, ValueParser};
    pub use crate::selection::SelectionChange;
    pub use crate::sort::{SortCriterion, SortDirection};
    pub use crate::table::{
        ActionContext, ActionKind, ActionOutcome, ActionTicket, RenderOutput, RowClickTarget,
        Table, TableBuilder, TableOptions, TriState,
    };
}
