//! Context-action gateway: selection snapshots, action vetoes and the
//! hand-off of long-running actions to the host.

use std::collections::HashSet;
use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::export::to_tsv;
use crate::model::{RowData, RowKey};

use super::Table;

/// Kinds of actions a host can run against the selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Copy selected rows to the clipboard.
    Copy,
    /// Delete selected rows.
    Delete,
    /// Bulk-assign selected rows.
    Assign,
    /// Open the row context menu.
    ContextMenu,
    /// Host-defined action.
    Custom(String),
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Copy => f.write_str("copy"),
            ActionKind::Delete => f.write_str("delete"),
            ActionKind::Assign => f.write_str("assign"),
            ActionKind::ContextMenu => f.write_str("context_menu"),
            ActionKind::Custom(name) => f.write_str(name),
        }
    }
}

/// Filter and selection counters handed to veto predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionContext {
    /// Rows passing the filter.
    pub visible_count: usize,
    /// Visible rows that may be selected.
    pub selectable_visible_count: usize,
    /// Selected rows, visible or not.
    pub selected_count: usize,
    /// Selected rows the filter lets through.
    pub selected_visible_count: usize,
    /// Whether a filter predicate is installed.
    pub filter_active: bool,
}

impl ActionContext {
    /// Whether the filter left at least one selectable row.
    pub fn has_selectable_visible(&self) -> bool {
        self.selectable_visible_count > 0
    }

    /// Whether anything is selected.
    pub fn has_selection(&self) -> bool {
        self.selected_count > 0
    }
}

/// A selection snapshot handed to the host for an asynchronous action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionTicket {
    /// Increasing per table.
    pub id: u64,
    pub kind: ActionKind,
    /// Selected keys in display order at hand-off.
    pub keys: Vec<RowKey>,
    /// Selected row data in display order at hand-off.
    pub rows: Vec<RowData>,
}

/// What the host reports back when an action finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action succeeded and changed nothing the table displays.
    Completed,
    /// The transport confirmed these rows are gone.
    Removed(Vec<RowKey>),
    /// The action failed.
    Failed(String),
}

impl Table {
    /// Selected row data in display order.
    pub fn selection_snapshot(&self) -> Vec<RowData> {
        self.store
            .all()
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.data.clone())
            .collect()
    }

    /// Selected rows as TSV in column order, for the copy action.
    pub fn selection_tsv(&self) -> String {
        let fields: Vec<&str> = self.columns.iter().map(|c| c.key.as_str()).collect();
        to_tsv(&fields, &self.selection_snapshot())
    }

    /// Current counters as seen by veto predicates.
    ///
    /// Visibility is as of the last render.
    pub fn action_context(&self) -> ActionContext {
        let mut ctx = ActionContext {
            visible_count: 0,
            selectable_visible_count: 0,
            selected_count: self.selection.len(),
            selected_visible_count: 0,
            filter_active: self.filter.is_active(),
        };
        for row in self.store.all().iter().filter(|r| r.visible) {
            ctx.visible_count += 1;
            if (self.selectable)(&row.data) {
                ctx.selectable_visible_count += 1;
            }
            if row.selected {
                ctx.selected_visible_count += 1;
            }
        }
        ctx
    }

    /// Asks whether an action may run now. Never mutates state.
    ///
    /// Kinds without a registered veto are always allowed.
    pub fn request_action(&self, kind: &ActionKind) -> bool {
        let allowed = match self.vetoes.get(kind) {
            Some(veto) => veto(&self.action_context()),
            None => true,
        };
        if !allowed {
            debug!("Table::request_action: {} vetoed", kind);
        }
        allowed
    }

    /// Hands the current selection to the host for an action.
    ///
    /// Returns `None` when the action is vetoed. The table stays editable
    /// while the ticket is outstanding.
    pub fn begin_action(&mut self, kind: ActionKind) -> Option<ActionTicket> {
        if !self.request_action(&kind) {
            return None;
        }

        let ticket = ActionTicket {
            id: self.next_ticket,
            kind,
            keys: self.selected_keys(),
            rows: self.selection_snapshot(),
        };
        self.next_ticket += 1;
        info!(
            "Table: action #{} ({}) started with {} rows",
            ticket.id,
            ticket.kind,
            ticket.keys.len()
        );
        Some(ticket)
    }

    /// Applies the host's report for a finished action.
    ///
    /// Returns the keys removed from the store.
    pub fn finish_action(&mut self, ticket: &ActionTicket, outcome: ActionOutcome) -> Vec<RowKey> {
        match outcome {
            ActionOutcome::Completed => {
                info!("Table: action #{} ({}) completed", ticket.id, ticket.kind);
                Vec::new()
            }
            ActionOutcome::Removed(keys) => {
                let keys: HashSet<RowKey> = keys.into_iter().collect();
                let removed = self.remove(&keys);
                info!(
                    "Table: action #{} ({}) removed {} rows",
                    ticket.id,
                    ticket.kind,
                    removed.len()
                );
                removed
            }
            ActionOutcome::Failed(message) => {
                warn!(
                    "Table: action #{} ({}) failed: {}",
                    ticket.id, ticket.kind, message
                );
                Vec::new()
            }
        }
    }
}
