//! Change notification
//!
//! Callbacks are registered per event name and run synchronously after a
//! mutation has repaired the table. A callback receives the table itself and
//! may mutate it again. The list is snapshotted before dispatch, and a
//! callback that is already running is skipped if a nested mutation fires
//! the same event, which keeps a callback from re-entering itself.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::model::Table;

/// Event fired after every non-silent mutation
pub const UPDATE_EVENT: &str = "update";

/// What a mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    ColumnsAdded,
    RowsAdded,
    RowsUpdated,
    RowsDeleted,
    Cleared,
    /// Fired by a caller through [`Table::fire`]
    Manual,
}

/// Details passed to callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Rows (or columns, for `ColumnsAdded`) touched by the mutation
    pub count: usize,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, count: usize) -> Self {
        Self { kind, count }
    }
}

pub type Callback = Rc<RefCell<dyn FnMut(&mut Table, &ChangeEvent)>>;

/// Callbacks keyed by event name, in registration order
#[derive(Default)]
pub struct Callbacks {
    by_event: IndexMap<String, Vec<Callback>>,
}

impl Callbacks {
    fn register(&mut self, event: &str, callback: Callback) {
        self.by_event
            .entry(event.to_string())
            .or_default()
            .push(callback);
    }

    fn snapshot(&self, event: &str) -> Vec<Callback> {
        self.by_event.get(event).cloned().unwrap_or_default()
    }

    fn count(&self, event: &str) -> usize {
        self.by_event.get(event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.by_event.iter().map(|(event, list)| (event, list.len())))
            .finish()
    }
}

impl Table {
    /// Register a callback for `event`
    pub fn register_callback<F>(&mut self, event: &str, callback: F)
    where
        F: FnMut(&mut Table, &ChangeEvent) + 'static,
    {
        let callback: Callback = Rc::new(RefCell::new(callback));
        self.callbacks.register(event, callback);
    }

    /// Number of callbacks registered for `event`
    pub fn callback_count(&self, event: &str) -> usize {
        self.callbacks.count(event)
    }

    /// Run every callback registered for `event`
    pub fn fire(&mut self, event: &str, details: &ChangeEvent) {
        let callbacks = self.callbacks.snapshot(event);
        for callback in &callbacks {
            if let Ok(mut f) = callback.try_borrow_mut() {
                (&mut *f)(self, details);
            }
        }
    }

    pub(crate) fn notify(&mut self, silent: bool, details: ChangeEvent) {
        if !silent {
            self.fire(UPDATE_EVENT, &details);
        }
    }
}
