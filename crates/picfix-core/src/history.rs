//! Two-stack undo/redo engine.
//!
//! The top of the undo stack is the most recently applied command. Executing
//! a new command clears the redo stack. Observers are notified after every
//! transition so a UI can refresh its action states.

use std::fmt;

use tracing::debug;

use crate::command::{Command, Document};
use crate::error::EditError;

/// Which transition produced a [`HistoryEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEventKind {
    Executed,
    Undone,
    Redone,
    Reset,
}

/// Sent to observers after each history transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEvent {
    pub kind: HistoryEventKind,
    pub can_undo: bool,
    pub can_redo: bool,
}

pub type Observer = Box<dyn FnMut(&HistoryEvent)>;

#[derive(Default)]
pub struct History {
    undo: Vec<Command>,
    redo: Vec<Command>,
    observers: Vec<Observer>,
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl History {
    /// Empty history with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `cmd` and record it.
    ///
    /// A failing apply leaves both stacks untouched and returns the error.
    pub fn execute(&mut self, cmd: Command, doc: &mut Document) -> Result<(), EditError> {
        cmd.apply(doc)?;
        debug!(edit = cmd.edit().label(), undo = self.undo.len() + 1, "execute");
        self.undo.push(cmd);
        self.redo.clear();
        self.notify(HistoryEventKind::Executed);
        Ok(())
    }

    /// Revert the most recent command. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        let Some(cmd) = self.undo.pop() else {
            return false;
        };
        cmd.revert(doc);
        debug!(edit = cmd.edit().label(), undo = self.undo.len(), "undo");
        self.redo.push(cmd);
        self.notify(HistoryEventKind::Undone);
        true
    }

    /// Re-apply the most recently undone command. Returns `Ok(false)` when
    /// there is nothing to redo.
    pub fn redo(&mut self, doc: &mut Document) -> Result<bool, EditError> {
        let Some(cmd) = self.redo.pop() else {
            return Ok(false);
        };
        if let Err(err) = cmd.apply(doc) {
            self.redo.push(cmd);
            return Err(err);
        }
        debug!(edit = cmd.edit().label(), redo = self.redo.len(), "redo");
        self.undo.push(cmd);
        self.notify(HistoryEventKind::Redone);
        Ok(true)
    }

    /// Drop both stacks.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
        debug!("history reset");
        self.notify(HistoryEventKind::Reset);
    }

    /// Whether [`History::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether [`History::redo`] would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of commands that can be undone.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of commands that can be redone.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Commands on the undo stack, oldest first.
    pub fn applied(&self) -> impl Iterator<Item = &Command> {
        self.undo.iter()
    }

    /// Register an observer called after every execute, undo, redo and reset.
    ///
    /// # Arguments
    /// * `observer` - Receives each [`HistoryEvent`] in order; observers
    ///   are never removed
    pub fn subscribe(&mut self, observer: impl FnMut(&HistoryEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, kind: HistoryEventKind) {
        let event = HistoryEvent {
            kind,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
