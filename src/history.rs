//! A history of performed and undone commands.

use crate::display::Display;
use crate::entry::Entry;
use crate::socket::{Nop, Signal, Slot, Socket};
use crate::{Command, HistoryError};
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::num::NonZeroUsize;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A history of performed and undone commands.
///
/// The history owns two stacks of entries ordered by recency, most recent
/// last: the commands that have been performed and the ones that have been
/// undone. [`perform`](History::perform) runs a command and records it;
/// [`undo`](History::undo) and [`redo`](History::redo) move entries between
/// the two stacks. Performing a new command discards everything on the undone
/// stack, so a redo never crosses into a different line of history.
///
/// The history can notify a connected [`Slot`] about every transition, and
/// the number of entries kept can be bounded with
/// [`Builder::limit`](Builder::limit).
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::{History, HistoryError};
///
/// let mut light = Light::new();
/// let mut history = History::new();
///
/// history.perform(&mut light, LightCommand::TurnOn).unwrap();
/// history.perform(&mut light, LightCommand::TurnOff).unwrap();
/// assert!(!light.is_on());
///
/// history.undo(&mut light).unwrap();
/// assert!(light.is_on());
/// history.undo(&mut light).unwrap();
/// assert!(!light.is_on());
/// assert_eq!(history.undo(&mut light), Err(HistoryError::Empty));
/// ```
///
/// # Thread safety
/// The history is a plain data structure and does no locking of its own.
/// When it is shared between threads, wrap it in a `Mutex` and hold the lock
/// across the whole call so a transition is never interleaved with another;
/// the target needs its own exclusive-access discipline.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(bound(serialize = "C: Serialize", deserialize = "C: Deserialize<'de>"))
)]
#[derive(Clone)]
pub struct History<C, S = Nop> {
    pub(crate) done: VecDeque<Entry<C>>,
    pub(crate) undone: Vec<Entry<C>>,
    limit: NonZeroUsize,
    #[cfg_attr(feature = "serde", serde(skip))]
    socket: Socket<S>,
}

impl<C> History<C> {
    /// Returns a new history.
    pub fn new() -> History<C> {
        Builder::new().build()
    }
}

impl<C, S> History<C, S> {
    /// Returns a new history builder.
    pub fn builder() -> Builder<C, S> {
        Builder::new()
    }

    /// Returns the number of entries tracked by the history.
    pub fn len(&self) -> usize {
        self.done.len() + self.undone.len()
    }

    /// Returns `true` if the history tracks no entries.
    pub fn is_empty(&self) -> bool {
        self.done.is_empty() && self.undone.is_empty()
    }

    /// Returns the maximum number of entries kept.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Returns `true` if there is a command that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    /// Returns `true` if there is a command that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Sets how signals should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<C, S> {
        Display::from(self)
    }
}

impl<C: Command, S> History<C, S> {
    /// Returns the label of the command that [`undo`](History::undo) would
    /// reverse.
    pub fn undo_text(&self) -> Option<String> {
        self.done.back().map(Entry::text)
    }

    /// Returns the label of the command that [`redo`](History::redo) would
    /// reapply.
    pub fn redo_text(&self) -> Option<String> {
        self.undone.last().map(Entry::text)
    }
}

impl<C: Command, S: Slot> History<C, S> {
    /// Runs the command and pushes it onto the performed stack.
    ///
    /// Any undone commands are discarded: once a new command has been
    /// performed there is nothing left to redo. When the limit is reached the
    /// oldest entry is dropped.
    ///
    /// # Errors
    /// Fails with [`HistoryError::AlreadyApplied`] if the entry was applied
    /// before it was submitted, and with [`HistoryError::Command`] or
    /// [`HistoryError::MacroFailed`] if the command itself fails. The history
    /// is unchanged whenever an error is returned.
    pub fn perform(
        &mut self,
        target: &mut C::Target,
        command: impl Into<Entry<C>>,
    ) -> Result<(), HistoryError<C::Error>> {
        let mut entry = command.into();
        entry.apply(target)?;
        self.undone.clear();
        if self.done.len() == self.limit() {
            self.done.pop_front();
        }
        self.socket.emit(|| Signal::Performed(entry.text()));
        self.done.push_back(entry);
        Ok(())
    }

    /// Undoes the most recently performed command and moves it onto the
    /// undone stack.
    ///
    /// # Errors
    /// Fails with [`HistoryError::Empty`] if there is nothing to undo. If the
    /// command fails, it stays on the performed stack.
    pub fn undo(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        let mut entry = self.done.pop_back().ok_or(HistoryError::Empty)?;
        match entry.undo(target) {
            Ok(()) => {
                self.socket.emit(|| Signal::Undone(entry.text()));
                self.undone.push(entry);
                Ok(())
            }
            Err(err) => {
                self.done.push_back(entry);
                Err(err)
            }
        }
    }

    /// Reapplies the most recently undone command and moves it back onto the
    /// performed stack.
    ///
    /// # Errors
    /// Fails with [`HistoryError::Empty`] if there is nothing to redo. If the
    /// command fails, it stays on the undone stack.
    pub fn redo(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        let mut entry = self.undone.pop().ok_or(HistoryError::Empty)?;
        match entry.redo(target) {
            Ok(()) => {
                self.socket.emit(|| Signal::Redone(entry.text()));
                self.done.push_back(entry);
                Ok(())
            }
            Err(err) => {
                self.undone.push(entry);
                Err(err)
            }
        }
    }

    /// Discards all entries without undoing any of them.
    ///
    /// This is an explicit reset, not a bulk undo; the target keeps whatever
    /// state it is in.
    pub fn clear(&mut self) {
        let was_empty = self.is_empty();
        self.done.clear();
        self.undone.clear();
        self.socket.emit_if(!was_empty, || Signal::Cleared);
    }
}

impl<C> Default for History<C> {
    fn default() -> History<C> {
        History::new()
    }
}

impl<C: Debug, S> Debug for History<C, S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("History")
            .field("done", &self.done)
            .field("undone", &self.undone)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Builder for a history.
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::History;
///
/// let mut light = Light::new();
/// let mut history = History::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|signal| { dbg!(signal); })
///     .build();
/// history.perform(&mut light, LightCommand::TurnOn).unwrap();
/// assert_eq!(history.limit(), 100);
/// ```
#[derive(Debug)]
pub struct Builder<C, S = Nop> {
    capacity: usize,
    limit: NonZeroUsize,
    socket: Socket<S>,
    pd: PhantomData<C>,
}

impl<C, S> Builder<C, S> {
    /// Returns a builder for a history.
    pub fn new() -> Builder<C, S> {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }

    /// Sets the capacity reserved for the performed stack.
    pub fn capacity(mut self, capacity: usize) -> Builder<C, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum number of entries kept.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<C, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<C, S> {
        self.socket = Socket::new(slot);
        self
    }

    /// Builds the history.
    pub fn build(self) -> History<C, S> {
        History {
            done: VecDeque::with_capacity(self.capacity),
            undone: Vec::new(),
            limit: self.limit,
            socket: self.socket,
        }
    }
}

impl<C> Default for Builder<C> {
    fn default() -> Self {
        Builder::new()
    }
}
