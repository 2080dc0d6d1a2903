//! Signals emitted when the history changes.

use core::mem;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slot wrapper that adds some additional functionality.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S>(Option<S>);

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket(Some(slot))
    }

    pub fn connect(&mut self, slot: Option<S>) -> Option<S> {
        mem::replace(&mut self.0, slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.0.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket(None)
    }
}

impl<S: Slot> Socket<S> {
    pub fn emit(&mut self, signal: impl FnOnce() -> Signal) {
        if let Some(slot) = &mut self.0 {
            slot.on_emit(signal());
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: impl FnOnce() -> Signal) {
        if cond {
            self.emit(signal);
        }
    }
}

/// The `Signal` describes a transition made by the history.
///
/// Every signal carries the label of the command involved,
/// so a connected slot can be used as a diagnostic log of the session.
/// See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Emitted when a command has been performed and recorded.
    Performed(String),
    /// Emitted when the most recent command has been undone.
    Undone(String),
    /// Emitted when the most recently undone command has been reapplied.
    Redone(String),
    /// Emitted when the history has been cleared.
    Cleared,
}

/// Use this to handle signals emitted by the history.
///
/// The history works the same whether a slot is connected or not.
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::{History, Signal};
/// use std::sync::mpsc;
///
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut light = Light::new();
/// let mut history = History::builder()
///     .connect(move |signal| sender.send(signal).unwrap())
///     .build();
///
/// history.perform(&mut light, LightCommand::TurnOn).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Performed("turn the light on".into())));
///
/// history.undo(&mut light).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undone("turn the light on".into())));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes the transition that was made.
    fn on_emit(&mut self, signal: Signal);
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

/// Default slot that discards every signal.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Nop;

impl Slot for Nop {
    fn on_emit(&mut self, _: Signal) {}
}
