//! Command execution with undo, redo, and atomic macro commands.
//!
//! This is an implementation of the command pattern, where all modifications
//! to a target are done by creating commands that apply the change and know
//! how to reverse it. The [`History`] keeps the performed and the undone
//! commands on two stacks ordered by recency, so the target can be rolled
//! backwards and forwards at will, while [`Macro`] bundles several commands
//! into a single atomic unit of work.
//!
//! # Features
//!
//! * [`Command`] provides the base functionality for all commands.
//! * [`History`] provides undo-redo functionality with truncation whenever a
//!   new command is performed after an undo.
//! * [`Macro`] applies a sequence of commands all-or-nothing: if one of them
//!   fails, the ones applied before it are rolled back.
//! * [`Entry`] tracks the execution state of a command so a stray double
//!   apply or undo is rejected before the target is touched.
//! * A [`Slot`] can be connected to receive a [`Signal`] for every
//!   transition, with the label of the command involved.
//! * Entry timestamps are provided when the `chrono` feature is enabled,
//!   colored display formatting when the `colored` feature is enabled, and
//!   serialization of the history state when the `serde` feature is enabled.
//!
//! # Examples
//!
//! Add this to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rewind = "0.1"
//! ```
//!
//! And this to `main.rs`:
//!
//! ```
//! use rewind::{Command, History};
//!
//! struct Add(char);
//!
//! impl Command for Add {
//!     type Target = String;
//!     type Error = &'static str;
//!
//!     fn apply(&mut self, s: &mut String) -> Result<(), Self::Error> {
//!         s.push(self.0);
//!         Ok(())
//!     }
//!
//!     fn undo(&mut self, s: &mut String) -> Result<(), Self::Error> {
//!         self.0 = s.pop().ok_or("`s` is empty")?;
//!         Ok(())
//!     }
//!
//!     fn text(&self) -> String {
//!         format!("add '{}'", self.0)
//!     }
//! }
//!
//! fn main() -> Result<(), rewind::HistoryError<&'static str>> {
//!     let mut target = String::new();
//!     let mut history = History::new();
//!     history.perform(&mut target, Add('a'))?;
//!     history.perform(&mut target, Add('b'))?;
//!     history.perform(&mut target, Add('c'))?;
//!     assert_eq!(target, "abc");
//!     history.undo(&mut target)?;
//!     history.undo(&mut target)?;
//!     history.undo(&mut target)?;
//!     assert_eq!(target, "");
//!     history.redo(&mut target)?;
//!     history.redo(&mut target)?;
//!     history.redo(&mut target)?;
//!     assert_eq!(target, "abc");
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]

mod display;
mod entry;
mod history;
mod macros;
mod socket;

pub mod light;

use core::fmt;
use std::error::Error;

pub use self::display::Display;
pub use self::entry::{Entry, State};
pub use self::history::{Builder, History};
pub use self::macros::Macro;
pub use self::socket::{Nop, Signal, Slot};

/// Base functionality for all commands.
///
/// A command closes over everything it needs to reverse its own effect.
/// Parameters for the inverse must be captured when the command is created,
/// not when `undo` runs; by the time a command is undone, later commands may
/// have changed the target so the old value can no longer be read back from
/// it. See [`light::LightCommand::set_brightness`] for an example.
///
/// The target is owned by the caller and passed into every operation;
/// commands never own it.
pub trait Command {
    /// The type the command mutates.
    type Target;

    /// The failure type of the command.
    type Error;

    /// Applies the command on the target.
    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;

    /// Restores the state of the target as it was before the command was
    /// applied.
    fn undo(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;

    /// Reapplies the command on the target after it has been undone.
    ///
    /// The default implementation uses the [`apply`](Command::apply)
    /// implementation.
    fn redo(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        self.apply(target)
    }

    /// Returns a human-readable label for the command.
    ///
    /// The label is used for diagnostics and signals only, never for
    /// dispatch, and should be stable and side-effect free.
    fn text(&self) -> String;
}

impl<C: Command + ?Sized> Command for Box<C> {
    type Target = C::Target;
    type Error = C::Error;

    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        (**self).apply(target)
    }

    fn undo(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        (**self).undo(target)
    }

    fn redo(&mut self, target: &mut Self::Target) -> Result<(), Self::Error> {
        (**self).redo(target)
    }

    fn text(&self) -> String {
        (**self).text()
    }
}

/// The ways a history operation can fail.
///
/// All variants are recoverable: the operation reports the failure and the
/// history is left in a consistent state, as documented on each operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HistoryError<E> {
    /// Undo or redo was called with nothing available.
    Empty,
    /// The command has already been applied without an intervening undo.
    AlreadyApplied,
    /// The command is not in an applied state.
    NotApplied,
    /// The command itself failed.
    Command(E),
    /// A macro child failed and its applied siblings were rolled back.
    MacroFailed(E),
}

impl<E: fmt::Display> fmt::Display for HistoryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HistoryError::Empty => f.write_str("nothing to undo or redo"),
            HistoryError::AlreadyApplied => f.write_str("the command has already been applied"),
            HistoryError::NotApplied => f.write_str("the command has not been applied"),
            HistoryError::Command(err) => write!(f, "the command failed: {err}"),
            HistoryError::MacroFailed(err) => {
                write!(f, "a macro command failed and was rolled back: {err}")
            }
        }
    }
}

impl<E: Error + 'static> Error for HistoryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HistoryError::Command(err) | HistoryError::MacroFailed(err) => Some(err),
            HistoryError::Empty | HistoryError::AlreadyApplied | HistoryError::NotApplied => None,
        }
    }
}
