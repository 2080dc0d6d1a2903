//! Entries wrap commands with their execution state.

use crate::macros::Macro;
use crate::{Command, HistoryError};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The execution state of an entry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum State {
    /// The command has not been applied yet.
    Pending,
    /// The command has been applied and can be undone.
    Applied,
    /// The command has been undone and can be reapplied.
    Undone,
}

/// The unit of work tracked by an entry, either a single command or a macro.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub(crate) enum Payload<C> {
    Single(C),
    Macro(Macro<C>),
}

impl<C: Command> Payload<C> {
    fn apply(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        match self {
            Payload::Single(command) => command.apply(target).map_err(HistoryError::Command),
            Payload::Macro(commands) => commands.apply(target).map_err(HistoryError::MacroFailed),
        }
    }

    fn undo(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        match self {
            Payload::Single(command) => command.undo(target).map_err(HistoryError::Command),
            Payload::Macro(commands) => commands.undo(target).map_err(HistoryError::MacroFailed),
        }
    }

    fn redo(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        match self {
            Payload::Single(command) => command.redo(target).map_err(HistoryError::Command),
            Payload::Macro(commands) => commands.redo(target).map_err(HistoryError::MacroFailed),
        }
    }

    fn text(&self) -> String {
        match self {
            Payload::Single(command) => command.text(),
            Payload::Macro(commands) => commands.text().into(),
        }
    }
}

/// Wrapper around a command that tracks its execution state.
///
/// The state makes apply and undo safe against misuse: applying an entry that
/// has already been applied is rejected before the target is touched, as is
/// undoing an entry that has nothing to reverse.
///
/// Entries are normally created and driven by a [`History`](crate::History),
/// but they can also be driven by hand.
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::{Entry, HistoryError, State};
///
/// let mut light = Light::new();
/// let mut entry = Entry::from(LightCommand::TurnOn);
/// assert_eq!(entry.state(), State::Pending);
///
/// entry.apply(&mut light).unwrap();
/// assert_eq!(entry.state(), State::Applied);
/// assert_eq!(entry.apply(&mut light), Err(HistoryError::AlreadyApplied));
///
/// entry.undo(&mut light).unwrap();
/// assert_eq!(entry.state(), State::Undone);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct Entry<C> {
    payload: Payload<C>,
    state: State,
    #[cfg(feature = "chrono")]
    pub(crate) timestamp: DateTime<Utc>,
}

impl<C> Entry<C> {
    fn new(payload: Payload<C>) -> Entry<C> {
        Entry {
            payload,
            state: State::Pending,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }

    /// Returns the execution state of the entry.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the time the entry was created.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }
}

impl<C: Command> Entry<C> {
    /// Applies the command for the first time.
    ///
    /// # Errors
    /// Fails with [`HistoryError::AlreadyApplied`] unless the entry is
    /// [`Pending`](State::Pending); the target is not touched in that case.
    pub fn apply(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        match self.state {
            State::Pending => {
                self.payload.apply(target)?;
                self.state = State::Applied;
                Ok(())
            }
            State::Applied | State::Undone => Err(HistoryError::AlreadyApplied),
        }
    }

    /// Reverses the most recent apply or redo.
    ///
    /// # Errors
    /// Fails with [`HistoryError::NotApplied`] unless the entry is
    /// [`Applied`](State::Applied); the target is not touched in that case.
    pub fn undo(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        match self.state {
            State::Applied => {
                self.payload.undo(target)?;
                self.state = State::Undone;
                Ok(())
            }
            State::Pending | State::Undone => Err(HistoryError::NotApplied),
        }
    }

    /// Reapplies the command after it has been undone.
    ///
    /// # Errors
    /// Fails with [`HistoryError::AlreadyApplied`] if the entry is currently
    /// applied, and with [`HistoryError::NotApplied`] if it never was.
    pub fn redo(&mut self, target: &mut C::Target) -> Result<(), HistoryError<C::Error>> {
        match self.state {
            State::Undone => {
                self.payload.redo(target)?;
                self.state = State::Applied;
                Ok(())
            }
            State::Applied => Err(HistoryError::AlreadyApplied),
            State::Pending => Err(HistoryError::NotApplied),
        }
    }

    /// Returns the label of the wrapped command.
    pub fn text(&self) -> String {
        self.payload.text()
    }
}

impl<C> From<C> for Entry<C> {
    fn from(command: C) -> Self {
        Entry::new(Payload::Single(command))
    }
}

impl<C> From<Macro<C>> for Entry<C> {
    fn from(commands: Macro<C>) -> Self {
        Entry::new(Payload::Macro(commands))
    }
}

impl<C: Command> Display for Entry<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.text())
    }
}
