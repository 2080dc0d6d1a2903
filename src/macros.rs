//! Atomic macro commands.

use crate::Command;
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of commands applied and undone as one atomic unit.
///
/// Applying a macro applies the children in the order they were added. If a
/// child fails, the children applied before it are undone in reverse order
/// and the failure is returned, so the target ends up exactly as it was
/// before the macro ran. Undoing a macro undoes the children in reverse
/// order. From the history's point of view a macro is all-or-nothing.
///
/// The sequence is fixed once the macro has been handed to a history.
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::{History, Macro};
///
/// let mut light = Light::new();
/// let mut history: History<LightCommand> = History::new();
///
/// let movie = Macro::new("movie mode")
///     .with(LightCommand::TurnOn)
///     .with(LightCommand::SetBrightness { to: 30, previous: 0 });
/// history.perform(&mut light, movie).unwrap();
/// assert!(light.is_on());
/// assert_eq!(light.brightness(), 30);
///
/// history.undo(&mut light).unwrap();
/// assert!(!light.is_on());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct Macro<C> {
    commands: Vec<C>,
    text: String,
}

impl<C> Macro<C> {
    /// Returns an empty macro with the provided label.
    pub fn new(text: impl Into<String>) -> Macro<C> {
        Macro {
            commands: Vec::new(),
            text: text.into(),
        }
    }

    /// Adds a command to the end of the sequence.
    pub fn push(&mut self, command: C) {
        self.commands.push(command);
    }

    /// Adds a command and returns the macro, for building in one expression.
    pub fn with(mut self, command: C) -> Macro<C> {
        self.push(command);
        self
    }

    /// Returns the number of commands in the macro.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if the macro contains no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the label of the macro.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<C: Command> Macro<C> {
    pub(crate) fn apply(&mut self, target: &mut C::Target) -> Result<(), C::Error> {
        self.run(target, C::apply)
    }

    pub(crate) fn redo(&mut self, target: &mut C::Target) -> Result<(), C::Error> {
        self.run(target, C::redo)
    }

    /// Runs `f` over the children in order, rolling the applied prefix back
    /// if one of them fails. The original failure is what gets surfaced;
    /// errors during rollback are discarded.
    fn run(
        &mut self,
        target: &mut C::Target,
        f: fn(&mut C, &mut C::Target) -> Result<(), C::Error>,
    ) -> Result<(), C::Error> {
        for i in 0..self.commands.len() {
            if let Err(err) = f(&mut self.commands[i], target) {
                for command in self.commands[..i].iter_mut().rev() {
                    let _ = command.undo(target);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    pub(crate) fn undo(&mut self, target: &mut C::Target) -> Result<(), C::Error> {
        for i in (0..self.commands.len()).rev() {
            if let Err(err) = self.commands[i].undo(target) {
                for command in self.commands[i + 1..].iter_mut() {
                    let _ = command.redo(target);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<C> Extend<C> for Macro<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

impl<C> Display for Macro<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Tape {
        Push(char),
        Boom,
    }

    impl Command for Tape {
        type Target = String;
        type Error = &'static str;

        fn apply(&mut self, s: &mut String) -> Result<(), &'static str> {
            match self {
                Tape::Push(c) => {
                    s.push(*c);
                    Ok(())
                }
                Tape::Boom => Err("boom"),
            }
        }

        fn undo(&mut self, s: &mut String) -> Result<(), &'static str> {
            match self {
                Tape::Push(_) => {
                    s.pop().ok_or("tape is empty")?;
                    Ok(())
                }
                Tape::Boom => Ok(()),
            }
        }

        fn text(&self) -> String {
            match self {
                Tape::Push(c) => format!("push {c}"),
                Tape::Boom => String::from("boom"),
            }
        }
    }

    #[test]
    fn applies_in_order_and_undoes_in_reverse() {
        let mut tape = String::new();
        let mut batch = Macro::new("abc")
            .with(Tape::Push('a'))
            .with(Tape::Push('b'))
            .with(Tape::Push('c'));
        batch.apply(&mut tape).unwrap();
        assert_eq!(tape, "abc");
        batch.undo(&mut tape).unwrap();
        assert_eq!(tape, "");
        batch.redo(&mut tape).unwrap();
        assert_eq!(tape, "abc");
    }

    #[test]
    fn failed_child_rolls_back_prefix() {
        let mut tape = String::new();
        let mut batch = Macro::new("ab boom")
            .with(Tape::Push('a'))
            .with(Tape::Push('b'))
            .with(Tape::Boom);
        assert_eq!(batch.apply(&mut tape), Err("boom"));
        assert_eq!(tape, "");
    }

    #[test]
    fn empty_macro_is_a_no_op() {
        let mut tape = String::new();
        let mut batch = Macro::<Tape>::new("nothing");
        assert!(batch.is_empty());
        batch.apply(&mut tape).unwrap();
        batch.undo(&mut tape).unwrap();
        assert_eq!(tape, "");
    }
}
