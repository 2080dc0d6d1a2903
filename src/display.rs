//! Configurable formatting of the history.

use crate::entry::Entry;
use crate::history::History;
use crate::Command;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "colored")]
use colored::Colorize;
use core::fmt::{self, Formatter};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub position: bool,
    pub head: bool,
    #[cfg(feature = "chrono")]
    pub timestamp: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            position: true,
            head: true,
            #[cfg(feature = "chrono")]
            timestamp: true,
        }
    }
}

impl Format {
    fn fmt_position(self, f: &mut Formatter, position: usize) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, "{}", position.to_string().yellow().bold());
        }
        write!(f, "{position}")
    }

    fn fmt_head(self, f: &mut Formatter) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}{}{}", "[".yellow(), "HEAD".cyan().bold(), "]".yellow());
        }
        f.write_str(" [HEAD]")
    }

    #[cfg(feature = "chrono")]
    fn fmt_timestamp(self, f: &mut Formatter, timestamp: &DateTime<Utc>) -> fmt::Result {
        let timestamp = timestamp.format("%F %T%.3f");
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", timestamp.to_string().yellow());
        }
        write!(f, " {timestamp}")
    }
}

/// Configurable display formatting for a history.
///
/// Created by [`History::display`]. Lists the entries most recent first,
/// with a `HEAD` marker between the performed and the undone stack; entries
/// above `HEAD` are the ones a redo would reach. Position `0` is the state
/// the target had before anything was performed.
///
/// # Examples
/// ```
/// use rewind::light::{Light, LightCommand};
/// use rewind::History;
///
/// let mut light = Light::new();
/// let mut history = History::new();
/// history.perform(&mut light, LightCommand::TurnOn).unwrap();
/// history.perform(&mut light, LightCommand::TurnOff).unwrap();
/// history.undo(&mut light).unwrap();
///
/// println!("{}", history.display());
/// ```
pub struct Display<'a, C, S> {
    history: &'a History<C, S>,
    format: Format,
}

impl<C, S> Display<'_, C, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show the position of each entry (on by default).
    pub fn position(&mut self, on: bool) -> &mut Self {
        self.format.position = on;
        self
    }

    /// Show the `HEAD` marker (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show the creation time of each entry (on by default).
    ///
    /// Requires the `chrono` feature to be enabled.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&mut self, on: bool) -> &mut Self {
        self.format.timestamp = on;
        self
    }
}

impl<C: Command, S> Display<'_, C, S> {
    fn fmt_entry(
        &self,
        f: &mut Formatter,
        position: usize,
        is_head: bool,
        entry: Option<&Entry<C>>,
    ) -> fmt::Result {
        f.write_str("* ")?;
        if self.format.position {
            self.format.fmt_position(f, position)?;
        }
        #[cfg(feature = "chrono")]
        if self.format.timestamp {
            if let Some(entry) = entry {
                self.format.fmt_timestamp(f, &entry.timestamp)?;
            }
        }
        if self.format.head && is_head {
            self.format.fmt_head(f)?;
        }
        if let Some(entry) = entry {
            write!(f, " {}", entry.text())?;
        }
        writeln!(f)
    }
}

impl<'a, C, S> From<&'a History<C, S>> for Display<'a, C, S> {
    fn from(history: &'a History<C, S>) -> Self {
        Display {
            history,
            format: Format::default(),
        }
    }
}

impl<C: Command, S> fmt::Display for Display<'_, C, S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let done = self.history.done.len();
        let total = done + self.history.undone.len();
        // The most recently undone entry sits right above HEAD.
        for position in (1..=total).rev() {
            let entry = if position <= done {
                &self.history.done[position - 1]
            } else {
                &self.history.undone[total - position]
            };
            self.fmt_entry(f, position, position == done, Some(entry))?;
        }
        self.fmt_entry(f, 0, done == 0, None)
    }
}
