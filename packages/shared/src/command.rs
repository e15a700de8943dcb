//! Reserved-marker command syntax shared by the server console and the client.
//!
//! A line that begins with [`COMMAND_MARKER`] is a command line. It is split on
//! whitespace: the first token (without the marker) names the command, the
//! remaining tokens are positional arguments. Everything else is chat text.
//! Operators and users rely on this syntax, so it must not drift between the
//! two sides.

use thiserror::Error;

/// Leading character of every command line.
pub const COMMAND_MARKER: char = '#';

/// One line of console or wire input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine<'a> {
    /// `#name arg1 arg2 ...`
    Command(CommandLine<'a>),
    /// Anything that does not start with the marker, untouched.
    Text(&'a str),
}

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    name: &'a str,
    args: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
    /// Command name without the marker (`"quit"` for `#quit`).
    ///
    /// A bare `#` yields an empty name, which matches no command.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Positional argument `index` (0-based, the command token excluded).
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    pub fn args(&self) -> &[&'a str] {
        &self.args
    }
}

/// Classify a line as a command or plain text.
pub fn parse_input(line: &str) -> InputLine<'_> {
    let Some(rest) = line.strip_prefix(COMMAND_MARKER) else {
        return InputLine::Text(line);
    };

    // "# quit" has an empty command token, same as a bare "#".
    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (name, tail) = rest.split_at(name_end);

    InputLine::Command(CommandLine {
        name,
        args: tail.split_whitespace().collect(),
    })
}

/// Why a port argument could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortArgError {
    #[error("port argument is missing")]
    Missing,

    #[error("port argument is not a valid port number: {0}")]
    Invalid(String),
}

/// Parse the optional port argument of a `setport` command.
pub fn parse_port(arg: Option<&str>) -> Result<u16, PortArgError> {
    let raw = arg.ok_or(PortArgError::Missing)?;
    raw.parse::<u16>()
        .map_err(|_| PortArgError::Invalid(raw.to_string()))
}
