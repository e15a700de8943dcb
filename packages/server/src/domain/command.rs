//! Typed forms of the two kinds of text the server interprets: operator console
//! commands and inbound client payloads.

use parlor_shared::{CommandLine, InputLine, LOGIN_COMMAND, PortArgError, parse_input, parse_port};

/// Operator console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCommand {
    Quit,
    Stop,
    Close,
    /// The argument is checked only after the listening precondition
    SetPort(Result<u16, PortArgError>),
    Start,
    GetPort,
}

impl ServerCommand {
    /// Map a tokenized command line to a command, `None` for unknown names.
    pub fn parse(command: &CommandLine<'_>) -> Option<Self> {
        let parsed = match command.name() {
            "quit" => Self::Quit,
            "stop" => Self::Stop,
            "close" => Self::Close,
            "setport" => Self::SetPort(parse_port(command.arg(0))),
            "start" => Self::Start,
            "getport" => Self::GetPort,
            _ => return None,
        };
        Some(parsed)
    }
}

/// Operator console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput<'a> {
    Command(ServerCommand),
    /// `#` line naming no known command
    Unknown(&'a str),
    /// Server-originated chat text
    Chat(&'a str),
}

impl<'a> ConsoleInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        match parse_input(line) {
            InputLine::Command(command) => match ServerCommand::parse(&command) {
                Some(parsed) => Self::Command(parsed),
                None => Self::Unknown(line),
            },
            InputLine::Text(text) => Self::Chat(text),
        }
    }
}

/// Payload received from a client connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload<'a> {
    /// `#login <id>`; `None` when the identifier is missing
    Login(Option<&'a str>),
    /// Anything else, verbatim
    Chat(&'a str),
}

impl<'a> InboundPayload<'a> {
    pub fn parse(payload: &'a str) -> Self {
        match parse_input(payload) {
            InputLine::Command(command) if command.name() == LOGIN_COMMAND => {
                Self::Login(command.arg(0))
            }
            _ => Self::Chat(payload),
        }
    }
}
