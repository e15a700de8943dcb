//! User commands typed on the client console.

use parlor_shared::{CommandLine, LOGIN_COMMAND, PortArgError, parse_port};

/// Client console command
///
/// Arguments are kept unchecked so the connection precondition can be
/// reported first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Quit,
    Logoff,
    SetHost(Option<String>),
    SetPort(Result<u16, PortArgError>),
    Login(Option<String>),
    GetHost,
    GetPort,
}

impl ClientCommand {
    /// Map a tokenized command line to a command, `None` for unknown names.
    pub fn parse(command: &CommandLine<'_>) -> Option<Self> {
        let parsed = match command.name() {
            "quit" => Self::Quit,
            "logoff" => Self::Logoff,
            "sethost" => Self::SetHost(command.arg(0).map(str::to_string)),
            "setport" => Self::SetPort(parse_port(command.arg(0))),
            LOGIN_COMMAND => Self::Login(command.arg(0).map(str::to_string)),
            "gethost" => Self::GetHost,
            "getport" => Self::GetPort,
            _ => return None,
        };
        Some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_shared::{InputLine, parse_input};

    fn parse(line: &str) -> Option<ClientCommand> {
        match parse_input(line) {
            InputLine::Command(command) => ClientCommand::parse(&command),
            InputLine::Text(_) => panic!("'{line}' is not a command line"),
        }
    }

    #[test]
    fn test_parse_commands() {
        // テスト項目: 各コマンドが引数付きで解析される
        // given (前提条件):
        // when (操作):
        // then (期待する結果):
        assert_eq!(parse("#quit"), Some(ClientCommand::Quit));
        assert_eq!(parse("#logoff"), Some(ClientCommand::Logoff));
        assert_eq!(
            parse("#sethost example.com"),
            Some(ClientCommand::SetHost(Some("example.com".to_string())))
        );
        assert_eq!(parse("#sethost"), Some(ClientCommand::SetHost(None)));
        assert_eq!(parse("#setport 9999"), Some(ClientCommand::SetPort(Ok(9999))));
        assert_eq!(
            parse("#login alice extra"),
            Some(ClientCommand::Login(Some("alice".to_string())))
        );
        assert_eq!(parse("#gethost"), Some(ClientCommand::GetHost));
        assert_eq!(parse("#getport"), Some(ClientCommand::GetPort));
    }

    #[test]
    fn test_parse_bad_port_and_unknown() {
        // テスト項目: 不正なポートはエラーのまま保持され、未知のコマンドは None になる
        // given (前提条件):
        // when (操作):
        // then (期待する結果):
        assert_eq!(
            parse("#setport"),
            Some(ClientCommand::SetPort(Err(PortArgError::Missing)))
        );
        assert!(matches!(
            parse("#setport abc"),
            Some(ClientCommand::SetPort(Err(PortArgError::Invalid(_))))
        ));
        assert_eq!(parse("#dance"), None);
        assert_eq!(parse("#"), None);
    }
}
