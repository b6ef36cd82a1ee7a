//! Parsing of typed input lines.

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the text as a chat message
    Say(String),
    /// Print the local roster
    Who,
    /// Ask the server for the full history
    Sync,
    /// Leave the room and exit
    Quit,
    /// Blank line
    Nothing,
    /// Unrecognized slash command
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Nothing;
        }
        match trimmed {
            "/who" => Command::Who,
            "/sync" => Command::Sync,
            "/quit" | "/leave" => Command::Quit,
            // "//text" sends "/text"
            _ if trimmed.starts_with("//") => Command::Say(trimmed[1..].to_string()),
            _ if trimmed.starts_with('/') => Command::Unknown(trimmed.to_string()),
            _ => Command::Say(line.trim_end().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        // テスト項目: スラッシュコマンドと通常のテキストを区別できる
        assert_eq!(Command::parse("/who"), Command::Who);
        assert_eq!(Command::parse(" /sync "), Command::Sync);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/leave"), Command::Quit);
        assert_eq!(Command::parse("   "), Command::Nothing);
        assert_eq!(Command::parse("/kick bob"), Command::Unknown("/kick bob".to_string()));
    }

    #[test]
    fn test_parse_text_keeps_leading_spaces() {
        // テスト項目: 通常のテキストは先頭の空白を保ったまま送られる
        assert_eq!(Command::parse("  merhaba\n"), Command::Say("  merhaba".to_string()));
    }

    #[test]
    fn test_double_slash_escapes() {
        // テスト項目: "//" で始まる行はスラッシュ付きのテキストとして送られる
        assert_eq!(Command::parse("//who"), Command::Say("/who".to_string()));
    }
}
