//! Command line options.

use clap::Parser;

/// Command line options of `hearth-client`
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Chat in a Hearth room from the terminal")]
pub struct ClientArgs {
    /// WebSocket endpoint of the server
    #[arg(long, env = "HEARTH_URL", default_value = "ws://127.0.0.1:8080/ws")]
    pub url: String,

    /// Display name to join with
    #[arg(long)]
    pub name: String,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_required() {
        // テスト項目: --name は必須
        // when (操作):
        let result = ClientArgs::try_parse_from(["hearth-client"]);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_default_url() {
        // テスト項目: --url のデフォルトはローカルのサーバー
        // when (操作):
        let args = ClientArgs::try_parse_from(["hearth-client", "--name", "Ayşe"]).unwrap();

        // then (期待する結果):
        assert_eq!(args.name, "Ayşe");
        assert!(args.url.ends_with("/ws"));
    }
}
