//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::transform::OperationKind;

#[derive(Debug, Parser)]
#[command(
    name = "hammock",
    version,
    about = "Proofread, translate or re-tone selected text with a language model"
)]
pub struct Cli {
    /// Config file (default: ~/.config/hammock/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the credential-holding proxy.
    Serve {
        /// Bind address, overrides proxy.bind_addr.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Transform text once and print the result.
    Transform {
        /// proofread, translate or sentiment.
        operation: OperationKind,

        /// Target language or sentiment.
        #[arg(long, short)]
        param: Option<String>,

        /// Text to transform; read from stdin when omitted.
        text: Option<String>,

        /// Call the service directly instead of through the proxy.
        #[arg(long)]
        direct: bool,
    },

    /// Interactive panel over the system clipboard.
    Panel {
        /// Use the Linux primary selection (highlighted text) instead of the clipboard.
        #[arg(long)]
        primary: bool,

        /// Call the service directly instead of through the proxy.
        #[arg(long)]
        direct: bool,

        /// Poll period in milliseconds, overrides panel.poll_interval_ms.
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// List preset languages and sentiments.
    Presets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transform_with_param() {
        let cli = Cli::try_parse_from([
            "hammock", "transform", "translate", "--param", "French", "Hallo",
        ])
        .unwrap();

        match cli.command {
            Command::Transform {
                operation,
                param,
                text,
                direct,
            } => {
                assert_eq!(operation, OperationKind::Translate);
                assert_eq!(param.as_deref(), Some("French"));
                assert_eq!(text.as_deref(), Some("Hallo"));
                assert!(!direct);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_operation() {
        assert!(Cli::try_parse_from(["hammock", "transform", "summarize"]).is_err());
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::try_parse_from(["hammock", "serve", "--config", "/tmp/h.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.toml")));
        assert!(matches!(cli.command, Command::Serve { bind: None }));
    }
}
