//! Entry points for the CLI subcommands.

use anyhow::{bail, Context};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use crate::config::{Config, ConfigStore, ConfigWatcher, Endpoint, DEFAULT_DEBOUNCE};
use crate::host::{ClipboardHost, SelectionKind};
use crate::panel::{PanelController, PanelPhase, PanelState, SelectionPoller};
use crate::proxy::ProxyServer;
use crate::transform::{
    ChatCompletionClient, Operation, OperationKind, TransformError, TransformService, LANGUAGES,
    SENTIMENTS,
};

/// `hammock serve`
pub async fn serve(store: ConfigStore) -> anyhow::Result<()> {
    let config = store.get();
    if !config.service.is_configured() {
        bail!("No API key configured; set HAMMOCK_API_KEY or OPENAI_API_KEY, or service.api_key");
    }

    // Hot reload is best effort; the proxy still runs on the loaded config.
    let _watcher = match ConfigWatcher::start(store.clone(), DEFAULT_DEBOUNCE) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            tracing::warn!(error = %e, "Config hot reload disabled");
            None
        }
    };

    let mut server = ProxyServer::new(store).context("Failed to create proxy server")?;
    let addr = server.try_bind().await.context("Failed to bind proxy")?;
    tracing::info!(
        addr = %addr,
        model = %config.service.model,
        upstream = %config.service.base_url,
        "hammock proxy ready"
    );
    println!("hammock proxy listening on http://{}", addr);

    server.run().await.context("Proxy server failed")?;
    Ok(())
}

/// `hammock transform`
pub async fn transform_once(
    config: &Config,
    kind: OperationKind,
    parameter: Option<&str>,
    text: Option<String>,
) -> anyhow::Result<()> {
    let operation = Operation::new(kind, parameter)?;

    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read text from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        return Err(TransformError::EmptySelection.into());
    }

    let client = ChatCompletionClient::from_config(config)?;
    let result = client.complete(&operation.instruction(), &text).await?;
    println!("{}", result);
    Ok(())
}

/// `hammock presets`
pub fn print_presets() {
    for kind in OperationKind::ALL {
        if kind.takes_parameter() {
            println!("{} ({}): {}", kind.label(), kind, kind.presets().join(", "));
        }
    }
}

/// One line typed into the interactive panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Request {
        kind: OperationKind,
        parameter: Option<String>,
    },
    Accept,
    Discard,
    Dismiss,
    Show,
    Help,
    Quit,
}

impl FromStr for PanelCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        match word.to_lowercase().as_str() {
            "accept" => Ok(PanelCommand::Accept),
            "discard" => Ok(PanelCommand::Discard),
            "dismiss" => Ok(PanelCommand::Dismiss),
            "show" | "" => Ok(PanelCommand::Show),
            "help" | "?" => Ok(PanelCommand::Help),
            "quit" | "exit" => Ok(PanelCommand::Quit),
            other => match other.parse::<OperationKind>() {
                Ok(kind) => Ok(PanelCommand::Request {
                    kind,
                    parameter: rest.map(String::from),
                }),
                Err(_) => Err(format!("Unknown command '{}', type 'help'", other)),
            },
        }
    }
}

const PANEL_HELP: &str = "\
Commands:
  proofread                 fix spelling and grammar
  translate <language>      e.g. translate French
  sentiment <sentiment>     e.g. sentiment Friendly
  accept                    replace the selection with the transformation
  discard                   drop the transformation
  dismiss                   clear the error message
  show                      show the panel
  quit";

/// Render the panel state as text.
pub fn render_panel(state: &PanelState) -> String {
    let mut out = String::new();
    out.push_str("Select any text fragment\n");

    let phase = match state.phase() {
        PanelPhase::Idle if state.can_request() => "ready for an operation",
        PanelPhase::Idle => "waiting for a selection",
        PanelPhase::Pending => state.status_label().unwrap_or_default(),
        PanelPhase::Ready => "transformation ready, 'accept' or 'discard'",
    };
    out.push_str(&format!("[{}]\n", phase));

    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    out.push_str(&format!("{}:\n{}\n", state.displayed_label(), state.displayed_text()));
    out
}

/// `hammock panel`
pub async fn run_panel(config: &Config, selection_kind: SelectionKind) -> anyhow::Result<()> {
    let host = Arc::new(ClipboardHost::new(selection_kind).context("Clipboard is not available")?);
    let client = ChatCompletionClient::from_config(config)?;
    if config.panel.endpoint == Endpoint::Proxy {
        tracing::info!(proxy = %config.panel.proxy_url, "Sending requests through proxy");
    }

    let controller = PanelController::new(Arc::new(client), host.clone());
    let poller = SelectionPoller::new(
        host,
        controller.clone(),
        Duration::from_millis(config.panel.poll_interval_ms),
    )
    .spawn();

    println!("{}", PANEL_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<PanelCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            PanelCommand::Request { kind, parameter } => {
                // Runs in the background so the panel stays responsive;
                // a second request meanwhile is refused as busy.
                let task_controller = controller.clone();
                tokio::spawn(async move {
                    match task_controller
                        .transform_selection(kind, parameter.as_deref())
                        .await
                    {
                        Ok(_) => println!("{}", render_panel(&task_controller.snapshot())),
                        Err(e) => println!("Error: {}", e.user_message()),
                    }
                });
            }
            PanelCommand::Accept => match controller.accept_transformation().await {
                Ok(()) => println!("Selection replaced"),
                Err(e) => println!("Error: {}", e.user_message()),
            },
            PanelCommand::Discard => controller.discard_transformation(),
            PanelCommand::Dismiss => controller.dismiss_error(),
            PanelCommand::Show => println!("{}", render_panel(&controller.snapshot())),
            PanelCommand::Help => {
                println!("{}", PANEL_HELP);
                println!("Languages: {}", LANGUAGES.join(", "));
                println!("Sentiments: {}", SENTIMENTS.join(", "));
            }
            PanelCommand::Quit => break,
        }
    }

    poller.stop().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operation_with_parameter() {
        assert_eq!(
            "translate  French ".parse::<PanelCommand>().unwrap(),
            PanelCommand::Request {
                kind: OperationKind::Translate,
                parameter: Some("French".to_string()),
            }
        );
        assert_eq!(
            "sentiment more friendly".parse::<PanelCommand>().unwrap(),
            PanelCommand::Request {
                kind: OperationKind::Sentiment,
                parameter: Some("more friendly".to_string()),
            }
        );
    }

    #[test]
    fn parses_proofread_without_parameter() {
        assert_eq!(
            "Proofread".parse::<PanelCommand>().unwrap(),
            PanelCommand::Request {
                kind: OperationKind::Proofread,
                parameter: None,
            }
        );
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!("accept".parse::<PanelCommand>().unwrap(), PanelCommand::Accept);
        assert_eq!("".parse::<PanelCommand>().unwrap(), PanelCommand::Show);
        assert_eq!("exit".parse::<PanelCommand>().unwrap(), PanelCommand::Quit);
        assert!("fly".parse::<PanelCommand>().is_err());
    }

    #[test]
    fn render_shows_selection_then_transformation() {
        let mut state = PanelState {
            selection: "Helo wrold".into(),
            ..PanelState::default()
        };
        let rendered = render_panel(&state);
        assert!(rendered.contains("Selection:\nHelo wrold"));
        assert!(rendered.contains("ready for an operation"));

        state.transformation = "Hello world".into();
        let rendered = render_panel(&state);
        assert!(rendered.contains("Transformation:\nHello world"));
        assert!(rendered.contains("accept"));
    }

    #[test]
    fn render_shows_spinner_label_and_error() {
        let state = PanelState {
            busy: true,
            error: Some("network down".into()),
            ..PanelState::default()
        };
        let rendered = render_panel(&state);
        assert!(rendered.contains("Querying ChatGPT..."));
        assert!(rendered.contains("Error: network down"));
    }
}
