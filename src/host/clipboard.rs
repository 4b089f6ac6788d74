//! Host backed by the system clipboard (or the X11/Wayland primary selection).

use arboard::Clipboard;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use super::{HostError, SelectionSink, SelectionSource};

/// Which system buffer stands in for the document selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    /// The regular copy/paste clipboard.
    #[default]
    Clipboard,
    /// The Linux primary selection (highlighted text). Falls back to the
    /// clipboard on other platforms.
    Primary,
}

/// Selection host over `arboard`.
///
/// Clipboard calls can block while the selection owner answers, so every
/// call runs on the blocking pool.
pub struct ClipboardHost {
    clipboard: Arc<Mutex<Clipboard>>,
    kind: SelectionKind,
}

impl ClipboardHost {
    pub fn new(kind: SelectionKind) -> Result<Self, HostError> {
        let clipboard = Clipboard::new().map_err(|e| HostError::Unavailable(e.to_string()))?;
        Ok(Self {
            clipboard: Arc::new(Mutex::new(clipboard)),
            kind,
        })
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }
}

/// Run `f` against the shared handle on the blocking pool.
async fn run_blocking<S, T, F>(shared: &Arc<Mutex<S>>, f: F) -> Result<T, HostError>
where
    S: Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut S) -> T + Send + 'static,
{
    let shared = Arc::clone(shared);
    tokio::task::spawn_blocking(move || f(&mut *shared.lock()))
        .await
        .map_err(|e| HostError::Unavailable(format!("clipboard task failed: {}", e)))
}

fn get_text(clipboard: &mut Clipboard, kind: SelectionKind) -> Result<String, arboard::Error> {
    match kind {
        SelectionKind::Clipboard => clipboard.get_text(),
        SelectionKind::Primary => get_primary(clipboard),
    }
}

fn set_text(
    clipboard: &mut Clipboard,
    kind: SelectionKind,
    text: String,
) -> Result<(), arboard::Error> {
    match kind {
        SelectionKind::Clipboard => clipboard.set_text(text),
        SelectionKind::Primary => set_primary(clipboard, text),
    }
}

#[cfg(target_os = "linux")]
fn get_primary(clipboard: &mut Clipboard) -> Result<String, arboard::Error> {
    use arboard::{GetExtLinux, LinuxClipboardKind};
    clipboard.get().clipboard(LinuxClipboardKind::Primary).text()
}

#[cfg(target_os = "linux")]
fn set_primary(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    use arboard::{LinuxClipboardKind, SetExtLinux};
    clipboard
        .set()
        .clipboard(LinuxClipboardKind::Primary)
        .text(text)
}

#[cfg(not(target_os = "linux"))]
fn get_primary(clipboard: &mut Clipboard) -> Result<String, arboard::Error> {
    clipboard.get_text()
}

#[cfg(not(target_os = "linux"))]
fn set_primary(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

#[async_trait]
impl SelectionSource for ClipboardHost {
    async fn read_selection(&self) -> Result<Option<String>, HostError> {
        let kind = self.kind;
        match run_blocking(&self.clipboard, move |clipboard| get_text(clipboard, kind)).await? {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(HostError::Read(e.to_string())),
        }
    }
}

#[async_trait]
impl SelectionSink for ClipboardHost {
    async fn write_selection(&self, text: &str) -> Result<(), HostError> {
        let kind = self.kind;
        let text = text.to_string();
        run_blocking(&self.clipboard, move |clipboard| set_text(clipboard, kind, text))
            .await?
            .map_err(|e| HostError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn slow_call_does_not_stall_the_runtime() {
        let shared = Arc::new(Mutex::new(String::from("Helo wrold")));
        let ticks = Arc::new(AtomicUsize::new(0));

        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        let text = run_blocking(&shared, |selection| {
            std::thread::sleep(Duration::from_millis(200));
            selection.clone()
        })
        .await
        .unwrap();
        ticker.abort();

        assert_eq!(text, "Helo wrold");
        // On the single-threaded test runtime the ticker only advances if
        // the slow call ran elsewhere.
        assert!(ticks.load(Ordering::SeqCst) >= 5);
    }

    #[tokio::test]
    async fn panicking_call_reports_unavailable() {
        let shared = Arc::new(Mutex::new(0u32));
        let err = run_blocking(&shared, |_| -> u32 { panic!("owner went away") })
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::Unavailable(_)));
    }
}
