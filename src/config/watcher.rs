//! Config hot-reload for the proxy.
//!
//! Watches the config file's directory and reloads the `ConfigStore` after
//! edits settle. The proxy reads the store per request, so model, service
//! URL, key, timeout and access token changes apply to the next request.
//! The bind address only applies on restart.

use std::ffi::OsString;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::config::store::ConfigStore;

/// Quiet period after the last file event before reloading.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("Failed to create file watcher: {0}")]
    WatcherInit(#[from] notify::Error),

    #[error("Config path has no parent directory")]
    NoParentDir,
}

/// Keeps the file watch alive. Dropping it stops reloading.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    _debounce_handle: thread::JoinHandle<()>,
}

impl ConfigWatcher {
    pub fn start(store: ConfigStore, debounce: Duration) -> Result<Self, WatcherError> {
        let config_path = store.path().to_path_buf();
        let watch_dir = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(WatcherError::NoParentDir)?;
        let config_filename = config_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();

        let (raw_tx, raw_rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                if let Ok(event) = result {
                    let _ = raw_tx.send(event);
                }
            },
            notify::Config::default(),
        )?;

        // The directory, not the file: editors replace files on save.
        watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %config_path.display(), "Watching config for changes");

        let debounce_handle = thread::spawn(move || {
            debounce_loop(raw_rx, store, config_filename, debounce);
        });

        Ok(Self {
            _watcher: watcher,
            _debounce_handle: debounce_handle,
        })
    }
}

fn debounce_loop(
    rx: mpsc::Receiver<Event>,
    store: ConfigStore,
    config_filename: OsString,
    debounce: Duration,
) {
    let mut pending_since: Option<Instant> = None;

    loop {
        let wait = match pending_since {
            Some(last) => debounce.saturating_sub(last.elapsed()),
            None => Duration::from_secs(60),
        };

        match rx.recv_timeout(wait) {
            Ok(event) => {
                if is_config_event(&event, &config_filename) {
                    pending_since = Some(Instant::now());
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending_since.is_some_and(|last| last.elapsed() >= debounce) {
                    // Failures are logged by the store, which keeps the old config.
                    let _ = store.reload();
                    pending_since = None;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn is_config_event(event: &Event, config_filename: &OsString) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );

    relevant
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(config_filename.as_os_str()))
}
