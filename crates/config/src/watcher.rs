use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Watches the page config and signals whenever it is written.
///
/// Bursts of filesystem events (editors often write in several steps)
/// collapse into a single pending signal.  The watch runs until this handle
/// is dropped.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_watcher, mut rx) = portal_config::ConfigWatcher::spawn("portal.toml");
/// while rx.recv().await.is_some() {
///     println!("page config changed; re-applying");
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
    task: JoinHandle<()>,
}

impl ConfigWatcher {
    /// Start watching `path` on the current Tokio runtime.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let task = tokio::spawn(watch_loop(path.clone(), tx));
        (Self { path, task }, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
        debug!("stopped watching {}", self.path.display());
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    let (events_tx, mut events) = mpsc::channel(16);

    // dropping the notify watcher ends the stream, so it lives as long as the loop
    let _fs = match fs_watcher(&path, events_tx) {
        Ok(watcher) => watcher,
        Err(e) => {
            error!("cannot watch '{}': {e}", path.display());
            return;
        }
    };
    info!("watching page config {}", path.display());

    while let Some(event) = events.recv().await {
        match event {
            Ok(event) if is_write(&event.kind) => {
                if !signal(&tx) {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => warn!("watcher error: {e}"),
        }
    }
}

fn fs_watcher(
    path: &Path,
    events: mpsc::Sender<notify::Result<Event>>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events.blocking_send(res);
        },
        Config::default().with_poll_interval(POLL_INTERVAL),
    )?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}

/// Queue a reload unless one is already pending.  Returns `false` once the
/// receiving side is gone.
fn signal(tx: &mpsc::Sender<()>) -> bool {
    match tx.try_send(()) {
        Ok(()) => true,
        Err(TrySendError::Full(())) => {
            debug!("reload already pending");
            true
        }
        Err(TrySendError::Closed(())) => false,
    }
}
