use crate::error::Result;
use crate::processor::{ControllerProcessor, ProcessReport};
use crate::project::is_relevant_path;
use crate::project::state::ProjectState;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);

struct FsWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl FsWatcher {
    fn new(root: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    async fn next_event_async(&mut self) -> Option<Event> {
        loop {
            match self.rx.recv().await? {
                Ok(event) => return Some(event),
                Err(e) => tracing::warn!("File watcher error: {}", e),
            }
        }
    }
}

/// Generates once, then regenerates whenever Java sources under `root`
/// change, until `cancel_token` is cancelled.
///
/// `on_report` is called after every run, including the first.
pub async fn watch_project<F>(
    root: PathBuf,
    processor: ControllerProcessor,
    cancel_token: CancellationToken,
    mut on_report: F,
) -> Result<()>
where
    F: FnMut(&ProcessReport),
{
    let mut state = ProjectState::new(&root)?;
    let stats = tokio::task::block_in_place(|| state.refresh());
    let report = processor.process_state(&state, stats)?;
    on_report(&report);

    let mut watcher = FsWatcher::new(&root)?;
    tracing::info!("Started watching {}", root.display());
    let mut pending_events: Vec<Event> = Vec::new();

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                break;
            }
            event = watcher.next_event_async() => {
                match event {
                    Some(e) => pending_events.push(e),
                    None => break,
                }
            }
            _ = tokio::time::sleep(DEBOUNCE_INTERVAL), if !pending_events.is_empty() => {
                let paths: HashSet<&PathBuf> = pending_events
                    .iter()
                    .flat_map(|e| e.paths.iter())
                    .filter(|p| is_relevant_path(&root, p))
                    .collect();
                let changed = paths.len();
                pending_events.clear();

                if changed == 0 {
                    continue;
                }
                tracing::info!("Detected changes in {} files. Regenerating...", changed);

                let stats = tokio::task::block_in_place(|| state.refresh());
                if stats.is_unchanged() {
                    continue;
                }
                match processor.process_state(&state, stats) {
                    Ok(report) => on_report(&report),
                    Err(err) => tracing::error!("Failed to regenerate: {}", err),
                }
            }
        }
    }

    tracing::info!("File watcher ended for {}", root.display());
    Ok(())
}
