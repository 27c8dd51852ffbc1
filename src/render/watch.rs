//! File watching for automatic re-rendering.
//!
//! Uses `notify-debouncer-full` to watch markdown files for changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{
    Config as NotifyConfig, EventKind, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher,
};
use notify_debouncer_full::{
    DebounceEventResult, Debouncer, RecommendedCache, new_debouncer, new_debouncer_opt,
};

use crate::config::WatchConfig;

#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    #[error("nothing to watch: {0} has no parent directory")]
    NoParent(PathBuf),
}

/// Events sent from the file watcher.
#[derive(Debug)]
pub enum WatchEvent {
    /// Watched files changed, re-render needed.
    Changed(Vec<PathBuf>),
    /// Watcher error occurred.
    Error(String),
}

/// Decides which changed paths matter.
#[derive(Debug, Clone)]
pub struct PathFilter {
    targets: Vec<PathBuf>,
}

impl PathFilter {
    pub fn new(targets: Vec<PathBuf>) -> Self {
        Self { targets }
    }

    /// Whether a changed path is one of the watched files.
    pub fn matches(&self, path: &Path) -> bool {
        self.targets.iter().any(|target| target == path)
    }
}

/// A file watcher that can use either native or polling backend.
pub enum FileWatcher {
    /// Native file system watcher (recommended for local editing).
    Native {
        _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
        rx: Receiver<WatchEvent>,
    },
    /// Polling-based watcher (for network filesystems, Docker, etc.).
    Polling {
        _debouncer: Debouncer<PollWatcher, RecommendedCache>,
        rx: Receiver<WatchEvent>,
    },
}

impl FileWatcher {
    /// Watch the given files.
    ///
    /// Each file's parent directory is watched non-recursively, so editors
    /// that save by replacing the file are still noticed.
    pub fn new(config: &WatchConfig, files: &[PathBuf]) -> Result<Self, WatchError> {
        let debounce_timeout = Duration::from_millis(config.debounce_ms);
        let filter = PathFilter::new(files.to_vec());

        let (tx, rx) = mpsc::channel();

        let callback = move |result: DebounceEventResult| match result {
            Ok(events) => {
                let mut changed: Vec<PathBuf> = events
                    .iter()
                    .filter(|event| is_relevant_event(&event.kind))
                    .flat_map(|event| event.paths.iter())
                    .filter(|path| filter.matches(path))
                    .cloned()
                    .collect();
                changed.dedup();

                if !changed.is_empty() {
                    let _ = tx.send(WatchEvent::Changed(changed));
                }
            }
            Err(errors) => {
                for e in errors {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            }
        };

        if config.poll {
            let poll_interval = Duration::from_millis(config.poll_interval_ms);
            let notify_config = NotifyConfig::default().with_poll_interval(poll_interval);

            let mut debouncer = new_debouncer_opt::<_, PollWatcher, RecommendedCache>(
                debounce_timeout,
                None,
                callback,
                RecommendedCache::default(),
                notify_config,
            )?;

            watch_parents(&mut debouncer, files)?;

            Ok(FileWatcher::Polling {
                _debouncer: debouncer,
                rx,
            })
        } else {
            let mut debouncer = new_debouncer(debounce_timeout, None, callback)?;

            watch_parents(&mut debouncer, files)?;

            Ok(FileWatcher::Native {
                _debouncer: debouncer,
                rx,
            })
        }
    }

    /// Receive the next watch event (blocking).
    pub fn recv(&self) -> Option<WatchEvent> {
        match self {
            FileWatcher::Native { rx, .. } => rx.recv().ok(),
            FileWatcher::Polling { rx, .. } => rx.recv().ok(),
        }
    }
}

fn watch_parents<W: Watcher, C: notify_debouncer_full::FileIdCache>(
    debouncer: &mut Debouncer<W, C>,
    files: &[PathBuf],
) -> Result<(), WatchError> {
    for file in files {
        let parent = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| WatchError::NoParent(file.clone()))?;
        debouncer.watch(parent, RecursiveMode::NonRecursive)?;
    }
    Ok(())
}

/// Check if an event kind is relevant for re-rendering.
fn is_relevant_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_))
            | EventKind::Modify(ModifyKind::Any)
    )
}
