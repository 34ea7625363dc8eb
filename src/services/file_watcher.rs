//! File watcher for watch mode.
//!
//! Monitors a job file (and the image it points at) and queues a
//! regeneration whenever either changes on disk. Bursts of editor writes
//! collapse into one request through the [`RegenerationQueue`].

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::scheduler::RegenerationQueue;

/// Watches a fixed set of files for modification.
pub struct FileWatcher {
    /// Files whose changes trigger a request
    files: HashSet<PathBuf>,
    /// Handle to the watcher (kept alive)
    _watcher: Option<RecommendedWatcher>,
    /// Flag indicating if watcher is active
    active: bool,
}

impl FileWatcher {
    /// Start watching `files`, sending a request on `queue` per change.
    ///
    /// Parent directories are watched rather than the files themselves so
    /// that editors replacing a file by rename are still noticed. Missing
    /// files are skipped with a debug log.
    pub fn new(files: impl IntoIterator<Item = PathBuf>, queue: RegenerationQueue<()>) -> Self {
        let files: HashSet<PathBuf> = files
            .into_iter()
            .filter_map(|path| match path.canonicalize() {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %e,
                        "Not watching missing file"
                    );
                    None
                }
            })
            .collect();

        if files.is_empty() {
            tracing::debug!("No files to watch, file watching disabled");
            return Self {
                files,
                _watcher: None,
                active: false,
            };
        }

        let (watcher, active) = match Self::start_watcher(&files, queue) {
            Ok(watcher) => {
                for path in &files {
                    tracing::info!(path = %path.display(), "File watcher started");
                }
                (Some(watcher), true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start file watcher");
                (None, false)
            }
        };

        Self {
            files,
            _watcher: watcher,
            active,
        }
    }

    fn start_watcher(
        files: &HashSet<PathBuf>,
        queue: RegenerationQueue<()>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let targets = files.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if is_relevant(&event, &targets) => {
                    tracing::debug!(paths = ?event.paths, "Watched file changed");
                    queue.request(());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "File watch error"),
            },
            Config::default(),
        )?;

        let dirs: HashSet<&Path> = files.iter().filter_map(|p| p.parent()).collect();
        for dir in dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }

        Ok(watcher)
    }

    /// Files being watched, canonicalized.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    /// Check if the watcher is active
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Content changes to one of `targets`; access events are ignored.
fn is_relevant(event: &Event, targets: &HashSet<PathBuf>) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| targets.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scheduler::debounced;
    use notify::event::{AccessKind, ModifyKind};
    use std::time::Duration;

    #[test]
    fn test_relevance_filter() {
        let target = PathBuf::from("/jobs/job.yaml");
        let targets: HashSet<PathBuf> = [target.clone()].into();

        let modify = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(target.clone());
        assert!(is_relevant(&modify, &targets));

        let other = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/jobs/other.yaml"));
        assert!(!is_relevant(&other, &targets));

        let access = Event::new(EventKind::Access(AccessKind::Any)).add_path(target);
        assert!(!is_relevant(&access, &targets));
    }

    #[test]
    fn test_missing_files_disable_watcher() {
        let (queue, _pending) = debounced::<()>(Duration::from_millis(10));
        let watcher = FileWatcher::new([PathBuf::from("/nonexistent/job.yaml")], queue);
        assert!(!watcher.is_active());
        assert_eq!(watcher.files().count(), 0);
    }

    #[test]
    fn test_watches_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let job = dir.path().join("job.yaml");
        std::fs::write(&job, "params: {}\n").unwrap();

        let (queue, _pending) = debounced::<()>(Duration::from_millis(10));
        let watcher = FileWatcher::new([job.clone(), job], queue);
        assert!(watcher.is_active());
        assert_eq!(watcher.files().count(), 1);
    }
}
