use super::error::{PersistenceError, PersistenceResult};
use super::files::{atomic_write, read_file};
use super::migration::{decode_document, encode_document};
use crate::domain::AppState;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type Subscriber = Box<dyn FnMut(&AppState)>;

/// Owns the application state and mirrors it to a JSON file.
///
/// Every mutation is applied to a copy, written out in full, and only then
/// swapped in. A failed write leaves the in-memory state as it was.
pub struct Store {
    path: PathBuf,
    state: AppState,
    subscribers: Vec<Subscriber>,
}

impl Store {
    /// Load state from `path`, or start from defaults if the file doesn't exist
    pub fn open<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = read_file(&path).map_err(|source| PersistenceError::Io {
            path: path.clone(),
            source,
        })?;

        let state = match content {
            Some(content) => {
                let state = decode_document(&path, &content)?;
                info!(path = %path.display(), logs = state.logs.len(), "loaded state");
                state
            }
            None => {
                info!(path = %path.display(), "no saved state, starting fresh");
                AppState::default()
            }
        };

        Ok(Self::with_state(path, state))
    }

    /// Wrap an existing state without reading from disk
    pub fn with_state(path: PathBuf, state: AppState) -> Self {
        Self {
            path,
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to a copy of the state, persist it, then swap it in.
    /// Returns whatever `f` returned.
    pub fn mutate<F, T>(&mut self, f: F) -> PersistenceResult<T>
    where
        F: FnOnce(&mut AppState) -> T,
    {
        let mut next = self.state.clone();
        let result = f(&mut next);
        self.replace(next)?;
        Ok(result)
    }

    /// Replace the whole state and persist it
    pub fn replace(&mut self, next: AppState) -> PersistenceResult<()> {
        self.write(&next)?;
        self.state = next;
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
        Ok(())
    }

    /// Register a callback run after every successful mutation
    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&AppState) + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    /// Write the current state out again
    pub fn flush(&self) -> PersistenceResult<()> {
        self.write(&self.state)
    }

    fn write(&self, state: &AppState) -> PersistenceResult<()> {
        let json = encode_document(state)?;
        atomic_write(&self.path, &json).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = json.len(), "state persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LogDraft;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_open_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let store = Store::open(&path).unwrap();

        assert!(store.state().logs.is_empty());
        assert!(!store.state().is_snoozed);
        // Nothing written until the first mutation
        assert!(!path.exists());
    }

    #[test]
    fn test_mutate_persists_and_reloads() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let now = Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        let mut store = Store::open(&path).unwrap();
        let inserted = store.mutate(|s| s.quick_confirm(now)).unwrap();
        assert!(inserted);
        store.mutate(|s| s.snooze(15, now)).unwrap();

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing-dir").join("state.json");
        let now = Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        let mut store = Store::with_state(path, AppState::default());
        let result = store.mutate(|s| {
            s.save_log(LogDraft::default(), now);
        });

        assert!(matches!(result, Err(PersistenceError::Io { .. })));
        assert!(store.state().logs.is_empty());
    }

    #[test]
    fn test_open_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = Store::open(&path).err().unwrap();
        assert!(err.needs_reset());
    }

    #[test]
    fn test_subscribers_notified() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let mut store = Store::open(&path).unwrap();

        let seen = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&seen);
        store.subscribe(move |state| counter.set(state.settings.inventory_count as usize));

        store.mutate(|s| s.settings.inventory_count = 3).unwrap();
        assert_eq!(seen.get(), 3);
    }
}
