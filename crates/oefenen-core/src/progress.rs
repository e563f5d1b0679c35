//! Key/value repository for learner progress.
//!
//! Callers get a [`ProgressStore`] injected rather than reaching for a
//! global store, so grading and gamification never depend on where the
//! data lives.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::gamification::LearnerProgress;

/// Load and save serialized values by key.
pub trait ProgressStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing what was there.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, mostly for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read progress from {}", path.display()))?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        std::fs::write(&path, value)
            .with_context(|| format!("failed to write progress to {}", path.display()))?;
        Ok(())
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        anyhow::bail!("progress key is empty");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        anyhow::bail!("invalid progress key: {key:?}");
    }
    Ok(())
}

/// Storage key for a learner. Letters, digits and `_` are kept; every other
/// byte of the trimmed UTF-8 name becomes `-xx` in hex, so distinct names
/// never share a key and the key is always a valid file name.
pub fn progress_key(learner: &str) -> Result<String> {
    let learner = learner.trim();
    if learner.is_empty() {
        anyhow::bail!("learner name is empty");
    }

    let mut key = String::from("progress-");
    for byte in learner.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            key.push(byte as char);
        } else {
            key.push_str(&format!("-{byte:02x}"));
        }
    }
    Ok(key)
}

/// Load a learner's progress, starting fresh when nothing is stored yet.
pub fn load_progress(store: &dyn ProgressStore, learner: &str) -> Result<LearnerProgress> {
    match store.load(&progress_key(learner)?)? {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("failed to parse progress for learner {learner}")),
        None => Ok(LearnerProgress::new(learner)),
    }
}

/// Persist a learner's progress under its learner key.
pub fn save_progress(store: &dyn ProgressStore, progress: &LearnerProgress) -> Result<()> {
    let json = serde_json::to_string_pretty(progress).context("failed to serialize progress")?;
    store.save(&progress_key(&progress.learner)?, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load("a").unwrap().is_none());
        store.save("a", "1").unwrap();
        store.save("a", "2").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("progress"));

        assert!(store.load("anna").unwrap().is_none());
        store.save("anna", "{}").unwrap();
        assert_eq!(store.load("anna").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("progress").join("anna.json").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.save("../escape", "{}").is_err());
        assert!(store.load("a/b").is_err());
        assert!(store.load("").is_err());
    }

    #[test]
    fn progress_defaults_when_missing() {
        let store = MemoryStore::new();
        let progress = load_progress(&store, "sam").unwrap();
        assert_eq!(progress.learner, "sam");
        assert!(progress.attempts.is_empty());
    }

    #[test]
    fn progress_roundtrip_through_store() {
        let store = MemoryStore::new();
        let mut progress = LearnerProgress::new("sam");
        progress.current_streak = 4;
        save_progress(&store, &progress).unwrap();

        let loaded = load_progress(&store, "sam").unwrap();
        assert_eq!(loaded.current_streak, 4);
    }

    #[test]
    fn progress_keys_are_file_safe_and_distinct() {
        assert_eq!(progress_key("sam").unwrap(), "progress-sam");
        assert_eq!(progress_key("Anna de Vries").unwrap(), "progress-Anna-20de-20Vries");
        assert_eq!(progress_key("Jörg").unwrap(), "progress-J-c3-b6rg");
        assert_ne!(progress_key("anna-de").unwrap(), progress_key("anna de").unwrap());
        assert_eq!(progress_key("../x").unwrap(), "progress--2e-2e-2fx");
        assert!(progress_key("   ").is_err());

        for name in ["Anna de Vries", "Jörg", "../x", "a/b\\c"] {
            assert!(validate_key(&progress_key(name).unwrap()).is_ok());
        }
    }

    #[test]
    fn progress_for_names_with_spaces_and_diacritics() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        for name in ["Anna de Vries", "Jörg"] {
            let mut progress = LearnerProgress::new(name);
            progress.current_streak = 2;
            save_progress(&store, &progress).unwrap();

            let loaded = load_progress(&store, name).unwrap();
            assert_eq!(loaded.learner, name);
            assert_eq!(loaded.current_streak, 2);
        }
        assert!(dir.path().join("progress-Anna-20de-20Vries.json").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
