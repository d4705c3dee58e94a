use crate::foundation::error::{ReelError, ReelResult};
use crate::record::model::AnimationRecord;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Load-by-identifier storage for animation records.
///
/// Implementations report I/O and parse failures as [`ReelError::RecordLoad`] and structural
/// mismatches as [`ReelError::CorruptRecord`].
pub trait RecordStore {
    /// Fetch the record stored for `subject_id`.
    fn fetch(&self, subject_id: &str) -> impl Future<Output = ReelResult<AnimationRecord>>;
}

/// Directory-backed store resolving `<root>/<subject>_animation.json`.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path used for `subject_id`.
    pub fn path_for(&self, subject_id: &str) -> PathBuf {
        self.root.join(format!("{subject_id}_animation.json"))
    }

    /// Persist `record` under its subject id and return the written path.
    pub async fn save(&self, record: &AnimationRecord) -> ReelResult<PathBuf> {
        check_subject_id(record.subject_id())?;
        let path = self.path_for(record.subject_id());
        let json = record.to_json_pretty()?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| anyhow::anyhow!("create store dir '{}': {e}", self.root.display()))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| anyhow::anyhow!("write record '{}': {e}", path.display()))?;
        tracing::debug!(path = %path.display(), frames = record.frame_count(), "saved record");
        Ok(path)
    }
}

impl RecordStore for DirStore {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch(&self, subject_id: &str) -> ReelResult<AnimationRecord> {
        check_subject_id(subject_id)
            .map_err(|e| ReelError::record_load(subject_id, e.to_string()))?;
        let path = self.path_for(subject_id);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            ReelError::record_load(subject_id, format!("read '{}': {e}", path.display()))
        })?;
        AnimationRecord::from_slice(&bytes).map_err(|e| match e {
            ReelError::CorruptRecord(_) => e,
            other => ReelError::record_load(subject_id, other.to_string()),
        })
    }
}

fn check_subject_id(id: &str) -> ReelResult<()> {
    if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(ReelError::validation(format!(
            "subject id '{id}' is not a valid file stem"
        )));
    }
    Ok(())
}

/// In-memory store with an optional simulated fetch latency.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, AnimationRecord>,
    latency: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn insert(&mut self, record: AnimationRecord) {
        self.records.insert(record.subject_id().to_owned(), record);
    }
}

impl RecordStore for MemoryStore {
    async fn fetch(&self, subject_id: &str) -> ReelResult<AnimationRecord> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.records
            .get(subject_id)
            .cloned()
            .ok_or_else(|| ReelError::record_load(subject_id, "no such record"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/store.rs"]
mod tests;
