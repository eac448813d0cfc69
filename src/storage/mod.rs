//! Single-slot snapshot persistence.
//!
//! The editor persists exactly one workflow at a time: a synchronous,
//! best-effort, last-write-wins slot with no transaction semantics. The
//! [`SnapshotStore`] trait is the seam the UI shell plugs its storage into;
//! the crate ships an in-memory store and a file-backed store.

use crate::core::error::{FlowError, FlowResult};
use crate::graph::serialization::Snapshot;
use std::path::{Path, PathBuf};

/// A single-slot store for workflow snapshots.
pub trait SnapshotStore {
    /// Read the stored snapshot, if any.
    ///
    /// A malformed slot is treated as empty rather than an error, so a
    /// corrupt save can never lock the editor out.
    fn load(&self) -> FlowResult<Option<Snapshot>>;

    /// Overwrite the slot with the given snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> FlowResult<()>;

    /// Empty the slot.
    fn clear(&mut self) -> FlowResult<()>;
}

/// In-memory store, used by tests and as a scratch slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> FlowResult<Option<Snapshot>> {
        Ok(self
            .slot
            .as_deref()
            .map(Snapshot::from_json_or_empty))
    }

    fn save(&mut self, snapshot: &Snapshot) -> FlowResult<()> {
        self.slot = Some(snapshot.to_json_compact().map_err(FlowError::Serialization)?);
        Ok(())
    }

    fn clear(&mut self) -> FlowResult<()> {
        self.slot = None;
        Ok(())
    }
}

/// File-backed store keeping the snapshot in a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> FlowResult<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(Snapshot::from_json_or_empty(&json)))
    }

    fn save(&mut self, snapshot: &Snapshot) -> FlowResult<()> {
        let json = snapshot.to_json().map_err(FlowError::Serialization)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> FlowResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Position, Viewport};
    use crate::graph::model::ProcessGraph;

    fn sample_snapshot() -> Snapshot {
        let mut graph = ProcessGraph::with_start_stage();
        let start = graph.start_node().unwrap().id;
        let next = graph.create_node(Position::new(100.0, 225.0));
        graph.connect(start, next, "", "").unwrap();
        Snapshot::capture(&graph, Viewport::default())
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&sample_snapshot()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.nodes.len(), 2);
        assert_eq!(loaded.edges.len(), 1);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        store.save(&sample_snapshot()).unwrap();
        store.save(&Snapshot::default()).unwrap();
        assert!(store.load().unwrap().unwrap().nodes.is_empty());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("workflow.json"));
        assert!(store.load().unwrap().is_none());

        store.save(&sample_snapshot()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.nodes.len(), 2);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_slot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.json");
        std::fs::write(&path, "{{ not json").unwrap();

        let store = FileStore::new(&path);
        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.nodes.is_empty());
    }
}
