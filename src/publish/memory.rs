//! In-process edit store for offline runs.

use dashmap::DashMap;

use crate::publish::types::{content_id_for, ContentId, EditStore, PublishResult};
use crate::schema::Edit;

/// Keeps published edits in memory, keyed by their locally computed CID.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: DashMap<ContentId, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded bytes of a previously published edit.
    pub fn get(&self, cid: &ContentId) -> Option<Vec<u8>> {
        self.blobs.get(cid).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl EditStore for MemoryStore {
    async fn publish(&self, edit: &Edit) -> PublishResult<ContentId> {
        let bytes = edit.to_bytes()?;
        let cid = content_id_for(&bytes);
        tracing::info!(cid = %cid, ops = edit.ops().len(), "Edit stored locally");
        self.blobs.insert(cid.clone(), bytes);
        Ok(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EditBuilder, PropertyDecl, ValueType};

    #[tokio::test]
    async fn test_empty_and_non_empty_edits_publish() {
        let store = MemoryStore::new();

        let empty = EditBuilder::new().into_edit("Empty", None);
        let empty_cid = store.publish(&empty).await.unwrap();

        let mut builder = EditBuilder::new();
        builder.create_property(PropertyDecl::new("Brand", ValueType::Text)).unwrap();
        let edit = builder.into_edit("Create Properties and Types", None);
        let cid = store.publish(&edit).await.unwrap();

        assert_ne!(empty_cid, cid);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_stored_bytes_decode_to_same_edit() {
        let store = MemoryStore::new();
        let mut builder = EditBuilder::new();
        builder.create_property(PropertyDecl::new("Rating", ValueType::Number)).unwrap();
        let edit = builder.into_edit("Ratings", None);

        let cid = store.publish(&edit).await.unwrap();
        let stored: Edit = serde_json::from_slice(&store.get(&cid).unwrap()).unwrap();
        assert_eq!(stored, edit);
    }

    #[tokio::test]
    async fn test_same_edit_same_cid() {
        let store = MemoryStore::new();
        let edit = EditBuilder::new().into_edit("Same", None);
        let a = store.publish(&edit).await.unwrap();
        let b = store.publish(&edit).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }
}
