//! Edit batches.

use serde::{Deserialize, Serialize};

use crate::schema::id::Id;
use crate::schema::ops::Op;

/// A named, ordered batch of ops ready to publish.
///
/// Produced by [`EditBuilder::into_edit`](crate::schema::EditBuilder::into_edit)
/// and read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<Id>,
    ops: Vec<Op>,
}

impl Edit {
    pub(crate) fn new(name: impl Into<String>, author: Option<Id>, ops: Vec<Op>) -> Self {
        Self {
            name: name.into(),
            author,
            ops,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> Option<&Id> {
        self.author.as_ref()
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Canonical byte encoding used for upload and content addressing.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
