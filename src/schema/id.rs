//! Entity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::types::SchemaError;

/// A graph identifier: a random UUID v4 rendered in base58.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(bs58::encode(Uuid::new_v4().as_bytes()).into_string())
    }

    /// Wrap a well-known protocol identifier.
    pub(crate) fn system(id: &'static str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Id {
    type Err = SchemaError;

    /// Parse an identifier created elsewhere. Only the base58 alphabet is checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || bs58::decode(trimmed).into_vec().is_err() {
            return Err(SchemaError::InvalidId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
