use crate::errors::{ErrorKind, JdbError, JdbResult};
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// A unique identifier for a document in a collection.
///
/// Ids are random UUID v4 strings. They are generated during insertion when a
/// document does not already carry an `_id` field, and stored in the document
/// as a plain string so collection files stay valid JSON.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId {
    id: String,
}

impl DocId {
    /// Generates a new random id.
    pub fn random() -> Self {
        DocId {
            id: Uuid::new_v4().to_string(),
        }
    }

    /// Creates an id from an existing string.
    ///
    /// Any non-empty string is accepted, so ids supplied by callers survive a
    /// round trip even when they are not UUIDs.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidId` error if the string is empty.
    pub fn parse(id: &str) -> JdbResult<Self> {
        if id.is_empty() {
            log::error!("Document id cannot be empty");
            return Err(JdbError::new(
                "Document id cannot be empty",
                ErrorKind::InvalidId,
            ));
        }
        Ok(DocId { id: id.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Debug for DocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocId({})", self.id)
    }
}
