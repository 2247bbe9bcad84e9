use crate::collection::{DocId, Document, FindOptions};
use crate::errors::JdbResult;
use crate::filter::Filter;
use crate::update::UpdateSpec;
use std::ops::Deref;
use std::sync::Arc;

/// Interface implemented by collection backends.
///
/// All operations require a connected engine and fail with `NotConnected`
/// otherwise. Mutating operations are serialized per collection; reads run
/// concurrently.
pub trait JdbCollectionProvider: Send + Sync {
    /// Inserts a document into the collection.
    ///
    /// Generates an `_id` when the document carries none, stamps `_created`
    /// and `_updated`, and returns the stored document.
    fn insert(&self, document: Document) -> JdbResult<Document>;

    /// Inserts multiple documents in a single flush.
    ///
    /// The batch is all-or-nothing: a duplicate id anywhere in the batch (or
    /// against existing documents) rejects the whole batch.
    fn insert_many(&self, documents: Vec<Document>) -> JdbResult<Vec<Document>>;

    /// Finds all documents matching the filter, in insertion order.
    fn find(&self, filter: &Filter) -> JdbResult<Vec<Document>>;

    /// Finds matching documents with sorting and pagination applied.
    ///
    /// Sorting happens before skip and limit.
    fn find_with_options(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> JdbResult<Vec<Document>>;

    /// Returns the first matching document in insertion order, if any.
    fn find_one(&self, filter: &Filter) -> JdbResult<Option<Document>>;

    /// Retrieves a document by its id.
    fn get_by_id(&self, id: &DocId) -> JdbResult<Option<Document>>;

    /// Applies the update spec to matching documents.
    ///
    /// With `multi` false only the first match is touched. Returns the number
    /// of matched documents the spec was applied to; `_updated` is refreshed
    /// on every one of them, even when the new value equals the old.
    fn update(&self, filter: &Filter, spec: &UpdateSpec, multi: bool) -> JdbResult<u64>;

    /// Removes matching documents, first match only unless `multi`.
    ///
    /// Returns the number of documents removed.
    fn delete(&self, filter: &Filter, multi: bool) -> JdbResult<u64>;

    /// Counts matching documents without mutating anything.
    fn count(&self, filter: &Filter) -> JdbResult<u64>;

    /// Returns the total number of documents in the collection.
    fn size(&self) -> JdbResult<u64>;

    /// Returns the collection name.
    fn name(&self) -> String;
}

/// A cloneable handle to a named collection of documents.
///
/// Obtained from [`crate::jdb::Jdb::collection`]. All clones share the same
/// underlying state, so a handle can be passed freely across threads.
///
/// # Examples
///
/// ```rust,ignore
/// use jdb::doc;
/// use jdb::filter::field;
///
/// let users = db.collection("users")?;
/// users.insert(doc! { name: "Alice", age: 30 })?;
/// let adults = users.find(&field("age").gte(18i64))?;
/// ```
#[derive(Clone)]
pub struct JdbCollection {
    inner: Arc<dyn JdbCollectionProvider>,
}

impl JdbCollection {
    /// Creates a new `JdbCollection` wrapping a provider implementation.
    pub fn new<T: JdbCollectionProvider + 'static>(inner: T) -> Self {
        JdbCollection {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for JdbCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JdbCollection").finish_non_exhaustive()
    }
}

impl Deref for JdbCollection {
    type Target = Arc<dyn JdbCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
