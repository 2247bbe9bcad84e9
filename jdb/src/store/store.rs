use crate::collection::Document;
use crate::errors::JdbResult;
use std::ops::Deref;
use std::sync::Arc;

/// Low-level interface for collection persistence.
///
/// # Purpose
/// Defines the contract that all store implementations must follow. A store
/// persists each collection as a whole: reads hydrate the full document list
/// and writes replace it atomically.
///
/// # Implementations
/// - [`crate::store::FileStore`]: one JSON file per collection under a root
///   directory, with crash-safe replacement
/// - [`crate::store::MemoryStore`]: in-memory storage for tests and
///   ephemeral databases
///
/// # Thread Safety
/// Implementers must be `Send + Sync`. Callers serialize writes per
/// collection, so a store never sees concurrent `write_all` calls for the
/// same name.
pub trait StoreProvider: Send + Sync {
    /// Prepares the storage location for use.
    ///
    /// Called once at connect time. Creating an already-prepared location is
    /// not an error.
    fn ensure_root(&self) -> JdbResult<()>;

    /// Reads every document of the named collection.
    ///
    /// Returns `Ok(None)` when the collection has never been flushed, which
    /// is distinct from an existing but empty collection.
    fn read_all(&self, name: &str) -> JdbResult<Option<Vec<Document>>>;

    /// Replaces the entire content of the named collection.
    ///
    /// The replacement must be all-or-nothing: on failure the previously
    /// stored content stays intact.
    fn write_all(&self, name: &str, documents: &[Document]) -> JdbResult<()>;
}

/// A cloneable handle to a [StoreProvider] implementation.
///
/// Cloning is cheap; all clones share the same underlying provider.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn StoreProvider>,
}

impl Store {
    /// Creates a new `Store` wrapping a provider implementation.
    pub fn new<T: StoreProvider + 'static>(inner: T) -> Self {
        Store {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Store {
    type Target = Arc<dyn StoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
