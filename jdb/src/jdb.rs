use crate::collection::{DefaultJdbCollection, JdbCollection};
use crate::common::LockRegistry;
use crate::errors::{ErrorKind, JdbError, JdbResult};
use crate::jdb_builder::JdbBuilder;
use crate::jdb_config::JdbConfig;
use crate::store::{FileStore, MemoryStore, Store};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The embedded document store engine.
///
/// `Jdb` is the entry point for all database operations. It owns the storage
/// backend, the collection registry, and the connection state; there is no
/// global state anywhere, so multiple independent engines can coexist in one
/// process.
///
/// The engine starts disconnected. Collection handles can be obtained at any
/// time, but every read or write on them fails with `NotConnected` until
/// [`Jdb::connect`] is called. Disconnecting keeps the in-memory collection
/// cache, so a later reconnect resumes without re-reading files.
///
/// `Jdb` uses the PIMPL pattern: clones share the same underlying state
/// through `Arc` and can be passed freely across threads.
///
/// # Examples
///
/// ```rust,ignore
/// use jdb::jdb::Jdb;
/// use jdb::doc;
/// use jdb::filter::field;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Jdb::builder().root("./data".as_ref()).create()?;
/// db.connect()?;
///
/// let users = db.collection("users")?;
/// users.insert(doc! { name: "Alice", age: 30 })?;
/// let found = users.find(&field("name").eq("Alice"))?;
///
/// db.disconnect()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Jdb {
    inner: Arc<JdbInner>,
}

impl Jdb {
    /// Creates a new [JdbBuilder] for configuring an engine.
    pub fn builder() -> JdbBuilder {
        JdbBuilder::new()
    }

    pub(crate) fn new(config: JdbConfig) -> Self {
        let store = if config.in_memory() {
            Store::new(MemoryStore::new())
        } else {
            Store::new(FileStore::new(config.root()))
        };

        Jdb {
            inner: Arc::new(JdbInner {
                config,
                store,
                connected: Arc::new(AtomicBool::new(false)),
                collections: DashMap::new(),
                lock_registry: LockRegistry::new(),
            }),
        }
    }

    /// Connects the engine, making collections usable.
    ///
    /// In durable mode this ensures the root data directory exists. Calling
    /// connect on an already connected engine is a no-op.
    pub fn connect(&self) -> JdbResult<()> {
        if self.is_connected() {
            return Ok(());
        }
        self.inner.store.ensure_root()?;
        self.inner.connected.store(true, Ordering::Release);
        log::debug!(
            "Engine connected (root: {}, in_memory: {})",
            self.inner.config.root().display(),
            self.inner.config.in_memory()
        );
        Ok(())
    }

    /// Disconnects the engine.
    ///
    /// Collection operations fail with `NotConnected` until the next
    /// [`Jdb::connect`]. Hydrated collection state stays cached. Calling
    /// disconnect on an already disconnected engine is a no-op.
    pub fn disconnect(&self) -> JdbResult<()> {
        self.inner.connected.store(false, Ordering::Release);
        log::debug!("Engine disconnected");
        Ok(())
    }

    /// Returns whether the engine is currently connected.
    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::Acquire)
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &JdbConfig {
        &self.inner.config
    }

    /// Gets a collection handle by name, creating the collection lazily.
    ///
    /// Handles are cached: every call with the same name returns a handle to
    /// the same underlying collection. The handle itself can be obtained
    /// while disconnected; only operations on it require a connection.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the name is empty, contains path
    /// separators or `..`, or starts with a dot.
    pub fn collection(&self, name: &str) -> JdbResult<JdbCollection> {
        validate_collection_name(name)?;

        let collection = self
            .inner
            .collections
            .entry(name.to_string())
            .or_insert_with(|| {
                JdbCollection::new(DefaultJdbCollection::new(
                    name,
                    self.inner.store.clone(),
                    self.inner.connected.clone(),
                    self.inner.lock_registry.get_lock(name),
                ))
            })
            .clone();
        Ok(collection)
    }
}

struct JdbInner {
    config: JdbConfig,
    store: Store,
    connected: Arc<AtomicBool>,
    collections: DashMap<String, JdbCollection>,
    lock_registry: LockRegistry,
}

// Collection names become file names, so anything that could escape the root
// directory is rejected.
fn validate_collection_name(name: &str) -> JdbResult<()> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.starts_with('.');
    if invalid {
        log::error!("Invalid collection name '{}'", name);
        return Err(JdbError::new(
            &format!("Invalid collection name '{}'", name),
            ErrorKind::ValidationError,
        ));
    }
    Ok(())
}
