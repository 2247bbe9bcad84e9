use crate::collection::{
    DocId, Document, FindOptions, JdbCollectionProvider,
};
use crate::common::LockHandle;
use crate::errors::{ErrorKind, JdbError, JdbResult};
use crate::filter::Filter;
use crate::store::Store;
use crate::update::UpdateSpec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::operations::CollectionOperations;

/// Default collection backend.
///
/// Takes the collection's named lock (write for mutations, read for queries),
/// checks the shared connected flag, then delegates to
/// [CollectionOperations].
pub(crate) struct DefaultJdbCollection {
    collection_name: String,
    operations: CollectionOperations,
    connected: Arc<AtomicBool>,
    lock_handle: LockHandle,
}

impl DefaultJdbCollection {
    pub(crate) fn new(
        collection_name: &str,
        store: Store,
        connected: Arc<AtomicBool>,
        lock_handle: LockHandle,
    ) -> Self {
        let operations = CollectionOperations::new(collection_name, store);
        DefaultJdbCollection {
            collection_name: collection_name.to_string(),
            operations,
            connected,
            lock_handle,
        }
    }

    fn ensure_connected(&self) -> JdbResult<()> {
        if !self.connected.load(Ordering::Acquire) {
            log::error!(
                "Cannot access collection '{}': engine is not connected",
                self.collection_name
            );
            return Err(JdbError::new(
                &format!(
                    "Cannot access collection '{}': engine is not connected",
                    self.collection_name
                ),
                ErrorKind::NotConnected,
            ));
        }
        Ok(())
    }
}

impl JdbCollectionProvider for DefaultJdbCollection {
    fn insert(&self, document: Document) -> JdbResult<Document> {
        let _guard = self.lock_handle.write();
        self.ensure_connected()?;
        self.operations.insert(document)
    }

    fn insert_many(&self, documents: Vec<Document>) -> JdbResult<Vec<Document>> {
        let _guard = self.lock_handle.write();
        self.ensure_connected()?;
        self.operations.insert_many(documents)
    }

    fn find(&self, filter: &Filter) -> JdbResult<Vec<Document>> {
        let _guard = self.lock_handle.read();
        self.ensure_connected()?;
        self.operations.find(filter)
    }

    fn find_with_options(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> JdbResult<Vec<Document>> {
        let _guard = self.lock_handle.read();
        self.ensure_connected()?;
        self.operations.find_with_options(filter, options)
    }

    fn find_one(&self, filter: &Filter) -> JdbResult<Option<Document>> {
        let _guard = self.lock_handle.read();
        self.ensure_connected()?;
        self.operations.find_one(filter)
    }

    fn get_by_id(&self, id: &DocId) -> JdbResult<Option<Document>> {
        let _guard = self.lock_handle.read();
        self.ensure_connected()?;
        self.operations.get_by_id(id)
    }

    fn update(&self, filter: &Filter, spec: &UpdateSpec, multi: bool) -> JdbResult<u64> {
        let _guard = self.lock_handle.write();
        self.ensure_connected()?;
        self.operations.update(filter, spec, multi)
    }

    fn delete(&self, filter: &Filter, multi: bool) -> JdbResult<u64> {
        let _guard = self.lock_handle.write();
        self.ensure_connected()?;
        self.operations.delete(filter, multi)
    }

    fn count(&self, filter: &Filter) -> JdbResult<u64> {
        let _guard = self.lock_handle.read();
        self.ensure_connected()?;
        self.operations.count(filter)
    }

    fn size(&self) -> JdbResult<u64> {
        let _guard = self.lock_handle.read();
        self.ensure_connected()?;
        self.operations.size()
    }

    fn name(&self) -> String {
        self.collection_name.clone()
    }
}
