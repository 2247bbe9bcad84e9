use crate::collection::{DocId, Document, FindOptions};
use crate::common::{current_time_millis, atomic, Atomic, ReadExecutor, SortOrder, WriteExecutor};
use crate::errors::{ErrorKind, JdbError, JdbResult};
use crate::filter::Filter;
use crate::store::Store;
use crate::update::UpdateSpec;
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Core document operations for a single collection.
///
/// Holds the committed in-memory state and runs the snapshot/flush/commit
/// protocol. Mutations clone the committed document list, mutate the clone,
/// flush it through the store, and only then swap it in as committed. A
/// failed flush leaves the committed state untouched, so readers never
/// observe a state that is not fully on disk.
///
/// This type does no locking itself; the owning collection serializes calls
/// through its lock handle.
pub(crate) struct CollectionOperations {
    name: String,
    store: Store,
    committed: Atomic<Vec<Document>>,
    hydrated: AtomicBool,
}

impl CollectionOperations {
    pub(crate) fn new(name: &str, store: Store) -> Self {
        CollectionOperations {
            name: name.to_string(),
            store,
            committed: atomic(Vec::new()),
            hydrated: AtomicBool::new(false),
        }
    }

    /// Loads the document list from the store on first use.
    ///
    /// Later connects reuse the already-hydrated cache, including after a
    /// disconnect.
    fn ensure_hydrated(&self) -> JdbResult<()> {
        if self.hydrated.load(Ordering::Acquire) {
            return Ok(());
        }

        // double-checked under the state write lock
        let mut state = self.committed.write();
        if self.hydrated.load(Ordering::Acquire) {
            return Ok(());
        }
        if let Some(documents) = self.store.read_all(&self.name)? {
            *state = documents;
        }
        self.hydrated.store(true, Ordering::Release);
        Ok(())
    }

    pub(crate) fn insert(&self, document: Document) -> JdbResult<Document> {
        self.ensure_hydrated()?;

        let mut working = self.committed.read_with(|docs| docs.clone());
        let existing_ids = collect_ids(&working)?;
        let document = prepare_insert(document, &existing_ids, &self.name)?;

        working.push(document.clone());
        self.flush_and_commit(working)?;
        Ok(document)
    }

    pub(crate) fn insert_many(&self, documents: Vec<Document>) -> JdbResult<Vec<Document>> {
        self.ensure_hydrated()?;

        let mut working = self.committed.read_with(|docs| docs.clone());
        let mut seen_ids = collect_ids(&working)?;

        // duplicates are rejected before anything is appended, so a failed
        // batch leaves the collection unchanged
        let mut inserted = Vec::with_capacity(documents.len());
        for document in documents {
            let document = prepare_insert(document, &seen_ids, &self.name)?;
            seen_ids.insert(document.id()?.to_string());
            inserted.push(document.clone());
            working.push(document);
        }

        self.flush_and_commit(working)?;
        Ok(inserted)
    }

    pub(crate) fn find(&self, filter: &Filter) -> JdbResult<Vec<Document>> {
        self.ensure_hydrated()?;
        self.matching_documents(filter)
    }

    pub(crate) fn find_with_options(
        &self,
        filter: &Filter,
        options: &FindOptions,
    ) -> JdbResult<Vec<Document>> {
        self.ensure_hydrated()?;
        let mut matches = self.matching_documents(filter)?;

        if !options.sort_by.is_empty() {
            // stable sort keeps insertion order among equal keys
            matches.sort_by(|a, b| compare_documents(a, b, &options.sort_by));
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let matches: Vec<Document> = match options.limit {
            Some(limit) => matches.into_iter().skip(skip).take(limit as usize).collect(),
            None => matches.into_iter().skip(skip).collect(),
        };
        Ok(matches)
    }

    pub(crate) fn find_one(&self, filter: &Filter) -> JdbResult<Option<Document>> {
        self.ensure_hydrated()?;
        let state = self.committed.read();
        for document in state.iter() {
            if filter.apply(document)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    pub(crate) fn get_by_id(&self, id: &DocId) -> JdbResult<Option<Document>> {
        self.ensure_hydrated()?;
        let state = self.committed.read();
        for document in state.iter() {
            if document.has_id() && &document.id()? == id {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    pub(crate) fn count(&self, filter: &Filter) -> JdbResult<u64> {
        self.ensure_hydrated()?;
        let state = self.committed.read();
        let mut count = 0u64;
        for document in state.iter() {
            if filter.apply(document)? {
                count += 1;
            }
        }
        Ok(count)
    }

    pub(crate) fn size(&self) -> JdbResult<u64> {
        self.ensure_hydrated()?;
        Ok(self.committed.read_with(|docs| docs.len() as u64))
    }

    pub(crate) fn update(
        &self,
        filter: &Filter,
        spec: &UpdateSpec,
        multi: bool,
    ) -> JdbResult<u64> {
        self.ensure_hydrated()?;

        let mut working = self.committed.read_with(|docs| docs.clone());
        let now = current_time_millis();
        let mut applied = 0u64;

        for document in working.iter_mut() {
            if !filter.apply(document)? {
                continue;
            }
            if spec.apply(document)? {
                document.set_updated_at(now);
                applied += 1;
            }
            if !multi {
                break;
            }
        }

        if applied > 0 {
            self.flush_and_commit(working)?;
        }
        Ok(applied)
    }

    pub(crate) fn delete(&self, filter: &Filter, multi: bool) -> JdbResult<u64> {
        self.ensure_hydrated()?;

        let working = self.committed.read_with(|docs| docs.clone());
        let mut kept = Vec::with_capacity(working.len());
        let mut removed = 0u64;

        for document in working {
            let matches = (multi || removed == 0) && filter.apply(&document)?;
            if matches {
                removed += 1;
            } else {
                kept.push(document);
            }
        }

        if removed > 0 {
            self.flush_and_commit(kept)?;
        }
        Ok(removed)
    }

    fn matching_documents(&self, filter: &Filter) -> JdbResult<Vec<Document>> {
        let state = self.committed.read();
        let mut matches = Vec::new();
        for document in state.iter() {
            if filter.apply(document)? {
                matches.push(document.clone());
            }
        }
        Ok(matches)
    }

    /// Flushes the working state and swaps it in as committed.
    ///
    /// Commit happens only after a successful flush, so a flush failure
    /// rolls the mutation back automatically.
    fn flush_and_commit(&self, working: Vec<Document>) -> JdbResult<()> {
        self.store.write_all(&self.name, &working)?;
        self.committed.write_with(|state| *state = working);
        Ok(())
    }
}

fn collect_ids(documents: &[Document]) -> JdbResult<HashSet<String>> {
    let mut ids = HashSet::with_capacity(documents.len());
    for document in documents {
        ids.insert(document.id()?.to_string());
    }
    Ok(ids)
}

fn prepare_insert(
    mut document: Document,
    existing_ids: &HashSet<String>,
    collection_name: &str,
) -> JdbResult<Document> {
    let id = if document.has_id() {
        document.id()?
    } else {
        let id = DocId::random();
        document.set_id(&id);
        id
    };

    if existing_ids.contains(id.as_str()) {
        log::error!(
            "Document with id '{}' already exists in collection '{}'",
            id,
            collection_name
        );
        return Err(JdbError::new(
            &format!(
                "Document with id '{}' already exists in collection '{}'",
                id, collection_name
            ),
            ErrorKind::DuplicateId,
        ));
    }

    let now = current_time_millis();
    document.set_created_at(now);
    document.set_updated_at(now);
    Ok(document)
}

fn compare_documents(a: &Document, b: &Document, keys: &[(String, SortOrder)]) -> CmpOrdering {
    for (field, order) in keys {
        // absent fields read as Null, which sorts lowest
        let ordering = a.get(field).cmp(&b.get(field));
        let ordering = match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        };
        if ordering != CmpOrdering::Equal {
            return ordering;
        }
    }
    CmpOrdering::Equal
}
