use crate::collection::Document;
use crate::errors::JdbResult;
use crate::store::StoreProvider;
use dashmap::DashMap;

/// In-memory store for ephemeral databases and tests.
///
/// Collections live in a concurrent map and disappear when the store is
/// dropped. Writes never fail, so the commit protocol degenerates to a plain
/// state swap.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            collections: DashMap::new(),
        }
    }
}

impl StoreProvider for MemoryStore {
    fn ensure_root(&self) -> JdbResult<()> {
        Ok(())
    }

    fn read_all(&self, name: &str) -> JdbResult<Option<Vec<Document>>> {
        Ok(self.collections.get(name).map(|entry| entry.value().clone()))
    }

    fn write_all(&self, name: &str, documents: &[Document]) -> JdbResult<()> {
        self.collections
            .insert(name.to_string(), documents.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_read_missing_collection_is_none() {
        let store = MemoryStore::new();
        assert!(store.read_all("users").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let store = MemoryStore::new();
        let docs = vec![doc! { name: "Alice" }];
        store.write_all("users", &docs).unwrap();
        assert_eq!(store.read_all("users").unwrap(), Some(docs));
    }

    #[test]
    fn test_write_replaces_content() {
        let store = MemoryStore::new();
        store.write_all("users", &[doc! { a: 1 }, doc! { b: 2 }]).unwrap();
        store.write_all("users", &[doc! { c: 3 }]).unwrap();
        assert_eq!(store.read_all("users").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_collections_are_independent() {
        let store = MemoryStore::new();
        store.write_all("users", &[doc! { a: 1 }]).unwrap();
        store.write_all("orders", &[]).unwrap();
        assert_eq!(store.read_all("users").unwrap().unwrap().len(), 1);
        assert_eq!(store.read_all("orders").unwrap(), Some(vec![]));
    }
}
