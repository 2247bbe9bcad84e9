use im::OrdMap;

use crate::collection::doc_id::DocId;
use crate::common::{Value, DOC_CREATED, DOC_ID, DOC_UPDATED};
use crate::errors::{ErrorKind, JdbError, JdbResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

/// Represents a document in a JDB collection, backed by a persistent ordered map.
///
/// A document is composed of key-value pairs. The key is always a [String] and
/// the value is a [Value]. Documents are schemaless, so two documents in the
/// same collection can have entirely different fields.
///
/// Below fields are reserved and managed by the engine:
///
/// * `_id` - The unique identifier of the document. If not provided, a random
///   [DocId] is generated during insertion.
/// * `_created` - Insertion time in milliseconds since the Unix epoch.
/// * `_updated` - Last update time in milliseconds since the Unix epoch.
///
/// ## Persistent Map Design
///
/// This struct uses `im::OrdMap` (a persistent ordered map):
/// - O(1) cloning via internal Arc sharing
/// - Mutations create new maps via structural sharing
/// - Each cloned document is completely independent
///
/// Cheap clones matter here because every mutation works on a cloned snapshot
/// of the collection that is only committed after a successful flush.
#[derive(Clone, Eq, PartialEq, Default, Ord, PartialOrd)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified value with the specified key in this document.
    ///
    /// If the key already exists, its value is replaced.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the key is empty, or an `InvalidId`
    /// error if the key is `_id` and the value is not a string.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30i64)?;
    /// ```
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> JdbResult<()> {
        if key.is_empty() {
            log::error!("Document field name cannot be empty");
            return Err(JdbError::new(
                "Document field name cannot be empty",
                ErrorKind::ValidationError,
            ));
        }
        let value = value.into();
        if key == DOC_ID && !matches!(value, Value::String(_)) {
            log::error!("Document _id must be a string");
            return Err(JdbError::new(
                "Document _id must be a string",
                ErrorKind::InvalidId,
            ));
        }
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Associates the value with the key without validation.
    ///
    /// Used on decode paths where keys come from trusted stored data.
    pub(crate) fn put_value(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
    }

    /// Retrieves the value associated with the key.
    ///
    /// Returns [Value::Null] if the field is absent. Use [Document::get_opt]
    /// when the distinction between an absent field and an explicit null
    /// matters.
    pub fn get(&self, key: &str) -> Value {
        self.data.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Retrieves the value associated with the key, or [None] if the field
    /// is absent.
    pub fn get_opt(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Checks if the document contains the given field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes the field from the document, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Returns an iterator over the fields of the document in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Returns the document id.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidId` error if the document has no `_id` field or the
    /// field is not a string.
    pub fn id(&self) -> JdbResult<DocId> {
        match self.data.get(DOC_ID) {
            Some(Value::String(id)) => DocId::parse(id),
            Some(_) => {
                log::error!("Document _id is not a string");
                Err(JdbError::new(
                    "Document _id is not a string",
                    ErrorKind::InvalidId,
                ))
            }
            None => {
                log::error!("Document does not have an _id");
                Err(JdbError::new(
                    "Document does not have an _id",
                    ErrorKind::InvalidId,
                ))
            }
        }
    }

    /// Returns true if the document carries an `_id` field.
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    pub(crate) fn set_id(&mut self, id: &DocId) {
        self.data
            .insert(DOC_ID.to_string(), Value::String(id.to_string()));
    }

    /// Returns the creation timestamp in epoch milliseconds, if stamped.
    pub fn created_at(&self) -> Option<i64> {
        self.data.get(DOC_CREATED).and_then(|v| v.as_i64())
    }

    /// Returns the last update timestamp in epoch milliseconds, if stamped.
    pub fn updated_at(&self) -> Option<i64> {
        self.data.get(DOC_UPDATED).and_then(|v| v.as_i64())
    }

    pub(crate) fn set_created_at(&mut self, millis: i64) {
        self.data
            .insert(DOC_CREATED.to_string(), Value::I64(millis));
    }

    pub(crate) fn set_updated_at(&mut self, millis: i64) {
        self.data
            .insert(DOC_UPDATED.to_string(), Value::I64(millis));
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (idx, (key, value)) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (key, value) in self.data.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = Document::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.put_value(&key, value);
        }
        Ok(doc)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use jdb::doc;
///
/// // Empty document
/// let empty = doc!{};
///
/// // Simple key-value pairs
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// // With expressions
/// let base = 100;
/// let with_expr = doc!{
///     name: "Bob",
///     score: (base * 2)
/// };
///
/// // Nested documents and arrays
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    fn set_up() -> Document {
        doc! {
            score: 1034,
            location: {
                state: "NY",
                city: "New York",
                zip: 10001,
            },
            category: ["food", "produce", "grocery"],
        }
    }

    #[test]
    fn test_empty_document() {
        let doc = doc! {};
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_put_and_get() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30i64).unwrap();

        assert_eq!(doc.get("name"), Value::from("Alice"));
        assert_eq!(doc.get("age"), Value::I64(30));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_put_empty_key_fails() {
        let mut doc = Document::new();
        let result = doc.put("", "value");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            &ErrorKind::ValidationError
        );
    }

    #[test]
    fn test_get_absent_field_is_null() {
        let doc = set_up();
        assert_eq!(doc.get("missing"), Value::Null);
        assert!(doc.get_opt("missing").is_none());
    }

    #[test]
    fn test_get_opt_distinguishes_explicit_null() {
        let mut doc = Document::new();
        doc.put("nick", Value::Null).unwrap();
        assert_eq!(doc.get_opt("nick"), Some(&Value::Null));
        assert!(doc.get_opt("other").is_none());
    }

    #[test]
    fn test_nested_document_macro() {
        let doc = set_up();
        let location = doc.get("location");
        let location = location.as_document().expect("location should be a document");
        assert_eq!(location.get("city"), Value::from("New York"));
        assert_eq!(location.get("zip"), Value::I64(10001));
    }

    #[test]
    fn test_array_macro() {
        let doc = set_up();
        let category = doc.get("category");
        let items = category.as_array().expect("category should be an array");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::from("food"));
    }

    #[test]
    fn test_remove() {
        let mut doc = set_up();
        let removed = doc.remove("score");
        assert_eq!(removed, Some(Value::I64(1034)));
        assert!(!doc.contains_key("score"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = set_up();
        let cloned = original.clone();
        original.put("score", 9999i64).unwrap();

        assert_eq!(original.get("score"), Value::I64(9999));
        assert_eq!(cloned.get("score"), Value::I64(1034));
    }

    #[test]
    fn test_id_missing() {
        let doc = set_up();
        let result = doc.id();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_id_round_trip() {
        let mut doc = Document::new();
        let id = DocId::random();
        doc.set_id(&id);
        assert!(doc.has_id());
        assert_eq!(doc.id().unwrap(), id);
    }

    #[test]
    fn test_put_non_string_id_fails() {
        let mut doc = Document::new();
        let result = doc.put("_id", 42i64);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_id_non_string_fails() {
        // decoded data can still carry a malformed id
        let mut doc = Document::new();
        doc.put_value("_id", Value::I64(42));
        let result = doc.id();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_timestamps() {
        let mut doc = Document::new();
        assert_eq!(doc.created_at(), None);
        doc.set_created_at(1000);
        doc.set_updated_at(2000);
        assert_eq!(doc.created_at(), Some(1000));
        assert_eq!(doc.updated_at(), Some(2000));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = set_up();
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\"quoted\""), "quoted");
        assert_eq!(normalize("plain"), "plain");
    }
}
