//! Collections and documents for schemaless data storage.
//!
//! A [Document] is a key-value map where keys are strings and values are
//! [`crate::common::Value`] objects. A [JdbCollection] manages a named,
//! insertion-ordered set of documents backed by a single persistence unit.
//!
//! ```rust,ignore
//! use jdb::doc;
//! use jdb::filter::field;
//! use jdb::update::UpdateSpec;
//!
//! let users = db.collection("users")?;
//!
//! // Insert
//! let stored = users.insert(doc! { name: "Alice", age: 30 })?;
//!
//! // Query
//! let adults = users.find(&field("age").gte(18i64))?;
//!
//! // Update
//! users.update(&field("name").eq("Alice"), &UpdateSpec::new().inc("age", 1i64), true)?;
//! ```

mod default_collection;
mod doc_id;
mod document;
mod find_options;
mod jdb_collection;
pub(crate) mod operations;

pub(crate) use default_collection::*;
pub use doc_id::DocId;
pub use document::*;
pub use find_options::*;
pub use jdb_collection::*;
