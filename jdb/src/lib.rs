//! # JDB - Embedded JSON Document Store
//!
//! JDB is a lightweight, embedded, schemaless document store written in Rust.
//! Collections are persisted as human-readable JSON files and queried with
//! Mongo-style filters and update operators.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Schemaless**: Documents in the same collection can have different fields
//! - **Mongo-style Querying**: `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`,
//!   `$in`, `$nin`, `$regex` plus `$and`/`$or` combinations
//! - **Update Operators**: `$set`, `$unset`, `$inc`, `$push`, `$pull`
//! - **Crash-safe Persistence**: every flush writes a temp file and atomically
//!   renames it over the collection file
//! - **Two Storage Backends**: durable file storage and in-memory storage
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interfaces
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jdb::jdb::Jdb;
//! use jdb::doc;
//! use jdb::filter::field;
//! use jdb::update::UpdateSpec;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create and connect an engine
//! let db = Jdb::builder().root("./data".as_ref()).create()?;
//! db.connect()?;
//!
//! // Get or create a collection
//! let users = db.collection("users")?;
//!
//! // Insert documents
//! users.insert(doc! { name: "Alice", age: 30 })?;
//! users.insert(doc! { name: "Bob", age: 25 })?;
//!
//! // Query with filters
//! let adults = users.find(&field("age").gte(18i64))?;
//!
//! // Update matching documents
//! users.update(
//!     &field("name").eq("Alice"),
//!     &UpdateSpec::new().inc("age", 1i64),
//!     true,
//! )?;
//!
//! // Disconnect when done
//! db.disconnect()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, ids, and collection operations
//! - [`common`] - Common types, values, and utilities
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and the fluent filter builder
//! - [`update`] - Update operators and specs
//! - [`store`] - Storage backend abstractions
//! - [`jdb`] - Core engine interface
//! - [`jdb_builder`] - Engine builder
//! - [`jdb_config`] - Engine configuration

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod jdb;
pub mod jdb_builder;
pub mod jdb_config;
pub mod store;
pub mod update;
