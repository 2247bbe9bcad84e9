//! Update operators for mutating documents in place.
//!
//! An [UpdateSpec] is an ordered list of field mutations. Specs are built with
//! the fluent API or parsed from a Mongo-style update document:
//!
//! ```rust,ignore
//! use jdb::update::UpdateSpec;
//!
//! let spec = UpdateSpec::new()
//!     .set("status", "active")
//!     .inc("logins", 1i64);
//!
//! let spec = UpdateSpec::parse(&doc! {
//!     "$push": { tags: "verified" },
//! })?;
//! ```
//!
//! Reserved fields (`_id`, `_created`, `_updated`) cannot be touched by update
//! operations; the engine manages them itself.

mod applier;
mod spec;

pub use spec::*;
