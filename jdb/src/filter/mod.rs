//! Query filters for selecting documents from collections.
//!
//! Filters are evaluated against every document in a collection; there is no
//! index involved. They can be built with the fluent API or parsed from a
//! Mongo-style query document.
//!
//! # Creating Filters
//!
//! ```rust,ignore
//! use jdb::filter::{field, all, and};
//!
//! // Fluent API
//! let age_filter = field("age").gt(30i64);
//! let email_filter = field("email").regex(".*@example\\.com");
//!
//! // Logical combinations
//! let filter = field("age").gt(30i64).and(field("status").eq("active"));
//! let filter = and(vec![field("age").gte(18i64), field("age").lt(65i64)]);
//!
//! // Parsed from a query document
//! let filter = Filter::parse(&doc! { age: { "$gte": 18 } })?;
//! ```

mod filter;
mod fluent;
mod parser;

pub use filter::*;
pub use fluent::*;
