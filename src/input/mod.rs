//! File input.
//!
//! Thin readers that turn the database and query files into a
//! [`crate::registry::Registry`] and a [`QueryList`].

mod files;

pub use files::{parse_queries, read_lines, read_query_file, read_registry_file, QueryList};
