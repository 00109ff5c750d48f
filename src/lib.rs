//! Typed loading and querying of generated documentation search indexes.
//!
//! A documentation build emits its search index as a static payload of
//! [`DocEntry`] records (`{"docs": [...]}`, usually wrapped in a
//! `var documenterSearchIndex = ...` script). This crate parses that payload
//! into a read-only [`SearchIndex`], writes it back in the same shape, and
//! answers ranked full-text queries over it.

pub mod cache;
pub mod entry;
pub mod error;
pub mod index;
pub mod payload;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;

pub use entry::{Anchor, Category, DocEntry};
pub use error::ParseError;
pub use index::{PageGroup, SearchIndex};
pub use search::{SearchMatch, TermIndex};
pub use state::DocState;
