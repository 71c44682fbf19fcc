//! Trait definitions for football-data operations.
//!
//! Each entity type implements the traits its endpoints support, keeping
//! envelope and path differences inside the implementations.

mod get;
mod list;
mod search;

pub use get::Get;
pub use list::List;
pub use search::{Search, SearchResult};
