//! Search trait for name lookups.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::client::FootballClient;
use crate::error::Result;

/// Matches of a name search, keyed by entity ID.
pub type SearchResult = HashMap<u64, String>;

/// Look entities up by (partial) name.
///
/// # Example
///
/// ```ignore
/// use footballdata::{FootballClient, Team, Search};
///
/// let client = FootballClient::from_env()?;
/// for (id, name) in Team::search(&client, "manchester").await? {
///     println!("{id}: {name}");
/// }
/// ```
#[async_trait]
pub trait Search {
    /// Return every upstream match as `{id: display name}`.
    ///
    /// An empty map means nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::InvalidArgument`](crate::FootballError::InvalidArgument)
    /// for a blank name, or an error if the request fails.
    async fn search(client: &FootballClient, name: &str) -> Result<SearchResult>;
}
