//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::FootballClient;
use crate::error::Result;

/// List entities, optionally filtered.
///
/// The API returns whole collections in one response, so there is no
/// paging here.
///
/// # Example
///
/// ```ignore
/// use footballdata::{FootballClient, Competition, CompetitionQuery, List};
///
/// let client = FootballClient::from_env()?;
/// let current = Competition::list(&client, &Default::default()).await?;
/// let older = Competition::list(&client, &CompetitionQuery { season: Some(2015) }).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is malformed.
    async fn list(client: &FootballClient, query: &Self::Query) -> Result<Vec<Self>>;
}
