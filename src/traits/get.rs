//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::FootballClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types the API serves individually.
///
/// # Example
///
/// ```ignore
/// use footballdata::{FootballClient, Team, Get};
///
/// let client = FootballClient::from_env()?;
/// let team = Team::get(&client, 66).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The football-data API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::NotFound`](crate::FootballError::NotFound) if
    /// upstream has no such entity, or another error if the request fails.
    async fn get(client: &FootballClient, id: Self::Id) -> Result<Self>;
}
