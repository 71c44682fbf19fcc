//! football-data API model types.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FootballError, Result};

mod competition;
mod fixture;
mod league_table;
mod link;
mod player;
mod team;

pub use competition::*;
pub use fixture::*;
pub use league_table::*;
pub use link::*;
pub use player::*;
pub use team::*;

/// The kinds of entity the API returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Competition,
    Team,
    Player,
    Fixture,
    LeagueTable,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Competition => "competition",
            EntityKind::Team => "team",
            EntityKind::Player => "player",
            EntityKind::Fixture => "fixture",
            EntityKind::LeagueTable => "league table",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model built from one JSON object.
pub trait Entity: DeserializeOwned + Send {
    /// Which kind of entity this is.
    const KIND: EntityKind;

    /// The entity's ID, when the payload reported one.
    fn id(&self) -> Option<u64>;

    /// Build the model from a decoded JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Parse`] if a reported field has the wrong type.
    fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The ID, or an error naming the entity kind when it is unknown.
    fn require_id(&self) -> Result<u64> {
        self.id().ok_or_else(|| {
            FootballError::InvalidArgument(format!("{} has no id to look up", Self::KIND))
        })
    }
}
