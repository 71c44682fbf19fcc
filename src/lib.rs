//! football-data.org API client library.
//!
//! A Rust library for the football-data.org REST API using a trait-based
//! architecture where each operation (Get, List, Search) is defined as a
//! trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use footballdata::{FootballClient, Get, Search, Team};
//!
//! #[tokio::main]
//! async fn main() -> footballdata::Result<()> {
//!     // Create client from environment variables
//!     let client = FootballClient::from_env()?;
//!
//!     // Find teams by name
//!     let matches = Team::search(&client, "manchester").await?;
//!     for (id, name) in &matches {
//!         println!("{id}: {name}");
//!     }
//!
//!     // Get a team and walk to its squad
//!     let team = Team::get(&client, 66).await?;
//!     let players = team.players(&client).await?;
//!     println!("{:?} has {} players", team.name.as_deref(), players.len());
//!
//!     // Inspect the rate-limit headroom of the last request
//!     if let Some(last) = client.last_response() {
//!         println!("requests left: {:?}", last.requests_available());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three core traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch a filtered collection of entities
//! - [`Search`] - Map a name query to `{id: name}` matches
//!
//! Every model field is a [`Field`], which tells a key missing from the
//! payload ([`Field::Absent`]) apart from an explicit `null`. Related
//! entities are [`Related`]: embedded in full, or a bare [`EntityRef`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `FOOTBALL_DATA_API_KEY` (required unless passed explicitly) - Your API key
//! - `PYFOOTBALL_API_KEY` (optional) - Read when `FOOTBALL_DATA_API_KEY` is unset
//! - `FOOTBALL_DATA_API_URL` (optional) - Base URL (defaults to `https://api.football-data.org/v1/`)

mod client;
mod error;
mod facade;
mod field;
mod models;
mod response;
mod traits;

// Re-export core types
pub use client::{FootballClient, API_KEY_ENV, API_URL_ENV, LEGACY_API_KEY_ENV};
pub use error::{FootballError, Result};
pub use field::Field;
pub use response::RequestResult;

// Re-export traits
pub use traits::{Get, List, Search, SearchResult};

// Re-export models
pub use models::{
    // Shared
    Entity,
    EntityKind,
    EntityRef,
    Related,
    // Competition types
    Competition,
    CompetitionQuery,
    // League table types
    LeagueTable,
    Record,
    Standing,
    // Fixture types
    Fixture,
    FixtureDetail,
    FixtureQuery,
    FixtureStatus,
    HeadToHead,
    MatchResult,
    Odds,
    Score,
    TimeFrame,
    Venue,
    // Team types
    Player,
    Team,
    MIN_TEAM_NAME_LEN,
};

// Re-export convenience functions
pub use models::{find_team_by_name, get_team_fixtures, get_team_players};
pub use models::{get_competition_fixtures, get_competition_teams, get_competitions};
pub use models::{get_fixture_detail, get_fixtures, get_league_table};
