//! Competition model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::FootballClient;
use crate::error::Result;
use crate::field::Field;
use crate::models::fixture::parse_fixture_list;
use crate::models::team::TeamListResponse;
use crate::models::{
    get_league_table, Entity, EntityKind, Fixture, FixtureQuery, LeagueTable, Team,
};
use crate::traits::{Get, List};

/// A league or cup in a given season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(default)]
    pub id: Field<u64>,

    /// Display name (e.g., "Premier League 2017/18").
    #[serde(default)]
    pub caption: Field<String>,

    /// League code (e.g., "PL").
    #[serde(default)]
    pub league: Field<String>,

    /// Season start year as a string (e.g., "2017").
    #[serde(default)]
    pub year: Field<String>,

    #[serde(default)]
    pub current_matchday: Field<u32>,

    #[serde(default)]
    pub number_of_matchdays: Field<u32>,

    #[serde(default)]
    pub number_of_teams: Field<u32>,

    #[serde(default)]
    pub number_of_games: Field<u32>,

    /// When upstream last refreshed this competition.
    #[serde(default)]
    pub last_updated: Field<DateTime<Utc>>,
}

impl Competition {
    /// Matchdays left after the current one.
    pub fn remaining_matchdays(&self) -> Option<u32> {
        let total = self.number_of_matchdays.value()?;
        let current = self.current_matchday.value()?;
        Some(total.saturating_sub(*current))
    }

    /// Get the teams taking part. Always issues a new request.
    pub async fn teams(&self, client: &FootballClient) -> Result<Vec<Team>> {
        get_competition_teams(client, self.require_id()?).await
    }

    /// Get the fixtures of this competition, filtered by `query`.
    pub async fn fixtures(
        &self,
        client: &FootballClient,
        query: &FixtureQuery,
    ) -> Result<Vec<Fixture>> {
        get_competition_fixtures(client, self.require_id()?, query).await
    }

    /// Get the league table, as of `matchday` or the current one.
    pub async fn league_table(
        &self,
        client: &FootballClient,
        matchday: Option<u32>,
    ) -> Result<LeagueTable> {
        get_league_table(client, self.require_id()?, matchday).await
    }
}

impl Entity for Competition {
    const KIND: EntityKind = EntityKind::Competition;

    fn id(&self) -> Option<u64> {
        self.id.value().copied()
    }
}

/// Query parameters for listing competitions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompetitionQuery {
    /// Season start year; upstream defaults to the current season.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
}

#[async_trait]
impl Get for Competition {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &FootballClient, id: u64) -> Result<Self> {
        let path = format!("competitions/{id}");

        let value = client
            .dispatch(&path)
            .await
            .map_err(|e| e.for_entity(Self::KIND, id))?;
        Self::from_json(value)
    }
}

#[async_trait]
impl List for Competition {
    type Query = CompetitionQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &FootballClient, query: &Self::Query) -> Result<Vec<Self>> {
        let value = client.dispatch_with_query("competitions", query).await?;
        Ok(serde_json::from_value(value)?)
    }
}

// Convenience functions for working with competitions

/// Fetch the competitions of the current season.
pub async fn get_competitions(client: &FootballClient) -> Result<Vec<Competition>> {
    Competition::list(client, &CompetitionQuery::default()).await
}

/// Fetch the teams taking part in a competition.
#[tracing::instrument(skip(client))]
pub async fn get_competition_teams(client: &FootballClient, id: u64) -> Result<Vec<Team>> {
    let path = format!("competitions/{id}/teams");

    let value = client
        .dispatch(&path)
        .await
        .map_err(|e| e.for_entity(EntityKind::Competition, id))?;
    let data: TeamListResponse = serde_json::from_value(value)?;
    Ok(data.teams)
}

/// Fetch the fixtures of a competition.
///
/// Honours `matchday` and `time_frame` from the query.
#[tracing::instrument(skip(client))]
pub async fn get_competition_fixtures(
    client: &FootballClient,
    id: u64,
    query: &FixtureQuery,
) -> Result<Vec<Fixture>> {
    let path = format!("competitions/{id}/fixtures");

    let value = client
        .dispatch_with_query(&path, query)
        .await
        .map_err(|e| e.for_entity(EntityKind::Competition, id))?;
    parse_fixture_list(value)
}
