//! Team model and trait implementations.

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::FootballClient;
use crate::error::{FootballError, Result};
use crate::field::Field;
use crate::models::fixture::parse_fixture_list;
use crate::models::{Entity, EntityKind, EntityRef, Fixture, FixtureQuery, Player};
use crate::traits::{Get, Search, SearchResult};

/// Shortest name [`find_team_by_name`] will search for.
pub const MIN_TEAM_NAME_LEN: usize = 3;

/// A football club or national team.
///
/// `teams/{id}` does not report the ID in the body; it is taken from the
/// `_links.self` link instead when the `id` key is missing, and from the
/// requested ID when both are missing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTeam")]
pub struct Team {
    pub id: Field<u64>,

    /// Full name (e.g., "Manchester United FC").
    pub name: Field<String>,

    /// Short code (e.g., "MUFC").
    pub code: Field<String>,

    /// Short name (e.g., "ManU").
    pub short_name: Field<String>,

    /// Squad market value as reported (e.g., "377,250,000 €").
    pub squad_market_value: Field<String>,

    /// Club crest image URL.
    pub crest_url: Field<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeam {
    #[serde(default)]
    id: Field<u64>,
    #[serde(default)]
    name: Field<String>,
    #[serde(default)]
    code: Field<String>,
    #[serde(default)]
    short_name: Field<String>,
    #[serde(default)]
    squad_market_value: Field<String>,
    #[serde(default)]
    crest_url: Field<String>,
    #[serde(rename = "_links", default)]
    links: Field<TeamLinks>,
}

#[derive(Deserialize)]
struct TeamLinks {
    #[serde(rename = "self", default)]
    self_link: Field<EntityRef>,
}

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        let self_id = match raw.links {
            Field::Value(links) => links.self_link.map(|r| r.id),
            _ => Field::Absent,
        };

        Self {
            id: raw.id.or_else(|| self_id),
            name: raw.name,
            code: raw.code,
            short_name: raw.short_name,
            squad_market_value: raw.squad_market_value,
            crest_url: raw.crest_url,
        }
    }
}

impl Team {
    /// Short name if reported, otherwise the full name.
    pub fn display_name(&self) -> Option<&str> {
        self.short_name.as_deref().or_else(|| self.name.as_deref())
    }

    /// Get the current squad of this team.
    ///
    /// Always issues a new request.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let team = Team::get(&client, 66).await?;
    /// for player in team.players(&client).await? {
    ///     println!("{:?} {:?}", player.jersey_number, player.name);
    /// }
    /// ```
    pub async fn players(&self, client: &FootballClient) -> Result<Vec<Player>> {
        get_team_players(client, self.require_id()?).await
    }

    /// Get this team's fixtures, filtered by `query`.
    pub async fn fixtures(
        &self,
        client: &FootballClient,
        query: &FixtureQuery,
    ) -> Result<Vec<Fixture>> {
        get_team_fixtures(client, self.require_id()?, query).await
    }
}

impl Entity for Team {
    const KIND: EntityKind = EntityKind::Team;

    fn id(&self) -> Option<u64> {
        self.id.value().copied()
    }
}

/// API response wrapper for `teams?name=`.
#[derive(Debug, Deserialize)]
struct TeamSearchResponse {
    #[serde(default)]
    teams: Vec<Team>,
}

/// API response wrapper for team lists.
#[derive(Debug, Deserialize)]
pub(crate) struct TeamListResponse {
    pub(crate) teams: Vec<Team>,
}

/// API response wrapper for `teams/{id}/players`.
#[derive(Debug, Deserialize)]
struct PlayerListResponse {
    players: Vec<Player>,
}

#[async_trait]
impl Get for Team {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &FootballClient, id: u64) -> Result<Self> {
        let path = format!("teams/{id}");

        let value = client
            .dispatch(&path)
            .await
            .map_err(|e| e.for_entity(Self::KIND, id))?;

        // Some deployments report neither `id` nor a self link here.
        let mut team = Self::from_json(value)?;
        team.id = team.id.or_else(|| Field::Value(id));
        Ok(team)
    }
}

#[async_trait]
impl Search for Team {
    #[tracing::instrument(skip(client))]
    async fn search(client: &FootballClient, name: &str) -> Result<SearchResult> {
        let teams = search_teams(client, name).await?;

        let mut matches = SearchResult::with_capacity(teams.len());
        for team in teams {
            match (team.id, team.name) {
                (Field::Value(id), Field::Value(name)) => {
                    matches.insert(id, name);
                }
                (id, name) => {
                    tracing::warn!(?id, ?name, "skipping team match without id or name");
                }
            }
        }

        Ok(matches)
    }
}

/// Run a name search and return the matching teams in upstream order.
async fn search_teams(client: &FootballClient, name: &str) -> Result<Vec<Team>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FootballError::InvalidArgument(
            "team name must not be blank".to_string(),
        ));
    }

    let value = client.dispatch_with_query("teams", &[("name", name)]).await?;
    let data: TeamSearchResponse = serde_json::from_value(value)?;
    Ok(data.teams)
}

// Convenience functions for working with teams

/// Search by name and fetch the first match in full.
///
/// Sends two requests when something matches, one otherwise.
///
/// # Errors
///
/// Returns [`FootballError::InvalidArgument`] for names shorter than
/// [`MIN_TEAM_NAME_LEN`] characters.
pub async fn find_team_by_name(client: &FootballClient, name: &str) -> Result<Option<Team>> {
    if name.trim().chars().count() < MIN_TEAM_NAME_LEN {
        return Err(FootballError::InvalidArgument(format!(
            "team name must be at least {MIN_TEAM_NAME_LEN} characters"
        )));
    }

    let teams = search_teams(client, name).await?;
    match teams.iter().find_map(Team::id) {
        Some(id) => Team::get(client, id).await.map(Some),
        None => Ok(None),
    }
}

/// Fetch the squad of a team.
#[tracing::instrument(skip(client))]
pub async fn get_team_players(client: &FootballClient, team_id: u64) -> Result<Vec<Player>> {
    let path = format!("teams/{team_id}/players");

    let value = client
        .dispatch(&path)
        .await
        .map_err(|e| e.for_entity(EntityKind::Team, team_id))?;
    let data: PlayerListResponse = serde_json::from_value(value)?;
    Ok(data.players)
}

/// Fetch the fixtures of a team.
///
/// Honours `season`, `time_frame` and `venue` from the query.
#[tracing::instrument(skip(client))]
pub async fn get_team_fixtures(
    client: &FootballClient,
    team_id: u64,
    query: &FixtureQuery,
) -> Result<Vec<Fixture>> {
    let path = format!("teams/{team_id}/fixtures");

    let value = client
        .dispatch_with_query(&path, query)
        .await
        .map_err(|e| e.for_entity(EntityKind::Team, team_id))?;
    parse_fixture_list(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_deserialize_from_lookup() {
        let json = r#"{
            "_links": {
                "self": {"href": "http://api.football-data.org/v1/teams/66"},
                "fixtures": {"href": "http://api.football-data.org/v1/teams/66/fixtures"},
                "players": {"href": "http://api.football-data.org/v1/teams/66/players"}
            },
            "name": "Manchester United FC",
            "code": "MUFC",
            "shortName": "ManU",
            "squadMarketValue": null,
            "crestUrl": "http://upload.wikimedia.org/wikipedia/de/d/da/Manchester_United_FC.svg"
        }"#;
        let team: Team = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(team.id, Field::Value(66));
        assert_eq!(team.name.as_deref(), Some("Manchester United FC"));
        assert_eq!(team.code.as_deref(), Some("MUFC"));
        assert_eq!(team.display_name(), Some("ManU"));
        assert!(team.squad_market_value.is_null());
    }

    #[test]
    fn test_team_deserialize_from_search() {
        let json = r#"{"id": 65, "name": "Manchester City FC"}"#;
        let team: Team = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(team.id(), Some(65));
        assert_eq!(team.display_name(), Some("Manchester City FC"));
        assert!(team.code.is_absent());
        assert!(team.short_name.is_absent());
        assert!(team.squad_market_value.is_absent());
        assert!(team.crest_url.is_absent());
    }

    #[test]
    fn test_explicit_id_wins_over_self_link() {
        let json = r#"{
            "id": 65,
            "_links": {"self": {"href": "http://api.football-data.org/v1/teams/1"}}
        }"#;
        let team: Team = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(team.id, Field::Value(65));
    }

    #[test]
    fn test_team_without_id_cannot_be_traversed() {
        let team: Team =
            serde_json::from_str(r#"{"name": "Nowhere FC"}"#).expect("Failed to deserialize");
        let err = team.require_id().unwrap_err();
        assert!(matches!(err, FootballError::InvalidArgument(_)));
        assert!(err.to_string().contains("team"));
    }
}
