//! League table model and trait implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::FootballClient;
use crate::error::Result;
use crate::field::Field;
use crate::models::{Entity, EntityKind, EntityRef, Related, Team};
use crate::traits::Get;

/// Standings of a competition at a given matchday.
///
/// Leagues fill `standing`; group-stage cups fill `standings`, keyed by
/// group letter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueTable {
    #[serde(default)]
    pub league_caption: Field<String>,

    #[serde(default)]
    pub matchday: Field<u32>,

    #[serde(default)]
    pub standing: Field<Vec<Standing>>,

    #[serde(default)]
    pub standings: Field<BTreeMap<String, Vec<Standing>>>,
}

impl LeagueTable {
    /// All rows, league rows first, then groups in key order.
    pub fn entries(&self) -> Vec<&Standing> {
        let league = self.standing.value().into_iter().flatten();
        let groups = self
            .standings
            .value()
            .into_iter()
            .flat_map(|groups| groups.values().flatten());
        league.chain(groups).collect()
    }

    /// The row for the given team, if it is in the table.
    pub fn team(&self, team_id: u64) -> Option<&Standing> {
        self.entries()
            .into_iter()
            .find(|row| row.team_id() == Some(team_id))
    }

    /// Top of the league table (position 1).
    pub fn leader(&self) -> Option<&Standing> {
        self.standing
            .value()?
            .iter()
            .find(|row| row.position == Field::Value(1))
    }
}

impl Entity for LeagueTable {
    const KIND: EntityKind = EntityKind::LeagueTable;

    fn id(&self) -> Option<u64> {
        None
    }
}

/// One row of a league table.
///
/// League rows use `position`/`teamName`; group rows use `rank`/`team`
/// (the team's name) and `teamId`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStanding")]
pub struct Standing {
    pub position: Field<u32>,
    pub group: Field<String>,
    pub team_name: Field<String>,
    pub team: Field<Related<Team>>,
    pub crest_uri: Field<String>,
    pub played_games: Field<u32>,
    pub points: Field<u32>,
    pub goals: Field<u32>,
    pub goals_against: Field<u32>,
    pub goal_difference: Field<i32>,
    pub wins: Field<u32>,
    pub draws: Field<u32>,
    pub losses: Field<u32>,
    pub home: Field<Record>,
    pub away: Field<Record>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStanding {
    #[serde(default)]
    position: Field<u32>,
    #[serde(default)]
    rank: Field<u32>,
    #[serde(default)]
    group: Field<String>,
    #[serde(default)]
    team_name: Field<String>,
    #[serde(default)]
    team: Field<Value>,
    #[serde(default)]
    team_id: Field<u64>,
    #[serde(rename = "crestURI", default)]
    crest_uri: Field<String>,
    #[serde(default)]
    played_games: Field<u32>,
    #[serde(default)]
    points: Field<u32>,
    #[serde(default)]
    goals: Field<u32>,
    #[serde(default)]
    goals_against: Field<u32>,
    #[serde(default)]
    goal_difference: Field<i32>,
    #[serde(default)]
    wins: Field<u32>,
    #[serde(default)]
    draws: Field<u32>,
    #[serde(default)]
    losses: Field<u32>,
    #[serde(default)]
    home: Field<Record>,
    #[serde(default)]
    away: Field<Record>,
    #[serde(rename = "_links", default)]
    links: Field<StandingLinks>,
}

#[derive(Default, Deserialize)]
struct StandingLinks {
    #[serde(default)]
    team: Field<EntityRef>,
}

impl TryFrom<RawStanding> for Standing {
    type Error = serde_json::Error;

    fn try_from(raw: RawStanding) -> core::result::Result<Self, Self::Error> {
        let links = raw.links.into_option().unwrap_or_default();

        // Group rows put the team's name under `team`.
        let (team_name, embedded_team) = match raw.team {
            Field::Value(Value::String(name)) => (Field::Value(name), Field::Absent),
            Field::Value(value) => (raw.team_name, Field::Value(Related::from_value(value)?)),
            Field::Null => (raw.team_name, Field::Null),
            Field::Absent => (raw.team_name, Field::Absent),
        };

        let linked_team = links.team.map(Related::Reference).or_else(|| {
            raw.team_id
                .map(|id| Related::Reference(EntityRef { id, href: None }))
        });

        // A link or `teamId` wins over an explicit `"team": null`.
        let team = match embedded_team {
            Field::Value(team) => Field::Value(team),
            Field::Null if !linked_team.is_value() => Field::Null,
            Field::Null | Field::Absent => linked_team,
        };

        Ok(Self {
            position: raw.position.or_else(|| raw.rank),
            group: raw.group,
            team_name,
            team,
            crest_uri: raw.crest_uri,
            played_games: raw.played_games,
            points: raw.points,
            goals: raw.goals,
            goals_against: raw.goals_against,
            goal_difference: raw.goal_difference,
            wins: raw.wins,
            draws: raw.draws,
            losses: raw.losses,
            home: raw.home,
            away: raw.away,
        })
    }
}

impl Standing {
    /// ID of the team in this row, if reported.
    pub fn team_id(&self) -> Option<u64> {
        self.team.value().and_then(Related::id)
    }
}

/// Home or away record of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub goals: Field<u32>,
    #[serde(default)]
    pub goals_against: Field<u32>,
    #[serde(default)]
    pub wins: Field<u32>,
    #[serde(default)]
    pub draws: Field<u32>,
    #[serde(default)]
    pub losses: Field<u32>,
}

#[async_trait]
impl Get for LeagueTable {
    type Id = u64; // Competition ID

    #[tracing::instrument(skip(client))]
    async fn get(client: &FootballClient, competition_id: u64) -> Result<Self> {
        get_league_table(client, competition_id, None).await
    }
}

/// Fetch the league table of a competition, as of `matchday` or the current one.
#[tracing::instrument(skip(client))]
pub async fn get_league_table(
    client: &FootballClient,
    competition_id: u64,
    matchday: Option<u32>,
) -> Result<LeagueTable> {
    #[derive(Serialize)]
    struct RequestParams {
        #[serde(skip_serializing_if = "Option::is_none")]
        matchday: Option<u32>,
    }

    let path = format!("competitions/{competition_id}/leagueTable");
    let value = client
        .dispatch_with_query(&path, &RequestParams { matchday })
        .await
        .map_err(|e| e.for_entity(LeagueTable::KIND, competition_id))?;
    LeagueTable::from_json(value)
}
