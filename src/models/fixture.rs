//! Fixture model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::client::FootballClient;
use crate::error::{FootballError, Result};
use crate::field::Field;
use crate::models::{Competition, Entity, EntityKind, EntityRef, Related, Team};
use crate::traits::{Get, List};

/// A single match between two teams.
///
/// Teams and competition are usually only linked, in which case they come
/// back as [`Related::Reference`]; payloads that embed them yield
/// [`Related::Embedded`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFixture")]
pub struct Fixture {
    pub id: Field<u64>,

    /// Kick-off time.
    pub date: Field<DateTime<Utc>>,

    pub status: Field<FixtureStatus>,

    pub matchday: Field<u32>,

    pub home_team_name: Field<String>,

    pub away_team_name: Field<String>,

    pub home_team: Field<Related<Team>>,

    pub away_team: Field<Related<Team>>,

    pub competition: Field<Related<Competition>>,

    /// Goals so far; the goal counts are null until kick-off.
    pub result: Field<MatchResult>,

    /// Betting odds, usually null.
    pub odds: Field<Odds>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFixture {
    #[serde(default)]
    id: Field<u64>,
    #[serde(default)]
    date: Field<DateTime<Utc>>,
    #[serde(default)]
    status: Field<FixtureStatus>,
    #[serde(default)]
    matchday: Field<u32>,
    #[serde(default)]
    home_team_name: Field<String>,
    #[serde(default)]
    away_team_name: Field<String>,
    #[serde(default)]
    home_team: Field<Related<Team>>,
    #[serde(default)]
    away_team: Field<Related<Team>>,
    #[serde(default)]
    competition: Field<Related<Competition>>,
    #[serde(default)]
    result: Field<MatchResult>,
    #[serde(default)]
    odds: Field<Odds>,
    #[serde(rename = "_links", default)]
    links: Field<FixtureLinks>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureLinks {
    #[serde(rename = "self", default)]
    self_link: Field<EntityRef>,
    #[serde(default)]
    competition: Field<EntityRef>,
    #[serde(default)]
    home_team: Field<EntityRef>,
    #[serde(default)]
    away_team: Field<EntityRef>,
}

impl From<RawFixture> for Fixture {
    fn from(raw: RawFixture) -> Self {
        let links = raw.links.into_option().unwrap_or_default();

        Self {
            id: raw.id.or_else(|| links.self_link.map(|r| r.id)),
            date: raw.date,
            status: raw.status,
            matchday: raw.matchday,
            home_team_name: raw.home_team_name,
            away_team_name: raw.away_team_name,
            home_team: raw
                .home_team
                .or_else(|| links.home_team.map(Related::Reference)),
            away_team: raw
                .away_team
                .or_else(|| links.away_team.map(Related::Reference)),
            competition: raw
                .competition
                .or_else(|| links.competition.map(Related::Reference)),
            result: raw.result,
            odds: raw.odds,
        }
    }
}

/// Match status as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixtureStatus {
    Scheduled,
    Timed,
    Postponed,
    InPlay,
    Canceled,
    Finished,
    /// A status this library does not know about.
    #[serde(other)]
    Unknown,
}

/// Goals for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default)]
    pub goals_home_team: Field<u32>,
    #[serde(default)]
    pub goals_away_team: Field<u32>,
}

impl Score {
    /// `(home, away)` once both counts are known.
    pub fn goals(&self) -> Option<(u32, u32)> {
        Some((
            *self.goals_home_team.value()?,
            *self.goals_away_team.value()?,
        ))
    }
}

/// Result block of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(default)]
    pub goals_home_team: Field<u32>,
    #[serde(default)]
    pub goals_away_team: Field<u32>,
    #[serde(default)]
    pub half_time: Field<Score>,
    #[serde(default)]
    pub extra_time: Field<Score>,
    #[serde(default)]
    pub penalty_shootout: Field<Score>,
}

impl MatchResult {
    /// Full-time `(home, away)` once both counts are known.
    pub fn goals(&self) -> Option<(u32, u32)> {
        Score {
            goals_home_team: self.goals_home_team,
            goals_away_team: self.goals_away_team,
        }
        .goals()
    }
}

/// Decimal betting odds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Odds {
    #[serde(default)]
    pub home_win: Field<f64>,
    #[serde(default)]
    pub draw: Field<f64>,
    #[serde(default)]
    pub away_win: Field<f64>,
}

impl Fixture {
    /// Full-time `(home, away)` goals, `None` until known.
    pub fn score(&self) -> Option<(u32, u32)> {
        self.result.value().and_then(MatchResult::goals)
    }

    /// Half-time `(home, away)` goals, `None` until known.
    pub fn half_time_score(&self) -> Option<(u32, u32)> {
        self.result
            .value()
            .and_then(|r| r.half_time.value())
            .and_then(Score::goals)
    }

    pub fn is_finished(&self) -> bool {
        self.status.value() == Some(&FixtureStatus::Finished)
    }

    /// ID of the home team, if reported.
    pub fn home_team_id(&self) -> Option<u64> {
        self.home_team.value().and_then(Related::id)
    }

    /// ID of the away team, if reported.
    pub fn away_team_id(&self) -> Option<u64> {
        self.away_team.value().and_then(Related::id)
    }

    /// ID of the competition, if reported.
    pub fn competition_id(&self) -> Option<u64> {
        self.competition.value().and_then(Related::id)
    }

    /// Whether the given team plays in this fixture.
    pub fn involves(&self, team_id: u64) -> bool {
        self.home_team_id() == Some(team_id) || self.away_team_id() == Some(team_id)
    }

    /// Fetch the home team. Always issues a new request.
    pub async fn fetch_home_team(&self, client: &FootballClient) -> Result<Team> {
        Team::get(client, related_id(self.home_team_id(), "home team")?).await
    }

    /// Fetch the away team. Always issues a new request.
    pub async fn fetch_away_team(&self, client: &FootballClient) -> Result<Team> {
        Team::get(client, related_id(self.away_team_id(), "away team")?).await
    }

    /// Fetch the competition. Always issues a new request.
    pub async fn fetch_competition(&self, client: &FootballClient) -> Result<Competition> {
        Competition::get(client, related_id(self.competition_id(), "competition")?).await
    }
}

fn related_id(id: Option<u64>, role: &str) -> Result<u64> {
    id.ok_or_else(|| FootballError::InvalidArgument(format!("fixture has no {role} id")))
}

impl Entity for Fixture {
    const KIND: EntityKind = EntityKind::Fixture;

    fn id(&self) -> Option<u64> {
        self.id.value().copied()
    }
}

/// A fixture together with its head-to-head summary, from `fixtures/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureDetail {
    pub fixture: Fixture,
    #[serde(default)]
    pub head2head: Field<HeadToHead>,
}

/// Previous meetings of the two teams in a fixture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    /// Number of previous meetings considered.
    #[serde(default)]
    pub count: Field<u32>,
    #[serde(default)]
    pub time_frame_start: Field<String>,
    #[serde(default)]
    pub time_frame_end: Field<String>,
    #[serde(default)]
    pub home_team_wins: Field<u32>,
    #[serde(default)]
    pub away_team_wins: Field<u32>,
    #[serde(default)]
    pub draws: Field<u32>,
    #[serde(default)]
    pub last_home_win_home_team: Field<Fixture>,
    #[serde(default)]
    pub last_win_home_team: Field<Fixture>,
    #[serde(default)]
    pub last_away_win_away_team: Field<Fixture>,
    #[serde(default)]
    pub last_win_away_team: Field<Fixture>,
    #[serde(default)]
    pub fixtures: Field<Vec<Fixture>>,
}

/// Relative window of days around today, serialized as `n7` / `p7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    /// The next N days.
    Next(u8),
    /// The past N days.
    Past(u8),
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFrame::Next(days) => write!(f, "n{days}"),
            TimeFrame::Past(days) => write!(f, "p{days}"),
        }
    }
}

impl Serialize for TimeFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Home or away, from a team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

/// Query parameters for fixture listings.
///
/// Not every endpoint honours every filter: `matchday` applies to
/// competition fixtures, `venue` and `season` to team fixtures, and
/// `league` (comma-separated league codes such as `PL,BL1`) to the
/// all-fixtures listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<TimeFrame>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchday: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
}

/// API response wrapper for fixture lists.
#[derive(Debug, Deserialize)]
struct FixtureListResponse {
    fixtures: Vec<Fixture>,
}

pub(crate) fn parse_fixture_list(value: Value) -> Result<Vec<Fixture>> {
    let data: FixtureListResponse = serde_json::from_value(value)?;
    Ok(data.fixtures)
}

#[async_trait]
impl Get for Fixture {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &FootballClient, id: u64) -> Result<Self> {
        Ok(get_fixture_detail(client, id, None).await?.fixture)
    }
}

#[async_trait]
impl List for Fixture {
    type Query = FixtureQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &FootballClient, query: &Self::Query) -> Result<Vec<Self>> {
        let value = client.dispatch_with_query("fixtures", query).await?;
        parse_fixture_list(value)
    }
}

// Convenience functions for working with fixtures

/// Fetch a fixture with its head-to-head summary.
///
/// `head2head` limits how many previous meetings are considered; upstream
/// picks its own default when `None`.
#[tracing::instrument(skip(client))]
pub async fn get_fixture_detail(
    client: &FootballClient,
    id: u64,
    head2head: Option<u32>,
) -> Result<FixtureDetail> {
    #[derive(Serialize)]
    struct RequestParams {
        #[serde(skip_serializing_if = "Option::is_none")]
        head2head: Option<u32>,
    }

    let path = format!("fixtures/{id}");
    let value = client
        .dispatch_with_query(&path, &RequestParams { head2head })
        .await
        .map_err(|e| e.for_entity(EntityKind::Fixture, id))?;
    Ok(serde_json::from_value(value)?)
}

/// Fetch fixtures across all competitions.
pub async fn get_fixtures(client: &FootballClient, query: &FixtureQuery) -> Result<Vec<Fixture>> {
    Fixture::list(client, query).await
}
