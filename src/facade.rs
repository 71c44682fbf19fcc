//! Query methods on [`FootballClient`].
//!
//! Thin wrappers over the model traits and convenience functions, so that
//! callers can work from the client alone.

use crate::client::FootballClient;
use crate::error::Result;
use crate::models::{
    find_team_by_name, get_competition_fixtures, get_competition_teams, get_competitions,
    get_fixture_detail, get_league_table, get_team_fixtures, get_team_players, Competition,
    CompetitionQuery, Fixture, FixtureDetail, FixtureQuery, LeagueTable, Player, Team,
};
use crate::traits::{Get, List, Search, SearchResult};

impl FootballClient {
    /// Check that upstream accepts the API key.
    ///
    /// Sends one request (the competition list).
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Authentication`](crate::FootballError::Authentication)
    /// if the key is rejected.
    pub async fn verify(&self) -> Result<()> {
        get_competitions(self).await.map(|_| ())
    }

    /// Fetch any entity kind by ID.
    ///
    /// ```ignore
    /// let team: Team = client.get(66).await?;
    /// let competition = client.get::<Competition>(445).await?;
    /// ```
    pub async fn get<T: Get>(&self, id: T::Id) -> Result<T> {
        T::get(self, id).await
    }

    /// Search any searchable entity kind by name.
    pub async fn search<T: Search>(&self, name: &str) -> Result<SearchResult> {
        T::search(self, name).await
    }

    /// List any listable entity kind.
    pub async fn list<T: List>(&self, query: &T::Query) -> Result<Vec<T>> {
        T::list(self, query).await
    }

    // Competitions

    /// Competitions of the current season.
    pub async fn competitions(&self) -> Result<Vec<Competition>> {
        get_competitions(self).await
    }

    /// Competitions of the season starting in `season`.
    pub async fn competitions_for_season(&self, season: u32) -> Result<Vec<Competition>> {
        let query = CompetitionQuery {
            season: Some(season),
        };
        Competition::list(self, &query).await
    }

    pub async fn competition(&self, id: u64) -> Result<Competition> {
        Competition::get(self, id).await
    }

    /// League table of a competition, as of `matchday` or the current one.
    pub async fn league_table(
        &self,
        competition_id: u64,
        matchday: Option<u32>,
    ) -> Result<LeagueTable> {
        get_league_table(self, competition_id, matchday).await
    }

    pub async fn competition_teams(&self, competition_id: u64) -> Result<Vec<Team>> {
        get_competition_teams(self, competition_id).await
    }

    pub async fn competition_fixtures(
        &self,
        competition_id: u64,
        query: &FixtureQuery,
    ) -> Result<Vec<Fixture>> {
        get_competition_fixtures(self, competition_id, query).await
    }

    // Fixtures

    /// Fixtures across all competitions (upstream defaults to the next 7 days).
    pub async fn fixtures(&self, query: &FixtureQuery) -> Result<Vec<Fixture>> {
        Fixture::list(self, query).await
    }

    pub async fn fixture(&self, id: u64) -> Result<Fixture> {
        Fixture::get(self, id).await
    }

    /// A fixture with its head-to-head summary.
    pub async fn fixture_detail(&self, id: u64, head2head: Option<u32>) -> Result<FixtureDetail> {
        get_fixture_detail(self, id, head2head).await
    }

    // Teams

    pub async fn team(&self, id: u64) -> Result<Team> {
        Team::get(self, id).await
    }

    /// First team matching `name`, fetched in full. See [`find_team_by_name`].
    pub async fn team_by_name(&self, name: &str) -> Result<Option<Team>> {
        find_team_by_name(self, name).await
    }

    /// `{team id: team name}` for every team matching `name`.
    pub async fn search_teams(&self, name: &str) -> Result<SearchResult> {
        Team::search(self, name).await
    }

    pub async fn team_players(&self, team_id: u64) -> Result<Vec<Player>> {
        get_team_players(self, team_id).await
    }

    pub async fn team_fixtures(&self, team_id: u64, query: &FixtureQuery) -> Result<Vec<Fixture>> {
        get_team_fixtures(self, team_id, query).await
    }
}
