//! Basic example demonstrating the football-data client.
//!
//! Run with:
//! ```
//! FOOTBALL_DATA_API_KEY=your-key cargo run --example basic
//! ```

use footballdata::{Competition, FixtureQuery, FootballClient, Get, Search, Team, TimeFrame};

#[tokio::main]
async fn main() -> footballdata::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating football-data client...");
    let client = FootballClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List competitions of the current season
    println!("\n--- Competitions ---");
    let competitions = client.competitions().await?;
    println!("Found {} competitions", competitions.len());
    for competition in competitions.iter().take(5) {
        println!(
            "  - {} ({})",
            competition.caption.as_deref().unwrap_or("unknown"),
            competition.league.as_deref().unwrap_or("-")
        );
    }

    // Search teams by name
    println!("\n--- Searching Teams ---");
    let matches = Team::search(&client, "manchester").await?;
    let mut ids: Vec<_> = matches.keys().copied().collect();
    ids.sort_unstable();
    for id in &ids {
        println!("  - {} ({})", matches[id], id);
    }

    // Get a team and walk to its squad
    if let Some(&team_id) = ids.first() {
        println!("\n--- Team Details ---");
        let team = Team::get(&client, team_id).await?;
        println!("Team: {}", team.display_name().unwrap_or("unknown"));
        println!("  Code: {}", team.code.as_deref().unwrap_or("-"));
        println!("  Market value: {:?}", team.squad_market_value);

        println!("\n--- Squad ---");
        let players = team.players(&client).await?;
        println!("Found {} players", players.len());
        for player in players.iter().take(5) {
            let number = player
                .jersey_number
                .value()
                .map(u32::to_string)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:>2} {} ({})",
                number,
                player.name.as_deref().unwrap_or("unknown"),
                player.position.as_deref().unwrap_or("unknown")
            );
        }

        println!("\n--- Recent Fixtures ---");
        let query = FixtureQuery {
            time_frame: Some(TimeFrame::Past(30)),
            ..Default::default()
        };
        let fixtures = team.fixtures(&client, &query).await?;
        for fixture in fixtures.iter().take(5) {
            let score = match fixture.score() {
                Some((home, away)) => format!("{home}-{away}"),
                None => "vs".to_string(),
            };
            println!(
                "  {} {} {}",
                fixture.home_team_name.as_deref().unwrap_or("?"),
                score,
                fixture.away_team_name.as_deref().unwrap_or("?")
            );
        }

        // Fetch the competition of the latest fixture
        if let Some(fixture) = fixtures.last() {
            let competition: Competition = fixture.fetch_competition(&client).await?;
            println!("\nLatest fixture played in: {:?}", competition.caption);
        }
    }

    // Rate-limit headroom after the last request
    if let Some(last) = client.last_response() {
        println!(
            "\nRequests left: {:?} (reset in {:?}s)",
            last.requests_available(),
            last.request_counter_reset()
        );
    }

    println!("\nDone!");
    Ok(())
}
