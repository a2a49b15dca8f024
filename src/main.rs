// League report entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, RUST_LOG-filtered)
// 2. Load config
// 3. Load matches, submissions, legacy seed, adjustments
// 4. Run the engine: both standings formats + schedina leaderboard
// 5. Print the tables

use fantalega::config;
use fantalega::ingest;
use fantalega::league::model::{SchedinaLeaderboardRow, TeamStats};
use fantalega::league::{predictions, standings};
use fantalega::schedule;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        league = %config.league.name,
        teams = config.league.teams.len(),
        "config loaded"
    );

    // No result sheet yet means a fresh season: generate the fixture list
    // from the configured teams instead.
    let matches = if config.matches_path.exists() {
        ingest::load_matches(&config.matches_path).context("failed to load match sheet")?
    } else {
        info!(path = %config.matches_path.display(), "no match sheet, generating schedule");
        schedule::generate_schedule(&config.league.teams)
    };
    let submissions = ingest::load_submissions(&config.submissions_path)
        .context("failed to load schedina submissions")?;
    let legacy =
        ingest::load_legacy_data(&config.legacy_path).context("failed to load legacy data")?;
    let adjustments = ingest::load_adjustments(&config.adjustments_path)
        .context("failed to load adjustments")?;
    info!(
        matches = matches.len(),
        played = matches.iter().filter(|m| m.is_played).count(),
        submissions = submissions.len(),
        "data loaded"
    );

    let campionato = standings::calculate_standard_league(&matches);
    let battle_royale = standings::calculate_all_play_all(&matches);
    let schedina =
        predictions::calculate_predictions_leaderboard(&matches, &submissions, &legacy, &adjustments);

    print_standings("CAMPIONATO", &campionato);
    print_standings("BATTLE ROYALE", &battle_royale);
    print_leaderboard(&schedina);

    Ok(())
}

fn print_standings(title: &str, rows: &[TeamStats]) {
    println!("\n=== {title} ===");
    println!(
        "{:>3}  {:<18} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>3} {:>8}  FORM",
        "#", "TEAM", "P", "W", "D", "L", "GF", "GA", "GD", "PTS", "FP"
    );
    for row in rows {
        let form: String = row
            .form
            .iter()
            .rev()
            .take(5)
            .map(|f| f.result.letter())
            .collect();
        println!(
            "{:>3}  {:<18} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>3} {:>8.1}  {}",
            row.rank,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.gf,
            row.ga,
            row.gd,
            row.points,
            row.total_fp,
            form
        );
    }
}

fn print_leaderboard(rows: &[SchedinaLeaderboardRow]) {
    println!("\n=== SCHEDINA ===");
    println!(
        "{:>3}  {:<18} {:>7} {:>8} {:>9}",
        "#", "TEAM", "CORRECT", "PERFECT", "LAST WEEK"
    );
    for row in rows {
        println!(
            "{:>3}  {:<18} {:>7} {:>8} {:>9}",
            row.rank, row.team_name, row.total_correct, row.perfect_weeks, row.last_week_correct
        );
    }
}
