// Integration tests for the league engine.
//
// These exercise the public API end-to-end: a season's worth of ingested
// match data flowing through both standings formats, the head-to-head
// analyzer, the predictions scorer, and the team profile aggregator, with
// the cross-cutting properties (accounting identities, determinism, rank
// permutations) asserted over realistic data.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use fantalega::ingest;
use fantalega::league::head_to_head::{
    head_to_head_description, head_to_head_history, rivalry_status,
};
use fantalega::league::model::{
    LegacyTotals, Match, Outcome, Prediction, Rivalry, SchedinaSubmission, ScoreAdjustment,
};
use fantalega::league::predictions::calculate_predictions_leaderboard;
use fantalega::league::profile::team_profile;
use fantalega::league::standings::{calculate_all_play_all, calculate_standard_league};
use fantalega::schedule::generate_schedule;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Three played matchdays for six teams, exported the way the league's
/// result sheets actually look (semicolons, comma decimals, header row),
/// plus an unplayed matchday-4 section.
const SEASON_CSV: &str = "\
Matchday;HomeTeam;HomeFP;HomeGoals;AwayGoals;AwayFP;AwayTeam;Result
1;SPIAZE;68,5;2;0;61;HORTO;2-0
1;SATANIA;72;3;1;65,5;OFF;3-1
1;ISAMU;59;0;0;60;NINUZZO;0-0
2;HORTO;66;1;1;66;SATANIA;1-1
2;OFF;58;0;2;70;SPIAZE;0-2
2;NINUZZO;63,5;2;1;62;ISAMU;2-1
3;SPIAZE;71;1;0;64;SATANIA;1-0
3;HORTO;60;2;2;61;NINUZZO;2-2
3;ISAMU;55;0;1;59;OFF;0-1
4;SPIAZE;NINUZZO
4;SATANIA;ISAMU
4;OFF;HORTO
";

fn season() -> Vec<Match> {
    ingest::parse_matches_csv(SEASON_CSV).unwrap()
}

fn card(team: &str, matchday: u32, picks: &[(&str, Outcome)]) -> SchedinaSubmission {
    SchedinaSubmission {
        team_name: team.into(),
        matchday,
        predictions: picks
            .iter()
            .map(|(id, pick)| Prediction {
                match_id: (*id).to_string(),
                prediction: *pick,
            })
            .collect(),
        timestamp: Utc.with_ymd_and_hms(2024, 9, 1, 18, 0, 0).unwrap(),
    }
}

// ===========================================================================
// Ingestion -> standings pipeline
// ===========================================================================

#[test]
fn ingested_season_produces_consistent_tables() {
    let matches = season();
    assert_eq!(matches.len(), 12);
    assert_eq!(matches.iter().filter(|m| m.is_played).count(), 9);

    let standard = calculate_standard_league(&matches);
    for r in &standard {
        // One fixture per team per matchday, so played splits exactly.
        assert_eq!(r.played, r.won + r.drawn + r.lost, "team {}", r.team);
        assert_eq!(r.gd, i64::from(r.gf) - i64::from(r.ga), "team {}", r.team);
    }

    let royale = calculate_all_play_all(&matches);
    for r in &royale {
        // played counts matchdays while W/D/L count goal comparisons, so
        // the split only bounds it from above (5 comparisons per matchday
        // here).
        assert!(r.won + r.drawn + r.lost >= r.played, "team {}", r.team);
        assert_eq!(r.won + r.drawn + r.lost, 5 * r.played, "team {}", r.team);
    }

    for rows in [standard, royale] {
        assert_eq!(rows.len(), 6);
        let mut ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=6).collect::<Vec<_>>());
    }
}

#[test]
fn standard_table_win_and_draw_sums_match_the_match_log() {
    let matches = season();
    let rows = calculate_standard_league(&matches);

    let non_draw_played = matches
        .iter()
        .filter(|m| m.is_played && m.home_score != m.away_score)
        .count() as u32;
    let drawn_played = matches
        .iter()
        .filter(|m| m.is_played && m.home_score == m.away_score)
        .count() as u32;

    let total_wins: u32 = rows.iter().map(|r| r.won).sum();
    let total_draws: u32 = rows.iter().map(|r| r.drawn).sum();
    assert_eq!(total_wins, non_draw_played);
    assert_eq!(total_draws, 2 * drawn_played);
    assert_eq!(total_draws % 2, 0);
}

#[test]
fn spiaze_tops_the_standard_table() {
    // SPIAZE won all three: 9 points.
    let rows = calculate_standard_league(&season());
    assert_eq!(rows[0].team, "SPIAZE");
    assert_eq!(rows[0].points, 9);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].form.len(), 3);
}

#[test]
fn all_engine_functions_are_deterministic() {
    let matches = season();
    let subs = vec![card("HORTO", 3, &[("m-7", Outcome::HomeWin)])];
    let legacy: BTreeMap<String, LegacyTotals> = BTreeMap::new();
    let adjustments: BTreeMap<String, ScoreAdjustment> = BTreeMap::new();

    assert_eq!(
        calculate_standard_league(&matches),
        calculate_standard_league(&matches)
    );
    assert_eq!(
        calculate_all_play_all(&matches),
        calculate_all_play_all(&matches)
    );
    assert_eq!(
        head_to_head_history(&matches, "SPIAZE", "HORTO"),
        head_to_head_history(&matches, "SPIAZE", "HORTO")
    );
    assert_eq!(
        calculate_predictions_leaderboard(&matches, &subs, &legacy, &adjustments),
        calculate_predictions_leaderboard(&matches, &subs, &legacy, &adjustments)
    );
    assert_eq!(
        team_profile(&matches, "SATANIA"),
        team_profile(&matches, "SATANIA")
    );
}

// ===========================================================================
// Head-to-head over ingested data
// ===========================================================================

#[test]
fn h2h_history_is_a_sorted_subsequence_of_the_pair() {
    let matches = season();
    let history = head_to_head_history(&matches, "SPIAZE", "OFF");
    assert_eq!(history.len(), 1);
    assert!(history.iter().all(|m| m.is_between("SPIAZE", "OFF")));
    assert!(history.windows(2).all(|w| w[0].matchday <= w[1].matchday));
    // The unplayed matchday-4 fixture is excluded.
    let spiaze_ninuzzo = head_to_head_history(&matches, "SPIAZE", "NINUZZO");
    assert!(spiaze_ninuzzo.is_empty());
}

#[test]
fn nemesis_means_zero_wins_and_at_least_one_loss() {
    let matches = season();
    // OFF lost its only meeting with SPIAZE.
    assert_eq!(
        rivalry_status(&matches, "OFF", "SPIAZE"),
        Some(Rivalry::Nemesis)
    );
    assert_eq!(
        rivalry_status(&matches, "SPIAZE", "OFF"),
        Some(Rivalry::EzWin)
    );
    // ISAMU and NINUZZO split a draw and a NINUZZO win: mixed from
    // NINUZZO's side, nemesis from ISAMU's.
    assert_eq!(rivalry_status(&matches, "NINUZZO", "ISAMU"), None);
    assert_eq!(
        rivalry_status(&matches, "ISAMU", "NINUZZO"),
        Some(Rivalry::Nemesis)
    );
}

#[test]
fn single_victory_description_uses_never_beaten_wording() {
    let matches = season();
    // One meeting, SPIAZE beat OFF 2-0: overlap between "never beaten"
    // and "won all" resolves to the former.
    assert_eq!(
        head_to_head_description(&matches, "SPIAZE", "OFF"),
        "OFF has never beaten SPIAZE (1 defeats out of 1)."
    );
    assert_eq!(
        head_to_head_description(&matches, "SPIAZE", "NINUZZO"),
        "No previous meetings between the two teams."
    );
}

// ===========================================================================
// Predictions leaderboard end-to-end
// ===========================================================================

#[test]
fn leaderboard_totals_never_exceed_evaluable_predictions() {
    let matches = season();
    // HORTO predicts matchday 1 (3 evaluable picks, 2 correct).
    let subs = vec![card(
        "HORTO",
        1,
        &[
            ("m-1", Outcome::HomeWin),  // correct
            ("m-2", Outcome::HomeWin),  // correct
            ("m-3", Outcome::AwayWin),  // wrong (draw)
            ("m-99", Outcome::HomeWin), // missing match, not evaluable
        ],
    )];
    let rows = calculate_predictions_leaderboard(
        &matches,
        &subs,
        &BTreeMap::new(),
        &BTreeMap::new(),
    );
    let horto = rows.iter().find(|r| r.team_name == "HORTO").unwrap();
    assert_eq!(horto.total_correct, 2);
    assert!(horto.total_correct <= 3);
    assert_eq!(horto.perfect_weeks, 0);
}

#[test]
fn full_leaderboard_with_legacy_and_adjustments() {
    let matches = season();

    let mut legacy = BTreeMap::new();
    legacy.insert(
        "SATANIA".to_string(),
        LegacyTotals {
            total_correct: 10,
            perfect_weeks: 1,
        },
    );

    let mut adjustments = BTreeMap::new();
    adjustments.insert(
        "SATANIA".to_string(),
        ScoreAdjustment {
            extra_correct: 2,
            extra_perfect: 0,
        },
    );
    adjustments.insert(
        "NOT_A_TEAM".to_string(),
        ScoreAdjustment {
            extra_correct: 99,
            extra_perfect: 9,
        },
    );

    // Matchday 3 is the last completed one.
    let subs = vec![card(
        "HORTO",
        3,
        &[
            ("m-7", Outcome::HomeWin), // SPIAZE 1-0 SATANIA: correct
            ("m-8", Outcome::Draw),    // HORTO 2-2 NINUZZO: correct
            ("m-9", Outcome::AwayWin), // ISAMU 0-1 OFF: correct
        ],
    )];

    let rows =
        calculate_predictions_leaderboard(&matches, &subs, &legacy, &adjustments);

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].team_name, "SATANIA");
    assert_eq!(rows[0].total_correct, 12);
    assert_eq!(rows[0].rank, 1);

    let horto = rows.iter().find(|r| r.team_name == "HORTO").unwrap();
    assert_eq!(horto.total_correct, 3);
    assert_eq!(horto.last_week_correct, 3);
    // Three evaluable picks can never be a perfect week.
    assert_eq!(horto.perfect_weeks, 0);

    assert!(rows.iter().all(|r| r.team_name != "NOT_A_TEAM"));
}

// ===========================================================================
// Team profile over ingested data
// ===========================================================================

#[test]
fn profile_matches_the_standings_view_of_the_same_team() {
    let matches = season();
    let rows = calculate_standard_league(&matches);
    let standings_row = rows.iter().find(|r| r.team == "ISAMU").unwrap();
    let profile = team_profile(&matches, "ISAMU").unwrap();

    assert_eq!(profile.played, standings_row.played);
    assert_eq!(profile.wins, standings_row.won);
    assert_eq!(profile.draws, standings_row.drawn);
    assert_eq!(profile.losses, standings_row.lost);
    assert_eq!(profile.total_goals_for, standings_row.gf);
    assert_eq!(profile.total_goals_against, standings_row.ga);

    // Profile form is most-recent-first; standings form is chronological.
    let mut standings_form = standings_row.form.clone();
    standings_form.reverse();
    assert_eq!(profile.form, standings_form);
}

#[test]
fn profile_is_none_for_teams_with_no_played_matches() {
    let schedule = generate_schedule(&["A".to_string(), "B".to_string()]);
    assert!(team_profile(&schedule, "A").is_none());
}

// ===========================================================================
// Generated schedules feed the engine
// ===========================================================================

#[test]
fn generated_schedule_yields_an_all_zero_table() {
    let teams: Vec<String> = ["SPIAZE", "HORTO", "SATANIA", "OFF"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let schedule = generate_schedule(&teams);
    let rows = calculate_standard_league(&schedule);

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.played == 0 && r.points == 0));
    // Zero rows keep appearance order under the stable comparator.
    let order: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(order, vec!["SPIAZE", "OFF", "HORTO", "SATANIA"]);
}
