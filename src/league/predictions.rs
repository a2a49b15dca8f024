// Schedina (predictions game) leaderboard scoring.
//
// Merges four inputs into one ranked table: the match collection (for actual
// outcomes), submitted prediction cards, the legacy seed map (score
// accumulated before live tracking began), and manual adjustments.

use std::collections::HashMap;

use crate::league::model::{
    LegacySchedineData, Match, SchedinaLeaderboardRow, SchedinaSubmission, SchedineAdjustments,
};

/// The schedina always presents exactly five matches per matchday; a card
/// with any other number of evaluable predictions can never register as a
/// perfect week.
pub const PERFECT_WEEK_CARD_SIZE: usize = 5;

struct Accumulator {
    team_name: String,
    total: i64,
    perfect: i64,
    last_week: i64,
}

/// Compute the predictions-game leaderboard.
///
/// Teams are seeded from legacy data, then every team appearing in the match
/// collection is added at zero. Adjustments apply only to teams already
/// tracked; submissions from unknown teams and predictions referencing
/// missing or unplayed matches are skipped without effect. Sorted by total
/// correct, then perfect weeks; full ties keep seeding order.
pub fn calculate_predictions_leaderboard(
    matches: &[Match],
    submissions: &[SchedinaSubmission],
    legacy_data: &LegacySchedineData,
    adjustments: &SchedineAdjustments,
) -> Vec<SchedinaLeaderboardRow> {
    let mut rows: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    // lastWeek always starts at zero, legacy or not.
    for (team, totals) in legacy_data {
        index.insert(team.clone(), rows.len());
        rows.push(Accumulator {
            team_name: team.clone(),
            total: totals.total_correct,
            perfect: totals.perfect_weeks,
            last_week: 0,
        });
    }
    for m in matches {
        for team in [&m.home_team, &m.away_team] {
            if !index.contains_key(team.as_str()) {
                index.insert(team.clone(), rows.len());
                rows.push(Accumulator {
                    team_name: team.clone(),
                    total: 0,
                    perfect: 0,
                    last_week: 0,
                });
            }
        }
    }

    // Unknown team names never create leaderboard rows.
    for (team, adj) in adjustments {
        if let Some(&idx) = index.get(team.as_str()) {
            rows[idx].total += adj.extra_correct;
            rows[idx].perfect += adj.extra_perfect;
        }
    }

    let match_by_id: HashMap<&str, &Match> =
        matches.iter().map(|m| (m.id.as_str(), m)).collect();
    let last_completed_matchday = matches
        .iter()
        .filter(|m| m.is_played)
        .map(|m| m.matchday)
        .max()
        .unwrap_or(0);

    for sub in submissions {
        let Some(&idx) = index.get(sub.team_name.as_str()) else {
            continue;
        };

        let mut md_correct = 0i64;
        let mut md_total = 0usize;

        for pred in &sub.predictions {
            let Some(m) = match_by_id.get(pred.match_id.as_str()) else {
                continue;
            };
            if !m.is_played {
                continue;
            }
            let Some(actual) = m.outcome() else {
                continue;
            };
            md_total += 1;
            if actual == pred.prediction {
                md_correct += 1;
                rows[idx].total += 1;
            }
        }

        if md_total == PERFECT_WEEK_CARD_SIZE && md_correct == PERFECT_WEEK_CARD_SIZE as i64 {
            rows[idx].perfect += 1;
        }
        // Later submissions for the same matchday overwrite; dedup is the
        // calling store's contract, this is the fallback.
        if sub.matchday == last_completed_matchday {
            rows[idx].last_week = md_correct;
        }
    }

    let mut out: Vec<SchedinaLeaderboardRow> = rows
        .into_iter()
        .map(|acc| SchedinaLeaderboardRow {
            rank: 0,
            team_name: acc.team_name,
            total_correct: acc.total,
            perfect_weeks: acc.perfect,
            last_week_correct: acc.last_week,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_correct
            .cmp(&a.total_correct)
            .then_with(|| b.perfect_weeks.cmp(&a.perfect_weeks))
    });
    for (i, row) in out.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
