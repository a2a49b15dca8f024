// Standings computation for the two competition formats.
//
// Campionato is a classic 3/1/0 round-robin table over scheduled fixtures.
// Battle Royale scores each team's matchday performance against every other
// team that played in the same matchday, regardless of scheduled opponent.
//
// Both functions are pure: they take the full match collection (played and
// unplayed) and return freshly-allocated, ranked rows. Teams are tracked in
// first-appearance order so that ties unresolved by the comparator keep a
// stable, input-derived order on every invocation.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::league::model::{FormEntry, Match, MatchResult, TeamStats};

// ---------------------------------------------------------------------------
// First-appearance-ordered stats table
// ---------------------------------------------------------------------------

struct StatsTable {
    rows: Vec<TeamStats>,
    index: HashMap<String, usize>,
}

impl StatsTable {
    /// Seed one zero row per team appearing anywhere in the collection,
    /// home or away, played or not.
    fn seed(matches: &[Match]) -> Self {
        let mut table = StatsTable {
            rows: Vec::new(),
            index: HashMap::new(),
        };
        for m in matches {
            table.ensure(&m.home_team);
            table.ensure(&m.away_team);
        }
        table
    }

    fn ensure(&mut self, team: &str) {
        if !self.index.contains_key(team) {
            self.index.insert(team.to_string(), self.rows.len());
            self.rows.push(TeamStats::zeroed(team));
        }
    }

    fn row_mut(&mut self, team: &str) -> &mut TeamStats {
        let idx = self.index[team];
        &mut self.rows[idx]
    }
}

fn assign_ranks(mut rows: Vec<TeamStats>) -> Vec<TeamStats> {
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

fn fp_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ---------------------------------------------------------------------------
// Campionato (standard league)
// ---------------------------------------------------------------------------

/// Compute the standard-league table: one match per pairing per matchday,
/// 3 points for a win, 1 for a draw.
///
/// Matches are processed in ascending matchday order (stable within a
/// matchday) so each team's form sequence comes out chronological. The full
/// tie-break chain is points, then total fantasy points, then goal
/// difference, then goals for; teams equal on all four retain appearance
/// order.
pub fn calculate_standard_league(matches: &[Match]) -> Vec<TeamStats> {
    let mut table = StatsTable::seed(matches);

    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|m| m.matchday);

    for m in ordered {
        let (Some(hs), Some(aws)) = (m.home_score, m.away_score) else {
            continue;
        };
        if !m.is_played {
            continue;
        }

        let home_score_str = format!("{hs}-{aws}");
        let away_score_str = format!("{aws}-{hs}");

        {
            let home = table.row_mut(&m.home_team);
            home.played += 1;
            home.gf += hs;
            home.ga += aws;
            home.total_fp += m.home_fantasy_points.unwrap_or(0.0);
        }
        {
            let away = table.row_mut(&m.away_team);
            away.played += 1;
            away.gf += aws;
            away.ga += hs;
            away.total_fp += m.away_fantasy_points.unwrap_or(0.0);
        }

        let (home_result, away_result) = match hs.cmp(&aws) {
            Ordering::Greater => (MatchResult::W, MatchResult::L),
            Ordering::Less => (MatchResult::L, MatchResult::W),
            Ordering::Equal => (MatchResult::D, MatchResult::D),
        };

        let home = table.row_mut(&m.home_team);
        match home_result {
            MatchResult::W => {
                home.won += 1;
                home.points += 3;
            }
            MatchResult::D => {
                home.drawn += 1;
                home.points += 1;
            }
            MatchResult::L => home.lost += 1,
        }
        home.form.push(FormEntry {
            result: home_result,
            opponent: m.away_team.clone(),
            score: home_score_str,
        });

        let away = table.row_mut(&m.away_team);
        match away_result {
            MatchResult::W => {
                away.won += 1;
                away.points += 3;
            }
            MatchResult::D => {
                away.drawn += 1;
                away.points += 1;
            }
            MatchResult::L => away.lost += 1,
        }
        away.form.push(FormEntry {
            result: away_result,
            opponent: m.home_team.clone(),
            score: away_score_str,
        });
    }

    let mut rows = table.rows;
    for row in &mut rows {
        row.gd = i64::from(row.gf) - i64::from(row.ga);
    }
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| fp_desc(a.total_fp, b.total_fp))
            .then_with(|| b.gd.cmp(&a.gd))
            .then_with(|| b.gf.cmp(&a.gf))
    });
    assign_ranks(rows)
}

// ---------------------------------------------------------------------------
// Battle Royale (all-play-all)
// ---------------------------------------------------------------------------

/// One team's showing in one matchday: goals scored and fantasy points from
/// whichever single match that team played.
struct Performance {
    team: String,
    goals: u32,
    fp: f64,
}

/// Compute the all-play-all table: within each matchday every team's goal
/// tally is compared against every other team's, 3/1/0 per comparison.
///
/// `played` increments once per team per matchday (not once per comparison),
/// and fantasy points accumulate once per matchday. Goals for/against and
/// goal difference are not meaningful in this format and stay zero.
pub fn calculate_all_play_all(matches: &[Match]) -> Vec<TeamStats> {
    let mut table = StatsTable::seed(matches);

    // BTreeMap keeps matchday processing order deterministic.
    let mut matchdays: std::collections::BTreeMap<u32, Vec<Performance>> =
        std::collections::BTreeMap::new();

    for m in matches {
        let (Some(hs), Some(aws)) = (m.home_score, m.away_score) else {
            continue;
        };
        if !m.is_played {
            continue;
        }
        let entry = matchdays.entry(m.matchday).or_default();
        entry.push(Performance {
            team: m.home_team.clone(),
            goals: hs,
            fp: m.home_fantasy_points.unwrap_or(0.0),
        });
        entry.push(Performance {
            team: m.away_team.clone(),
            goals: aws,
            fp: m.away_fantasy_points.unwrap_or(0.0),
        });
    }

    for performances in matchdays.values() {
        for (i, perf) in performances.iter().enumerate() {
            let row = table.row_mut(&perf.team);
            row.played += 1;
            row.total_fp += perf.fp;

            for (j, other) in performances.iter().enumerate() {
                if i == j {
                    continue;
                }
                let row = table.row_mut(&perf.team);
                match perf.goals.cmp(&other.goals) {
                    Ordering::Greater => {
                        row.won += 1;
                        row.points += 3;
                    }
                    Ordering::Less => row.lost += 1,
                    Ordering::Equal => {
                        row.drawn += 1;
                        row.points += 1;
                    }
                }
            }
        }
    }

    let mut rows = table.rows;
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| fp_desc(a.total_fp, b.total_fp))
            .then_with(|| b.won.cmp(&a.won))
    });
    assign_ranks(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
