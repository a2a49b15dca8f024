// Single-team performance analytics for the team detail view.
//
// Aggregates one team's played history into averages, recent form, common
// scorelines, per-opponent records (nemesis / EZ win / stalemate), and a
// goals-scored distribution.

use crate::league::model::{FormEntry, Match, MatchResult};

/// How many form entries the profile exposes.
const FORM_WINDOW: usize = 10;

/// How many common scorelines the profile exposes.
const TOP_SCORELINES: usize = 3;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One scoreline ("gf-ga" from the subject's perspective) with its outcome
/// and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorelineCount {
    pub score: String,
    pub result: MatchResult,
    pub count: u32,
}

/// The subject's all-time record against one opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentRecord {
    pub opponent: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub total: u32,
}

/// Goals-scored-per-match histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalDistribution {
    pub zero: u32,
    pub one: u32,
    pub two: u32,
    pub three: u32,
    pub four_plus: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamProfileStats {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub total_goals_for: u32,
    pub total_goals_against: u32,
    /// Rounded to 2 decimals.
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
    /// Averaged only over matches carrying FP data; `None` when no match has
    /// any (the "not applicable" sentinel, never NaN).
    pub avg_fantasy_points: Option<f64>,
    /// Percentage rounded to the nearest integer.
    pub win_rate: u32,
    /// Last 10 results, most-recent-first.
    pub form: Vec<FormEntry>,
    /// Top 3 scorelines by frequency, first-encountered order on ties.
    pub top_scorelines: Vec<ScorelineCount>,
    pub nemesis: Option<OpponentRecord>,
    pub ez_win: Option<OpponentRecord>,
    pub stalemate: Option<OpponentRecord>,
    pub goal_distribution: GoalDistribution,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn select_opponent<'a, I, K>(candidates: I, key: impl Fn(&OpponentRecord) -> K) -> Option<OpponentRecord>
where
    I: Iterator<Item = &'a OpponentRecord>,
    K: Ord,
{
    let mut best: Option<&OpponentRecord> = None;
    for o in candidates {
        match best {
            Some(b) if key(o) <= key(b) => {}
            _ => best = Some(o),
        }
    }
    best.cloned()
}

/// Compute the performance profile for one team, or `None` if the team has
/// no played matches.
pub fn team_profile(matches: &[Match], team_name: &str) -> Option<TeamProfileStats> {
    let mut team_matches: Vec<&Match> = matches
        .iter()
        .filter(|m| m.is_played && (m.home_team == team_name || m.away_team == team_name))
        .collect();
    team_matches.sort_by_key(|m| m.matchday);

    let played = team_matches.len() as u32;
    if played == 0 {
        return None;
    }

    let mut total_gf = 0u32;
    let mut total_ga = 0u32;
    let mut fp_sum = 0.0f64;
    let mut fp_count = 0u32;
    let mut wins = 0u32;
    let mut draws = 0u32;
    let mut losses = 0u32;
    let mut form: Vec<FormEntry> = Vec::new();
    let mut scorelines: Vec<ScorelineCount> = Vec::new();
    let mut opponents: Vec<OpponentRecord> = Vec::new();
    let mut distribution = GoalDistribution::default();

    for m in &team_matches {
        let is_home = m.home_team == team_name;
        let opponent = if is_home { &m.away_team } else { &m.home_team };
        let gf = if is_home { m.home_score } else { m.away_score }.unwrap_or(0);
        let ga = if is_home { m.away_score } else { m.home_score }.unwrap_or(0);
        let fp = if is_home {
            m.home_fantasy_points
        } else {
            m.away_fantasy_points
        };

        total_gf += gf;
        total_ga += ga;
        if let Some(fp) = fp {
            fp_sum += fp;
            fp_count += 1;
        }

        let result = if gf > ga {
            wins += 1;
            MatchResult::W
        } else if gf < ga {
            losses += 1;
            MatchResult::L
        } else {
            draws += 1;
            MatchResult::D
        };

        let score = format!("{gf}-{ga}");
        form.push(FormEntry {
            result,
            opponent: opponent.clone(),
            score: score.clone(),
        });

        match scorelines.iter_mut().find(|s| s.score == score) {
            Some(entry) => entry.count += 1,
            None => scorelines.push(ScorelineCount {
                score,
                result,
                count: 1,
            }),
        }

        let record = match opponents.iter_mut().find(|o| &o.opponent == opponent) {
            Some(record) => record,
            None => {
                opponents.push(OpponentRecord {
                    opponent: opponent.clone(),
                    wins: 0,
                    draws: 0,
                    losses: 0,
                    total: 0,
                });
                opponents.last_mut().unwrap()
            }
        };
        record.total += 1;
        match result {
            MatchResult::W => record.wins += 1,
            MatchResult::D => record.draws += 1,
            MatchResult::L => record.losses += 1,
        }

        match gf {
            0 => distribution.zero += 1,
            1 => distribution.one += 1,
            2 => distribution.two += 1,
            3 => distribution.three += 1,
            _ => distribution.four_plus += 1,
        }
    }

    // Last 10, reversed after slicing the tail, so output is
    // most-recent-first.
    let tail_start = form.len().saturating_sub(FORM_WINDOW);
    let mut recent_form: Vec<FormEntry> = form[tail_start..].to_vec();
    recent_form.reverse();

    // Stable sort by frequency keeps first-encountered order on ties.
    let mut top_scorelines = scorelines;
    top_scorelines.sort_by(|a, b| b.count.cmp(&a.count));
    top_scorelines.truncate(TOP_SCORELINES);

    // First-encountered opponent wins full ties, so selection only replaces
    // the running best on a strict improvement.
    let nemesis = select_opponent(
        opponents.iter().filter(|o| o.wins == 0),
        |o| (o.losses, o.total),
    );
    let ez_win = select_opponent(
        opponents.iter().filter(|o| o.wins == o.total),
        |o| o.total,
    );
    let stalemate = select_opponent(
        opponents.iter().filter(|o| o.draws == o.total),
        |o| o.total,
    );

    let avg_fantasy_points = if fp_count > 0 {
        Some(round2(fp_sum / f64::from(fp_count)))
    } else {
        None
    };

    Some(TeamProfileStats {
        played,
        wins,
        draws,
        losses,
        total_goals_for: total_gf,
        total_goals_against: total_ga,
        avg_goals_for: round2(f64::from(total_gf) / f64::from(played)),
        avg_goals_against: round2(f64::from(total_ga) / f64::from(played)),
        avg_fantasy_points,
        win_rate: (f64::from(wins) / f64::from(played) * 100.0).round() as u32,
        form: recent_form,
        top_scorelines,
        nemesis,
        ez_win,
        stalemate,
        goal_distribution: distribution,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
