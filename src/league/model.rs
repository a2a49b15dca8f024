// Core data model shared by the league engine.
//
// Everything here is plain data: the engine consumes immutable snapshots of
// these records and allocates fresh output collections on every call.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// A single fixture instance. Scores and fantasy points stay `None` until the
/// match is played; `is_played` is true iff both scores are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    /// Round number, 1..38.
    pub matchday: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Fractional fantasy score (e.g. 67.5), independent of goals.
    pub home_fantasy_points: Option<f64>,
    pub away_fantasy_points: Option<f64>,
    pub is_played: bool,
}

impl Match {
    /// Result of this match for the given side, if played.
    /// Home win is `Outcome::HomeWin` regardless of which side asks.
    pub fn outcome(&self) -> Option<Outcome> {
        let (h, a) = (self.home_score?, self.away_score?);
        Some(if h > a {
            Outcome::HomeWin
        } else if h < a {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        })
    }

    /// True if this match is a played meeting between exactly the two named
    /// teams (in either home/away orientation).
    pub fn is_between(&self, team_a: &str, team_b: &str) -> bool {
        self.is_played
            && ((self.home_team == team_a && self.away_team == team_b)
                || (self.home_team == team_b && self.away_team == team_a))
    }
}

/// W/D/L from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    W,
    D,
    L,
}

impl MatchResult {
    pub fn letter(&self) -> char {
        match self {
            MatchResult::W => 'W',
            MatchResult::D => 'D',
            MatchResult::L => 'L',
        }
    }
}

/// One entry in a team's form sequence: the result, the opponent, and the
/// score string ("gf-ga") from that team's own perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub result: MatchResult,
    pub opponent: String,
    pub score: String,
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// One standings row per team per competition format. Fully recomputed from
/// the match collection each time; never incrementally patched.
///
/// Invariants: `played = won + drawn + lost` and `gd = gf - ga`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    /// 1-based position, assigned after sorting.
    pub rank: usize,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub gf: u32,
    pub ga: u32,
    pub gd: i64,
    pub points: u32,
    pub total_fp: f64,
    /// Chronological (matchday order) per-match outcome records.
    pub form: Vec<FormEntry>,
}

impl TeamStats {
    pub fn zeroed(team: &str) -> Self {
        TeamStats {
            rank: 0,
            team: team.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            gf: 0,
            ga: 0,
            gd: 0,
            points: 0,
            total_fp: 0.0,
            form: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rivalries
// ---------------------------------------------------------------------------

/// Classification of a team's all-time record against one specific opponent.
/// Mixed win/loss/draw records are deliberately unlabeled (`None` upstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rivalry {
    /// The subject never won; the opponent won every non-draw.
    Nemesis,
    /// The subject won every shared match.
    EzWin,
    /// Every shared match was a draw.
    Stalemate,
}

// ---------------------------------------------------------------------------
// Schedina (predictions game)
// ---------------------------------------------------------------------------

/// A 1/X/2 match outcome, as printed on a schedina card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "1")]
    HomeWin,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    AwayWin,
}

impl Outcome {
    pub fn symbol(&self) -> char {
        match self {
            Outcome::HomeWin => '1',
            Outcome::Draw => 'X',
            Outcome::AwayWin => '2',
        }
    }
}

/// A single prediction within a schedina card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub match_id: String,
    pub prediction: Outcome,
}

/// One submitted predictions card: a team's 1/X/2 picks for one matchday.
///
/// At most one submission per (team, matchday) pair is considered current;
/// resubmission replaces the prior card in the calling store, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedinaSubmission {
    pub team_name: String,
    pub matchday: u32,
    pub predictions: Vec<Prediction>,
    pub timestamp: DateTime<Utc>,
}

/// Score accumulated before live tracking began, merged in as the baseline
/// for a team's leaderboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTotals {
    pub total_correct: i64,
    pub perfect_weeks: i64,
}

/// Manually-entered deltas added on top of computed totals. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAdjustment {
    pub extra_correct: i64,
    pub extra_perfect: i64,
}

/// Legacy seed map, keyed by team name. BTreeMap keeps iteration (and thus
/// tie ordering among legacy-only teams) deterministic across runs.
pub type LegacySchedineData = BTreeMap<String, LegacyTotals>;

/// Manual adjustment map, keyed by team name.
pub type SchedineAdjustments = BTreeMap<String, ScoreAdjustment>;

/// One row of the predictions-game leaderboard. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedinaLeaderboardRow {
    pub rank: usize,
    pub team_name: String,
    pub total_correct: i64,
    pub perfect_weeks: i64,
    pub last_week_correct: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn played(home: &str, away: &str, hs: u32, aws: u32) -> Match {
        Match {
            id: "m-1".into(),
            matchday: 1,
            home_team: home.into(),
            away_team: away.into(),
            home_score: Some(hs),
            away_score: Some(aws),
            home_fantasy_points: None,
            away_fantasy_points: None,
            is_played: true,
        }
    }

    #[test]
    fn outcome_follows_goals() {
        assert_eq!(played("A", "B", 2, 0).outcome(), Some(Outcome::HomeWin));
        assert_eq!(played("A", "B", 0, 2).outcome(), Some(Outcome::AwayWin));
        assert_eq!(played("A", "B", 1, 1).outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn outcome_none_until_both_scores_present() {
        let mut m = played("A", "B", 2, 0);
        m.away_score = None;
        m.is_played = false;
        assert_eq!(m.outcome(), None);
    }

    #[test]
    fn is_between_ignores_orientation() {
        let m = played("A", "B", 1, 0);
        assert!(m.is_between("A", "B"));
        assert!(m.is_between("B", "A"));
        assert!(!m.is_between("A", "C"));
    }

    #[test]
    fn outcome_symbol_roundtrip_via_serde() {
        let json = serde_json::to_string(&Outcome::Draw).unwrap();
        assert_eq!(json, "\"X\"");
        let back: Outcome = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(back, Outcome::AwayWin);
        // The wire representation is the printed symbol.
        for o in [Outcome::HomeWin, Outcome::Draw, Outcome::AwayWin] {
            let json = serde_json::to_string(&o).unwrap();
            assert_eq!(json, format!("\"{}\"", o.symbol()));
        }
    }
}
