// Head-to-head rivalry analysis between two teams.
//
// Works exclusively over the pair's shared played history. Classification
// and the one-line description follow a fixed rule order; with a short
// history several rules can overlap (one match won by A satisfies both
// "B never won" and "A won all"), and the earlier rule always wins.

use crate::league::model::{Match, Rivalry};

/// Shared win/draw tallies for a pair of teams.
struct PairRecord {
    total: usize,
    wins_a: usize,
    wins_b: usize,
    draws: usize,
}

fn pair_record(matches: &[Match], team_a: &str, team_b: &str) -> PairRecord {
    let mut rec = PairRecord {
        total: 0,
        wins_a: 0,
        wins_b: 0,
        draws: 0,
    };
    for m in matches.iter().filter(|m| m.is_between(team_a, team_b)) {
        let (Some(hs), Some(aws)) = (m.home_score, m.away_score) else {
            continue;
        };
        let a_is_home = m.home_team == team_a;
        let (score_a, score_b) = if a_is_home { (hs, aws) } else { (aws, hs) };

        rec.total += 1;
        if score_a > score_b {
            rec.wins_a += 1;
        } else if score_b > score_a {
            rec.wins_b += 1;
        } else {
            rec.draws += 1;
        }
    }
    rec
}

/// All played matches between exactly the two named teams, ascending by
/// matchday. Pure filter + sort; no aggregation.
pub fn head_to_head_history(matches: &[Match], team_a: &str, team_b: &str) -> Vec<Match> {
    let mut history: Vec<Match> = matches
        .iter()
        .filter(|m| m.is_between(team_a, team_b))
        .cloned()
        .collect();
    history.sort_by_key(|m| m.matchday);
    history
}

/// Classify the subject's historical relationship with the opponent.
///
/// Returns `None` both when there is no shared history and when the record
/// is mixed; mixed records are deliberately unlabeled.
pub fn rivalry_status(matches: &[Match], subject: &str, opponent: &str) -> Option<Rivalry> {
    let rec = pair_record(matches, subject, opponent);
    if rec.total == 0 {
        return None;
    }
    if rec.wins_a == 0 && rec.draws < rec.total {
        return Some(Rivalry::Nemesis);
    }
    if rec.wins_a == rec.total {
        return Some(Rivalry::EzWin);
    }
    if rec.draws == rec.total {
        return Some(Rivalry::Stalemate);
    }
    None
}

/// One-line human-readable summary of the pair's history.
///
/// Rule order matters and must not be rearranged: with a single match the
/// "never beaten" rules and the "won all" rules both apply, and the
/// never-beaten phrasing is the observed behavior.
pub fn head_to_head_description(matches: &[Match], team_a: &str, team_b: &str) -> String {
    let rec = pair_record(matches, team_a, team_b);
    let total = rec.total;

    if total == 0 {
        return "No previous meetings between the two teams.".to_string();
    }
    if rec.wins_a == 0 && rec.wins_b > 0 {
        return format!(
            "{team_a} has never beaten {team_b} ({} defeats out of {total}).",
            rec.wins_b
        );
    }
    if rec.wins_b == 0 && rec.wins_a > 0 {
        return format!(
            "{team_b} has never beaten {team_a} ({} defeats out of {total}).",
            rec.wins_a
        );
    }
    if rec.draws == total {
        return "The two teams have drawn every meeting.".to_string();
    }
    if rec.wins_a == total {
        return format!("{team_a} has won all {total} meetings against {team_b}.");
    }
    if rec.wins_b == total {
        return format!("{team_b} has won all {total} meetings against {team_a}.");
    }

    format!(
        "{total} meetings: {} wins for {team_a}, {} {}, {} wins for {team_b}.",
        rec.wins_a,
        rec.draws,
        if rec.draws == 1 { "draw" } else { "draws" },
        rec.wins_b
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
