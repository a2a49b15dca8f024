// Round-robin fixture generation.
//
// Circle-method scheduling: one team stays fixed while the rest rotate,
// producing n-1 rounds of n/2 pairings. Odd team counts get a BYE slot
// whose pairings are dropped. The league plays four legs, alternating
// home/away each leg.

use crate::league::model::Match;

const LEGS: u32 = 4;
const BYE: &str = "BYE";

struct Pairing {
    matchday: u32,
    home: String,
    away: String,
}

/// Generate a full four-leg season schedule for the given teams. All
/// fixtures come back unplayed, ids `auto-1..`, sorted by matchday.
pub fn generate_schedule(team_names: &[String]) -> Vec<Match> {
    let mut teams: Vec<String> = team_names.to_vec();
    if teams.len() % 2 != 0 {
        teams.push(BYE.to_string());
    }

    let n = teams.len();
    if n < 2 {
        return Vec::new();
    }
    let rounds = (n - 1) as u32;
    let per_round = n / 2;

    let mut current = teams;
    let mut leg1: Vec<Pairing> = Vec::new();

    for round in 0..rounds {
        for i in 0..per_round {
            let home = &current[i];
            let away = &current[n - 1 - i];
            if home != BYE && away != BYE {
                leg1.push(Pairing {
                    matchday: round + 1,
                    home: home.clone(),
                    away: away.clone(),
                });
            }
        }
        // Rotate all but the first team one position clockwise.
        let last = current.pop().unwrap();
        current.insert(1, last);
    }

    let mut matches: Vec<Match> = Vec::new();
    let mut next_id = 1u32;
    let mut push = |matchday: u32, home: &str, away: &str, matches: &mut Vec<Match>| {
        matches.push(Match {
            id: format!("auto-{next_id}"),
            matchday,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: None,
            away_score: None,
            home_fantasy_points: None,
            away_fantasy_points: None,
            is_played: false,
        });
        next_id += 1;
    };

    for leg in 0..LEGS {
        let offset = rounds * leg;
        let flip = leg % 2 == 1;
        for p in &leg1 {
            if flip {
                push(p.matchday + offset, &p.away, &p.home, &mut matches);
            } else {
                push(p.matchday + offset, &p.home, &p.away, &mut matches);
            }
        }
    }

    matches.sort_by_key(|m| m.matchday);
    matches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
