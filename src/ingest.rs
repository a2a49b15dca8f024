// Data ingestion: match result sheets (CSV) and schedina documents (JSON).
//
// The result sheets are exported by hand and arrive messy: comma, semicolon,
// or tab delimited, comma decimals ("65,5"), stray header and all-zero rows,
// and occasional matchday-only section rows. The parser is tolerant by
// design; rows it cannot interpret are skipped, never fatal. The engine only
// ever sees fully-formed `Match` records.
//
// Expected full row shape:
//   Matchday, HomeTeam, HomeFP, HomeGoals, AwayGoals, AwayFP, AwayTeam[, Result]
// A two-number row is read as goals only, with FP falling back to goals.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::league::model::{
    LegacySchedineData, Match, SchedinaSubmission, SchedineAdjustments,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Numeric helpers (comma-decimal tolerant)
// ---------------------------------------------------------------------------

fn parse_num(raw: &str) -> Option<f64> {
    let normalized = raw.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

fn is_numeric(raw: &str) -> bool {
    parse_num(raw).is_some()
}

/// Words that can appear in a team-name column position but are never team
/// names (header fragments, placeholders), plus "N-N" result strings.
fn is_team_name(raw: &str) -> bool {
    const STOPWORDS: &[&str] = &[
        "matchday",
        "home",
        "away",
        "score",
        "result",
        "null",
        "undefined",
        "-",
    ];
    if STOPWORDS.contains(&raw.to_lowercase().as_str()) {
        return false;
    }
    // "2-1" style result strings.
    let mut parts = raw.splitn(2, '-');
    if let (Some(left), Some(right)) = (parts.next(), parts.next()) {
        if !left.is_empty()
            && !right.is_empty()
            && left.chars().all(|c| c.is_ascii_digit())
            && right.chars().all(|c| c.is_ascii_digit())
        {
            return false;
        }
    }
    true
}

fn sniff_delimiter(text: &str) -> u8 {
    let counts = [
        (b';', text.matches(';').count()),
        (b'\t', text.matches('\t').count()),
        (b',', text.matches(',').count()),
    ];
    counts
        .iter()
        .max_by_key(|(_, n)| *n)
        .filter(|(_, n)| *n > 0)
        .map(|(d, _)| *d)
        .unwrap_or(b',')
}

// ---------------------------------------------------------------------------
// CSV match ingestion
// ---------------------------------------------------------------------------

/// Parse a result sheet into match records. Tolerant: uninterpretable rows
/// are skipped. Match ids are sequential (`m-1`, `m-2`, ...) in sheet order.
pub fn parse_matches_csv(text: &str) -> Result<Vec<Match>, csv::Error> {
    let delimiter = sniff_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut matches: Vec<Match> = Vec::new();
    let mut current_matchday: u32 = 0;

    for record in reader.records() {
        let record = record?;
        let parts: Vec<&str> = record
            .iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            continue;
        }

        // Data rows start with the matchday number; anything else is a
        // header or free-text row.
        if !is_numeric(parts[0]) {
            continue;
        }

        // Placeholder rows full of zeros carry no fixture.
        if parts
            .iter()
            .all(|p| matches!(*p, "0" | "0.0" | "0,0"))
        {
            continue;
        }

        let number_indices: Vec<usize> = parts
            .iter()
            .enumerate()
            .filter(|(_, p)| is_numeric(p))
            .map(|(i, _)| i)
            .collect();
        let string_indices: Vec<usize> = parts
            .iter()
            .enumerate()
            .filter(|(_, p)| !is_numeric(p) && is_team_name(p))
            .map(|(i, _)| i)
            .collect();

        // The leading number is the row's matchday (checked numeric above);
        // a zero keeps the matchday of the enclosing section.
        let row_matchday = parse_num(parts[0]).unwrap_or(0.0) as u32;
        if row_matchday > 0 {
            current_matchday = row_matchday;
        }

        if string_indices.len() < 2 {
            // Matchday-only section row: context recorded, nothing to parse.
            continue;
        }
        if current_matchday == 0 {
            warn!(row = ?parts, "skipping fixture row with no matchday context");
            continue;
        }

        let home_idx = string_indices[0];
        let away_idx = *string_indices.last().unwrap();
        if home_idx == away_idx {
            continue;
        }
        let home_team = parts[home_idx].to_string();
        let away_team = parts[away_idx].to_string();

        // Numbers strictly between the two team names:
        // FP, goals, goals, FP when complete; goals only when just two.
        let inner: Vec<f64> = number_indices
            .iter()
            .filter(|&&i| i > home_idx && i < away_idx)
            .filter_map(|&i| parse_num(parts[i]))
            .collect();

        let (home_score, away_score, home_fp, away_fp, is_played) = match inner.len() {
            n if n >= 4 => (
                Some(inner[1] as u32),
                Some(inner[2] as u32),
                Some(inner[0]),
                Some(inner[3]),
                true,
            ),
            2 => (
                Some(inner[0] as u32),
                Some(inner[1] as u32),
                // FP missing from simple sheets; approximate with goals.
                Some(inner[0]),
                Some(inner[1]),
                true,
            ),
            _ => (None, None, None, None, false),
        };

        matches.push(Match {
            id: format!("m-{}", matches.len() + 1),
            matchday: current_matchday,
            home_team,
            away_team,
            home_score,
            away_score,
            home_fantasy_points: home_fp,
            away_fantasy_points: away_fp,
            is_played,
        });
    }

    Ok(matches)
}

/// Load and parse a result sheet from disk.
pub fn load_matches(path: &Path) -> Result<Vec<Match>, IngestError> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let matches = parse_matches_csv(&text).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(count = matches.len(), path = %path.display(), "loaded matches");
    Ok(matches)
}

// ---------------------------------------------------------------------------
// JSON documents (submissions, legacy seed, adjustments)
// ---------------------------------------------------------------------------

fn read_json<T: serde::de::DeserializeOwned, R: Read>(rdr: R) -> Result<T, serde_json::Error> {
    serde_json::from_reader(rdr)
}

fn load_json_document<T: serde::de::DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, IngestError> {
    if !path.exists() {
        debug!(path = %path.display(), "optional document missing, using empty default");
        return Ok(T::default());
    }
    let file = fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_json(file).map_err(|e| IngestError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Submitted schedina cards, as synced from the shared store. Missing file
/// means no submissions yet.
pub fn load_submissions(path: &Path) -> Result<Vec<SchedinaSubmission>, IngestError> {
    load_json_document(path)
}

/// Legacy seed map (pre-tracking totals). Optional.
pub fn load_legacy_data(path: &Path) -> Result<LegacySchedineData, IngestError> {
    load_json_document(path)
}

/// Manual adjustment map. Optional.
pub fn load_adjustments(path: &Path) -> Result<SchedineAdjustments, IngestError> {
    load_json_document(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
