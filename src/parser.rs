use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::RosterError;
use crate::lineup::{LineupSettings, Player, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Csv,
    Json,
}

pub(crate) fn file_format(path: &Path) -> Result<FileFormat, RosterError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(FileFormat::Csv),
        Some("json") => Ok(FileFormat::Json),
        _ => Err(RosterError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Column positions found in the roster header
struct RosterColumns {
    name: usize,
    roles: [Option<usize>; 4],
    total: Option<usize>,
    this_game: Option<usize>,
    active: Option<usize>,
}

fn position(headers: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| pred(h.as_str()))
}

impl RosterColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self, RosterError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase().replace([' ', '_'], ""))
            .collect();
        let name = position(&normalized, |h| h == "name" || h.ends_with("name"))
            .ok_or_else(|| RosterError::MissingColumn("name".to_string()))?;
        let roles = Role::ALL.map(|role| {
            let key = role.label().to_lowercase();
            position(&normalized, |h| h.starts_with(&key))
        });
        let this_game = position(&normalized, |h| h.contains("thisgame"));
        let total = position(&normalized, |h| h.starts_with("total"));
        let active = position(&normalized, |h| h == "active");

        Ok(Self { name, roles, total, this_game, active })
    }
}

/// Parses a boolean value from various string representations.
/// Empty cells count as active.
fn parse_active(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "" | "yes" | "true" | "1" | "y" => Some(true),
        "no" | "false" | "0" | "n" => Some(false),
        _ => None,
    }
}

/// Parses a counter, treating an empty cell as 0
fn parse_counter(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(0)
    } else {
        trimmed.parse().ok()
    }
}

fn read_counter(
    record: &StringRecord,
    column: Option<usize>,
    header: &str,
    row: usize,
) -> Result<u32, RosterError> {
    let Some(col) = column else {
        return Ok(0);
    };
    let value = record.get(col).unwrap_or("");
    parse_counter(value).ok_or_else(|| RosterError::InvalidValue {
        row,
        column: header.to_string(),
        value: value.to_string(),
    })
}

/// Reads a roster from CSV text with a header row.
///
/// Columns are located by name: `name`, `goalie...`, `defender...`,
/// `midfielder...`, `forward...`, `total...`, `...this game` and `active`.
/// Only the name column is required. Rows without a name are skipped.
pub fn parse_roster_csv(data: &str) -> Result<Vec<Player>, RosterError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = RosterColumns::from_headers(&headers)?;
    let header_name = |col: Option<usize>| col.and_then(|c| headers.get(c)).unwrap_or("").to_string();

    let mut players = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // header is line 1
        let row = idx + 2;

        let name = record.get(columns.name).unwrap_or("").trim().to_string();
        if name.is_empty() {
            warn!(row, "Skipping roster row without a player name");
            continue;
        }

        let mut player = Player::new(name);
        for (role, column) in Role::ALL.into_iter().zip(columns.roles) {
            *player.role_counts.get_mut(role) = read_counter(&record, column, &header_name(column), row)?;
        }
        player.total_segments = read_counter(&record, columns.total, &header_name(columns.total), row)?;
        player.segments_this_game =
            read_counter(&record, columns.this_game, &header_name(columns.this_game), row)?;

        if let Some(col) = columns.active {
            let value = record.get(col).unwrap_or("");
            player.active = parse_active(value).ok_or_else(|| RosterError::InvalidValue {
                row,
                column: header_name(Some(col)),
                value: value.to_string(),
            })?;
        }

        players.push(player);
    }

    Ok(players)
}

/// Reads a roster saved as a JSON array of players
pub fn parse_roster_json(data: &str) -> Result<Vec<Player>, RosterError> {
    Ok(serde_json::from_str(data)?)
}

/// Loads a roster from a `.csv` or `.json` file
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Player>, RosterError> {
    let path = path.as_ref();
    let format = file_format(path)?;
    let data = fs::read_to_string(path)?;
    match format {
        FileFormat::Csv => parse_roster_csv(&data),
        FileFormat::Json => parse_roster_json(&data),
    }
}

/// Loads lineup settings from a JSON file. Missing keys keep their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<LineupSettings, RosterError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
