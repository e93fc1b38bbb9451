//! Roster import from CSV.
//!
//! Header row required. Columns (case-insensitive): `name` (required),
//! `nickname`, `skill` (`low`/`medium`/`high`), `exempt` (`true`/`false`,
//! `yes`/`no`, `1`/`0`). Rows with a blank name are skipped.

use crate::models::{Player, SkillLevel};
use std::io::Read;

/// Errors while reading a roster file.
#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error),
    /// Header row has no `name` column.
    MissingNameColumn,
    /// 1-based data row and the offending value.
    InvalidSkill { row: usize, value: String },
    InvalidFlag { row: usize, value: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Csv(e) => write!(f, "Could not read CSV: {}", e),
            ImportError::MissingNameColumn => write!(f, "CSV needs a 'name' column"),
            ImportError::InvalidSkill { row, value } => {
                write!(f, "Row {}: unknown skill level '{}'", row, value)
            }
            ImportError::InvalidFlag { row, value } => {
                write!(f, "Row {}: expected yes/no for exempt, got '{}'", row, value)
            }
        }
    }
}

impl std::error::Error for ImportError {}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::Csv(e)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Some(false),
        "true" | "yes" | "y" | "1" => Some(true),
        _ => None,
    }
}

/// Read players from CSV. Each gets a fresh id.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Player>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let name_col = column("name").ok_or(ImportError::MissingNameColumn)?;
    let nickname_col = column("nickname");
    let skill_col = column("skill");
    let exempt_col = column("exempt");

    let mut players = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).filter(|v| !v.is_empty());

        let Some(name) = field(Some(name_col)) else {
            continue;
        };
        let mut player = Player::new(name);
        if let Some(nick) = field(nickname_col) {
            player = player.with_nickname(nick);
        }
        if let Some(value) = field(skill_col) {
            let skill = SkillLevel::parse(value).ok_or_else(|| ImportError::InvalidSkill {
                row,
                value: value.to_string(),
            })?;
            player = player.with_skill(skill);
        }
        if let Some(value) = field(exempt_col) {
            player.prize_exempt = parse_flag(value).ok_or_else(|| ImportError::InvalidFlag {
                row,
                value: value.to_string(),
            })?;
        }
        players.push(player);
    }
    log::debug!("imported {} players from CSV", players.len());
    Ok(players)
}
