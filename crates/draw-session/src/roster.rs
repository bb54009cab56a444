//! Roster source parsing
//!
//! The roster record holds spreadsheet-shaped rows: identifier, display name,
//! then any number of further columns that are discarded. Cells may be strings
//! or numbers, since spreadsheet exports often store ids numerically.

use crate::gateway::RecordGateway;
use draw_core::{DrawError, Participant, Result};
use serde_json::{Number, Value};
use std::collections::HashSet;

/// One roster source row
pub type RosterRow = Vec<Value>;

/// Convert source rows into participants, discarding extra columns
pub fn parse_roster(rows: &[RosterRow]) -> Result<Vec<Participant>> {
    let mut roster = Vec::with_capacity(rows.len());
    let mut seen = HashSet::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let (id, name) = match row.as_slice() {
            [id, name, ..] => (cell_text(id, index)?, cell_text(name, index)?),
            _ => {
                return Err(DrawError::validation(format!(
                    "roster row {index} needs an id and a name"
                )))
            }
        };
        if id.is_empty() {
            return Err(DrawError::validation(format!(
                "roster row {index} has an empty id"
            )));
        }
        if !seen.insert(id.clone()) {
            return Err(DrawError::validation(format!(
                "roster id {id} appears more than once"
            )));
        }
        roster.push(Participant::new(id, name));
    }
    Ok(roster)
}

fn cell_text(cell: &Value, row: usize) -> Result<String> {
    match cell {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(number_text(n)),
        Value::Null => Ok(String::new()),
        other => Err(DrawError::validation(format!(
            "roster row {row} has an unsupported cell: {other}"
        ))),
    }
}

/// Integral floats lose their fraction: `1001.0` reads as `1001`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{f}"),
        _ => n.to_string(),
    }
}

/// Load and parse the roster record. A missing record is a not-found error.
pub async fn load_roster(gateway: &RecordGateway, name: &str) -> Result<Vec<Participant>> {
    let rows: Vec<RosterRow> = gateway
        .load_optional(name)
        .await?
        .ok_or_else(|| DrawError::not_found(format!("roster record {name} does not exist")))?;
    let roster = parse_roster(&rows)?;
    tracing::info!(participants = roster.len(), record = name, "roster loaded");
    Ok(roster)
}
