//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per stop, in schedule order per agent.
//!
//! ```csv
//! agent_id,complex_id,action,quantity,item_id
//! 0,3,load,20,1
//! 0,5,unload,100%,1
//! 1,5,maintain,50%,2
//! ```
//!
//! **`action`** is `load`, `unload`, or `maintain` (case-insensitive).
//!
//! **`quantity`** field:
//!
//! | Value   | Meaning                          |
//! |---------|----------------------------------|
//! | *u32*   | `StopAmount::Fixed(n)`           |
//! | `NN%`   | `StopAmount::Fraction(NN / 100)` |
//!
//! Percentages must lie in `0..=100`.  Agents absent from the CSV receive an
//! empty schedule; rows for agents at or beyond `agent_count` are skipped.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use fr_core::{ComplexId, ItemId};

use crate::{AgentError, AgentResult, AgentStop, Schedule, StopAction, StopAmount};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRecord {
    agent_id:   u32,
    complex_id: u32,
    action:     String,
    quantity:   String,
    item_id:    u16,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-agent schedules from a CSV file.
///
/// Returns a `Vec` of length `agent_count`, indexed by agent index.
pub fn load_schedules_csv(path: &Path, agent_count: usize) -> AgentResult<Vec<Schedule>> {
    let file = std::fs::File::open(path)?;
    load_schedules_reader(file, agent_count)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
pub fn load_schedules_reader<R: Read>(reader: R, agent_count: usize) -> AgentResult<Vec<Schedule>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_agent: HashMap<u32, Vec<AgentStop>> = HashMap::new();
    let mut skipped = 0usize;

    for result in csv_reader.deserialize::<StopRecord>() {
        let row = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        let stop = AgentStop {
            complex: ComplexId(row.complex_id),
            action:  parse_action(&row.action)?,
            amount:  parse_quantity(&row.quantity)?,
            item:    ItemId(row.item_id),
        };
        if row.agent_id as usize >= agent_count {
            skipped += 1;
            continue;
        }
        by_agent.entry(row.agent_id).or_default().push(stop);
    }

    if skipped > 0 {
        warn!(skipped, agent_count, "schedule rows for unknown agents ignored");
    }

    Ok((0..agent_count as u32)
        .map(|i| by_agent.remove(&i).map(Schedule::new).unwrap_or_default())
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_action(s: &str) -> AgentResult<StopAction> {
    match s.trim().to_ascii_lowercase().as_str() {
        "load" => Ok(StopAction::Load),
        "unload" => Ok(StopAction::Unload),
        "maintain" => Ok(StopAction::Maintain),
        other => Err(AgentError::Parse(format!(
            "invalid action {other:?}: expected \"load\", \"unload\", or \"maintain\""
        ))),
    }
}

fn parse_quantity(s: &str) -> AgentResult<StopAmount> {
    let s = s.trim();
    if let Some(pct) = s.strip_suffix('%') {
        let value: f32 = pct
            .trim()
            .parse()
            .map_err(|_| AgentError::Parse(format!("invalid percentage {s:?}")))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(AgentError::Parse(format!("percentage {s:?} outside 0%..=100%")));
        }
        return Ok(StopAmount::Fraction(value / 100.0));
    }
    s.parse::<u32>().map(StopAmount::Fixed).map_err(|_| {
        AgentError::Parse(format!("invalid quantity {s:?}: expected a count (u32) or a percentage"))
    })
}
