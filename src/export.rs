use crate::error::ScoreResult;
use crate::game::MatchState;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    index: usize,
    timestamp: u64,
    kind: String,
    team: String,
    team_name: &'a str,
    delta: u32,
    detail: &'a str,
}

/// One CSV row per history entry, oldest first.
pub fn export_history_csv<W: Write>(state: &MatchState, writer: W) -> ScoreResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (index, entry) in state.history.iter().enumerate() {
        wtr.serialize(HistoryRow {
            index,
            timestamp: entry.ts,
            kind: entry.kind.to_string(),
            team: entry.award_team.to_string(),
            team_name: &state.team(entry.award_team).name,
            delta: entry.delta,
            detail: &entry.detail,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
