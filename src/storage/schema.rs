//! Persisted match shape and forward migration from older saves.
//!
//! Version history (by storage key):
//! - v1: `target`, two teams, `openingPassEnabled`/`countAllHandsIn500`, history
//! - v2: per-bonus point values (`paseCorridoPoints`, `capicuaPoints`)
//! - v3: `gameType`, `roundNumber`, `chuchazoPoints`
//!
//! Saves are always written in the v3 shape. Reads accept any of them.

use crate::config::{
    validate_points, RuleConfig, DEFAULT_CAPICUA_POINTS, DEFAULT_CHUCHAZO_POINTS,
    DEFAULT_PASE_CORRIDO_POINTS,
};
use crate::error::{ScoreError, ScoreResult};
use crate::game::{clean_name, GameType, HistoryEntry, MatchState, Team, TeamId, Teams};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "domino_score_match_v3";

/// Newest first. The first key that yields a usable match wins.
pub const LOAD_ORDER: [&str; 3] = [
    STORAGE_KEY,
    "domino_score_match_v2",
    "domino_score_match_v1",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMatch {
    pub game_type: GameType,
    /// Written for older readers; never trusted on load.
    pub target: u32,
    pub round_number: u32,
    pub teams: Teams,
    pub rules: RuleConfig,
    pub history: Vec<HistoryEntry>,
}

impl From<&MatchState> for PersistedMatch {
    fn from(state: &MatchState) -> Self {
        Self {
            game_type: state.game_type,
            target: state.target(),
            round_number: state.round_number,
            teams: state.teams.clone(),
            rules: state.rules.clone(),
            history: state.history.clone(),
        }
    }
}

pub fn encode(state: &MatchState) -> ScoreResult<String> {
    Ok(serde_json::to_string(&PersistedMatch::from(state))?)
}

/// Parses and upgrades a saved match of any known shape.
pub fn decode(raw: &str) -> ScoreResult<MatchState> {
    let value: Value = serde_json::from_str(raw)?;
    migrate(&value)
}

pub fn migrate(value: &Value) -> ScoreResult<MatchState> {
    let root = value
        .as_object()
        .ok_or_else(|| malformed("top level is not an object"))?;

    let teams = root
        .get("teams")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing teams"))?;

    let teams = Teams {
        a: migrate_team(teams, TeamId::A)?,
        b: migrate_team(teams, TeamId::B)?,
    };

    let game_type = migrate_game_type(root);

    let round_number = match root.get("roundNumber").and_then(Value::as_u64) {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(1),
        _ => 1,
    };

    let rules = root
        .get("rules")
        .and_then(Value::as_object)
        .map(migrate_rules)
        .unwrap_or_default();

    let history = root
        .get("history")
        .and_then(Value::as_array)
        .map(|entries| migrate_history(entries))
        .unwrap_or_default();

    Ok(MatchState {
        teams,
        game_type,
        round_number,
        rules,
        history,
    })
}

fn malformed(reason: &str) -> ScoreError {
    ScoreError::MalformedPersistedState(reason.to_string())
}

fn migrate_team(teams: &Map<String, Value>, id: TeamId) -> ScoreResult<Team> {
    let key = id.to_string();
    let team = teams
        .get(&key)
        .and_then(Value::as_object)
        .ok_or_else(|| ScoreError::MalformedPersistedState(format!("missing team {}", key)))?;

    let name = team
        .get("name")
        .and_then(Value::as_str)
        .map(|n| clean_name(n, id))
        .unwrap_or_else(|| id.default_name().to_string());

    let score = team
        .get("score")
        .and_then(Value::as_u64)
        .and_then(|s| u32::try_from(s).ok())
        .unwrap_or_else(|| {
            warn!("Team {} has no usable score, starting from 0", key);
            0
        });

    Ok(Team { id, name, score })
}

/// `gameType` wins when present; otherwise the legacy `target` is mapped.
fn migrate_game_type(root: &Map<String, Value>) -> GameType {
    if let Some(raw) = root.get("gameType").and_then(Value::as_str) {
        match GameType::parse(raw) {
            Ok(game_type) => {
                let stored_target = root.get("target").and_then(Value::as_u64);
                if stored_target.is_some_and(|t| t != game_type.target() as u64) {
                    debug!(
                        "Saved target {:?} disagrees with game type {}; using game type",
                        stored_target, game_type
                    );
                }
                return game_type;
            }
            Err(e) => warn!("{}", e),
        }
    }

    match root.get("target").and_then(Value::as_u64) {
        Some(target) => GameType::from_legacy_target(target).unwrap_or_else(|| {
            warn!("Unsupported saved target {}, using default", target);
            GameType::default()
        }),
        None => GameType::default(),
    }
}

fn migrate_rules(rules: &Map<String, Value>) -> RuleConfig {
    let defaults = RuleConfig::default();

    let flag = |key: &str, default: bool| rules.get(key).and_then(Value::as_bool).unwrap_or(default);

    let points = |key: &str, field: &'static str, default: u32| -> u32 {
        let raw = match rules.get(key) {
            None | Some(Value::Null) => return default,
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        validate_points(field, &raw).unwrap_or_else(|e| {
            warn!("{}; using default {}", e, default);
            default
        })
    };

    RuleConfig {
        opening_pass_enabled: flag("openingPassEnabled", defaults.opening_pass_enabled),
        count_all_hands_in_500: flag("countAllHandsIn500", defaults.count_all_hands_in_500),
        pase_corrido_points: points(
            "paseCorridoPoints",
            "pase_corrido_points",
            DEFAULT_PASE_CORRIDO_POINTS,
        ),
        capicua_points: points("capicuaPoints", "capicua_points", DEFAULT_CAPICUA_POINTS),
        chuchazo_points: points("chuchazoPoints", "chuchazo_points", DEFAULT_CHUCHAZO_POINTS),
    }
}

fn migrate_history(entries: &[Value]) -> Vec<HistoryEntry> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| match serde_json::from_value::<HistoryEntry>(raw.clone()) {
            Ok(entry) if entry.delta > 0 => Some(entry),
            Ok(_) => {
                warn!("Dropping history entry {} with zero delta", i);
                None
            }
            Err(e) => {
                warn!("Dropping unreadable history entry {}: {}", i, e);
                None
            }
        })
        .collect()
}
