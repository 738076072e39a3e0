use crate::config::RuleConfig;
use crate::error::{ScoreError, ScoreResult};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// One of the two fixed sides of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            Self::A => "Team A",
            Self::B => "Team B",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub score: u32,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            name: id.default_name().to_string(),
            score: 0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum GameType {
    #[serde(rename = "200")]
    #[strum(serialize = "200")]
    Target200,
    #[default]
    #[serde(rename = "250")]
    #[strum(serialize = "250")]
    Target250,
    #[serde(rename = "500")]
    #[strum(serialize = "500")]
    Target500,
    #[serde(rename = "500-bonuses")]
    #[strum(serialize = "500-bonuses")]
    Target500WithRoundBonuses,
}

impl GameType {
    pub fn parse(raw: &str) -> ScoreResult<Self> {
        raw.trim()
            .parse()
            .map_err(|_| ScoreError::UnknownGameType(raw.to_string()))
    }

    pub fn target(self) -> u32 {
        match self {
            Self::Target200 => 200,
            Self::Target250 => 250,
            Self::Target500 | Self::Target500WithRoundBonuses => 500,
        }
    }

    pub fn uses_round_bonuses(self) -> bool {
        matches!(self, Self::Target500WithRoundBonuses)
    }

    pub fn is_500_variant(self) -> bool {
        self.target() == 500
    }

    /// Opening pass is worth more in the long games.
    pub fn opening_pass_points(self) -> u32 {
        if self.is_500_variant() {
            25
        } else {
            10
        }
    }

    /// Maps a legacy bare `target` onto a game type. Saves that predate round
    /// bonuses only knew plain 500.
    pub fn from_legacy_target(target: u64) -> Option<Self> {
        match target {
            200 => Some(Self::Target200),
            250 => Some(Self::Target250),
            500 => Some(Self::Target500),
            _ => None,
        }
    }
}

/// Automatic bonus for an ending hand in the "500 with bonuses" variant.
pub fn round_bonus(round: u32) -> u32 {
    match round {
        0 | 1 => 100,
        2 => 75,
        3 => 50,
        4 => 25,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HandKind {
    Win,
    Tranque,
    #[serde(rename = "bonus", alias = "bonus-only")]
    #[strum(to_string = "bonus", serialize = "bonus-only")]
    BonusOnly,
    MidHand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unix milliseconds.
    pub ts: u64,
    #[serde(rename = "type")]
    pub kind: HandKind,
    pub award_team: TeamId,
    pub delta: u32,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
    #[serde(rename = "A")]
    pub a: Team,
    #[serde(rename = "B")]
    pub b: Team,
}

impl Default for Teams {
    fn default() -> Self {
        Self {
            a: Team::new(TeamId::A),
            b: Team::new(TeamId::B),
        }
    }
}

impl Teams {
    pub fn get(&self, id: TeamId) -> &Team {
        match id {
            TeamId::A => &self.a,
            TeamId::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, id: TeamId) -> &mut Team {
        match id {
            TeamId::A => &mut self.a,
            TeamId::B => &mut self.b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    InProgress,
    Won(TeamId),
}

/// Everything that survives a reload. The target is never stored on its own;
/// it is always read off the game type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub teams: Teams,
    pub game_type: GameType,
    pub round_number: u32,
    pub rules: RuleConfig,
    pub history: Vec<HistoryEntry>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(
            TeamId::A.default_name(),
            TeamId::B.default_name(),
            GameType::default(),
        )
    }
}

impl MatchState {
    pub fn new(team_a: &str, team_b: &str, game_type: GameType) -> Self {
        let mut teams = Teams::default();
        teams.a.name = clean_name(team_a, TeamId::A);
        teams.b.name = clean_name(team_b, TeamId::B);
        Self {
            teams,
            game_type,
            round_number: 1,
            rules: RuleConfig::default(),
            history: Vec::new(),
        }
    }

    pub fn target(&self) -> u32 {
        self.game_type.target()
    }

    pub fn team(&self, id: TeamId) -> &Team {
        self.teams.get(id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> &mut Team {
        self.teams.get_mut(id)
    }

    /// First team (A before B) at or past the target.
    pub fn winner(&self) -> Option<TeamId> {
        let target = self.target();
        [TeamId::A, TeamId::B]
            .into_iter()
            .find(|&id| self.team(id).score >= target)
    }

    pub fn status(&self) -> MatchStatus {
        match self.winner() {
            Some(id) => MatchStatus::Won(id),
            None => MatchStatus::InProgress,
        }
    }
}

pub(crate) fn clean_name(raw: &str, id: TeamId) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        id.default_name().to_string()
    } else {
        trimmed.to_string()
    }
}
