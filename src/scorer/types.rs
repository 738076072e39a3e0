use crate::game::TeamId;

/// Result of scoring one hand. Nothing has been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandScore {
    pub award_team: TeamId,

    // Components
    pub base: u32,
    pub bonus: u32,
    pub round_bonus: u32,

    // Top-line
    pub delta: u32,

    /// True when the hand is over (as opposed to a mid-hand award).
    pub ending: bool,

    pub breakdown: Vec<String>,
}

impl HandScore {
    pub fn is_awardable(&self) -> bool {
        self.delta > 0
    }
}
