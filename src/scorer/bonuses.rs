use crate::config::RuleConfig;
use crate::game::GameType;
use crate::hand::BonusFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    OpeningPass,
    PaseCorrido,
    Capicua,
    Chuchazo,
}

impl BonusKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::OpeningPass => "Opening pass",
            Self::PaseCorrido => "Pase corrido",
            Self::Capicua => "Capicúa",
            Self::Chuchazo => "Chuchazo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusResult {
    pub kind: BonusKind,
    pub points: u32,
}

impl BonusResult {
    pub fn describe(&self) -> String {
        format!("{} +{}", self.kind.label(), self.points)
    }
}

/// Points for every asserted bonus that the rules allow. The opening pass is
/// priced by game type, everything else by the rules. Zero-point bonuses are
/// dropped.
pub fn calculate_bonuses(flags: &BonusFlags, rules: &RuleConfig, game_type: GameType) -> Vec<BonusResult> {
    let candidates = [
        (
            flags.opening_pass && rules.opening_pass_enabled,
            BonusKind::OpeningPass,
            game_type.opening_pass_points(),
        ),
        (flags.pase_corrido, BonusKind::PaseCorrido, rules.pase_corrido_points),
        (flags.capicua, BonusKind::Capicua, rules.capicua_points),
        (flags.chuchazo, BonusKind::Chuchazo, rules.chuchazo_points),
    ];

    candidates
        .into_iter()
        .filter(|&(asserted, _, points)| asserted && points > 0)
        .map(|(_, kind, points)| BonusResult { kind, points })
        .collect()
}
