use super::bonuses::calculate_bonuses;
use super::HandScore;
use crate::game::{round_bonus, MatchState, TeamId};
use crate::hand::BonusFlags;

/// Pure hand scoring. `losing_pips` is the side that pays. `winning_pips` is
/// supplied by the caller only for plays where both hands may count; it is
/// read when the match counts every hand on a win (500 variants), and then
/// the both-sides total decides whether the hand ended.
pub fn score_hand(
    state: &MatchState,
    losing_pips: &[u32],
    winning_pips: Option<&[u32]>,
    award_team: TeamId,
    flags: &BonusFlags,
) -> HandScore {
    let mut breakdown = Vec::new();

    // 1. Base
    let losing_sum: u32 = losing_pips.iter().sum();

    let all_hands = winning_pips
        .filter(|_| state.game_type.is_500_variant() && state.rules.count_all_hands_in_500);

    let base = if let Some(winning_pips) = all_hands {
        let winning_sum: u32 = winning_pips.iter().sum();
        let total = losing_sum + winning_sum;
        if total > 0 {
            breakdown.push(format!(
                "All hands ({}+{}) +{}",
                losing_sum, winning_sum, total
            ));
        }
        total
    } else {
        if losing_sum > 0 {
            breakdown.push(format!("Opponents' hand +{}", losing_sum));
        }
        losing_sum
    };

    // Any pips on the table mean the hand is over.
    let ending = base > 0 || flags.closes_hand();

    // 2. Bonuses
    let bonuses = calculate_bonuses(flags, &state.rules, state.game_type);
    let bonus: u32 = bonuses.iter().map(|b| b.points).sum();
    breakdown.extend(bonuses.iter().map(|b| b.describe()));

    // 3. Round bonus (ending hands only)
    let round_bonus = if ending && state.game_type.uses_round_bonuses() {
        round_bonus(state.round_number)
    } else {
        0
    };
    if round_bonus > 0 {
        breakdown.push(format!(
            "Round {} bonus +{}",
            state.round_number, round_bonus
        ));
    }

    HandScore {
        award_team,
        base,
        bonus,
        round_bonus,
        delta: base + bonus + round_bonus,
        ending,
        breakdown,
    }
}
