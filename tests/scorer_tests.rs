use dominoscore::config::RuleConfig;
use dominoscore::game::{GameType, MatchState, TeamId};
use dominoscore::hand::BonusFlags;
use dominoscore::scorer::bonuses::{calculate_bonuses, BonusKind};
use dominoscore::scorer::score_hand;
use rstest::rstest;

fn no_bonus() -> BonusFlags {
    BonusFlags::default()
}

fn match_of(game_type: GameType) -> MatchState {
    MatchState::new("Los Primos", "La Banca", game_type)
}

// --- BASE ---

#[test]
fn test_example_hand_to_200() {
    let state = match_of(GameType::Target200);
    let flags = BonusFlags {
        pase_corrido: true,
        ..Default::default()
    };

    let score = score_hand(&state, &[6, 5, 4], None, TeamId::A, &flags);

    assert_eq!(score.delta, 40);
    assert_eq!(score.base, 15);
    assert_eq!(score.bonus, 25);
    assert_eq!(score.round_bonus, 0);
    assert!(score.ending);
    assert!(score.breakdown.contains(&"Pase corrido +25".to_string()));
    assert_eq!(score.breakdown[0], "Opponents' hand +15");
}

#[test]
fn test_empty_hand_scores_nothing() {
    let state = match_of(GameType::Target500WithRoundBonuses);
    let score = score_hand(&state, &[], None, TeamId::B, &no_bonus());
    assert_eq!(score.delta, 0);
    assert!(!score.is_awardable());
    assert!(!score.ending);
    assert!(score.breakdown.is_empty());
}

// --- ROUND BONUS ---

#[rstest]
#[case(1, 100)]
#[case(2, 75)]
#[case(3, 50)]
#[case(4, 25)]
#[case(5, 0)]
#[case(12, 0)]
fn test_round_bonus_table(#[case] round: u32, #[case] expected: u32) {
    let mut state = match_of(GameType::Target500WithRoundBonuses);
    state.round_number = round;

    let score = score_hand(&state, &[3, 2], None, TeamId::A, &no_bonus());

    assert_eq!(score.round_bonus, expected);
    assert_eq!(score.delta, 5 + expected);
    let has_line = score.breakdown.iter().any(|l| l.starts_with("Round "));
    assert_eq!(has_line, expected > 0, "breakdown: {:?}", score.breakdown);
}

#[rstest]
#[case(GameType::Target200)]
#[case(GameType::Target250)]
#[case(GameType::Target500)]
fn test_no_round_bonus_outside_bonus_variant(#[case] game_type: GameType) {
    let state = match_of(game_type);
    let score = score_hand(&state, &[6, 6], None, TeamId::A, &no_bonus());
    assert_eq!(score.round_bonus, 0);
    assert_eq!(score.delta, 12);
}

// --- ENDING DETERMINATION ---

#[rstest]
#[case(true, false, false, false, false)] // opening pass alone
#[case(false, true, false, false, false)] // pase corrido alone
#[case(true, true, false, false, false)]
#[case(false, false, true, false, true)] // capicúa closes the hand
#[case(false, false, false, true, true)] // chuchazo closes the hand
fn test_bonus_only_ending(
    #[case] opening_pass: bool,
    #[case] pase_corrido: bool,
    #[case] capicua: bool,
    #[case] chuchazo: bool,
    #[case] ending: bool,
) {
    let state = match_of(GameType::Target500WithRoundBonuses);
    let flags = BonusFlags {
        opening_pass,
        pase_corrido,
        capicua,
        chuchazo,
    };
    let score = score_hand(&state, &[], None, TeamId::B, &flags);
    assert_eq!(score.ending, ending);
    assert_eq!(score.round_bonus > 0, ending);
}

// --- BONUSES ---

#[rstest]
#[case(GameType::Target200, 10)]
#[case(GameType::Target250, 10)]
#[case(GameType::Target500, 25)]
#[case(GameType::Target500WithRoundBonuses, 25)]
fn test_opening_pass_priced_by_game_type(#[case] game_type: GameType, #[case] points: u32) {
    let flags = BonusFlags {
        opening_pass: true,
        ..Default::default()
    };
    let bonuses = calculate_bonuses(&flags, &RuleConfig::default(), game_type);
    assert_eq!(bonuses.len(), 1);
    assert_eq!(bonuses[0].kind, BonusKind::OpeningPass);
    assert_eq!(bonuses[0].points, points);
    assert_eq!(bonuses[0].describe(), format!("Opening pass +{}", points));
}

#[test]
fn test_disabled_opening_pass_is_ignored() {
    let mut state = match_of(GameType::Target250);
    state.rules.opening_pass_enabled = false;
    let flags = BonusFlags {
        opening_pass: true,
        ..Default::default()
    };
    let score = score_hand(&state, &[], None, TeamId::A, &flags);
    assert_eq!(score.delta, 0);
}

#[test]
fn test_zero_point_bonus_is_omitted() {
    let mut state = match_of(GameType::Target250);
    state.rules.capicua_points = 0;
    let flags = BonusFlags {
        capicua: true,
        chuchazo: true,
        ..Default::default()
    };
    let score = score_hand(&state, &[1], None, TeamId::A, &flags);
    assert_eq!(score.delta, 51);
    assert_eq!(score.breakdown, vec!["Opponents' hand +1", "Chuchazo +50"]);
}

#[test]
fn test_capicua_label_keeps_accent() {
    let state = match_of(GameType::Target200);
    let flags = BonusFlags {
        capicua: true,
        ..Default::default()
    };
    let score = score_hand(&state, &[], None, TeamId::A, &flags);
    assert_eq!(score.breakdown, vec!["Capicúa +50"]);
}

// --- COUNT ALL HANDS ---

#[test]
fn test_count_all_hands_in_500() {
    let mut state = match_of(GameType::Target500);
    state.rules.count_all_hands_in_500 = true;

    let score = score_hand(&state, &[6, 5], Some(&[1, 2][..]), TeamId::A, &no_bonus());

    assert_eq!(score.base, 14);
    assert_eq!(score.breakdown, vec!["All hands (11+3) +14"]);
}

#[rstest]
#[case(GameType::Target200, true)] // not a 500 variant
#[case(GameType::Target500, false)] // rule off
fn test_count_all_hands_needs_500_and_rule(#[case] game_type: GameType, #[case] rule: bool) {
    let mut state = match_of(game_type);
    state.rules.count_all_hands_in_500 = rule;
    let score = score_hand(&state, &[6, 5], Some(&[1, 2][..]), TeamId::A, &no_bonus());
    assert_eq!(score.base, 11);
}

#[test]
fn test_count_all_hands_winner_leftovers_alone_end_the_hand() {
    let mut state = match_of(GameType::Target500WithRoundBonuses);
    state.rules.count_all_hands_in_500 = true;

    let score = score_hand(&state, &[], Some(&[3, 2][..]), TeamId::A, &no_bonus());

    assert!(score.ending);
    assert_eq!(score.base, 5);
    assert_eq!(score.round_bonus, 100);
    assert_eq!(score.delta, 105);
    assert_eq!(score.breakdown[0], "All hands (0+5) +5");
}

#[test]
fn test_count_all_hands_winner_leftovers_in_plain_500() {
    let mut state = match_of(GameType::Target500);
    state.rules.count_all_hands_in_500 = true;
    let score = score_hand(&state, &[], Some(&[3, 2][..]), TeamId::A, &no_bonus());
    assert_eq!(score.delta, 5);
}

#[test]
fn test_count_all_hands_bonus_without_pips_stays_mid_hand() {
    let mut state = match_of(GameType::Target500WithRoundBonuses);
    state.rules.count_all_hands_in_500 = true;
    let flags = BonusFlags {
        pase_corrido: true,
        ..Default::default()
    };
    let winner_pips: &[u32] = &[];
    let score = score_hand(&state, &[], Some(winner_pips), TeamId::A, &flags);
    assert!(!score.ending);
    assert_eq!(score.base, 0);
    assert_eq!(score.round_bonus, 0);
    assert_eq!(score.delta, 25);
}
