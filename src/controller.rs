use crate::config::{RuleConfig, RulesUpdate};
use crate::error::{ScoreError, ScoreResult};
use crate::game::{clean_name, GameType, HandKind, HistoryEntry, MatchState, MatchStatus, TeamId};
use crate::hand::{resolve_tranque, BonusFlags, HandLeftovers, HandPlay, Tile};
use crate::scorer::{score_hand, HandScore};
use crate::storage::{MatchStore, Store};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

const DETAIL_SEPARATOR: &str = " • ";

/// Inputs for the hand currently being scored. Lost on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandDraft {
    pub leftovers: HandLeftovers,
    pub bonuses: BonusFlags,
}

impl HandDraft {
    pub fn is_empty(&self) -> bool {
        self.leftovers.is_empty() && !self.bonuses.any()
    }

    pub fn clear(&mut self) {
        self.leftovers.clear();
        self.bonuses = BonusFlags::default();
    }
}

/// A play resolved against the draft: who gets paid, from which pips, and
/// how the history line opens.
struct ResolvedPlay {
    award_team: TeamId,
    losing_pips: Vec<u32>,
    winning_pips: Option<Vec<u32>>,
    context: String,
}

/// Owns the match and is the only thing that mutates it.
pub struct MatchController<S: Store> {
    state: MatchState,
    draft: HandDraft,
    store: MatchStore<S>,
}

impl<S: Store> MatchController<S> {
    /// Restores the saved match, or starts a default one.
    pub fn load(store: MatchStore<S>) -> Self {
        let state = store.load().unwrap_or_else(|| {
            info!("Starting a fresh match");
            MatchState::default()
        });
        Self::with_state(state, store)
    }

    pub fn with_state(state: MatchState, store: MatchStore<S>) -> Self {
        Self {
            state,
            draft: HandDraft::default(),
            store,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn draft(&self) -> &HandDraft {
        &self.draft
    }

    pub fn store(&self) -> &MatchStore<S> {
        &self.store
    }

    // --- Hand draft ---

    pub fn add_tile(&mut self, team: TeamId, tile: Tile) {
        self.draft.leftovers.add(team, tile);
    }

    pub fn add_tiles(&mut self, team: TeamId, tiles: impl IntoIterator<Item = Tile>) {
        self.draft.leftovers.extend(team, tiles);
    }

    pub fn remove_tile(&mut self, team: TeamId, index: usize) -> Option<Tile> {
        self.draft.leftovers.remove(team, index)
    }

    pub fn set_bonuses(&mut self, bonuses: BonusFlags) {
        self.draft.bonuses = bonuses;
    }

    pub fn clear_hand(&mut self) {
        self.draft.clear();
    }

    // --- Scoring ---

    /// What `apply_score` would award, without touching anything.
    pub fn preview(&self, play: HandPlay) -> HandScore {
        let resolved = self.resolve(play);
        score_hand(
            &self.state,
            &resolved.losing_pips,
            resolved.winning_pips.as_deref(),
            resolved.award_team,
            &self.draft.bonuses,
        )
    }

    /// Scores the drafted hand and applies it. A zero delta is rejected with
    /// [`ScoreError::NothingToAward`] and leaves the match untouched.
    pub fn apply_score(&mut self, play: HandPlay) -> ScoreResult<HandScore> {
        let resolved = self.resolve(play);
        let score = score_hand(
            &self.state,
            &resolved.losing_pips,
            resolved.winning_pips.as_deref(),
            resolved.award_team,
            &self.draft.bonuses,
        );

        if !score.is_awardable() {
            info!("Nothing to award for {:?}", play);
            return Err(ScoreError::NothingToAward);
        }

        let team = self.state.team_mut(score.award_team);
        team.score = team.score.saturating_add(score.delta);

        let kind = if score.ending {
            play.kind()
        } else {
            HandKind::MidHand
        };

        let detail = std::iter::once(resolved.context)
            .chain(score.breakdown.iter().cloned())
            .collect::<Vec<_>>()
            .join(DETAIL_SEPARATOR);

        self.state.history.push(HistoryEntry {
            ts: now_millis(),
            kind,
            award_team: score.award_team,
            delta: score.delta,
            detail,
        });

        if score.ending && self.state.game_type.uses_round_bonuses() {
            self.state.round_number += 1;
            debug!("Advanced to round {}", self.state.round_number);
        }

        info!(
            "+{} to {} ({}), now {}-{}",
            score.delta,
            self.state.team(score.award_team).name,
            kind,
            self.state.team(TeamId::A).score,
            self.state.team(TeamId::B).score
        );

        self.draft.clear();
        self.persist();

        if let Some(winner) = self.compute_winner() {
            info!("{} reached {}", self.state.team(winner).name, self.state.target());
        }

        Ok(score)
    }

    /// Moves a past award to the other team. Applying it twice restores the
    /// original attribution. If the credited team no longer holds the points
    /// (a repaired save can lose scores but keep history) nothing changes and
    /// [`ScoreError::CorrectionUnderflow`] is returned.
    pub fn correct_history_entry(&mut self, index: usize) -> ScoreResult<()> {
        let len = self.state.history.len();
        let entry = self
            .state
            .history
            .get(index)
            .ok_or(ScoreError::HistoryIndexOutOfRange { index, len })?;

        let from = entry.award_team;
        let to = from.other();
        let delta = entry.delta;

        let losing = self.state.team(from);
        let remaining = losing
            .score
            .checked_sub(delta)
            .ok_or_else(|| ScoreError::CorrectionUnderflow {
                index,
                team: losing.name.clone(),
                score: losing.score,
                delta,
            })?;
        let gained = self
            .state
            .team(to)
            .score
            .checked_add(delta)
            .ok_or_else(|| ScoreError::CorrectionUnderflow {
                index,
                team: self.state.team(to).name.clone(),
                score: self.state.team(to).score,
                delta,
            })?;

        self.state.team_mut(from).score = remaining;
        self.state.team_mut(to).score = gained;
        self.state.history[index].award_team = to;

        info!("Moved entry {} (+{}) from {} to {}", index, delta, from, to);
        self.persist();
        Ok(())
    }

    pub fn compute_winner(&self) -> Option<TeamId> {
        self.state.winner()
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status()
    }

    // --- Match management ---

    /// Fresh scores, round and history. House rules carry over.
    pub fn start_new_match(&mut self, team_a: &str, team_b: &str, game_type: GameType) {
        let rules = self.state.rules.clone();
        self.state = MatchState::new(team_a, team_b, game_type);
        self.state.rules = rules;
        self.draft.clear();
        info!(
            "New match: {} vs {} to {}",
            self.state.team(TeamId::A).name,
            self.state.team(TeamId::B).name,
            self.state.target()
        );
        self.persist();
    }

    pub fn change_game_type(&mut self, game_type: GameType) {
        let previous = self.state.game_type;
        if game_type.uses_round_bonuses() && !previous.uses_round_bonuses() {
            self.state.round_number = 1;
        }
        self.state.game_type = game_type;
        info!("Game type {} -> {}", previous, game_type);
        self.persist();
    }

    /// Applies a partial rules update. Invalid fields are skipped; their names
    /// are returned.
    pub fn apply_settings(&mut self, update: &RulesUpdate) -> Vec<&'static str> {
        let rejected = self.state.rules.apply(update);
        self.persist();
        rejected
    }

    pub fn replace_rules(&mut self, rules: RuleConfig) {
        self.state.rules = rules;
        self.persist();
    }

    pub fn rename_team(&mut self, team: TeamId, name: &str) {
        self.state.team_mut(team).name = clean_name(name, team);
        self.persist();
    }

    fn resolve(&self, play: HandPlay) -> ResolvedPlay {
        let leftovers = &self.draft.leftovers;
        match play {
            HandPlay::Win { winner } => ResolvedPlay {
                award_team: winner,
                losing_pips: leftovers.pips(winner.other()),
                winning_pips: Some(leftovers.pips(winner)),
                context: "Win".to_string(),
            },
            HandPlay::Tranque { starting_team } => {
                let sum_a = leftovers.sum(TeamId::A);
                let sum_b = leftovers.sum(TeamId::B);
                let award_team = resolve_tranque(sum_a, sum_b, starting_team);
                ResolvedPlay {
                    award_team,
                    losing_pips: leftovers.pips(award_team.other()),
                    winning_pips: None,
                    context: format!(
                        "Tranque: {}={}, {}={}",
                        self.state.team(TeamId::A).name,
                        sum_a,
                        self.state.team(TeamId::B).name,
                        sum_b
                    ),
                }
            }
            HandPlay::Bonus { team } => ResolvedPlay {
                award_team: team,
                losing_pips: Vec::new(),
                winning_pips: None,
                context: "Bonuses only".to_string(),
            },
        }
    }

    /// Saves are fire-and-forget: a failure is logged and play continues in
    /// memory.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!("Match not saved: {}", e);
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
