pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod game;
pub mod hand;
pub mod input;
pub mod scorer;
pub mod storage;
// cmd and reports are binary modules (see main.rs).

pub use controller::{HandDraft, MatchController};
pub use error::{ScoreError, ScoreResult};
pub use game::{GameType, MatchState, TeamId};
pub use hand::{BonusFlags, HandPlay, Tile};
