pub mod bonuses;
pub mod engine;
pub mod types;

pub use self::bonuses::{BonusKind, BonusResult};
pub use self::engine::score_hand;
pub use self::types::HandScore;
