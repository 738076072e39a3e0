pub mod export;
pub mod manage;
pub mod new;
pub mod score;
