use crate::error::{ScoreError, ScoreResult};
use crate::game::{HandKind, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_PIPS: u8 = 6;

/// A double-six domino tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub left: u8,
    pub right: u8,
}

impl Tile {
    pub fn new(left: u8, right: u8) -> ScoreResult<Self> {
        if left > MAX_PIPS || right > MAX_PIPS {
            return Err(ScoreError::InvalidTile(format!("{}-{}", left, right)));
        }
        Ok(Self { left, right })
    }

    pub fn pips(&self) -> u32 {
        self.left as u32 + self.right as u32
    }

    pub fn is_double(&self) -> bool {
        self.left == self.right
    }

    /// All 28 tiles, lowest first.
    pub fn full_set() -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(28);
        for left in 0..=MAX_PIPS {
            for right in left..=MAX_PIPS {
                tiles.push(Tile { left, right });
            }
        }
        tiles
    }

    /// Parses a comma separated list such as `"6-5, 4-4,0:1"`.
    pub fn parse_list(s: &str) -> ScoreResult<Vec<Tile>> {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Tile::from_str)
            .collect()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.left, self.right)
    }
}

impl FromStr for Tile {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScoreError::InvalidTile(s.to_string());
        let (l, r) = s.split_once(|c: char| matches!(c, '-' | ':' | '|')).ok_or_else(invalid)?;
        let left: u8 = l.trim().parse().map_err(|_| invalid())?;
        let right: u8 = r.trim().parse().map_err(|_| invalid())?;
        Tile::new(left, right).map_err(|_| invalid())
    }
}

/// Unplayed tiles for the hand being scored, one bucket per team.
/// Transient: never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandLeftovers {
    a: Vec<Tile>,
    b: Vec<Tile>,
}

impl HandLeftovers {
    pub fn bucket(&self, team: TeamId) -> &[Tile] {
        match team {
            TeamId::A => &self.a,
            TeamId::B => &self.b,
        }
    }

    fn bucket_mut(&mut self, team: TeamId) -> &mut Vec<Tile> {
        match team {
            TeamId::A => &mut self.a,
            TeamId::B => &mut self.b,
        }
    }

    pub fn add(&mut self, team: TeamId, tile: Tile) {
        self.bucket_mut(team).push(tile);
    }

    pub fn extend(&mut self, team: TeamId, tiles: impl IntoIterator<Item = Tile>) {
        self.bucket_mut(team).extend(tiles);
    }

    pub fn remove(&mut self, team: TeamId, index: usize) -> Option<Tile> {
        let bucket = self.bucket_mut(team);
        (index < bucket.len()).then(|| bucket.remove(index))
    }

    pub fn clear(&mut self) {
        self.a.clear();
        self.b.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    pub fn sum(&self, team: TeamId) -> u32 {
        self.bucket(team).iter().map(Tile::pips).sum()
    }

    /// Flat pip values (both halves of every tile) for one side.
    pub fn pips(&self, team: TeamId) -> Vec<u32> {
        self.bucket(team)
            .iter()
            .flat_map(|t| [t.left as u32, t.right as u32])
            .collect()
    }
}

/// Bonus assertions for the hand being scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusFlags {
    pub opening_pass: bool,
    pub pase_corrido: bool,
    pub capicua: bool,
    pub chuchazo: bool,
}

impl BonusFlags {
    pub fn any(&self) -> bool {
        self.opening_pass || self.pase_corrido || self.capicua || self.chuchazo
    }

    /// Capicúa and chuchazo can only happen on the last tile of a hand.
    pub fn closes_hand(&self) -> bool {
        self.capicua || self.chuchazo
    }
}

/// How a finished (or interrupted) hand is being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPlay {
    Win { winner: TeamId },
    Tranque { starting_team: TeamId },
    Bonus { team: TeamId },
}

impl HandPlay {
    pub fn kind(&self) -> HandKind {
        match self {
            Self::Win { .. } => HandKind::Win,
            Self::Tranque { .. } => HandKind::Tranque,
            Self::Bonus { .. } => HandKind::BonusOnly,
        }
    }
}

/// Blocked hand: the lighter side wins; an exact tie goes to the team that
/// opened the hand.
pub fn resolve_tranque(sum_a: u32, sum_b: u32, starting_team: TeamId) -> TeamId {
    use std::cmp::Ordering;
    match sum_a.cmp(&sum_b) {
        Ordering::Less => TeamId::A,
        Ordering::Greater => TeamId::B,
        Ordering::Equal => starting_team,
    }
}
