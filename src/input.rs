//! Where leftover tiles come from. The scoring core only ever sees tiles;
//! whether they were tapped in by hand or guessed from a photo is the
//! source's business.

use crate::error::{ScoreError, ScoreResult};
use crate::hand::{Tile, MAX_PIPS};

/// Upper bound on candidates offered from a single detection pass.
pub const MAX_DETECTED_TILES: usize = 10;

pub trait TileSource {
    fn tiles(&mut self) -> ScoreResult<Vec<Tile>>;
}

/// Tiles entered one by one. Draining the source empties it.
#[derive(Debug, Clone, Default)]
pub struct ManualTaps {
    taps: Vec<Tile>,
}

impl ManualTaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tap(&mut self, tile: Tile) {
        self.taps.push(tile);
    }
}

impl From<Vec<Tile>> for ManualTaps {
    fn from(taps: Vec<Tile>) -> Self {
        Self { taps }
    }
}

impl TileSource for ManualTaps {
    fn tiles(&mut self) -> ScoreResult<Vec<Tile>> {
        Ok(std::mem::take(&mut self.taps))
    }
}

/// Cleans up raw detector output: pip counts are clamped to 0..=6, repeats
/// are dropped (first one kept) and at most [`MAX_DETECTED_TILES`] survive.
pub fn normalize_detections(raw: &[(i32, i32)]) -> Vec<Tile> {
    let clamp = |v: i32| v.clamp(0, MAX_PIPS as i32) as u8;

    let mut unique: Vec<Tile> = Vec::new();
    for &(left, right) in raw {
        let tile = Tile {
            left: clamp(left),
            right: clamp(right),
        };
        if !unique.contains(&tile) {
            unique.push(tile);
        }
        if unique.len() == MAX_DETECTED_TILES {
            break;
        }
    }
    unique
}

/// Raw detector pairs, cleaned up by [`normalize_detections`] when drained.
#[derive(Debug, Clone, Default)]
pub struct Detections {
    raw: Vec<(i32, i32)>,
}

impl Detections {
    /// Reads detector output written as `"l,r; l,r; ..."`. Values may be out
    /// of range; they are clamped later.
    pub fn parse(s: &str) -> ScoreResult<Self> {
        let raw = s
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| -> ScoreResult<(i32, i32)> {
                let invalid = || ScoreError::InvalidTile(pair.to_string());
                let (l, r) = pair.split_once(',').ok_or_else(invalid)?;
                let left = l.trim().parse().map_err(|_| invalid())?;
                let right = r.trim().parse().map_err(|_| invalid())?;
                Ok((left, right))
            })
            .collect::<ScoreResult<Vec<_>>>()?;
        Ok(Self { raw })
    }
}

impl From<Vec<(i32, i32)>> for Detections {
    fn from(raw: Vec<(i32, i32)>) -> Self {
        Self { raw }
    }
}

impl TileSource for Detections {
    fn tiles(&mut self) -> ScoreResult<Vec<Tile>> {
        Ok(normalize_detections(&std::mem::take(&mut self.raw)))
    }
}
