#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use flood::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod cell;
mod codec;
mod engine;
mod error;
mod flood;
mod generator;
mod session;
mod types;

/// Marker positions, unique and kept in ascending order.
pub type MarkerSet = BTreeSet<CellIndex>;

pub const DEFAULT_SIZE: Coord = 10;
pub const DEFAULT_MARKERS: CellCount = 15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub num_markers: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, num_markers: CellCount) -> Self {
        Self { size, num_markers }
    }

    pub fn new(size: Coord, num_markers: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, num_markers);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<GridShape> {
        let shape = GridShape::new(self.size)?;
        if self.num_markers == 0 {
            return Err(GameError::NoMarkers);
        }
        if self.num_markers > shape.cell_count() {
            return Err(GameError::TooManyMarkers {
                requested: self.num_markers,
                cell_count: shape.cell_count(),
            });
        }
        Ok(shape)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MARKERS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

/// Result of a single reveal action.
///
/// Hitting a marker is a normal end of the game, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// The game goes on; holds every index whose state changed, possibly none.
    Continuing(BTreeSet<CellIndex>),
    MarkerHit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_out_of_range_marker_counts() {
        assert_eq!(GameConfig::new(3, 0), Err(GameError::NoMarkers));
        assert_eq!(
            GameConfig::new(3, 10),
            Err(GameError::TooManyMarkers {
                requested: 10,
                cell_count: 9
            })
        );
        assert_eq!(GameConfig::new(0, 1), Err(GameError::InvalidSize));
        assert!(GameConfig::new(3, 9).is_ok());
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate().unwrap().cell_count(), 100);
    }
}
