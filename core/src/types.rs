use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Linear position of a cell, row-major from the top-left corner.
pub type CellIndex = usize;

/// Single coordinate axis used for the grid size and positions.
pub type Coord = usize;

/// Count type used for marker counts and total-cell counts.
pub type CellCount = usize;

/// Two-dimensional position `(column, row)`.
pub type Position = (Coord, Coord);

/// Up to eight neighbor indices, never spilled to the heap.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    /// Arrays are stored `[row, column]` so their standard layout matches the linear index order.
    fn to_nd_index(self) -> Self::Output {
        [self.1, self.0]
    }
}

/// The eight compass directions, screen oriented: north is the row above.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Row-major order, so [`GridShape::neighbors_of`] yields ascending indices.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Column and row displacement.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            North => (0, -1),
            South => (0, 1),
            East => (1, 0),
            West => (-1, 0),
            NorthEast => (1, -1),
            NorthWest => (-1, -1),
            SouthEast => (1, 1),
            SouthWest => (-1, 1),
        }
    }
}

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Position, delta: (isize, isize), size: Coord) -> Option<Position> {
    let (x, y) = pos;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= size {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= size {
        return None;
    }

    Some((next_x, next_y))
}

/// Geometry of a square grid: the index/position bijection and the neighbor relation.
///
/// This depends on the size alone, never on game state, so every component that needs adjacency asks it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    size: Coord,
}

impl GridShape {
    pub fn new(size: Coord) -> Result<Self> {
        if size == 0 || size.checked_mul(size).is_none() {
            return Err(GameError::InvalidSize);
        }
        Ok(Self { size })
    }

    pub const fn size(self) -> Coord {
        self.size
    }

    pub const fn cell_count(self) -> CellCount {
        self.size * self.size
    }

    pub fn validate_index(self, index: CellIndex) -> Result<CellIndex> {
        if index < self.cell_count() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex {
                index,
                cell_count: self.cell_count(),
            })
        }
    }

    pub fn index_to_position(self, index: CellIndex) -> Result<Position> {
        let index = self.validate_index(index)?;
        Ok((index % self.size, index / self.size))
    }

    pub fn position_to_index(self, (x, y): Position) -> Result<CellIndex> {
        if x < self.size && y < self.size {
            Ok(y * self.size + x)
        } else {
            Err(GameError::InvalidPosition { position: (x, y) })
        }
    }

    /// Neighboring index in `direction`, or `None` when that side of the cell is a grid boundary.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid.
    pub fn neighbor(self, index: CellIndex, direction: Direction) -> Option<CellIndex> {
        assert!(
            index < self.cell_count(),
            "cell index {index} outside a {0}x{0} grid",
            self.size
        );
        let pos = (index % self.size, index / self.size);
        apply_delta(pos, direction.delta(), self.size).map(|(x, y)| y * self.size + x)
    }

    /// All defined neighbors of `index`, ascending and without duplicates.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid.
    pub fn neighbors_of(self, index: CellIndex) -> Neighbors {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbor(index, direction))
            .collect()
    }
}
