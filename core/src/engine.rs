use alloc::collections::BTreeSet;
use ndarray::Array2;
use rand::Rng;
use serde::Serialize;

use crate::*;

/// Cell visibility plus marker positions for one game.
///
/// Invariants kept by every public operation:
/// - marker indices are distinct and inside the grid;
/// - a revealed cell never goes back to hidden or flagged;
/// - a marker cell is never written as revealed, hitting it ends the game instead.
///
/// Only serialized through serde; loading goes through [`Grid::from_record`], which checks the layout.
#[derive(Clone, Debug, Serialize)]
pub struct Grid {
    shape: GridShape,
    cells: Array2<CellState>,
    markers: MarkerSet,
    triggered_marker: Option<CellIndex>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.cells == other.cells && self.markers == other.markers
    }
}

impl Grid {
    /// Fresh grid with randomly placed markers.
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let shape = config.validate()?;
        let markers = place_markers(shape, config.num_markers, rng)?;
        Ok(Self::from_parts(shape, hidden_cells(shape), markers))
    }

    /// Fresh grid with an explicit marker layout, which may be empty.
    pub fn with_markers(size: Coord, markers: impl IntoIterator<Item = CellIndex>) -> Result<Self> {
        let shape = GridShape::new(size)?;
        let markers = markers
            .into_iter()
            .map(|index| shape.validate_index(index))
            .collect::<Result<MarkerSet>>()?;
        Ok(Self::from_parts(shape, hidden_cells(shape), markers))
    }

    /// A grid whose cells already show markers is a lost game; the lowest shown marker stands in for the one hit.
    pub(crate) fn from_parts(shape: GridShape, cells: Array2<CellState>, markers: MarkerSet) -> Self {
        let size = shape.size();
        let triggered_marker = markers
            .iter()
            .copied()
            .find(|&index| cells[(index % size, index / size).to_nd_index()] == CellState::Marker);
        Self {
            shape,
            cells,
            markers,
            triggered_marker,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn size(&self) -> Coord {
        self.shape.size()
    }

    pub fn cell_count(&self) -> CellCount {
        self.shape.cell_count()
    }

    pub fn index_to_position(&self, index: CellIndex) -> Result<Position> {
        self.shape.index_to_position(index)
    }

    pub fn position_to_index(&self, pos: Position) -> Result<CellIndex> {
        self.shape.position_to_index(pos)
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<CellState> {
        let index = self.shape.validate_index(index)?;
        Ok(self.cell_at_unchecked(index))
    }

    pub(crate) fn cell_at_unchecked(&self, index: CellIndex) -> CellState {
        self.cells[self.nd_index(index)]
    }

    /// Cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellState> + '_ {
        self.cells.iter().copied()
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn num_markers(&self) -> CellCount {
        self.markers.len()
    }

    pub fn has_marker_at(&self, index: CellIndex) -> bool {
        self.markers.contains(&index)
    }

    /// Index of the marker that ended the game, if one was hit since the last restart.
    pub fn triggered_marker(&self) -> Option<CellIndex> {
        self.triggered_marker
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells().filter(|cell| cell.is_flagged()).count()
    }

    pub fn hidden_count(&self) -> CellCount {
        self.cells().filter(|cell| cell.is_hidden()).count()
    }

    /// How many markers have not been flagged yet, negative when over-flagged.
    pub fn remaining_flags(&self) -> isize {
        (self.num_markers() as isize) - (self.flagged_count() as isize)
    }

    /// Won once nothing is hidden and the flag count equals the marker count.
    ///
    /// Flags are not checked against the marker positions. A lost grid, or one showing its markers, is never won.
    pub fn is_won(&self) -> bool {
        !self.is_lost()
            && self.cells().all(|cell| cell != CellState::Marker)
            && self.hidden_count() == 0
            && self.flagged_count() == self.num_markers()
    }

    pub fn is_lost(&self) -> bool {
        self.triggered_marker.is_some()
    }

    /// Number shown on the cell: the stored count when revealed, otherwise the markers among its neighbors.
    pub fn adjacency_count(&self, index: CellIndex) -> Result<u8> {
        let index = self.shape.validate_index(index)?;
        Ok(self.adjacent_markers(index))
    }

    pub(crate) fn adjacent_markers(&self, index: CellIndex) -> u8 {
        if let CellState::Revealed(count) = self.cell_at_unchecked(index) {
            return count;
        }
        self.shape
            .neighbors_of(index)
            .into_iter()
            .filter(|neighbor| self.markers.contains(neighbor))
            .count() as u8
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.shape.validate_index(index)?;
        self.check_not_finished()?;

        if !self.cell_at_unchecked(index).is_hidden() {
            return Ok(RevealOutcome::Continuing(BTreeSet::new()));
        }

        if self.has_marker_at(index) {
            log::debug!("marker hit at {}", index);
            self.triggered_marker = Some(index);
            return Ok(RevealOutcome::MarkerHit);
        }

        let mut changed = BTreeSet::new();
        for visible in flood_fill(self, index)? {
            if self.cell_at_unchecked(visible).is_hidden() {
                let count = self.adjacent_markers(visible);
                let nd_index = self.nd_index(visible);
                self.cells[nd_index] = CellState::Revealed(count);
                changed.insert(visible);
            }
        }
        log::debug!("revealed {} cells from {}", changed.len(), index);

        Ok(RevealOutcome::Continuing(changed))
    }

    /// Flips between hidden and flagged; revealed cells are left alone.
    ///
    /// The number of flags is not limited here.
    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let index = self.shape.validate_index(index)?;
        let nd_index = self.nd_index(index);

        Ok(match self.cells[nd_index] {
            Hidden => {
                self.cells[nd_index] = Flagged;
                Changed
            }
            Flagged => {
                self.cells[nd_index] = Hidden;
                Changed
            }
            Revealed(_) | Marker => NoChange,
        })
    }

    /// Shows every marker for the end-of-game display, returning the indices that changed.
    pub fn reveal_all_markers(&mut self) -> BTreeSet<CellIndex> {
        let mut changed = BTreeSet::new();
        for &index in &self.markers {
            let size = self.shape.size();
            let nd_index = (index % size, index / size).to_nd_index();
            if self.cells[nd_index] != CellState::Marker {
                self.cells[nd_index] = CellState::Marker;
                changed.insert(index);
            }
        }
        changed
    }

    /// Hides every cell again, keeping the markers where they are.
    pub fn restart(&mut self) {
        self.cells.fill(CellState::Hidden);
        self.triggered_marker = None;
    }

    /// Draws a new marker layout of `num_markers` and restarts.
    ///
    /// The grid is untouched when the count is rejected.
    pub fn regenerate<R: Rng>(&mut self, num_markers: CellCount, rng: &mut R) -> Result<()> {
        if num_markers == 0 {
            return Err(GameError::NoMarkers);
        }
        self.markers = place_markers(self.shape, num_markers, rng)?;
        self.restart();
        Ok(())
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_lost() {
            Err(GameError::AlreadyEnded)
        } else if self.is_won() {
            Err(GameError::AlreadyWon)
        } else {
            Ok(())
        }
    }

    fn nd_index(&self, index: CellIndex) -> [usize; 2] {
        let size = self.shape.size();
        (index % size, index / size).to_nd_index()
    }
}

fn hidden_cells(shape: GridShape) -> Array2<CellState> {
    Array2::default((shape.size(), shape.size()))
}
