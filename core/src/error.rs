use thiserror::Error;

use crate::{CellCount, CellIndex, Position};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index {index} is outside a grid of {cell_count} cells")]
    InvalidIndex {
        index: CellIndex,
        cell_count: CellCount,
    },
    #[error("Position {position:?} is outside the grid")]
    InvalidPosition { position: Position },
    #[error("Grid size must be positive")]
    InvalidSize,
    #[error("Too many markers, {requested} requested but only {cell_count} cells")]
    TooManyMarkers {
        requested: CellCount,
        cell_count: CellCount,
    },
    #[error("At least one marker is required")]
    NoMarkers,
    #[error("Game already won, no new reveals are accepted")]
    AlreadyWon,
    #[error("A marker was hit, no new reveals are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Reasons a saved three-line record can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Expected 3 lines, found {found}")]
    LineCount { found: usize },
    #[error("Grid size {0:?} is not a positive integer")]
    InvalidSize(alloc::string::String),
    #[error("Marker list {0:?} is not a list of integers")]
    InvalidMarkerList(alloc::string::String),
    #[error("Marker index {index} is outside a grid of {cell_count} cells")]
    MarkerOutOfRange {
        index: CellIndex,
        cell_count: CellCount,
    },
    #[error("Marker index {0} is listed twice")]
    DuplicateMarker(CellIndex),
    #[error("Cell line has {found} cells, expected {expected}")]
    CellCountMismatch { expected: CellCount, found: CellCount },
    #[error("Unknown cell symbol {symbol:?} at index {index}")]
    InvalidSymbol { index: CellIndex, symbol: char },
    #[error("Cell {0} holds a marker but is shown as revealed")]
    RevealedMarker(CellIndex),
    #[error("Cell {0} shows a marker but none is placed there")]
    MarkerSymbolMismatch(CellIndex),
}
