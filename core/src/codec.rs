//! Three-line text record used to save and load a [`Grid`].
//!
//! ```text
//! ~~1♥~~...      cells in index order, one symbol each
//! (3, 17, 42)    marker indices
//! 10             grid size
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Display, Write};
use core::str::FromStr;
use ndarray::Array2;

use crate::*;

impl Grid {
    pub fn to_record(&self) -> String {
        self.to_string()
    }

    /// Parses a whole record, either returning a complete grid or rejecting it; there is no partial result.
    pub fn from_record(record: &str) -> core::result::Result<Self, RecordError> {
        let mut lines: Vec<&str> = record.lines().map(str::trim).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let &[cells_line, markers_line, size_line] = lines.as_slice() else {
            return Err(RecordError::LineCount { found: lines.len() });
        };

        let shape = size_line
            .parse()
            .ok()
            .and_then(|size| GridShape::new(size).ok())
            .ok_or_else(|| RecordError::InvalidSize(size_line.into()))?;
        let markers = parse_markers(markers_line, shape)?;
        let cells = parse_cells(cells_line, shape, &markers)?;

        Ok(Self::from_parts(shape, cells, markers))
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells() {
            f.write_char(cell.symbol())?;
        }
        f.write_char('\n')?;
        write_markers(f, self.markers())?;
        writeln!(f)?;
        writeln!(f, "{}", self.size())
    }
}

impl FromStr for Grid {
    type Err = RecordError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::from_record(s)
    }
}

/// Tuple notation: `()`, `(3,)` or `(3, 17, 42)`.
fn write_markers(f: &mut impl Write, markers: &MarkerSet) -> fmt::Result {
    f.write_char('(')?;
    for (i, index) in markers.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", index)?;
    }
    if markers.len() == 1 {
        f.write_char(',')?;
    }
    f.write_char(')')
}

/// Accepts tuple or list brackets, whitespace and one trailing comma.
fn parse_markers(line: &str, shape: GridShape) -> core::result::Result<MarkerSet, RecordError> {
    let invalid = || RecordError::InvalidMarkerList(line.into());

    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .or_else(|| line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
        .ok_or_else(invalid)?
        .trim();

    let mut markers = MarkerSet::new();
    if inner.is_empty() {
        return Ok(markers);
    }

    let inner = inner.strip_suffix(',').unwrap_or(inner);
    for item in inner.split(',') {
        let index: CellIndex = item.trim().parse().map_err(|_| invalid())?;
        if index >= shape.cell_count() {
            return Err(RecordError::MarkerOutOfRange {
                index,
                cell_count: shape.cell_count(),
            });
        }
        if !markers.insert(index) {
            return Err(RecordError::DuplicateMarker(index));
        }
    }
    Ok(markers)
}

fn parse_cells(
    line: &str,
    shape: GridShape,
    markers: &MarkerSet,
) -> core::result::Result<Array2<CellState>, RecordError> {
    let found = line.chars().count();
    if found != shape.cell_count() {
        return Err(RecordError::CellCountMismatch {
            expected: shape.cell_count(),
            found,
        });
    }

    let size = shape.size();
    let mut cells = Array2::default((size, size));
    for (index, symbol) in line.chars().enumerate() {
        let cell =
            CellState::from_symbol(symbol).ok_or(RecordError::InvalidSymbol { index, symbol })?;
        match (cell, markers.contains(&index)) {
            (CellState::Revealed(_), true) => return Err(RecordError::RevealedMarker(index)),
            (CellState::Marker, false) => return Err(RecordError::MarkerSymbolMismatch(index)),
            _ => {}
        }
        cells[(index % size, index / size).to_nd_index()] = cell;
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn writes_three_lines_in_index_order() {
        let mut grid = Grid::with_markers(2, [3]).unwrap();
        grid.reveal(0).unwrap();
        grid.toggle_flag(3).unwrap();

        assert_eq!(grid.to_record(), "1~~♥\n(3,)\n2\n");
    }

    #[test]
    fn marker_line_uses_tuple_notation() {
        let empty = Grid::with_markers(3, []).unwrap();
        let many = Grid::with_markers(10, [42, 3, 17]).unwrap();

        assert_eq!(empty.to_record().lines().nth(1), Some("()"));
        assert_eq!(many.to_record().lines().nth(1), Some("(3, 17, 42)"));
    }

    #[test]
    fn round_trips_reachable_states() {
        let mut rng = SmallRng::seed_from_u64(3);
        for size in 1..=8 {
            let num_markers = rng.random_range(1..=size * size);
            let config = GameConfig::new(size, num_markers).unwrap();
            let mut grid = Grid::new(config, &mut rng).unwrap();
            for _ in 0..size * 2 {
                let index = rng.random_range(0..grid.cell_count());
                if rng.random_bool(0.3) {
                    grid.toggle_flag(index).unwrap();
                } else if grid.reveal(index).is_err() {
                    break;
                }
            }

            let loaded = Grid::from_record(&grid.to_record()).unwrap();
            assert_eq!(loaded, grid);
            assert_eq!(loaded.to_record(), grid.to_record());
        }
    }

    #[test]
    fn round_trips_end_of_game_display() {
        let mut grid = Grid::with_markers(3, [0, 5]).unwrap();
        assert_eq!(grid.reveal(0).unwrap(), RevealOutcome::MarkerHit);
        grid.reveal_all_markers();

        let loaded: Grid = grid.to_record().parse().unwrap();
        assert_eq!(loaded, grid);
        assert_eq!(loaded.cell_at(5).unwrap(), CellState::Marker);
    }

    #[test]
    fn accepts_lists_whitespace_and_trailing_blank_lines() {
        let grid = Grid::from_record("~~~~\n[ 1 , 2, ]\n 2 \n\n").unwrap();

        assert_eq!(grid.markers(), &MarkerSet::from([1, 2]));
        assert_eq!(grid.num_markers(), 2);
        assert_eq!(grid.size(), 2);
    }

    #[test]
    fn rejects_wrong_line_count() {
        assert_eq!(
            Grid::from_record("~~~~\n(3,)\n"),
            Err(RecordError::LineCount { found: 2 })
        );
        assert_eq!(
            Grid::from_record("~~~~\n(3,)\n2\nextra\n"),
            Err(RecordError::LineCount { found: 4 })
        );
    }

    #[test]
    fn rejects_bad_size() {
        assert_eq!(
            Grid::from_record("~~~~\n(3,)\ntwo\n"),
            Err(RecordError::InvalidSize("two".into()))
        );
        assert_eq!(
            Grid::from_record("\n()\n0\n"),
            Err(RecordError::InvalidSize("0".into()))
        );
    }

    #[test]
    fn rejects_bad_marker_lists() {
        assert_eq!(
            Grid::from_record("~~~~\n3, 1\n2\n"),
            Err(RecordError::InvalidMarkerList("3, 1".into()))
        );
        assert_eq!(
            Grid::from_record("~~~~\n(1,,2)\n2\n"),
            Err(RecordError::InvalidMarkerList("(1,,2)".into()))
        );
        assert_eq!(
            Grid::from_record("~~~~\n(4,)\n2\n"),
            Err(RecordError::MarkerOutOfRange {
                index: 4,
                cell_count: 4
            })
        );
        assert_eq!(
            Grid::from_record("~~~~\n(1, 1)\n2\n"),
            Err(RecordError::DuplicateMarker(1))
        );
    }

    #[test]
    fn rejects_bad_cells() {
        assert_eq!(
            Grid::from_record("~~~\n(3,)\n2\n"),
            Err(RecordError::CellCountMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Grid::from_record("~x~~\n(3,)\n2\n"),
            Err(RecordError::InvalidSymbol {
                index: 1,
                symbol: 'x'
            })
        );
        assert_eq!(
            Grid::from_record("~~~1\n(3,)\n2\n"),
            Err(RecordError::RevealedMarker(3))
        );
        assert_eq!(
            Grid::from_record("☺~~~\n(3,)\n2\n"),
            Err(RecordError::MarkerSymbolMismatch(0))
        );
    }

    #[test]
    fn loaded_marker_display_is_a_lost_game() {
        // the only flag sits on a safe cell, the marker itself is displayed
        let mut grid = Grid::from_record("♥11☺\n(3,)\n2\n").unwrap();

        assert!(grid.is_lost());
        assert!(!grid.is_won());
        assert_eq!(grid.triggered_marker(), Some(3));
        assert_eq!(grid.reveal(0), Err(GameError::AlreadyEnded));
    }
}
