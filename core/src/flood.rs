use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// Cells that become visible when `start` is revealed, in discovery order with `start` first.
///
/// A start cell next to a marker yields only itself. Otherwise the search expands through every zero-count cell it
/// discovers. Flagged cells are reported as discovered but never expanded; skipping them on write is up to the
/// caller, as is checking `start` for a marker first.
pub fn flood_fill(grid: &Grid, start: CellIndex) -> Result<Vec<CellIndex>> {
    let start = grid.shape().validate_index(start)?;

    let mut visible = vec![start];
    if grid.adjacent_markers(start) > 0 {
        return Ok(visible);
    }

    let shape = grid.shape();
    let mut discovered = BTreeSet::from([start]);
    let mut frontier: Vec<_> = shape.neighbors_of(start).into_vec();
    log::trace!("flood fill from {}, frontier: {:?}", start, frontier);

    while let Some(index) = frontier.pop() {
        if !discovered.insert(index) {
            continue;
        }
        visible.push(index);

        if grid.cell_at_unchecked(index).is_flagged() {
            log::trace!("stopping at flag {}", index);
            continue;
        }

        if grid.adjacent_markers(index) == 0 {
            frontier.extend(
                shape
                    .neighbors_of(index)
                    .into_iter()
                    .filter(|next| !discovered.contains(next)),
            );
        }
    }

    Ok(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut indices: Vec<CellIndex>) -> Vec<CellIndex> {
        indices.sort_unstable();
        indices
    }

    #[test]
    fn numbered_start_yields_only_itself() {
        let grid = Grid::with_markers(2, [3]).unwrap();
        assert_eq!(flood_fill(&grid, 0).unwrap(), vec![0]);
    }

    #[test]
    fn empty_grid_floods_everything() {
        let grid = Grid::with_markers(3, []).unwrap();
        assert_eq!(sorted(flood_fill(&grid, 4).unwrap()), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn stops_at_numbered_border_and_never_includes_markers() {
        // marker in the bottom-right corner of a 4x4 grid
        let grid = Grid::with_markers(4, [15]).unwrap();
        let visible = flood_fill(&grid, 0).unwrap();
        assert!(!visible.contains(&15));
        assert_eq!(visible.len(), 15);
    }

    #[test]
    fn flagged_cells_are_discovered_but_not_expanded() {
        // column 2 of a 5x5 grid walled off by flags, marker far right
        let mut grid = Grid::with_markers(5, [24]).unwrap();
        for row in 0..5 {
            grid.toggle_flag(row * 5 + 2).unwrap();
        }
        let visible = sorted(flood_fill(&grid, 0).unwrap());
        let expected: Vec<_> = (0..5)
            .flat_map(|row| [row * 5, row * 5 + 1, row * 5 + 2])
            .collect();
        assert_eq!(visible, sorted(expected));
    }

    #[test]
    fn output_holds_no_duplicates() {
        let grid = Grid::with_markers(6, [7, 28]).unwrap();
        let visible = flood_fill(&grid, 5).unwrap();
        let unique: BTreeSet<_> = visible.iter().copied().collect();
        assert_eq!(unique.len(), visible.len());
        assert!(visible.iter().all(|index| !grid.has_marker_at(*index)));
    }

    #[test]
    fn out_of_range_start_is_rejected() {
        let grid = Grid::with_markers(3, []).unwrap();
        assert_eq!(
            flood_fill(&grid, 9),
            Err(GameError::InvalidIndex {
                index: 9,
                cell_count: 9
            })
        );
    }
}
