use rand::Rng;

use crate::*;

/// Draws `count` distinct marker indices by rejection sampling: pick a uniformly random index and draw again while it
/// is already taken.
///
/// Terminates because every accepted draw shrinks the free domain and `count` never exceeds the cell count.
pub fn place_markers<R: Rng>(shape: GridShape, count: CellCount, rng: &mut R) -> Result<MarkerSet> {
    let cell_count = shape.cell_count();
    if count > cell_count {
        return Err(GameError::TooManyMarkers {
            requested: count,
            cell_count,
        });
    }

    let mut markers = MarkerSet::new();
    while markers.len() < count {
        let mut index = rng.random_range(0..cell_count);
        while markers.contains(&index) {
            index = rng.random_range(0..cell_count);
        }
        markers.insert(index);
    }

    log::debug!(
        "placed {} markers on a {}x{} grid",
        count,
        shape.size(),
        shape.size()
    );
    Ok(markers)
}
