use std::sync::Arc;

use cubemorse::{CubicalGrid, Fibration};

pub fn padded_grid(sizes: &[u64]) -> Arc<CubicalGrid> {
    Arc::new(CubicalGrid::new(sizes.to_vec()))
}

/// A fibration splitting the grid into two value classes by the first
/// coordinate of each cell's base vertex. Cells straddling the split are
/// assigned by their base, so matches across the split are possible in one
/// direction but not the other.
pub fn half_space_fibration(grid: &Arc<CubicalGrid>) -> Arc<Fibration> {
    let split = (grid.sizes()[0] + 1) / 2;
    let geometry = grid.clone();
    Arc::new(Fibration::new(grid.clone(), move |cell| {
        i64::from(geometry.coordinates(cell)[0] >= split)
    }))
}

/// A fibration assigning each cell its own dimension. Since matches only
/// ever pair cells of adjacent dimension, this leaves every cell critical.
pub fn dimension_fibration(grid: &Arc<CubicalGrid>) -> Arc<Fibration> {
    let geometry = grid.clone();
    Arc::new(Fibration::new(grid.clone(), move |cell| {
        i64::from(geometry.cell_dimension(cell))
    }))
}
