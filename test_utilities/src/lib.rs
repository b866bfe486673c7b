pub use grids::{dimension_fibration, half_space_fibration, padded_grid};

mod grids;
