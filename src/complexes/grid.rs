// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A concrete cubical complex with bit-addressed cells over a padded
//! rectangular grid.
//!
//! Each axis of the grid holds a configured number of unit boxes plus one
//! extra slot, the *fringe*, at the upper edge. The fringe absorbs the
//! boundary cases of cells that would otherwise extend past the domain, so
//! per-cell queries never need to special-case the domain edge beyond the
//! masks exposed here.
//!
//! ## Addressing
//!
//! A cell identifier decomposes as `position + bucket_size * bucket`. The
//! position encodes the cell's coordinates in mixed radix over the per-axis
//! widths (axis 0 least significant); the bucket is the canonical index of
//! the cell's shape mask. Buckets are ordered dimension-major — all shapes of
//! population count 0, then 1, and so on, numerically within each group — so
//! cell identifiers are sorted by cell dimension.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::traits::{ComplexLike, CubicalComplexLike};

/// A cubical complex over a padded rectangular grid, addressing cells as
/// `position + bucket_size * shape_bucket(shape)`.
///
/// The maximum ambient dimension is 32. Note the shape bucket tables have one
/// entry per shape mask and therefore grow as `2^dimension`.
///
/// # Examples
///
/// ```rust
/// use cubemorse::{ComplexLike, CubicalComplexLike, CubicalGrid};
///
/// let grid = CubicalGrid::new(vec![2, 2]);
/// assert_eq!(grid.dimension(), 2);
/// assert_eq!(grid.bucket_size(), 9); // (2 + 1) * (2 + 1) positions per shape
/// assert_eq!(grid.cell_count(), 36);
///
/// // Cell 13 is position 4 in the bucket of shape 0b01: an edge along axis 0
/// // based at coordinates (1, 1).
/// assert_eq!(grid.cell_shape(13), 0b01);
/// assert_eq!(grid.coordinates(13), vec![1, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubicalGrid {
    sizes: Vec<u64>,
    widths: Vec<u64>,
    bucket_size: u64,
    shape_buckets: Vec<u64>,
    bucket_shapes: Vec<u64>,
}

impl CubicalGrid {
    /// Create a new grid with `sizes[d]` unit boxes along axis `d`; one
    /// fringe slot is added at the upper edge of each axis.
    ///
    /// # Panics
    /// Panics if `sizes` is empty, has more than 32 axes, or contains a zero.
    #[must_use]
    pub fn new(sizes: Vec<u64>) -> Self {
        assert!(!sizes.is_empty(), "Cubical grid must have at least one axis");
        assert!(
            sizes.len() <= 32,
            "Cubical grid ambient dimension cannot exceed 32"
        );
        assert!(
            sizes.iter().all(|size| *size >= 1),
            "Each axis of a cubical grid must contain at least one box"
        );

        let widths: Vec<u64> = sizes.iter().map(|size| size + 1).collect();
        let bucket_size = widths.iter().product();

        let dimension = sizes.len();
        let mut shape_buckets = vec![0u64; 1 << dimension];
        let mut bucket_shapes = vec![0u64; 1 << dimension];
        let mut bucket = 0u64;
        for cell_dimension in 0..=dimension as u32 {
            for shape in 0..1u64 << dimension {
                if shape.count_ones() == cell_dimension {
                    shape_buckets[shape as usize] = bucket;
                    bucket_shapes[bucket as usize] = shape;
                    bucket += 1;
                }
            }
        }

        Self {
            sizes,
            widths,
            bucket_size,
            shape_buckets,
            bucket_shapes,
        }
    }

    /// Get the number of unit boxes along each axis, excluding the fringe.
    #[must_use]
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Decode the coordinates of `cell` within its shape bucket.
    #[must_use]
    pub fn coordinates(&self, cell: u64) -> Vec<u64> {
        let mut position = cell % self.bucket_size;
        self.widths
            .iter()
            .map(|width| {
                let coordinate = position % width;
                position /= width;
                coordinate
            })
            .collect()
    }

    /// Returns the dimension of `cell` (the population count of its shape
    /// mask).
    #[must_use]
    pub fn cell_dimension(&self, cell: u64) -> u32 {
        self.cell_shape(cell).count_ones()
    }

    /// Bitmask of axes along which `cell` sits in the fringe slot.
    fn upper_edge_axes(&self, cell: u64) -> u64 {
        let mut axes = 0u64;
        for (axis, coordinate) in self.coordinates(cell).into_iter().enumerate() {
            if coordinate + 1 == self.widths[axis] {
                axes |= 1 << axis;
            }
        }
        axes
    }
}

impl ComplexLike for CubicalGrid {
    fn dimension(&self) -> u32 {
        self.sizes.len() as u32
    }

    fn cell_count(&self) -> u64 {
        self.bucket_size << self.sizes.len()
    }

    fn as_cubical(self: Arc<Self>) -> Option<Arc<dyn CubicalComplexLike>> {
        Some(self)
    }
}

impl CubicalComplexLike for CubicalGrid {
    fn bucket_size(&self) -> u64 {
        self.bucket_size
    }

    fn cell_shape(&self, cell: u64) -> u64 {
        self.bucket_shapes[(cell / self.bucket_size) as usize]
    }

    fn lower_edge_axes(&self, cell: u64) -> u64 {
        let mut axes = 0u64;
        for (axis, coordinate) in self.coordinates(cell).into_iter().enumerate() {
            if coordinate == 0 {
                axes |= 1 << axis;
            }
        }
        axes
    }

    fn blocked_axes(&self, cell: u64) -> u64 {
        // A cell is never extended along an axis it already spans, nor past
        // the upper edge of the padded domain.
        self.cell_shape(cell) | self.upper_edge_axes(cell)
    }

    fn is_fringe(&self, cell: u64) -> bool {
        self.upper_edge_axes(cell) != 0
    }

    fn shape_bucket(&self, shape: u64) -> u64 {
        self.shape_buckets[shape as usize]
    }
}

impl Display for CubicalGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CubicalGrid[sizes: (")?;
        for (axis, size) in self.sizes.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", size)?;
        }
        write!(f, ")]")
    }
}

impl Serialize for CubicalGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The derived tables are rebuilt on deserialization.
        self.sizes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CubicalGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sizes = Vec::<u64>::deserialize(deserializer)?;
        if sizes.is_empty() || sizes.len() > 32 || sizes.iter().any(|size| *size == 0) {
            return Err(serde::de::Error::custom(
                "cubical grid sizes must contain between 1 and 32 nonzero entries",
            ));
        }
        Ok(Self::new(sizes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation_and_addressing() {
        let grid = CubicalGrid::new(vec![2, 2]);

        assert_eq!(grid.dimension(), 2);
        assert_eq!(grid.sizes(), &[2, 2]);
        assert_eq!(grid.bucket_size(), 9);
        assert_eq!(grid.cell_count(), 36);

        // Dimension-major bucket order in two axes: 00, 01, 10, 11.
        assert_eq!(grid.shape_bucket(0b00), 0);
        assert_eq!(grid.shape_bucket(0b01), 1);
        assert_eq!(grid.shape_bucket(0b10), 2);
        assert_eq!(grid.shape_bucket(0b11), 3);

        // Shapes per bucket, read back through cells.
        assert_eq!(grid.cell_shape(0), 0b00);
        assert_eq!(grid.cell_shape(9), 0b01);
        assert_eq!(grid.cell_shape(18), 0b10);
        assert_eq!(grid.cell_shape(27), 0b11);

        assert_eq!(grid.cell_dimension(0), 0);
        assert_eq!(grid.cell_dimension(13), 1);
        assert_eq!(grid.cell_dimension(27), 2);
    }

    #[test]
    fn test_shape_tables_are_inverse_and_dimension_sorted() {
        let grid = CubicalGrid::new(vec![1, 1, 1]);

        // In three axes: 000; 001, 010, 100; 011, 101, 110; 111.
        let expected_shapes = [0b000, 0b001, 0b010, 0b100, 0b011, 0b101, 0b110, 0b111];
        for (bucket, shape) in expected_shapes.into_iter().enumerate() {
            assert_eq!(grid.shape_bucket(shape), bucket as u64);
            assert_eq!(grid.cell_shape(bucket as u64 * grid.bucket_size()), shape);
        }

        // Cell dimension is nondecreasing in the identifier.
        let mut previous = 0;
        for cell in 0..grid.cell_count() {
            let dimension = grid.cell_dimension(cell);
            assert!(dimension >= previous);
            previous = dimension;
        }
    }

    #[test]
    fn test_coordinate_decoding() {
        let grid = CubicalGrid::new(vec![2, 2]);

        assert_eq!(grid.coordinates(0), vec![0, 0]);
        assert_eq!(grid.coordinates(4), vec![1, 1]);
        assert_eq!(grid.coordinates(8), vec![2, 2]);
        // Coordinates depend only on the position within the bucket.
        assert_eq!(grid.coordinates(13), vec![1, 1]);
        assert_eq!(grid.coordinates(31), vec![1, 1]);

        let line = CubicalGrid::new(vec![3]);
        assert_eq!(line.bucket_size(), 4);
        assert_eq!(line.coordinates(6), vec![2]);
    }

    #[test]
    fn test_edge_masks_and_fringe() {
        let grid = CubicalGrid::new(vec![2, 2]);

        // Position (0, 0): touches the lower edge on both axes, no fringe.
        assert_eq!(grid.lower_edge_axes(0), 0b11);
        assert!(!grid.is_fringe(0));
        assert_eq!(grid.blocked_axes(0), 0b00);

        // Position (1, 1): interior.
        assert_eq!(grid.lower_edge_axes(4), 0b00);
        assert!(!grid.is_fringe(4));

        // Position (2, 0): fringe along axis 0, blocked there.
        assert_eq!(grid.lower_edge_axes(2), 0b10);
        assert!(grid.is_fringe(2));
        assert_eq!(grid.blocked_axes(2), 0b01);

        // Position (2, 2): the corner of the fringe.
        assert!(grid.is_fringe(8));
        assert_eq!(grid.blocked_axes(8), 0b11);

        // Shape contributes to the blocked mask in every bucket.
        assert_eq!(grid.blocked_axes(9), 0b01);
        assert_eq!(grid.blocked_axes(18), 0b10);
        assert_eq!(grid.blocked_axes(27), 0b11);
    }

    #[test]
    fn test_capability_check() {
        let grid = Arc::new(CubicalGrid::new(vec![2]));
        let complex: Arc<dyn ComplexLike> = grid;
        let cubical = complex.as_cubical().expect("grid is cubical");
        assert_eq!(cubical.bucket_size(), 3);
    }

    #[test]
    fn test_display() {
        let grid = CubicalGrid::new(vec![2, 3, 4]);
        assert_eq!(grid.to_string(), "CubicalGrid[sizes: (2, 3, 4)]");
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = CubicalGrid::new(vec![2, 3]);

        let encoded = bincode::serde::encode_to_vec(&grid, bincode::config::standard())
            .expect("grid should encode");
        let (decoded, _): (CubicalGrid, usize) =
            bincode::serde::decode_from_slice(&encoded, bincode::config::standard())
                .expect("grid should decode");

        assert_eq!(decoded, grid);
        assert_eq!(decoded.bucket_size(), grid.bucket_size());
    }

    #[test]
    #[should_panic(expected = "Cubical grid must have at least one axis")]
    fn test_empty_sizes_panic() {
        let _grid = CubicalGrid::new(vec![]);
    }

    #[test]
    #[should_panic(expected = "Each axis of a cubical grid must contain at least one box")]
    fn test_zero_size_panic() {
        let _grid = CubicalGrid::new(vec![2, 0]);
    }
}
