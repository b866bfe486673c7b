// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

/// Trait for cell complexes addressed by unsigned integer cell identifiers.
///
/// This is the minimal surface a [`Fibration`](super::Fibration) needs from
/// the complex it assigns values over. Identifiers in `0..cell_count()` are
/// valid cells; implementations may treat out-of-range identifiers as a
/// precondition violation rather than reporting an error.
pub trait ComplexLike: Send + Sync {
    /// Returns the ambient dimension of the complex.
    fn dimension(&self) -> u32;

    /// Returns the number of cells in the complex, bounding the valid range
    /// of cell identifiers.
    fn cell_count(&self) -> u64;

    /// Capability check: if this complex is cubical, return it behind the
    /// [`CubicalComplexLike`] surface; otherwise return `None`.
    ///
    /// Consumers that require a cubical complex (such as
    /// [`CubicalMorseMatching`](crate::CubicalMorseMatching)) perform this
    /// check once at construction and fail fast, rather than inspecting the
    /// concrete type along their query paths.
    fn as_cubical(self: Arc<Self>) -> Option<Arc<dyn CubicalComplexLike>>;
}

/// Trait for cubical complexes whose cells are addressed as
/// `position + bucket_size * shape_bucket(shape)`.
///
/// The *shape mask* of a cell is a bitmask over the ambient axes: bit `d` is
/// set when the cell has one-dimensional extent along axis `d`, so the
/// population count of the mask is the cell's dimension. Cells sharing a
/// shape occupy one bucket of `bucket_size` positions, and the bucket table
/// maps each shape mask to its canonical bucket index. Toggling one bit of
/// the shape mask while holding the position fixed addresses the neighboring
/// cell of adjacent dimension, which is the mechanism the matching engine
/// uses to locate candidate mates.
pub trait CubicalComplexLike: ComplexLike {
    /// Returns the number of positions per shape bucket.
    fn bucket_size(&self) -> u64;

    /// Returns the shape mask of `cell`.
    fn cell_shape(&self, cell: u64) -> u64;

    /// Returns the bitmask of axes along which `cell` touches the lower edge
    /// of the ambient domain.
    fn lower_edge_axes(&self, cell: u64) -> u64;

    /// Returns the bitmask of axes along which `cell` cannot be extended:
    /// axes its shape already spans, and axes with no room left before the
    /// upper edge of the padded domain.
    fn blocked_axes(&self, cell: u64) -> u64;

    /// Returns `true` if `cell` lies in the padding layer added around the
    /// domain to simplify boundary handling.
    fn is_fringe(&self, cell: u64) -> bool;

    /// Returns the canonical bucket index of the shape mask `shape`.
    fn shape_bucket(&self, shape: u64) -> u64;
}
