// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::{ComplexLike, CubicalComplexLike, Fibration, MorseMatching};

/// Error type for matching engine construction failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchingError {
    /// The supplied argument cannot back a cubical Morse matching.
    InvalidArgument(String),
}

impl Display for MatchingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
        }
    }
}

impl Error for MatchingError {}

/// A discrete Morse matching over a cubical complex, restricted to the value
/// classes of a fibration and computed cell by cell on demand.
///
/// The engine is stateless: it holds shared, read-only references to its
/// geometric and value providers, caches only the ambient dimension and
/// bucket size, and may be queried concurrently from any number of threads
/// without coordination.
///
/// For each cell, axes are scanned in increasing order (lower axis indices
/// win ties) and the first axis whose one-dimension-higher neighbor shares
/// the cell's value class and is itself unclaimed among strictly
/// lower-indexed axes yields the mate. The self-consistency check is what
/// keeps the matching acyclic on the Hasse diagram of the complex: a cell
/// only accepts a claim from a lower-priority direction when it has no
/// available claim of its own among higher-priority ones. Cells spanning
/// every ambient axis have no direction left to propose along and are always
/// critical.
///
/// See [`MorseMatching`] for the directional contract of `mate`; this
/// matching is intended to be queried from the lower-dimensional side of
/// each pair.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use cubemorse::{CubicalGrid, CubicalMorseMatching, MorseMatching};
///
/// let grid = Arc::new(CubicalGrid::new(vec![2]));
/// let matching = CubicalMorseMatching::new(grid);
///
/// // The vertex at coordinate 0 pairs with the edge extending from it.
/// assert_eq!(matching.mate(0), 3);
/// // Edges already span the only axis, so every edge is critical.
/// assert!(matching.is_critical(3));
/// ```
pub struct CubicalMorseMatching {
    complex: Arc<dyn CubicalComplexLike>,
    fibration: Arc<Fibration>,
    dimension: u32,
    bucket_size: u64,
}

impl CubicalMorseMatching {
    /// Create a matching over `complex` with the trivial fibration, leaving
    /// the matching unrestricted by value classes.
    #[must_use]
    pub fn new(complex: Arc<dyn CubicalComplexLike>) -> Self {
        let base: Arc<dyn ComplexLike> = complex.clone();
        let fibration = Arc::new(Fibration::trivial(base));
        Self::with_providers(complex, fibration)
    }

    /// Create a matching restricted to the value classes of `fibration`,
    /// over the fibration's own underlying complex.
    ///
    /// # Errors
    /// Returns [`MatchingError::InvalidArgument`] if the fibration's
    /// underlying complex is not cubical.
    pub fn from_fibration(fibration: Arc<Fibration>) -> Result<Self, MatchingError> {
        let Some(complex) = fibration.complex().clone().as_cubical() else {
            warn!("rejected fibration whose underlying complex is not cubical");
            return Err(MatchingError::InvalidArgument(
                "CubicalMorseMatching must be constructed over a cubical complex".to_string(),
            ));
        };
        Ok(Self::with_providers(complex, fibration))
    }

    fn with_providers(complex: Arc<dyn CubicalComplexLike>, fibration: Arc<Fibration>) -> Self {
        let dimension = complex.dimension();
        let bucket_size = complex.bucket_size();
        trace!(dimension, bucket_size, "constructed cubical Morse matching");
        Self {
            complex,
            fibration,
            dimension,
            bucket_size,
        }
    }

    /// Find the mate of `cell` among axes with index strictly less than
    /// `bound`. The bound decreases through each recursive availability
    /// check, so the recursion depth never exceeds the ambient dimension.
    fn resolve(&self, cell: u64, bound: u32) -> u64 {
        let fringe = self.complex.is_fringe(cell);
        let lower_edges = self.complex.lower_edge_axes(cell);
        let blocked = self.complex.blocked_axes(cell);
        let shape = self.complex.cell_shape(cell);
        let position = cell % self.bucket_size;

        let mut bit = 1u64;
        for axis in 0..bound {
            // Pairing a fringe cell toward the lower domain edge would tie
            // the padding layer to the acyclic interior.
            if !(fringe && lower_edges & bit != 0) && blocked & bit == 0 {
                let candidate =
                    position + self.bucket_size * self.complex.shape_bucket(shape ^ bit);
                // The candidate is available only if it finds no mate of its
                // own among axes of strictly higher priority.
                if self.fibration.value(candidate) == self.fibration.value(cell)
                    && self.resolve(candidate, axis) == candidate
                {
                    return candidate;
                }
            }
            bit <<= 1;
        }
        cell
    }
}

impl MorseMatching for CubicalMorseMatching {
    fn mate(&self, cell: u64) -> u64 {
        self.resolve(cell, self.dimension)
    }

    fn priority(&self, cell: u64) -> u64 {
        cell % self.bucket_size
    }
}
