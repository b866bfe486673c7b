// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value assignments over cell complexes.
//!
//! A fibration groups the cells of a complex into classes by assigning each
//! an integer value. Matching algorithms only propose pairs between cells of
//! equal value, so disjoint value classes can later be processed
//! independently of one another.

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::traits::ComplexLike;

/// An integer value assignment over the cells of a shared complex.
///
/// The assignment may be backed by a closure or by an explicit value table;
/// the trivial fibration maps every cell to value 0 and imposes no
/// restriction on matchings. A `Fibration` is immutable once constructed and
/// keeps a back-reference to its complex so that consumers can validate the
/// complex's capabilities at their own construction time.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use cubemorse::{CubicalGrid, Fibration};
///
/// let grid = Arc::new(CubicalGrid::new(vec![2]));
/// let fibration = Fibration::new(grid, |cell| (cell % 2) as i64);
///
/// assert_eq!(fibration.value(0), 0);
/// assert_eq!(fibration.value(3), 1);
/// ```
pub struct Fibration {
    complex: Arc<dyn ComplexLike>,
    values: Box<dyn Fn(u64) -> i64 + Send + Sync>,
}

impl Fibration {
    /// Create a fibration assigning each cell the value `value_fn(cell)`.
    pub fn new(
        complex: Arc<dyn ComplexLike>,
        value_fn: impl Fn(u64) -> i64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            complex,
            values: Box::new(value_fn),
        }
    }

    /// Create the trivial fibration, mapping every cell to value 0.
    pub fn trivial(complex: Arc<dyn ComplexLike>) -> Self {
        Self::new(complex, |_| 0)
    }

    /// Create a fibration from an explicit table of per-cell values.
    ///
    /// # Panics
    /// Panics if the table length does not match the cell count of the
    /// complex.
    pub fn from_values(complex: Arc<dyn ComplexLike>, values: Vec<i64>) -> Self {
        assert_eq!(
            values.len() as u64,
            complex.cell_count(),
            "Value table length must match the cell count of the complex"
        );
        Self {
            complex,
            values: Box::new(move |cell| values[cell as usize]),
        }
    }

    /// Get the value assigned to `cell`.
    #[must_use]
    pub fn value(&self, cell: u64) -> i64 {
        (self.values)(cell)
    }

    /// Get a reference to the underlying complex.
    #[must_use]
    pub fn complex(&self) -> &Arc<dyn ComplexLike> {
        &self.complex
    }
}

impl Debug for Fibration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fibration[dimension: {}, cells: {}]",
            self.complex.dimension(),
            self.complex.cell_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CubicalGrid;

    #[test]
    fn test_trivial_fibration() {
        let grid = Arc::new(CubicalGrid::new(vec![2, 2]));
        let fibration = Fibration::trivial(grid.clone());

        for cell in 0..grid.cell_count() {
            assert_eq!(fibration.value(cell), 0);
        }
        assert_eq!(fibration.complex().cell_count(), 36);
    }

    #[test]
    fn test_closure_backed_fibration() {
        let grid = Arc::new(CubicalGrid::new(vec![2]));
        let fibration = Fibration::new(grid, |cell| (cell / 3) as i64);

        assert_eq!(fibration.value(0), 0);
        assert_eq!(fibration.value(2), 0);
        assert_eq!(fibration.value(3), 1);
        assert_eq!(fibration.value(5), 1);
    }

    #[test]
    fn test_table_backed_fibration() {
        let grid = Arc::new(CubicalGrid::new(vec![2]));
        let fibration = Fibration::from_values(grid, vec![0, 0, 1, 1, 2, 2]);

        assert_eq!(fibration.value(0), 0);
        assert_eq!(fibration.value(3), 1);
        assert_eq!(fibration.value(5), 2);
    }

    #[test]
    #[should_panic(expected = "Value table length must match the cell count of the complex")]
    fn test_table_length_mismatch_panic() {
        let grid = Arc::new(CubicalGrid::new(vec![2]));
        let _fibration = Fibration::from_values(grid, vec![0, 1, 2]);
    }

    #[test]
    fn test_debug_format() {
        let grid = Arc::new(CubicalGrid::new(vec![2, 2]));
        let fibration = Fibration::trivial(grid);
        assert_eq!(format!("{fibration:?}"), "Fibration[dimension: 2, cells: 36]");
    }
}
