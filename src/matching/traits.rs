// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// The interface of a discrete Morse matching queried per cell.
///
/// A discrete Morse matching is a partial pairing between cells of adjacent
/// dimension used to eliminate the paired cells algebraically while
/// preserving homology; the cells left unpaired are *critical* and survive
/// into the reduced complex. Types implementing this trait expose the
/// matching implicitly, as a query surface rather than a stored structure.
///
/// The relation reported by [`MorseMatching::mate`] is directional: it is
/// intended to be read from the lower-dimensional side of each pair. A cell
/// claimed from below may itself report critical, so `mate(mate(x))` is not
/// guaranteed to return `x`. Consumers walking pairs should query upward from
/// the lower-dimensional cell.
pub trait MorseMatching {
    /// Return the mate of `cell`, or `cell` itself if it is critical.
    ///
    /// Total and deterministic over the valid identifier range of the
    /// underlying complex; out-of-range identifiers are a precondition
    /// violation.
    fn mate(&self, cell: u64) -> u64;

    /// Return the priority of `cell`, a stable key for ordering the cells of
    /// a shape bucket deterministically in downstream processing.
    fn priority(&self, cell: u64) -> u64;

    /// Provided method checking whether `cell` is left unpaired by the
    /// matching.
    fn is_critical(&self, cell: u64) -> bool {
        self.mate(cell) == cell
    }
}
