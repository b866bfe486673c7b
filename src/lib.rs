// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `cubemorse` crate computes discrete Morse matchings over the cells of
//! bit-addressed cubical complexes. A matching pairs cells of adjacent
//! dimension so that downstream chain complex reductions can eliminate the
//! paired cells algebraically; the unpaired (critical) cells survive into the
//! reduced complex. Matchings may be restricted by a fibration, which assigns
//! each cell an integer value and only permits pairs within a value class.
//!
//! The crate deliberately stops at the matching itself: it performs no
//! boundary algebra and computes no homology. [`CubicalMorseMatching`] is a
//! pure query surface — given a cell identifier it answers "what is its mate"
//! and "what is its priority" — over read-only geometric and value providers.

#![warn(missing_docs)]

pub use crate::complexes::{ComplexLike, CubicalComplexLike, CubicalGrid, Fibration};
pub use crate::matching::{CubicalMorseMatching, MatchingError, MorseMatching};

mod complexes;
mod matching;
