// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use fibration::Fibration;
pub use grid::CubicalGrid;
pub use traits::{ComplexLike, CubicalComplexLike};

mod fibration;
mod grid;
mod traits;
