// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Foveation data model: rate levels, the per-tile mask, the tile grid, the
//! backend shading-rate palette, and the radii derived at startup.

mod constants;
mod level;
mod mask;
mod palette;

pub use self::constants::FoveationConstants;
pub use self::level::RateLevel;
pub use self::mask::{FoveationMask, TileGrid};
pub use self::palette::{ShadingRate, ShadingRatePalette, MIN_PALETTE_SIZE};
