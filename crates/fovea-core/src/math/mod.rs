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

//! Provides the mathematics primitives used by the foveation pipeline.
//!
//! Angles cross the public API in degrees. Every degree/radian conversion goes
//! through [`DEG_TO_RAD`] and [`RAD_TO_DEG`].

// --- Fundamental Constants ---

pub use std::f32::consts::PI;

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

/// Millimetres per inch, used to turn a display diagonal into physical size.
pub const MM_PER_INCH: f32 = 25.4;

// --- Declare Sub-Modules ---

pub mod dimension;
pub mod units;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::dimension::Extent2D;
pub use self::units::*;
pub use self::vector::Vec2;
