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

//! Integer extents used for screen, tile, and grid sizes.

/// A two-dimensional extent, typically representing width and height in pixels or tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the number of cells covered by this extent.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of `tile`-sized cells needed to cover `self`, rounding up on each axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use fovea_core::math::Extent2D;
    /// let grid = Extent2D::new(1920, 1080).div_ceil(Extent2D::new(16, 16));
    /// assert_eq!(grid, Extent2D::new(120, 68));
    /// ```
    pub fn div_ceil(&self, tile: Extent2D) -> Extent2D {
        Extent2D {
            width: self.width.div_ceil(tile.width.max(1)),
            height: self.height.div_ceil(tile.height.max(1)),
        }
    }
}

impl From<(u32, u32)> for Extent2D {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}
