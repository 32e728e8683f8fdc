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

use super::RateLevel;
use crate::math::{Extent2D, Vec2};

/// Maps the screen onto the backend's shading-rate tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    screen: Extent2D,
    tile: Extent2D,
    grid: Extent2D,
}

impl TileGrid {
    /// Builds the grid covering `screen` with `tile`-sized cells
    /// (`ceil(screen / tile)` per axis). A zero tile dimension is treated as 1.
    pub fn new(screen: Extent2D, tile: Extent2D) -> Self {
        let tile = Extent2D::new(tile.width.max(1), tile.height.max(1));
        Self {
            screen,
            tile,
            grid: screen.div_ceil(tile),
        }
    }

    /// The screen resolution covered.
    #[inline]
    pub fn screen(&self) -> Extent2D {
        self.screen
    }

    /// The backend tile size in pixels.
    #[inline]
    pub fn tile_size(&self) -> Extent2D {
        self.tile
    }

    /// Number of tiles per axis.
    #[inline]
    pub fn extent(&self) -> Extent2D {
        self.grid
    }

    /// Normalized screen position of the centre of tile `(x, y)`.
    ///
    /// Row 0 is the bottom row, matching the bottom-left normalized origin.
    #[inline]
    pub fn tile_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.tile.width as f32 / self.screen.width.max(1) as f32,
            (y as f32 + 0.5) * self.tile.height as f32 / self.screen.height.max(1) as f32,
        )
    }

    /// The tile containing a normalized position, clamped to the grid.
    pub fn tile_at(&self, position: Vec2) -> (u32, u32) {
        let px = position.x * self.screen.width as f32 / self.tile.width as f32;
        let py = position.y * self.screen.height as f32 / self.tile.height as f32;
        let clamp = |v: f32, n: u32| (v.max(0.0) as u32).min(n.saturating_sub(1));
        (clamp(px, self.grid.width), clamp(py, self.grid.height))
    }
}

/// A 2D grid of rate levels, one per shading-rate tile, stored row-major.
///
/// Regenerated in full on every frame with a fresh prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoveationMask {
    extent: Extent2D,
    levels: Vec<RateLevel>,
}

impl FoveationMask {
    /// Creates a mask with every tile set to `level`.
    pub fn filled(extent: Extent2D, level: RateLevel) -> Self {
        Self {
            extent,
            levels: vec![level; extent.area()],
        }
    }

    /// Number of tiles per axis.
    #[inline]
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// Level of tile `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<RateLevel> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }
        self.levels.get(self.index(x, y)).copied()
    }

    /// Sets the level of tile `(x, y)`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, level: RateLevel) {
        if x < self.extent.width && y < self.extent.height {
            let idx = self.index(x, y);
            self.levels[idx] = level;
        }
    }

    /// All levels in row-major order.
    #[inline]
    pub fn levels(&self) -> &[RateLevel] {
        &self.levels
    }

    /// Number of tiles at `level`.
    pub fn count(&self, level: RateLevel) -> usize {
        self.levels.iter().filter(|&&l| l == level).count()
    }

    /// Writes the row-major palette indices into `out`, replacing its contents.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.levels.iter().map(|l| l.as_u8()));
    }

    /// Row-major palette indices, one byte per tile.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.levels.len());
        self.write_bytes(&mut out);
        out
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.extent.width as usize + x as usize
    }
}
