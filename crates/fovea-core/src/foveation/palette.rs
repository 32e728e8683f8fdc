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
use crate::error::BackendError;

/// Smallest palette able to hold the "no invocation" slot plus the three rate levels.
pub const MIN_PALETTE_SIZE: usize = 4;

/// Invocation densities understood by shading-rate image hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingRate {
    /// The tile is not shaded at all.
    NoInvocations,
    /// One fragment invocation per pixel.
    OnePerPixel,
    /// One fragment invocation per 2x2 pixels.
    OnePer2x2,
    /// One fragment invocation per 4x4 pixels.
    OnePer4x4,
}

impl ShadingRate {
    /// The `GL_NV_shading_rate_image` enum value for this rate.
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShadingRate::NoInvocations => 0x9564,
            ShadingRate::OnePerPixel => 0x9565,
            ShadingRate::OnePer2x2 => 0x9568,
            ShadingRate::OnePer4x4 => 0x956B,
        }
    }
}

impl From<RateLevel> for ShadingRate {
    fn from(level: RateLevel) -> Self {
        match level {
            RateLevel::Full => ShadingRate::OnePerPixel,
            RateLevel::Half => ShadingRate::OnePer2x2,
            RateLevel::Quarter => ShadingRate::OnePer4x4,
        }
    }
}

/// Palette translating mask bytes into shading rates.
///
/// Index 0 disables shading, indices 1..=3 hold the rate levels, and any
/// further slot the hardware exposes falls back to per-pixel shading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadingRatePalette {
    entries: Vec<ShadingRate>,
}

impl ShadingRatePalette {
    /// Builds the standard palette for a backend exposing `size` slots.
    pub fn standard(size: usize) -> Result<Self, BackendError> {
        if size < MIN_PALETTE_SIZE {
            return Err(BackendError::CapabilityMissing(format!(
                "shading-rate palette has {size} entries, at least {MIN_PALETTE_SIZE} are required"
            )));
        }
        let mut entries = Vec::with_capacity(size);
        entries.push(ShadingRate::NoInvocations);
        entries.extend(RateLevel::ALL.iter().map(|&l| ShadingRate::from(l)));
        entries.resize(size, ShadingRate::OnePerPixel);
        Ok(Self { entries })
    }

    /// The rate stored at palette index `index`.
    pub fn get(&self, index: u8) -> Option<ShadingRate> {
        self.entries.get(index as usize).copied()
    }

    /// The rate a given level resolves to.
    pub fn rate_for(&self, level: RateLevel) -> ShadingRate {
        self.get(level.as_u8()).unwrap_or(ShadingRate::OnePerPixel)
    }

    /// Number of palette slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the palette is empty (never the case for a built palette).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries as `GL_NV_shading_rate_image` enum values.
    pub fn gl_enums(&self) -> Vec<u32> {
        self.entries.iter().map(|r| r.gl_enum()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_palette_layout() {
        let palette = ShadingRatePalette::standard(6).unwrap();
        assert_eq!(
            palette.gl_enums(),
            vec![0x9564, 0x9565, 0x9568, 0x956B, 0x9565, 0x9565]
        );
        assert_eq!(palette.rate_for(RateLevel::Half), ShadingRate::OnePer2x2);
    }

    #[test]
    fn test_small_palette_is_rejected() {
        assert!(matches!(
            ShadingRatePalette::standard(3),
            Err(BackendError::CapabilityMissing(_))
        ));
    }
}
