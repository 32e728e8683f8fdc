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

use std::fmt;

/// Discrete invocation density for one shading-rate tile.
///
/// The numeric values are the palette indices uploaded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RateLevel {
    /// One invocation per pixel.
    Full = 1,
    /// One invocation per 2x2 pixel block.
    Half = 2,
    /// One invocation per 4x4 pixel block.
    Quarter = 3,
}

impl RateLevel {
    /// All levels, highest density first.
    pub const ALL: [RateLevel; 3] = [RateLevel::Full, RateLevel::Half, RateLevel::Quarter];

    /// The palette index written into the mask.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Edge length, in pixels, of the block sharing one invocation.
    pub const fn block_size(self) -> u32 {
        match self {
            RateLevel::Full => 1,
            RateLevel::Half => 2,
            RateLevel::Quarter => 4,
        }
    }
}

impl TryFrom<u8> for RateLevel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RateLevel::Full),
            2 => Ok(RateLevel::Half),
            3 => Ok(RateLevel::Quarter),
            other => Err(other),
        }
    }
}

impl fmt::Display for RateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLevel::Full => write!(f, "Full"),
            RateLevel::Half => write!(f, "Half"),
            RateLevel::Quarter => write!(f, "Quarter"),
        }
    }
}
