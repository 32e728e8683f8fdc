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

//! Serializes the mask and hands it to the shading-rate backend.

use fovea_core::lane::{Lane, LaneError, LaneKind};
use fovea_core::traits::ShadingRateBackend;
use fovea_core::FoveationMask;

/// Uploads a mask then binds it for the next draw.
#[derive(Debug, Default)]
pub struct MaskUploadLane {
    scratch: Vec<u8>,
}

impl MaskUploadLane {
    /// Creates a new `MaskUploadLane`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `mask` row-major, uploads it, then binds it.
    ///
    /// Bind is not attempted if the upload fails.
    pub fn run(
        &mut self,
        backend: &mut dyn ShadingRateBackend,
        mask: &FoveationMask,
    ) -> Result<(), LaneError> {
        mask.write_bytes(&mut self.scratch);
        let extent = mask.extent();
        backend.upload_mask(&self.scratch, extent.width, extent.height)?;
        backend.bind_mask_for_next_draw()?;
        Ok(())
    }
}

impl Lane for MaskUploadLane {
    fn strategy_name(&self) -> &'static str {
        "UploadThenBind"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Upload
    }
}
