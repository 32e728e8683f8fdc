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

use crate::error::BackendError;
use crate::foveation::ShadingRatePalette;
use crate::math::Extent2D;

/// Opaque identifier of the scene the host application draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SceneId(pub u64);

/// Where a foveated draw lands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// The backend's primary output.
    #[default]
    Primary,
    /// A named offscreen target.
    Offscreen(String),
}

/// Parameters of one foveated draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// The scene to draw.
    pub scene: SceneId,
    /// The target to draw into.
    pub target: RenderTarget,
    /// Output resolution in pixels.
    pub resolution: Extent2D,
}

impl RenderRequest {
    /// A request drawing `scene` into the primary target.
    pub fn new(scene: SceneId, resolution: Extent2D) -> Self {
        Self {
            scene,
            target: RenderTarget::Primary,
            resolution,
        }
    }
}

/// A graphics backend able to apply a per-tile shading-rate image.
///
/// Each frame the pipeline calls [`upload_mask`](Self::upload_mask) then
/// [`bind_mask_for_next_draw`](Self::bind_mask_for_next_draw), in that order,
/// before the host calls [`render`](Self::render).
pub trait ShadingRateBackend: Send {
    /// Backend name, for logs.
    fn backend_name(&self) -> &str;

    /// Size in pixels of one shading-rate tile. Not chosen by the pipeline.
    fn query_tile_size(&self) -> Extent2D;

    /// Number of palette slots the backend exposes.
    fn palette_size(&self) -> usize;

    /// Installs the palette used to interpret mask bytes.
    fn configure_palette(&mut self, palette: &ShadingRatePalette) -> Result<(), BackendError>;

    /// Uploads a row-major mask of `width * height` palette indices.
    fn upload_mask(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<(), BackendError>;

    /// Makes the last uploaded mask apply to the next draw call.
    fn bind_mask_for_next_draw(&mut self) -> Result<(), BackendError>;

    /// Issues the foveated draw.
    fn render(&mut self, request: &RenderRequest) -> Result<(), BackendError>;

    /// Takes every error the backend reported since the last drain.
    fn drain_errors(&mut self) -> Vec<BackendError>;
}
