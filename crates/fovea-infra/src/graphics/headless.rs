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

//! In-memory backend that records every call.

use fovea_core::foveation::{ShadingRatePalette, MIN_PALETTE_SIZE};
use fovea_core::math::Extent2D;
use fovea_core::traits::{RenderRequest, ShadingRateBackend};
use fovea_core::BackendError;

/// A mask as received by [`HeadlessShadingRateBackend::upload_mask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMask {
    /// Tiles per row.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Row-major palette indices.
    pub bytes: Vec<u8>,
}

/// One recorded draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    /// The draw parameters.
    pub request: RenderRequest,
    /// Index into [`HeadlessShadingRateBackend::uploads`] of the mask bound
    /// for this draw, if any.
    pub mask: Option<usize>,
}

/// Shading-rate backend with no device, for tests and dry runs.
#[derive(Debug, Clone)]
pub struct HeadlessShadingRateBackend {
    tile_size: Extent2D,
    palette_size: usize,
    palette: Option<ShadingRatePalette>,
    uploads: Vec<UploadedMask>,
    bound: Option<usize>,
    bind_count: usize,
    draws: Vec<DrawRecord>,
    pending_errors: Vec<BackendError>,
    fail_uploads: bool,
    history_limit: Option<usize>,
}

impl HeadlessShadingRateBackend {
    /// Creates a backend with `tile_size` tiles and a minimal palette.
    pub fn new(tile_size: Extent2D) -> Self {
        Self {
            tile_size,
            palette_size: MIN_PALETTE_SIZE,
            palette: None,
            uploads: Vec::new(),
            bound: None,
            bind_count: 0,
            draws: Vec::new(),
            pending_errors: Vec::new(),
            fail_uploads: false,
            history_limit: None,
        }
    }

    /// Reports `palette_size` palette slots.
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    /// Keeps only the most recent `count` uploads and draws, for long runs.
    pub fn with_history_limit(mut self, count: usize) -> Self {
        self.history_limit = Some(count.max(1));
        self
    }

    /// Makes every following upload fail with a device error.
    pub fn set_fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    /// Queues an error to be returned by the next drain.
    pub fn inject_error(&mut self, error: BackendError) {
        self.pending_errors.push(error);
    }

    /// The installed palette.
    pub fn palette(&self) -> Option<&ShadingRatePalette> {
        self.palette.as_ref()
    }

    /// Every retained upload, oldest first.
    pub fn uploads(&self) -> &[UploadedMask] {
        &self.uploads
    }

    /// The most recent upload.
    pub fn last_upload(&self) -> Option<&UploadedMask> {
        self.uploads.last()
    }

    /// Number of successful binds.
    pub fn bind_count(&self) -> usize {
        self.bind_count
    }

    /// Every retained draw, oldest first.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }
}

impl ShadingRateBackend for HeadlessShadingRateBackend {
    fn backend_name(&self) -> &str {
        "headless"
    }

    fn query_tile_size(&self) -> Extent2D {
        self.tile_size
    }

    fn palette_size(&self) -> usize {
        self.palette_size
    }

    fn configure_palette(&mut self, palette: &ShadingRatePalette) -> Result<(), BackendError> {
        if palette.len() > self.palette_size {
            return Err(BackendError::CapabilityMissing(format!(
                "palette of {} entries exceeds the {} available slots",
                palette.len(),
                self.palette_size
            )));
        }
        self.palette = Some(palette.clone());
        Ok(())
    }

    fn upload_mask(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<(), BackendError> {
        if self.fail_uploads {
            return Err(BackendError::Device("simulated upload failure".into()));
        }
        let expected = width as usize * height as usize;
        if bytes.len() != expected {
            return Err(BackendError::InvalidMaskData {
                expected,
                found: bytes.len(),
            });
        }
        if let Some(max) = self.history_limit {
            if self.uploads.len() >= max {
                self.uploads.remove(0);
                self.bound = self.bound.and_then(|i| i.checked_sub(1));
                for draw in &mut self.draws {
                    draw.mask = draw.mask.and_then(|i| i.checked_sub(1));
                }
            }
        }
        self.uploads.push(UploadedMask {
            width,
            height,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn bind_mask_for_next_draw(&mut self) -> Result<(), BackendError> {
        if self.uploads.is_empty() {
            return Err(BackendError::NothingToBind);
        }
        self.bound = Some(self.uploads.len() - 1);
        self.bind_count += 1;
        Ok(())
    }

    fn render(&mut self, request: &RenderRequest) -> Result<(), BackendError> {
        if request.resolution.is_empty() {
            return Err(BackendError::Device(format!(
                "cannot render at {}x{}",
                request.resolution.width, request.resolution.height
            )));
        }
        if let Some(max) = self.history_limit {
            if self.draws.len() >= max {
                self.draws.remove(0);
            }
        }
        self.draws.push(DrawRecord {
            request: request.clone(),
            mask: self.bound.take(),
        });
        Ok(())
    }

    fn drain_errors(&mut self) -> Vec<BackendError> {
        std::mem::take(&mut self.pending_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fovea_core::traits::SceneId;

    #[test]
    fn test_bind_applies_to_one_draw() {
        let mut backend = HeadlessShadingRateBackend::new(Extent2D::new(16, 16));
        assert_eq!(
            backend.bind_mask_for_next_draw(),
            Err(BackendError::NothingToBind)
        );

        backend.upload_mask(&[1, 2, 3, 3], 2, 2).unwrap();
        backend.bind_mask_for_next_draw().unwrap();
        let request = RenderRequest::new(SceneId(7), Extent2D::new(64, 64));
        backend.render(&request).unwrap();
        backend.render(&request).unwrap();

        assert_eq!(backend.draws()[0].mask, Some(0));
        assert_eq!(backend.draws()[1].mask, None);
        assert_eq!(backend.bind_count(), 1);
    }

    #[test]
    fn test_rejects_inconsistent_mask() {
        let mut backend = HeadlessShadingRateBackend::new(Extent2D::new(16, 16));
        assert_eq!(
            backend.upload_mask(&[1, 2, 3], 2, 2),
            Err(BackendError::InvalidMaskData {
                expected: 4,
                found: 3
            })
        );
        backend.set_fail_uploads(true);
        assert!(matches!(
            backend.upload_mask(&[1], 1, 1),
            Err(BackendError::Device(_))
        ));
        assert!(backend.uploads().is_empty());
    }

    #[test]
    fn test_palette_and_error_queue() {
        let mut backend = HeadlessShadingRateBackend::new(Extent2D::new(8, 8)).with_palette_size(4);
        let large = ShadingRatePalette::standard(6).unwrap();
        assert!(backend.configure_palette(&large).is_err());
        let palette = ShadingRatePalette::standard(4).unwrap();
        backend.configure_palette(&palette).unwrap();
        assert_eq!(backend.palette(), Some(&palette));

        backend.inject_error(BackendError::Device("late".into()));
        assert_eq!(backend.drain_errors().len(), 1);
        assert!(backend.drain_errors().is_empty());
    }

    #[test]
    fn test_upload_history_is_bounded() {
        let mut backend =
            HeadlessShadingRateBackend::new(Extent2D::new(16, 16)).with_history_limit(2);
        for level in 1..=3u8 {
            backend.upload_mask(&[level], 1, 1).unwrap();
        }
        assert_eq!(backend.uploads().len(), 2);
        assert_eq!(backend.last_upload().map(|m| m.bytes[0]), Some(3));
    }

    #[test]
    fn test_draw_history_is_bounded() {
        // ARRANGE
        let mut backend =
            HeadlessShadingRateBackend::new(Extent2D::new(16, 16)).with_history_limit(3);
        let request = RenderRequest::new(SceneId(1), Extent2D::new(32, 32));

        // ACT
        for frame in 0..1_000u16 {
            backend.upload_mask(&[(frame % 4) as u8], 1, 1).unwrap();
            backend.bind_mask_for_next_draw().unwrap();
            backend.render(&request).unwrap();
        }

        // ASSERT
        assert_eq!(backend.uploads().len(), 3);
        assert_eq!(backend.draws().len(), 3);
        assert_eq!(backend.bind_count(), 1_000);
        let indices: Vec<_> = backend.draws().iter().map(|d| d.mask).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(backend.last_upload().map(|m| m.bytes[0]), Some(3));
    }
}
