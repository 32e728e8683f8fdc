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

//! Shading-rate backend backed by a headless wgpu device.
//!
//! wgpu exposes no variable-rate shading image, so the mask lives in an
//! `R8Uint` texture whose view is handed to the next draw, and the tile size
//! is configured rather than queried from hardware.

use super::context::WgpuHeadlessContext;
use anyhow::Result;
use crossbeam_channel::Receiver;
use fovea_core::foveation::ShadingRatePalette;
use fovea_core::math::Extent2D;
use fovea_core::traits::{RenderRequest, ShadingRateBackend};
use fovea_core::BackendError;

/// Tile size used when none is configured.
pub const DEFAULT_TILE_SIZE: Extent2D = Extent2D::new(16, 16);

/// Palette slots reported by the wgpu backend.
pub const WGPU_PALETTE_SIZE: usize = 16;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

struct SizedTexture {
    texture: wgpu::Texture,
    extent: Extent2D,
}

/// Applies foveation masks through wgpu.
pub struct WgpuShadingRateBackend {
    context: WgpuHeadlessContext,
    tile_size: Extent2D,
    palette: Vec<u32>,
    mask: Option<SizedTexture>,
    bound_view: Option<wgpu::TextureView>,
    target: Option<SizedTexture>,
    errors: Receiver<BackendError>,
    frame_count: u64,
}

impl WgpuShadingRateBackend {
    /// Creates the device, blocking on adapter and device requests.
    pub fn new(tile_size: Extent2D) -> Result<Self> {
        pollster::block_on(Self::new_async(tile_size))
    }

    /// Async variant of [`Self::new`].
    pub async fn new_async(tile_size: Extent2D) -> Result<Self> {
        let (sender, errors) = crossbeam_channel::unbounded();
        let context = WgpuHeadlessContext::new(sender).await?;
        Ok(Self {
            context,
            tile_size: Extent2D::new(tile_size.width.max(1), tile_size.height.max(1)),
            palette: Vec::new(),
            mask: None,
            bound_view: None,
            target: None,
            errors,
            frame_count: 0,
        })
    }

    /// The adapter in use.
    pub fn adapter_name(&self) -> &str {
        &self.context.adapter_name
    }

    /// Palette installed by [`ShadingRateBackend::configure_palette`], as GL enums.
    pub fn palette(&self) -> &[u32] {
        &self.palette
    }

    fn create_texture(
        &self,
        label: &str,
        extent: Extent2D,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> SizedTexture {
        let texture = self.context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });
        SizedTexture { texture, extent }
    }
}

impl ShadingRateBackend for WgpuShadingRateBackend {
    fn backend_name(&self) -> &str {
        "wgpu"
    }

    fn query_tile_size(&self) -> Extent2D {
        self.tile_size
    }

    fn palette_size(&self) -> usize {
        WGPU_PALETTE_SIZE
    }

    fn configure_palette(&mut self, palette: &ShadingRatePalette) -> Result<(), BackendError> {
        if palette.len() > WGPU_PALETTE_SIZE {
            return Err(BackendError::CapabilityMissing(format!(
                "palette of {} entries exceeds {WGPU_PALETTE_SIZE} slots",
                palette.len()
            )));
        }
        self.palette = palette.gl_enums();
        Ok(())
    }

    fn upload_mask(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<(), BackendError> {
        let extent = Extent2D::new(width, height);
        if extent.is_empty() {
            return Err(BackendError::InvalidMaskData {
                expected: 1,
                found: 0,
            });
        }
        if bytes.len() != extent.area() {
            return Err(BackendError::InvalidMaskData {
                expected: extent.area(),
                found: bytes.len(),
            });
        }

        if self.mask.as_ref().map(|m| m.extent) != Some(extent) {
            log::debug!("Allocating {width}x{height} shading-rate mask texture");
            self.mask = Some(self.create_texture(
                "Foveation Mask",
                extent,
                wgpu::TextureFormat::R8Uint,
                wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            ));
        }
        let Some(mask) = self.mask.as_ref() else {
            return Err(BackendError::Device("mask texture unavailable".into()));
        };

        self.context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &mask.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    fn bind_mask_for_next_draw(&mut self) -> Result<(), BackendError> {
        let mask = self.mask.as_ref().ok_or(BackendError::NothingToBind)?;
        self.bound_view = Some(mask.texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Foveation Mask View"),
            ..Default::default()
        }));
        Ok(())
    }

    fn render(&mut self, request: &RenderRequest) -> Result<(), BackendError> {
        if request.resolution.is_empty() {
            return Err(BackendError::Device(format!(
                "cannot render at {}x{}",
                request.resolution.width, request.resolution.height
            )));
        }
        if self.target.as_ref().map(|t| t.extent) != Some(request.resolution) {
            self.target = Some(self.create_texture(
                "Foveated Target",
                request.resolution,
                TARGET_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            ));
        }
        let Some(target) = self.target.as_ref() else {
            return Err(BackendError::Device("render target unavailable".into()));
        };
        let target_view = target
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Foveated Frame Encoder"),
            });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Foveated Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.01,
                            g: 0.02,
                            b: 0.03,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        self.context.queue.submit(std::iter::once(encoder.finish()));
        self.context.poll();

        let mask = self.bound_view.take();
        log::trace!(
            "Frame {}: scene {:?} -> {:?} at {}x{}, mask bound: {}",
            self.frame_count,
            request.scene,
            request.target,
            request.resolution.width,
            request.resolution.height,
            mask.is_some()
        );
        self.frame_count += 1;
        Ok(())
    }

    fn drain_errors(&mut self) -> Vec<BackendError> {
        self.errors.try_iter().collect()
    }
}
