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

use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use fovea_core::BackendError;

/// Device and queue created without a surface.
#[derive(Debug)]
pub struct WgpuHeadlessContext {
    pub(super) device: wgpu::Device,
    pub(super) queue: wgpu::Queue,
    /// Name of the selected adapter.
    pub adapter_name: String,
    /// Graphics API backing the adapter.
    pub adapter_backend: wgpu::Backend,
}

impl WgpuHeadlessContext {
    /// Selects an adapter and creates the logical device.
    ///
    /// Uncaptured device errors are forwarded to `errors` instead of panicking.
    pub async fn new(errors: Sender<BackendError>) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find a suitable adapter: {}", e))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Fovea Shading-Rate Device"),
                required_features: wgpu::Features::empty(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {}", e))?;

        device.on_uncaptured_error(std::sync::Arc::new(move |e: wgpu::Error| {
            // The receiver lives as long as the backend; a closed channel only
            // means the backend is being dropped.
            let _ = errors.send(BackendError::Device(e.to_string()));
        }));

        Ok(Self {
            device,
            queue,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
        })
    }

    /// Processes completed GPU work without blocking.
    pub fn poll(&self) {
        if let Err(e) = self.device.poll(wgpu::PollType::Poll) {
            log::warn!("Failed to poll device (non-blocking): {:?}", e);
        }
    }
}
