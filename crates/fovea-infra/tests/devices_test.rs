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


use fovea_core::foveation::{ShadingRatePalette, MIN_PALETTE_SIZE};
use fovea_core::math::{Extent2D, Vec2};
use fovea_core::traits::{GazeTracker, RenderRequest, SceneId, ShadingRateBackend};
use fovea_core::{BackendError, TrackerError};
use fovea_infra::tracker::ScriptStep;
use fovea_infra::{CursorGazeTracker, HeadlessShadingRateBackend, ScriptedGazeTracker};

#[test]
fn test_headless_backend_full_frame_cycle() {
    // --- 1. ARRANGE ---
    let mut backend = HeadlessShadingRateBackend::new(Extent2D::new(16, 16)).with_palette_size(8);
    let palette = ShadingRatePalette::standard(backend.palette_size()).unwrap();
    backend.configure_palette(&palette).unwrap();
    let request = RenderRequest::new(SceneId(7), Extent2D::new(64, 32));

    // --- 2. ACT ---
    backend.upload_mask(&[1, 2, 3, 3, 1, 2, 3, 3], 4, 2).unwrap();
    backend.bind_mask_for_next_draw().unwrap();
    backend.render(&request).unwrap();
    backend.render(&request).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(backend.palette().map(|p| p.len()), Some(8));
    assert_eq!(backend.uploads().len(), 1);
    assert_eq!(backend.bind_count(), 1);
    let draws = backend.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].mask, Some(0), "first draw uses the bound mask");
    assert_eq!(draws[1].mask, None, "a bind applies to one draw only");
    assert_eq!(draws[0].request.scene, SceneId(7));
}

#[test]
fn test_headless_backend_rejects_bad_input() {
    let mut backend = HeadlessShadingRateBackend::new(Extent2D::new(8, 8));

    assert_eq!(
        backend.bind_mask_for_next_draw(),
        Err(BackendError::NothingToBind)
    );
    assert!(matches!(
        backend.upload_mask(&[1, 1, 1], 2, 2),
        Err(BackendError::InvalidMaskData {
            expected: 4,
            found: 3
        })
    ));

    let too_big = ShadingRatePalette::standard(MIN_PALETTE_SIZE + 4).unwrap();
    assert!(matches!(
        backend.configure_palette(&too_big),
        Err(BackendError::CapabilityMissing(_))
    ));

    backend.inject_error(BackendError::Device("lost".into()));
    assert_eq!(
        backend.drain_errors(),
        vec![BackendError::Device("lost".into())]
    );
    assert!(backend.drain_errors().is_empty());
}

#[test]
fn test_scripted_tracker_replays_then_goes_quiet() {
    let mut tracker = ScriptedGazeTracker::new([
        ScriptStep::Samples(vec![Vec2::new(0.1, 0.2), Vec2::new(0.3, 0.4)]),
        ScriptStep::Fail(TrackerError::Disconnected("cable".into())),
        ScriptStep::Samples(vec![]),
    ]);

    assert_eq!(tracker.remaining(), 3);
    assert_eq!(tracker.poll().unwrap().len(), 2);
    assert_eq!(tracker.poll(), Err(TrackerError::Disconnected("cable".into())));
    assert!(tracker.poll().unwrap().is_empty());
    assert_eq!(tracker.remaining(), 0);
    assert!(tracker.poll().unwrap().is_empty());
}

#[test]
fn test_saccade_script_lands_on_target() {
    let from = Vec2::new(0.2, 0.5);
    let to = Vec2::new(0.8, 0.5);
    let mut tracker = ScriptedGazeTracker::saccade(from, to, 3, 4);

    let mut positions = Vec::new();
    while tracker.remaining() > 0 {
        positions.extend(tracker.poll().unwrap());
    }

    assert!(positions.first().unwrap().distance(from) < 1e-6);
    assert!(positions.last().unwrap().distance(to) < 1e-6);
    assert!(positions.windows(2).all(|w| w[1].x >= w[0].x - 1e-6));
}

#[test]
fn test_cursor_tracker_reports_normalized_position() {
    let mut tracker = CursorGazeTracker::new(Extent2D::new(200, 100)).with_smoothing(1.0);
    assert!(tracker.poll().unwrap().is_empty());

    tracker.on_cursor_moved(50.0, 25.0);
    let samples = tracker.poll().unwrap();
    assert_eq!(samples.len(), 1);
    assert!((samples[0].x - 0.25).abs() < 1e-6);
    assert!((samples[0].y - 0.75).abs() < 1e-6, "y grows upwards");
    assert!(tracker.poll().unwrap().is_empty());
}

#[cfg(feature = "graphics")]
#[test]
#[ignore = "requires a GPU adapter"]
fn test_wgpu_backend_uploads_binds_and_draws() {
    use fovea_infra::WgpuShadingRateBackend;

    let mut backend = WgpuShadingRateBackend::new(Extent2D::new(16, 16)).unwrap();
    let palette = ShadingRatePalette::standard(backend.palette_size()).unwrap();
    backend.configure_palette(&palette).unwrap();
    assert_eq!(backend.palette()[1], 0x9565);

    assert_eq!(
        backend.bind_mask_for_next_draw(),
        Err(BackendError::NothingToBind)
    );
    backend.upload_mask(&[3; 12], 4, 3).unwrap();
    backend.bind_mask_for_next_draw().unwrap();
    backend
        .render(&RenderRequest::new(SceneId(1), Extent2D::new(64, 48)))
        .unwrap();
    assert!(backend.drain_errors().is_empty());
}
