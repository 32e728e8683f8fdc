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


//! Replays a scripted saccade through a [`FoveatedSession`] and logs what the
//! pipeline did with each frame.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fovea_sdk::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Record masks and draws in memory.
    Headless,
    /// Upload masks to a wgpu device.
    Wgpu,
}

/// Foveated rendering sandbox
#[derive(Parser, Debug)]
#[command(name = "sandbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Foveation config (RON). Defaults to the bundled reference setup.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value = "90")]
    frames: usize,

    /// Shading-rate backend
    #[arg(short, long, value_enum, default_value = "headless")]
    backend: BackendKind,

    /// Shading-rate tile edge, in pixels
    #[arg(short, long, default_value = "16")]
    tile: u32,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,

    /// Write the final pipeline metrics to this file as JSON
    #[arg(long)]
    metrics_json: Option<PathBuf>,
}

/// Uploads and draws kept by the headless backend.
const HEADLESS_HISTORY: usize = 8;

fn main() -> Result<()> {
    let cli = Cli::parse();
    fovea_telemetry::logging::init_logging(&cli.log);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/foveation.ron"));
    let config = load_config(&config_path)
        .with_context(|| format!("Cannot load '{}'", config_path.display()))?;

    let tile = Extent2D::new(cli.tile.max(1), cli.tile.max(1));
    match cli.backend {
        BackendKind::Headless => run(
            config,
            HeadlessShadingRateBackend::new(tile).with_history_limit(HEADLESS_HISTORY),
            &cli,
        ),
        BackendKind::Wgpu => run(config, WgpuShadingRateBackend::new(tile)?, &cli),
    }
}

/// A fixation on the left, a saccade to the right, a fixation there.
fn saccade_tracker(frames: usize) -> ScriptedGazeTracker {
    let fixation = (frames / 2).max(10);
    ScriptedGazeTracker::saccade(Vec2::new(0.25, 0.45), Vec2::new(0.75, 0.6), fixation, 6)
}

fn run<B: ShadingRateBackend>(config: FoveationConfig, backend: B, cli: &Cli) -> Result<()> {
    let frames = cli.frames;
    let mut session = FoveatedSession::new(
        config,
        Box::new(saccade_tracker(frames)),
        &NativeInferenceRuntime::new(),
        backend,
    )?;

    let reports = session.run(frames);

    let count = |phase: FramePhase| reports.iter().filter(|r| r.phase == phase).count();
    log::info!(
        "{} frames: {} warm-up, {} predicted, {} stale, {} without mask",
        reports.len(),
        count(FramePhase::Warmup),
        count(FramePhase::Predicted),
        count(FramePhase::Stale),
        reports.iter().filter(|r| !r.mask_bound).count()
    );

    if let Some(peak) = reports
        .iter()
        .max_by(|a, b| a.uncertainty.total_error.total_cmp(&b.uncertainty.total_error))
    {
        log::info!(
            "Peak uncertainty {:.3} at frame {} ({} full-rate tiles)",
            peak.uncertainty.total_error,
            peak.frame_index,
            peak.tiles_at(RateLevel::Full)
        );
    }
    if let Some(last) = reports.last() {
        let total: usize = last.level_counts.iter().sum();
        log::info!(
            "Final focus ({:.3}, {:.3}); tiles full/half/quarter {}/{}/{} of {total}",
            last.focus.x,
            last.focus.y,
            last.level_counts[0],
            last.level_counts[1],
            last.level_counts[2]
        );
    }

    if let Some(path) = &cli.metrics_json {
        std::fs::write(path, session.metrics_json()?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        log::info!("Metrics written to {}", path.display());
    }
    Ok(())
}
