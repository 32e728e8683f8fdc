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

//! The unit conversion layer.
//!
//! Pure, stateless conversions between degrees of visual angle, millimetres on
//! the display surface, pixels, and normalized `[0, 1]` screen coordinates.
//!
//! The pixel pitch is always derived from the physical *diagonal* of the
//! display, and normalized radii are always expressed as a fraction of the
//! *shorter* screen dimension. Every radius used downstream (foveal, parafoveal,
//! sensor precision) is calibrated through [`angle_to_normalized_radius`], so
//! this chain must not be altered.

use super::{DEG_TO_RAD, MM_PER_INCH, RAD_TO_DEG};

/// Linear extent on the screen, in millimetres, of an angular offset seen from
/// `distance_mm`: `tan(deg) * distance_mm`.
///
/// # Examples
///
/// ```
/// use fovea_core::math::degrees_to_millimeters;
/// assert!((degrees_to_millimeters(45.0, 600.0) - 600.0).abs() < 1e-3);
/// ```
#[inline]
pub fn degrees_to_millimeters(deg: f32, distance_mm: f32) -> f32 {
    (deg * DEG_TO_RAD).tan() * distance_mm
}

/// Inverse of [`degrees_to_millimeters`]: `atan(mm / distance_mm)` in degrees.
#[inline]
pub fn millimeters_to_degrees(mm: f32, distance_mm: f32) -> f32 {
    (mm / distance_mm).atan() * RAD_TO_DEG
}

/// Converts a normalized coordinate along one axis into pixels.
#[inline]
pub fn pixels_from_normalized(norm: f32, screen_px: u32) -> f32 {
    norm * screen_px as f32
}

/// Converts a pixel coordinate along one axis into a normalized coordinate.
#[inline]
pub fn normalized_from_pixels(px: f32, screen_px: u32) -> f32 {
    px / screen_px as f32
}

/// Length of the screen diagonal in pixels.
#[inline]
pub fn diagonal_pixels(width_px: u32, height_px: u32) -> f32 {
    let (w, h) = (width_px as f32, height_px as f32);
    (w * w + h * h).sqrt()
}

/// Physical size of one pixel, in millimetres, derived from the diagonal.
#[inline]
pub fn millimeters_per_pixel(diagonal_inches: f32, width_px: u32, height_px: u32) -> f32 {
    (diagonal_inches * MM_PER_INCH) / diagonal_pixels(width_px, height_px)
}

/// Converts an angular radius into a fraction of the shorter screen dimension.
///
/// The chord subtended by `deg` at `distance_mm` (`2 * d * tan(deg / 2)`) is
/// turned into pixels with the diagonal-based pitch, divided by
/// `min(width_px, height_px)`, and halved.
///
/// Both pixel dimensions must be non-zero.
///
/// # Examples
///
/// ```
/// use fovea_core::math::angle_to_normalized_radius;
/// assert_eq!(angle_to_normalized_radius(0.0, 17.0, 600.0, 1920, 1080), 0.0);
/// let inner = angle_to_normalized_radius(6.5, 17.0, 600.0, 1920, 1080);
/// assert!((inner - 0.1609).abs() < 1e-3);
/// ```
pub fn angle_to_normalized_radius(
    deg: f32,
    diagonal_inches: f32,
    distance_mm: f32,
    width_px: u32,
    height_px: u32,
) -> f32 {
    let mm_per_px = millimeters_per_pixel(diagonal_inches, width_px, height_px);
    let chord_mm = 2.0 * distance_mm * (deg * DEG_TO_RAD / 2.0).tan();
    let chord_px = chord_mm / mm_per_px;
    let min_dim = width_px.min(height_px) as f32;
    chord_px / min_dim / 2.0
}
