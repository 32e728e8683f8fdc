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

//! Physical display configuration and the conversions that depend on it.

use crate::error::ConfigError;
use crate::gaze::GazeSample;
use crate::math::{self, Extent2D, Vec2, MM_PER_INCH};
use serde::{Deserialize, Serialize};

/// Physical and logical display configuration.
///
/// Immutable for the lifetime of a session once validated. All pixel pitches
/// are derived from the diagonal, see [`math::units`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayGeometry {
    /// Horizontal resolution in pixels.
    pub width_px: u32,
    /// Vertical resolution in pixels.
    pub height_px: u32,
    /// Physical diagonal in inches.
    pub diagonal_inches: f32,
    /// Viewing distance from the eye to the screen, in millimetres.
    pub distance_mm: f32,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width_px: 1920,
            height_px: 1080,
            diagonal_inches: 17.0,
            distance_mm: 600.0,
        }
    }
}

impl DisplayGeometry {
    /// Creates a validated display geometry.
    pub fn new(
        width_px: u32,
        height_px: u32,
        diagonal_inches: f32,
        distance_mm: f32,
    ) -> Result<Self, ConfigError> {
        let geometry = Self {
            width_px,
            height_px,
            diagonal_inches,
            distance_mm,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks that every field is usable by the conversion layer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(ConfigError::InvalidDisplay {
                field: if self.width_px == 0 { "width_px" } else { "height_px" },
                reason: "resolution must be non-zero".into(),
            });
        }
        if !(self.diagonal_inches.is_finite() && self.diagonal_inches > 0.0) {
            return Err(ConfigError::InvalidDisplay {
                field: "diagonal_inches",
                reason: format!("expected a positive size, got {}", self.diagonal_inches),
            });
        }
        if !(self.distance_mm.is_finite() && self.distance_mm > 0.0) {
            return Err(ConfigError::InvalidDisplay {
                field: "distance_mm",
                reason: format!("expected a positive distance, got {}", self.distance_mm),
            });
        }
        Ok(())
    }

    /// The display resolution.
    #[inline]
    pub fn resolution(&self) -> Extent2D {
        Extent2D::new(self.width_px, self.height_px)
    }

    /// Length of the diagonal in pixels.
    #[inline]
    pub fn diagonal_px(&self) -> f32 {
        math::diagonal_pixels(self.width_px, self.height_px)
    }

    /// Physical size of one pixel in millimetres.
    #[inline]
    pub fn mm_per_pixel(&self) -> f32 {
        math::millimeters_per_pixel(self.diagonal_inches, self.width_px, self.height_px)
    }

    /// Pixel density in pixels per millimetre.
    #[inline]
    pub fn pixels_per_mm(&self) -> f32 {
        1.0 / self.mm_per_pixel()
    }

    /// Physical width of the visible area in millimetres.
    pub fn width_mm(&self) -> f32 {
        self.width_px as f32 * self.mm_per_pixel()
    }

    /// Physical height of the visible area in millimetres.
    pub fn height_mm(&self) -> f32 {
        self.height_px as f32 * self.mm_per_pixel()
    }

    /// Physical diagonal in millimetres.
    pub fn diagonal_mm(&self) -> f32 {
        self.diagonal_inches * MM_PER_INCH
    }

    /// Converts an angular radius into a normalized radius for this display.
    pub fn angle_to_normalized_radius(&self, deg: f32) -> f32 {
        math::angle_to_normalized_radius(
            deg,
            self.diagonal_inches,
            self.distance_mm,
            self.width_px,
            self.height_px,
        )
    }

    /// Converts a normalized screen position (bottom-left origin) into an
    /// angular offset from the screen centre.
    pub fn normalized_to_degrees(&self, position: Vec2) -> GazeSample {
        let mm_per_px = self.mm_per_pixel();
        let x_mm = math::pixels_from_normalized(position.x - 0.5, self.width_px) * mm_per_px;
        let y_mm = math::pixels_from_normalized(position.y - 0.5, self.height_px) * mm_per_px;
        GazeSample::new(
            math::millimeters_to_degrees(x_mm, self.distance_mm),
            math::millimeters_to_degrees(y_mm, self.distance_mm),
        )
    }

    /// Converts an angular offset from the screen centre into a normalized
    /// screen position. Inverse of [`Self::normalized_to_degrees`].
    pub fn degrees_to_normalized(&self, sample: GazeSample) -> Vec2 {
        let px_per_mm = self.pixels_per_mm();
        let x_px = math::degrees_to_millimeters(sample.x_deg, self.distance_mm) * px_per_mm;
        let y_px = math::degrees_to_millimeters(sample.y_deg, self.distance_mm) * px_per_mm;
        Vec2::new(
            0.5 + math::normalized_from_pixels(x_px, self.width_px),
            0.5 + math::normalized_from_pixels(y_px, self.height_px),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_rejects_degenerate_geometry() {
        assert!(DisplayGeometry::new(0, 1080, 17.0, 600.0).is_err());
        assert!(DisplayGeometry::new(1920, 0, 17.0, 600.0).is_err());
        assert!(DisplayGeometry::new(1920, 1080, 0.0, 600.0).is_err());
        assert!(DisplayGeometry::new(1920, 1080, 17.0, -1.0).is_err());
        assert!(DisplayGeometry::new(1920, 1080, f32::NAN, 600.0).is_err());
        assert!(DisplayGeometry::new(1920, 1080, 17.0, 600.0).is_ok());
    }

    #[test]
    fn test_physical_size_follows_diagonal() {
        let display = DisplayGeometry::default();
        let w = display.width_mm();
        let h = display.height_mm();
        assert_relative_eq!((w * w + h * h).sqrt(), display.diagonal_mm(), max_relative = 1e-5);
        assert_relative_eq!(
            display.pixels_per_mm() * display.mm_per_pixel(),
            1.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_screen_center_is_zero_degrees() {
        let display = DisplayGeometry::default();
        let sample = display.normalized_to_degrees(Vec2::SCREEN_CENTER);
        assert_abs_diff_eq!(sample.x_deg, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sample.y_deg, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalized_degrees_round_trip() {
        let display = DisplayGeometry::new(2560, 1440, 27.0, 650.0).unwrap();
        for &(x, y) in &[(0.0, 0.0), (0.25, 0.8), (0.5, 0.5), (0.91, 0.13), (1.0, 1.0)] {
            let deg = display.normalized_to_degrees(Vec2::new(x, y));
            let back = display.degrees_to_normalized(deg);
            assert_abs_diff_eq!(back.x, x, epsilon = 1e-4);
            assert_abs_diff_eq!(back.y, y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_right_edge_is_positive_angle() {
        let display = DisplayGeometry::default();
        let right = display.normalized_to_degrees(Vec2::new(1.0, 0.5));
        let top = display.normalized_to_degrees(Vec2::new(0.5, 1.0));
        assert!(right.x_deg > 0.0);
        assert!(top.y_deg > 0.0);
        assert!(right.x_deg > top.y_deg, "a 16:9 panel is wider than tall");
    }
}
