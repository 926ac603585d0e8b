//! The point program: validated per-draw parameters for the rasterizer.
//!
//! "Compiling" checks the style on its own; "linking" checks it against the
//! buffers it will draw from. Both failures are programming errors and stop
//! setup before anything is drawn.

use crate::data::color_table::Rgba;
use crate::error::RenderError;
use crate::layout::DeviceCoordinates;

/// Normalized radius (fraction of the diameter) where the edge falloff starts.
pub const DEFAULT_FALLOFF_INNER: f64 = 0.35;
/// Normalized radius where coverage reaches zero. Nothing is drawn beyond it.
pub const DEFAULT_FALLOFF_OUTER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointProgram {
    diameter_px: f64,
    opacity: f64,
    falloff_inner: f64,
    falloff_outer: f64,
}

impl PointProgram {
    /// Validate a point style with the default edge falloff.
    pub fn compile(diameter_px: f64, opacity: f64) -> Result<Self, RenderError> {
        Self::compile_with_falloff(
            diameter_px,
            opacity,
            DEFAULT_FALLOFF_INNER,
            DEFAULT_FALLOFF_OUTER,
        )
    }

    pub fn compile_with_falloff(
        diameter_px: f64,
        opacity: f64,
        falloff_inner: f64,
        falloff_outer: f64,
    ) -> Result<Self, RenderError> {
        if !(diameter_px.is_finite() && diameter_px > 0.0) {
            return Err(RenderError::ProgramCompile(format!(
                "point size must be a positive number, got {diameter_px}"
            )));
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(RenderError::ProgramCompile(format!(
                "point opacity must be within [0, 1], got {opacity}"
            )));
        }
        if !(0.0 <= falloff_inner && falloff_inner < falloff_outer && falloff_outer <= 0.5) {
            return Err(RenderError::ProgramCompile(format!(
                "edge falloff band must satisfy 0 <= inner < outer <= 0.5, got [{falloff_inner}, {falloff_outer}]"
            )));
        }
        Ok(Self {
            diameter_px,
            opacity,
            falloff_inner,
            falloff_outer,
        })
    }

    /// Check the coordinate and color buffers agree: every projected point
    /// must have a color.
    pub fn link(&self, coords: &DeviceCoordinates, colors: &[Rgba]) -> Result<(), RenderError> {
        if let Some(p) = coords.points.iter().find(|p| p.index >= colors.len()) {
            return Err(RenderError::ProgramLink(format!(
                "point {} has no color ({} colors bound)",
                p.index,
                colors.len()
            )));
        }
        Ok(())
    }

    pub fn diameter_px(&self) -> f64 {
        self.diameter_px
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Fraction of full opacity at `dist_px` from the point center: 1 inside the
    /// inner radius, a smooth ramp down to 0 at the outer radius, 0 beyond.
    pub fn coverage(&self, dist_px: f64) -> f64 {
        let r = dist_px / self.diameter_px;
        if r >= self.falloff_outer {
            0.0
        } else if r <= self.falloff_inner {
            1.0
        } else {
            1.0 - smoothstep(self.falloff_inner, self.falloff_outer, r)
        }
    }
}

fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
