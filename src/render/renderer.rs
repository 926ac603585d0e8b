//! Software point renderer drawing onto a `tiny_skia::Pixmap`.

use tiny_skia::Pixmap;

use crate::data::color_table::Rgba;
use crate::error::RenderError;
use crate::layout::DeviceCoordinates;
use crate::render::program::PointProgram;
use crate::transform::ViewTransform;

/// Counts from one draw pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Points that touched at least one pixel of the surface.
    pub drawn: usize,
    /// Points entirely off-surface (or with non-finite screen position).
    pub culled: usize,
}

/// Draws every point as an anti-aliased disc over an opaque background.
///
/// Blending happens in premultiplied space (`out = src·α + dst·(1−α)`), which
/// equals straight-alpha "over" for an opaque destination and keeps the
/// antialiased rim from darkening. Points are drawn in dataset order; later
/// points blend over earlier ones.
pub struct PointRenderer {
    pixmap: Pixmap,
    program: PointProgram,
    background: Rgba,
}

impl PointRenderer {
    /// Acquire a drawing surface of `width` × `height` pixels.
    pub fn new(
        width: u32,
        height: u32,
        program: PointProgram,
        background: Rgba,
    ) -> Result<Self, RenderError> {
        let pixmap = allocate_surface(width, height)?;
        if background.a != 255 {
            log::warn!("background {background:?} is not opaque; drawing it as opaque");
        }
        log::debug!("point renderer ready ({width}x{height})");
        Ok(Self {
            pixmap,
            program,
            background: Rgba { a: 255, ..background },
        })
    }

    /// Replace the surface after a viewport change. On failure the previous
    /// surface is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            return Ok(());
        }
        self.pixmap = allocate_surface(width, height)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn program(&self) -> &PointProgram {
        &self.program
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Clear to the background and draw all points under `transform`.
    ///
    /// `colors` is indexed by dataset index (see [`crate::layout::DevicePoint`]).
    /// The buffers are linked before the surface is touched, so a mismatch
    /// leaves the previous frame intact.
    pub fn render(
        &mut self,
        coords: &DeviceCoordinates,
        colors: &[Rgba],
        transform: &ViewTransform,
    ) -> Result<RenderStats, RenderError> {
        self.program.link(coords, colors)?;
        let bg = self.background;
        self.pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));

        let mut stats = RenderStats::default();
        let width = self.pixmap.width() as i64;
        let height = self.pixmap.height() as i64;
        let radius = self.program.diameter_px() * 0.5;
        let data = self.pixmap.data_mut();

        for p in &coords.points {
            let (sx, sy) = transform.apply(p.px, p.py);
            if !(sx.is_finite() && sy.is_finite()) {
                stats.culled += 1;
                continue;
            }
            let x0 = ((sx - radius).floor() as i64).max(0);
            let x1 = ((sx + radius).ceil() as i64).min(width - 1);
            let y0 = ((sy - radius).floor() as i64).max(0);
            let y1 = ((sy + radius).ceil() as i64).min(height - 1);
            if x0 > x1 || y0 > y1 {
                stats.culled += 1;
                continue;
            }

            let color = colors[p.index];
            let base_alpha = self.program.opacity() * (color.a as f64 / 255.0);
            let mut touched = false;
            for py in y0..=y1 {
                let cy = py as f64 + 0.5 - sy;
                for px in x0..=x1 {
                    let cx = px as f64 + 0.5 - sx;
                    let coverage = self.program.coverage((cx * cx + cy * cy).sqrt());
                    if coverage <= 0.0 {
                        continue;
                    }
                    let alpha = base_alpha * coverage;
                    let offset = ((py * width + px) * 4) as usize;
                    blend_premultiplied(&mut data[offset..offset + 4], color, alpha);
                    touched = true;
                }
            }
            if touched {
                stats.drawn += 1;
            } else {
                stats.culled += 1;
            }
        }
        Ok(stats)
    }
}

fn allocate_surface(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or_else(|| RenderError::RendererUnavailable {
        width,
        height,
        reason: if width == 0 || height == 0 {
            "surface has zero area".to_string()
        } else {
            "surface too large to allocate".to_string()
        },
    })
}

/// `dst = src·α + dst·(1−α)` on one premultiplied RGBA8 pixel.
#[inline]
fn blend_premultiplied(dst: &mut [u8], src: Rgba, alpha: f64) {
    let inv = 1.0 - alpha;
    let channel = |s: u8, d: u8| -> u8 {
        let v = s as f64 * alpha + d as f64 * inv;
        v.round().clamp(0.0, 255.0) as u8
    };
    dst[0] = channel(src.r, dst[0]);
    dst[1] = channel(src.g, dst[1]);
    dst[2] = channel(src.b, dst[2]);
    dst[3] = channel(255, dst[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_full_alpha_replaces_destination() {
        let mut px = [10u8, 20, 30, 255];
        blend_premultiplied(&mut px, Rgba::rgb(200, 100, 50), 1.0);
        assert_eq!(px, [200, 100, 50, 255]);
    }

    #[test]
    fn blend_half_alpha_mixes_evenly() {
        let mut px = [0u8, 0, 0, 255];
        blend_premultiplied(&mut px, Rgba::rgb(200, 100, 50), 0.5);
        assert_eq!(px, [100, 50, 25, 255]);
    }

    #[test]
    fn zero_sized_surface_is_unavailable() {
        let program = PointProgram::compile(4.0, 1.0).unwrap();
        let err = PointRenderer::new(0, 10, program, Rgba::WHITE).err();
        assert!(matches!(err, Some(RenderError::RendererUnavailable { .. })));
    }
}
