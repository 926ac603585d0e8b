//! Static layout: data coordinates → device (plot-area pixel) coordinates.
//!
//! The layout is computed once per dataset and plot size. Pan/zoom never
//! touches it; see [`crate::transform`] for the per-gesture part.

use crate::data::dataset::Dataset;

/// Fraction of the data range added on each side of the domain.
pub const DOMAIN_PADDING: f64 = 0.05;

/// Linear map from a data interval onto a pixel interval.
///
/// `range_start` may be larger than `range_end`; the y axis uses that to put
/// larger data values higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain_min: f64,
    pub domain_max: f64,
    pub range_start: f64,
    pub range_end: f64,
}

impl LinearScale {
    /// Scale covering `[min, max]` padded by [`DOMAIN_PADDING`] of the range.
    ///
    /// A zero-width data range gets a fixed small pad relative to the value so
    /// the domain never collapses to a point. The padded domain is clamped to
    /// the finite `f64` range, so extreme but finite inputs stay projectable.
    pub fn padded(min: f64, max: f64, range_start: f64, range_end: f64) -> Self {
        // half-span cannot overflow even for min = f64::MIN, max = f64::MAX
        let half_span = max * 0.5 - min * 0.5;
        let pad = if half_span > 0.0 {
            half_span * (2.0 * DOMAIN_PADDING)
        } else {
            DOMAIN_PADDING * min.abs().max(1.0)
        };
        Self {
            domain_min: (min - pad).max(f64::MIN),
            domain_max: (max + pad).min(f64::MAX),
            range_start,
            range_end,
        }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let t = (v * 0.5 - self.domain_min * 0.5) / (self.domain_max * 0.5 - self.domain_min * 0.5);
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Device coordinate back to data coordinate.
    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range_start) / (self.range_end - self.range_start);
        self.domain_min * (1.0 - t) + self.domain_max * t
    }
}

/// A projected point: its dataset index and device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePoint {
    pub index: usize,
    pub px: f64,
    pub py: f64,
}

/// Device coordinates for every projectable point of a dataset.
///
/// Points with non-finite coordinates are excluded; `index` keeps the link back
/// to the dataset so hit-test results still name the original record.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCoordinates {
    pub points: Vec<DevicePoint>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub width: f64,
    pub height: f64,
    /// Dataset indices that could not be projected.
    pub excluded: Vec<usize>,
}

impl DeviceCoordinates {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Device position of a dataset record, if it was projected.
    pub fn position_of(&self, index: usize) -> Option<(f64, f64)> {
        self.points
            .iter()
            .find(|p| p.index == index)
            .map(|p| (p.px, p.py))
    }

    /// Map a device position back to data coordinates.
    pub fn to_data(&self, px: f64, py: f64) -> (f64, f64) {
        (self.x_scale.invert(px), self.y_scale.invert(py))
    }
}

/// Project `dataset` onto a `width` × `height` plot area.
///
/// x maps onto `[0, width]`, y onto `[height, 0]` (larger y is higher on
/// screen). The extent ignores non-finite points. Pure: identical inputs give
/// identical output.
pub fn compute_static_layout(dataset: &Dataset, width: f64, height: f64) -> DeviceCoordinates {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut excluded = Vec::new();
    for (i, p) in dataset.points().iter().enumerate() {
        if !p.is_finite() {
            excluded.push(i);
            continue;
        }
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    if x_min > x_max {
        // nothing projectable: any finite domain will do
        x_min = 0.0;
        x_max = 1.0;
        y_min = 0.0;
        y_max = 1.0;
    }
    if !excluded.is_empty() {
        log::warn!(
            "{} record(s) with non-finite coordinates excluded from layout",
            excluded.len()
        );
    }

    let x_scale = LinearScale::padded(x_min, x_max, 0.0, width);
    let y_scale = LinearScale::padded(y_min, y_max, height, 0.0);

    let points = dataset
        .points()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .map(|(index, p)| DevicePoint {
            index,
            px: x_scale.apply(p.x),
            py: y_scale.apply(p.y),
        })
        .collect();

    DeviceCoordinates {
        points,
        x_scale,
        y_scale,
        width,
        height,
        excluded,
    }
}
