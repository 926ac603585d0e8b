//! View transform: the pan/zoom state applied on top of device coordinates.
//!
//! `screen = device * scale + translate`. Rendering and hit-testing both go
//! through [`ViewTransform::apply`] so they always agree on where a point is.

use serde::{Deserialize, Serialize};

/// Allowed range for [`ViewTransform::scale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 0.9, max: 80.0 }
    }
}

impl ZoomBounds {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Uniform scale followed by a translation, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// Device → screen.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }

    /// Screen → device.
    #[inline]
    pub fn inverse(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            (sx - self.translate_x) / self.scale,
            (sy - self.translate_y) / self.scale,
        )
    }

    fn is_finite(&self) -> bool {
        self.translate_x.is_finite() && self.translate_y.is_finite() && self.scale.is_finite()
    }

    /// Fold one gesture into a new transform. Scale is clamped into `bounds`;
    /// translation is unconstrained. Gestures carrying non-finite values are
    /// logged and leave the transform unchanged.
    pub fn apply_gesture(&self, gesture: Gesture, bounds: &ZoomBounds) -> ViewTransform {
        match gesture {
            Gesture::Pan { dx, dy } => {
                if !(dx.is_finite() && dy.is_finite()) {
                    log::debug!("ignoring pan with non-finite delta ({dx}, {dy})");
                    return *self;
                }
                ViewTransform {
                    translate_x: self.translate_x + dx,
                    translate_y: self.translate_y + dy,
                    scale: self.scale,
                }
            }
            Gesture::Zoom {
                factor,
                anchor_x,
                anchor_y,
            } => {
                if !(factor.is_finite() && factor > 0.0 && anchor_x.is_finite() && anchor_y.is_finite())
                {
                    log::debug!("ignoring zoom with factor {factor} at ({anchor_x}, {anchor_y})");
                    return *self;
                }
                let scale = bounds.clamp(self.scale * factor);
                // keep the device point under the anchor fixed on screen
                let ratio = scale / self.scale;
                ViewTransform {
                    translate_x: anchor_x - (anchor_x - self.translate_x) * ratio,
                    translate_y: anchor_y - (anchor_y - self.translate_y) * ratio,
                    scale,
                }
            }
            Gesture::Set(t) => {
                if !t.is_finite() {
                    log::debug!("ignoring non-finite transform {t:?}");
                    return *self;
                }
                ViewTransform {
                    scale: bounds.clamp(t.scale),
                    ..t
                }
            }
            Gesture::Reset => ViewTransform {
                scale: bounds.clamp(1.0),
                ..ViewTransform::IDENTITY
            },
        }
    }
}

/// A user pan/zoom action. Each gesture yields exactly one new transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Translate by a screen-space delta.
    Pan { dx: f64, dy: f64 },
    /// Multiply scale by `factor`, keeping the screen point `anchor` fixed.
    Zoom {
        factor: f64,
        anchor_x: f64,
        anchor_y: f64,
    },
    /// Replace the transform outright (scale still clamped).
    Set(ViewTransform),
    /// Back to identity.
    Reset,
}
