use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{BoundingBox, ResolvedFootprint};

/// Dimensions of the output canvas in pixels, with an empty margin on all four sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl CanvasSpec {
    /// Drawable `(width, height)` once the margins are removed.
    pub fn usable(&self) -> Result<(u32, u32), GeometryError> {
        let usable_w = self.width.checked_sub(self.margin.saturating_mul(2)).filter(|w| *w > 0);
        let usable_h = self.height.checked_sub(self.margin.saturating_mul(2)).filter(|h| *h > 0);
        match (usable_w, usable_h) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(GeometryError::CanvasTooSmall {
                width: self.width,
                height: self.height,
                margin: self.margin,
            }),
        }
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
            margin: 40,
        }
    }
}

/// A point in canvas space (y pointing down).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// A rectangle in canvas space. `(x, y)` is the top-left corner.
/// May extend past the canvas bounds, drawing clips it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Maps design space (y up) onto canvas space (y down) with a single, aspect-preserving scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    scale: f64,
    canvas: CanvasSpec,
}

impl Transform {
    /// Largest uniform scale at which `bbox` fits inside the margins of `canvas`.
    pub fn fit(bbox: BoundingBox, canvas: CanvasSpec) -> Result<Self, GeometryError> {
        let bbox = BoundingBox::try_new(bbox.max_x, bbox.max_y)?;
        let (usable_w, usable_h) = canvas.usable()?;
        let sx = usable_w as f64 / bbox.max_x as f64;
        let sy = usable_h as f64 / bbox.max_y as f64;
        Ok(Transform {
            scale: f64::min(sx, sy),
            canvas,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn canvas(&self) -> CanvasSpec {
        self.canvas
    }

    /// Scales a design-space length to whole pixels. Ties round to even, out of range values saturate.
    fn scale_len(&self, len: i64) -> i64 {
        (len as f64 * self.scale).round_ties_even() as i64
    }

    /// Canvas rectangle covered by `fp`.
    /// Every rectangle is rounded on its own, neighbours may end up 1px apart or overlapping.
    pub fn to_canvas(&self, fp: &ResolvedFootprint) -> PixelRect {
        let width = self.scale_len(fp.width);
        let height = self.scale_len(fp.height);
        let margin = self.canvas.margin as i64;
        PixelRect {
            x: margin.saturating_add(self.scale_len(fp.x)),
            y: (self.canvas.height as i64 - margin)
                .saturating_sub(self.scale_len(fp.y))
                .saturating_sub(height),
            width,
            height,
        }
    }

    /// Canvas position of the design-space origin.
    pub fn origin(&self) -> PixelPoint {
        let margin = self.canvas.margin as i64;
        PixelPoint {
            x: margin,
            y: self.canvas.height as i64 - margin,
        }
    }
}
