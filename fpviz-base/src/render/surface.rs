use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FloorplanError;
use crate::geometry::{PixelPoint, PixelRect};

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
    pub const GRAY: Color = Color(128, 128, 128);
}

/// Hex notation, `#RRGGBB`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Immediate-mode 2D drawing target in canvas space (y pointing down).
/// Anything drawn outside the surface is clipped.
pub trait DrawingSurface {
    fn fill(&mut self, color: Color);

    /// Strokes a 1px outline through the corners `(x, y)` and `(x + width, y + height)`, both inclusive.
    fn draw_rect_outline(&mut self, rect: PixelRect, color: Color);

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, color: Color);

    /// `(width, height)` in pixels that [`DrawingSurface::draw_text`] covers for `text`.
    fn text_extent(&self, text: &str) -> (i64, i64);

    /// Draws `text` with its top-left corner at `at`.
    fn draw_text(&mut self, at: PixelPoint, text: &str, color: Color);

    /// Writes the surface to `path`, creating missing parent directories.
    fn save(&self, path: &Path) -> Result<(), FloorplanError>;
}

/// Colors and sizes used to draw a floorplan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background: Color,
    pub outline: Color,
    pub label: Color,
    pub origin_tick: Color,
    /// Length of each arm of the crosshair marking the design origin
    pub origin_tick_half_len: u32,
    /// Font size of the module ids, in pixels
    pub label_font_size: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            outline: Color::BLACK,
            label: Color::BLACK,
            origin_tick: Color::GRAY,
            origin_tick_half_len: 10,
            label_font_size: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_print_as_hex() {
        assert_eq!(Color::GRAY.to_string(), "#808080");
        assert_eq!(Color(255, 8, 171).to_string(), "#FF08AB");
    }
}
