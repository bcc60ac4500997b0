use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use fpviz_base::geometry::CanvasSpec;
use fpviz_base::render::RenderStyle;

/// Configuration of the floorplan visualizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FpvizConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Empty border around the drawing, in pixels
    pub margin: u32,
    /// Colors, origin tick and label size
    pub style: RenderStyle,
}

impl FpvizConfig {
    pub fn canvas(&self) -> CanvasSpec {
        CanvasSpec {
            width: self.canvas_width,
            height: self.canvas_height,
            margin: self.margin,
        }
    }

    /// Checks that the margins leave a drawable area and that labels are visible.
    pub fn validate(&self) -> Result<()> {
        self.canvas().usable()?;
        let font_size = self.style.label_font_size;
        ensure!(
            font_size.is_finite() && font_size > 0.0,
            "label_font_size must be a positive number of pixels, got {font_size}"
        );
        Ok(())
    }
}

impl Default for FpvizConfig {
    fn default() -> Self {
        let canvas = CanvasSpec::default();
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            margin: canvas.margin,
            style: RenderStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_canvas() {
        let config = FpvizConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height, config.margin), (1600, 1200, 40));
        assert_eq!(config.style.origin_tick_half_len, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: FpvizConfig =
            serde_json::from_str(r#"{"canvas_width": 800, "style": {"label_font_size": 11.5}}"#).unwrap();
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 1200);
        assert_eq!(config.style.label_font_size, 11.5);
        assert_eq!(config.style.outline, RenderStyle::default().outline);
    }

    #[test]
    fn label_font_size_must_be_positive() {
        let mut config = FpvizConfig::default();
        config.style.label_font_size = 0.0;
        assert!(config.validate().is_err());
        config.style.label_font_size = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_margin_is_invalid() {
        let config = FpvizConfig {
            margin: 700,
            ..FpvizConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
