use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use image::{DynamicImage, ImageError, ImageFormat, RgbImage, RgbaImage};
use log::{debug, warn};
use resvg::tiny_skia::{self, Pixmap, Rect};
use resvg::usvg::{self, fontdb};
use svg::Document;
use svg::Node;
use svg::node::element::{Line, Rectangle, Text};

use crate::error::FloorplanError;
use crate::geometry::{PixelPoint, PixelRect};
use crate::render::fonts;
use crate::render::surface::{Color, DrawingSurface};

/// Text anchors further out than this are pulled in, the label is invisible either way.
const FAR: i64 = 1 << 20;

/// Canvas that collects the drawing as an SVG document and rasterizes it to PNG on save.
///
/// Shapes are drawn with `shape-rendering="crispEdges"` on half-pixel coordinates,
/// so a 1px stroke covers exactly the pixel row or column it is drawn through.
/// Labels use the embedded font and are anti-aliased.
pub struct SvgCanvas {
    width: u32,
    height: u32,
    font_size: f32,
    fonts: Arc<fontdb::Database>,
    font_family: String,
    document: Document,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32, font_size: f32) -> Self {
        let (fonts, font_family) = fonts::embedded_fonts();
        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("shape-rendering", "crispEdges");

        Self {
            width,
            height,
            font_size,
            fonts,
            font_family,
            document,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Renders the collected drawing into an RGB image of the canvas size.
    pub fn rasterize(&self) -> Result<RgbImage, FloorplanError> {
        let tree = self.parse(&self.document.to_string())?;
        let alloc_err = || FloorplanError::CanvasAllocation {
            width: self.width,
            height: self.height,
        };

        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(alloc_err)?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        //the background is opaque, so premultiplied and straight alpha coincide
        let rgba = RgbaImage::from_raw(self.width, self.height, pixmap.take()).ok_or_else(alloc_err)?;
        Ok(DynamicImage::ImageRgba8(rgba).into_rgb8())
    }

    fn parse(&self, svg_text: &str) -> Result<usvg::Tree, usvg::Error> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fonts);
        options.font_family = self.font_family.clone();
        usvg::Tree::from_str(svg_text, &options)
    }

    fn label(&self, x: f32, y: f32, text: &str, color: Color) -> Text {
        Text::new(text)
            .set("x", x)
            .set("y", y)
            .set("font-family", format!("'{}'", self.font_family))
            .set("font-size", self.font_size)
            .set("fill", color.to_string())
    }

    /// Bounding box of `text` when drawn with its baseline origin at `(0, 0)`.
    fn measure(&self, text: &str) -> Option<Rect> {
        let sample = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .add(self.label(0.0, 0.0, text, Color::BLACK));

        let bbox = match self.parse(&sample.to_string()) {
            Ok(tree) => tree.root().abs_bounding_box(),
            Err(err) => {
                warn!("[RENDER] could not lay out label {text:?}: {err}");
                return None;
            }
        };
        (bbox.width() > 0.0 && bbox.height() > 0.0).then_some(bbox)
    }

    /// Pulls a coordinate to just outside `[0, limit]`, edges beyond it stay invisible.
    fn clamp(v: i64, limit: u32) -> f64 {
        v.clamp(-2, limit as i64 + 2) as f64
    }

    /// A 1px segment through the centers of the pixels at both ends, both included.
    fn segment((x1, y1): (f64, f64), (x2, y2): (f64, f64), color: Color) -> Line {
        Line::new()
            .set("x1", x1 + 0.5)
            .set("y1", y1 + 0.5)
            .set("x2", x2 + 0.5)
            .set("y2", y2 + 0.5)
            .set("stroke", color.to_string())
            .set("stroke-width", 1)
            .set("stroke-linecap", "square")
    }

    fn write_png(image: &RgbImage, path: &Path) -> Result<(), FloorplanError> {
        let io_err = |source| FloorplanError::Io {
            path: path.to_path_buf(),
            source,
        };
        let path = std::path::absolute(path).map_err(io_err)?;

        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|file| {
                let mut writer = BufWriter::new(file);
                image.write_to(&mut writer, ImageFormat::Png)?;
                writer.flush().map_err(ImageError::IoError)
            })
            .map_err(|err| match err {
                atomicwrites::Error::Internal(source) => io_err(source),
                atomicwrites::Error::User(err) => FloorplanError::Image(err),
            })
    }
}

impl DrawingSurface for SvgCanvas {
    fn fill(&mut self, color: Color) {
        self.document.append(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", self.width)
                .set("height", self.height)
                .set("fill", color.to_string()),
        );
    }

    fn draw_rect_outline(&mut self, rect: PixelRect, color: Color) {
        let xa = Self::clamp(rect.x, self.width);
        let xb = Self::clamp(rect.x.saturating_add(rect.width), self.width);
        let ya = Self::clamp(rect.y, self.height);
        let yb = Self::clamp(rect.y.saturating_add(rect.height), self.height);
        let (x0, x1) = (xa.min(xb), xa.max(xb));
        let (y0, y1) = (ya.min(yb), ya.max(yb));

        if x1 > x0 && y1 > y0 {
            self.document.append(
                Rectangle::new()
                    .set("x", x0 + 0.5)
                    .set("y", y0 + 0.5)
                    .set("width", x1 - x0)
                    .set("height", y1 - y0)
                    .set("fill", "none")
                    .set("stroke", color.to_string())
                    .set("stroke-width", 1),
            );
        } else {
            //collapsed to a single row or column of pixels
            self.document.append(
                Rectangle::new()
                    .set("x", x0)
                    .set("y", y0)
                    .set("width", x1 - x0 + 1.0)
                    .set("height", y1 - y0 + 1.0)
                    .set("fill", color.to_string()),
            );
        }
    }

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, color: Color) {
        let line = Self::segment(
            (Self::clamp(from.x, self.width), Self::clamp(from.y, self.height)),
            (Self::clamp(to.x, self.width), Self::clamp(to.y, self.height)),
            color,
        );
        self.document.append(line);
    }

    fn text_extent(&self, text: &str) -> (i64, i64) {
        self.measure(text)
            .map(|bbox| (bbox.width().ceil() as i64, bbox.height().ceil() as i64))
            .unwrap_or((0, 0))
    }

    fn draw_text(&mut self, at: PixelPoint, text: &str, color: Color) {
        let (dx, dy) = self
            .measure(text)
            .map(|bbox| (bbox.x(), bbox.y()))
            .unwrap_or((0.0, 0.0));
        let x = at.x.clamp(-FAR, FAR) as f32 - dx;
        let y = at.y.clamp(-FAR, FAR) as f32 - dy;
        let label = self.label(x, y, text, color);
        self.document.append(label);
    }

    fn save(&self, path: &Path) -> Result<(), FloorplanError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| FloorplanError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            warn!("[RENDER] {} does not end in .png, writing PNG data anyway", path.display());
        }
        let image = self.rasterize()?;
        Self::write_png(&image, path)?;
        debug!("[RENDER] {}x{} canvas written to {}", self.width, self.height, path.display());
        Ok(())
    }
}
