use std::path::Path;

use log::debug;

use crate::error::FloorplanError;
use crate::geometry::{PixelPoint, ResolvedFloorplan, Transform};

mod fonts;
mod surface;
mod svg_canvas;

#[doc(inline)]
pub use svg_canvas::SvgCanvas;
#[doc(inline)]
pub use surface::{Color, DrawingSurface, RenderStyle};

/// Draws `floorplan` onto `surface`: every module outline with its id centered inside,
/// followed by a crosshair on the design origin.
/// Modules are drawn in placement order, later ones overwrite shared pixels.
pub fn render_floorplan(
    surface: &mut impl DrawingSurface,
    floorplan: &ResolvedFloorplan,
    transform: &Transform,
    style: &RenderStyle,
) {
    surface.fill(style.background);

    for fp in &floorplan.footprints {
        let rect = transform.to_canvas(fp);
        surface.draw_rect_outline(rect, style.outline);

        let label = fp.id.to_string();
        let (text_w, text_h) = surface.text_extent(&label);
        let at = PixelPoint {
            x: rect.x.saturating_add(rect.width.saturating_sub(text_w).div_euclid(2)),
            y: rect.y.saturating_add(rect.height.saturating_sub(text_h).div_euclid(2)),
        };
        surface.draw_text(at, &label, style.label);
    }

    let origin = transform.origin();
    let arm = style.origin_tick_half_len as i64;
    surface.draw_line(
        PixelPoint { x: origin.x - arm, y: origin.y },
        PixelPoint { x: origin.x + arm, y: origin.y },
        style.origin_tick,
    );
    surface.draw_line(
        PixelPoint { x: origin.x, y: origin.y - arm },
        PixelPoint { x: origin.x, y: origin.y + arm },
        style.origin_tick,
    );

    debug!(
        "[RENDER] {} modules drawn at scale {:.4}",
        floorplan.footprints.len(),
        transform.scale()
    );
}

/// Renders `floorplan` onto a fresh [`SvgCanvas`] sized after `transform` and saves it to `path` as PNG.
/// Nothing is written if any step fails.
pub fn render_to_file(
    floorplan: &ResolvedFloorplan,
    transform: &Transform,
    style: &RenderStyle,
    path: &Path,
) -> Result<(), FloorplanError> {
    let canvas = transform.canvas();
    let mut surface = SvgCanvas::new(canvas.width, canvas.height, style.label_font_size);
    render_floorplan(&mut surface, floorplan, transform, style);
    surface.save(path)
}
