mod resolver;
mod viewport;

#[doc(inline)]
pub use resolver::{BoundingBox, FloorplanStats, ResolvedFloorplan, ResolvedFootprint, resolve};

#[doc(inline)]
pub use viewport::{CanvasSpec, PixelPoint, PixelRect, Transform};
