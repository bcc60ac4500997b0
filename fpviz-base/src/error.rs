use std::path::PathBuf;

use thiserror::Error;

/// Structural failure while reading one of the two input files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("size declaration missing: no MODULE_SIZE header found in size catalog")]
    SizeDeclarationMissing,

    #[error("declared module count {value} on line {line} is out of range")]
    ModuleCountOutOfRange { line: usize, value: String },

    #[error("parsed {found} modules, expected {expected}")]
    ModuleCountMismatch { found: usize, expected: usize },

    #[error("no placements parsed from placement file")]
    NoPlacements,
}

/// Input that parses fine but cannot be mapped onto a canvas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("degenerate bounding box: max_x = {max_x}, max_y = {max_y}")]
    DegenerateBoundingBox { max_x: i64, max_y: i64 },

    #[error("canvas of {width}x{height} px leaves no drawable area with a margin of {margin} px")]
    CanvasTooSmall { width: u32, height: u32, margin: u32 },
}

/// Any failure of the visualization pipeline, tagged by the stage that produced it.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to rasterize floorplan drawing: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("could not allocate a {width}x{height} px canvas")]
    CanvasAllocation { width: u32, height: u32 },

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
