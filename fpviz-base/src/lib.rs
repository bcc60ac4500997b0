//! The base `fpviz` module: everything needed to turn a size catalog and a placement list into a floorplan image.

/// Modules, placements and the collections holding them
pub mod entities;

/// Error types for every stage of the pipeline
pub mod error;

/// Footprint resolution and the design-to-canvas transform
pub mod geometry;

/// Parsing of the size catalog and placement text formats
pub mod io;

/// Drawing the resolved floorplan onto a raster canvas
pub mod render;
