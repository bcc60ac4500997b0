use std::fs;
use std::path::Path;

use crate::error::FloorplanError;

/// Parsing of the module-size catalog
pub mod size_catalog;

/// Parsing of the placement list
pub mod placement;

#[doc(inline)]
pub use placement::{PlacementGrammar, parse_placements};
#[doc(inline)]
pub use size_catalog::parse_size_catalog;

/// Reads an input file to completion. Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_input(path: &Path) -> Result<String, FloorplanError> {
    let bytes = fs::read(path).map_err(|source| FloorplanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
