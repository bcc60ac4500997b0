use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use fpviz_base::geometry::{FloorplanStats, Transform, resolve};
use fpviz_base::io::{parse_placements, parse_size_catalog, read_input};
use fpviz_base::render::render_to_file;

use crate::config::FpvizConfig;

/// Outcome of a successful [`visualize`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: FloorplanStats,
    pub scale: f64,
}

/// Reads both inputs, resolves the floorplan and writes it as an image to `output`.
/// Either the complete image is written or nothing is.
pub fn visualize(
    testcase: &Path,
    placement: &Path,
    output: &Path,
    config: &FpvizConfig,
) -> Result<RunSummary> {
    let catalog_text = read_input(testcase)?;
    let placement_text = read_input(placement)?;

    let catalog = parse_size_catalog(&catalog_text)
        .with_context(|| format!("failed to parse size catalog {}", testcase.display()))?;
    info!("[PARSE] {} module sizes read from {}", catalog.len(), testcase.display());

    let placements = parse_placements(&placement_text)
        .with_context(|| format!("failed to parse placement file {}", placement.display()))?;
    info!("[PARSE] {} placements read from {}", placements.len(), placement.display());

    let floorplan =
        resolve(&catalog, &placements).context("failed to resolve floorplan geometry")?;
    let stats = floorplan.stats();
    info!(
        "[GEOM] floorplan {} x {}, module area {}, utilization {:.3}%",
        stats.width,
        stats.height,
        stats.module_area,
        stats.utilization * 100.0
    );
    debug!("[GEOM] stats: {}", serde_json::to_string(&stats)?);

    let transform = Transform::fit(floorplan.bbox, config.canvas())
        .context("failed to fit floorplan onto canvas")?;

    render_to_file(&floorplan, &transform, &config.style, output)
        .with_context(|| format!("failed to write image {}", output.display()))?;
    info!("[RENDER] image written to {}", output.display());

    Ok(RunSummary {
        output: output.to_path_buf(),
        stats,
        scale: transform.scale(),
    })
}
