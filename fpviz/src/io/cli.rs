use std::path::PathBuf;

use clap::Parser;

/// Draws a floorplan image from a module-size catalog and a placement file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Size catalog: a `MODULE_SIZE <n>` declaration followed by `ID WIDTH HEIGHT` lines
    #[arg(value_name = "TESTCASE")]
    pub testcase: PathBuf,
    /// Placement file: `ID X Y ROT` or `ID X,Y ROT` lines
    #[arg(value_name = "PLACEMENT")]
    pub placement: PathBuf,
    /// Output image path (PNG)
    #[arg(short, long, value_name = "FILE", default_value = "floorplan.png")]
    pub output: PathBuf,
}
