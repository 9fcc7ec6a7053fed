use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ndmorph_core::distance;

use super::{load_config, load_input, write_output};

#[derive(Args)]
pub struct DistanceArgs {
    /// Input array file; nonzero, non-missing cells are foreground
    pub file: PathBuf,

    /// Scale each axis by the array's spacing
    #[arg(long)]
    pub honor_spacing: bool,

    /// TOML config file (uses its [distance] section)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output array file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &DistanceArgs) -> Result<()> {
    let source = load_input(&args.file)?;
    let mut config = load_config(args.config.as_ref())?.distance;
    config.honor_spacing |= args.honor_spacing;

    let result = distance::run(&source, &config);
    write_output(&result, args.output.as_ref())
}
