use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ndmorph_core::resample::resample;

use super::{load_config, load_input, write_output};

#[derive(Args)]
pub struct ResampleArgs {
    /// Input array file
    pub file: PathBuf,

    /// TOML config file with a [resample] section (kernel and scheme)
    #[arg(long)]
    pub config: PathBuf,

    /// Output array file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ResampleArgs) -> Result<()> {
    let source = load_input(&args.file)?;
    let config = load_config(Some(&args.config))?.resample;

    if args.output.is_some() {
        crate::summary::print_resample_summary(&config);
    }

    let result = resample(&source, &config)?;
    write_output(&result, args.output.as_ref())
}
