use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ndmorph_core::kernel::DiscreteKernel;
use ndmorph_core::morph::{morph, ElementOp, MergeOp};

use super::{load_config, load_input, load_kernel, write_output};

#[derive(Args)]
pub struct MorphArgs {
    /// Input array file
    pub file: PathBuf,

    /// Kernel array file (odd extent on every axis); defaults to a 3-wide box
    #[arg(long)]
    pub kernel: Option<PathBuf>,

    /// Element operation: + - * i 1 0 == (or plus, minus, ...)
    #[arg(long)]
    pub element_op: Option<String>,

    /// Merge operation: sum, min, max, mean, median, all, any
    #[arg(long)]
    pub merge_op: Option<String>,

    /// TOML config file (uses its [morph] section)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not rescale sums over windows clipped by the border
    #[arg(long)]
    pub no_renormalise: bool,

    /// Output array file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MorphArgs) -> Result<()> {
    let source = load_input(&args.file)?;
    let kernel = match args.kernel {
        Some(ref path) => load_kernel(path)?,
        None => DiscreteKernel::full(source.rank(), 3),
    };

    let mut config = load_config(args.config.as_ref())?.morph;
    if let Some(ref op) = args.element_op {
        config.element_op = op.parse::<ElementOp>().context("Invalid --element-op")?;
    }
    if let Some(ref op) = args.merge_op {
        config.merge_op = op.parse::<MergeOp>().context("Invalid --merge-op")?;
    }
    if args.no_renormalise {
        config.renormalise = false;
    }

    if args.output.is_some() {
        crate::summary::print_morph_summary(&config, &kernel);
    }

    let result = morph(&source, &kernel, &config)?;
    write_output(&result, args.output.as_ref())
}
