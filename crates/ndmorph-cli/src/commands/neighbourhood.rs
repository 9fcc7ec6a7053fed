use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::load_input;

#[derive(Args)]
pub struct NeighbourhoodArgs {
    /// Input array file
    pub file: PathBuf,

    /// Width on every axis, or a comma-separated list with one per axis
    #[arg(long, default_value = "3")]
    pub width: String,
}

pub fn run(args: &NeighbourhoodArgs) -> Result<()> {
    let array = load_input(&args.file)?;
    let widths: Vec<usize> = args
        .width
        .split(',')
        .map(|s| s.trim().parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .context("Invalid width (expected 'w' or 'w0,w1,...')")?;

    let window = match widths.as_slice() {
        [w] => array.uniform_neighbourhood(*w),
        _ => array.neighbourhood(&widths)?,
    };

    println!("Widths:  {:?}", window.widths());
    println!("Size:    {}", window.size());
    println!("Centre:  {}", window.centre_index());
    for k in 0..window.size() {
        let loc: Vec<isize> = window.loc(k).to_vec();
        println!("  {:>4}  {:?}  {:+}", k, loc, window.offsets()[k]);
    }
    Ok(())
}
