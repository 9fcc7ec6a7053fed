use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::load_input;

#[derive(Args)]
pub struct InfoArgs {
    /// Input array file (TOML)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let array = load_input(&args.file)?;
    crate::summary::print_array_summary(&args.file, &array);
    Ok(())
}
