use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use ndmorph_core::components::{label_components, Connectivity};

use super::{load_input, load_kernel, write_output};

#[derive(Clone, Copy, ValueEnum)]
pub enum ConnectivityArg {
    Face,
    Full,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Face => Connectivity::Face,
            ConnectivityArg::Full => Connectivity::Full,
        }
    }
}

#[derive(Args)]
pub struct ComponentsArgs {
    /// Input array file; nonzero, non-missing cells are foreground
    pub file: PathBuf,

    /// Symmetric connectivity kernel file (overrides --connectivity)
    #[arg(long)]
    pub kernel: Option<PathBuf>,

    /// Standard connectivity when no kernel file is given
    #[arg(long, value_enum, default_value = "face")]
    pub connectivity: ConnectivityArg,

    /// Output label array file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ComponentsArgs) -> Result<()> {
    let source = load_input(&args.file)?;
    let kernel = match args.kernel {
        Some(ref path) => load_kernel(path)?,
        None => Connectivity::from(args.connectivity).kernel(source.rank()),
    };

    let labels = label_components(&source, &kernel)?;
    if args.output.is_some() {
        println!("Found {} components", labels.count());
        for (i, size) in labels.sizes().iter().enumerate() {
            println!("  {:>4}: {} cells", i + 1, size);
        }
    }
    write_output(&labels.to_array()?, args.output.as_ref())
}
