use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MITCHELL_B, DEFAULT_MITCHELL_C};

use super::{
    box_kernel, lanczos_kernel, mitchell_netravali_kernel, triangle_kernel, Kernel,
};

/// Named kernel family, as stored in configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum KernelSpec {
    Box,
    Triangle,
    MitchellNetravali {
        #[serde(default = "default_b")]
        b: f64,
        #[serde(default = "default_c")]
        c: f64,
    },
    Lanczos,
}

fn default_b() -> f64 {
    DEFAULT_MITCHELL_B
}
fn default_c() -> f64 {
    DEFAULT_MITCHELL_C
}

impl Default for KernelSpec {
    fn default() -> Self {
        KernelSpec::MitchellNetravali {
            b: DEFAULT_MITCHELL_B,
            c: DEFAULT_MITCHELL_C,
        }
    }
}

impl fmt::Display for KernelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelSpec::Box => write!(f, "Box"),
            KernelSpec::Triangle => write!(f, "Triangle"),
            KernelSpec::MitchellNetravali { b, c } => {
                write!(f, "Mitchell-Netravali (B={b}, C={c})")
            }
            KernelSpec::Lanczos => write!(f, "Lanczos"),
        }
    }
}

impl KernelSpec {
    pub fn build(&self) -> Box<dyn Kernel> {
        match *self {
            KernelSpec::Box => Box::new(box_kernel()),
            KernelSpec::Triangle => Box::new(triangle_kernel()),
            KernelSpec::MitchellNetravali { b, c } => Box::new(mitchell_netravali_kernel(b, c)),
            KernelSpec::Lanczos => Box::new(lanczos_kernel()),
        }
    }
}
