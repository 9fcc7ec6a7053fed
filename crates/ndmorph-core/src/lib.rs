pub mod array;
pub mod components;
pub mod config;
pub mod consts;
pub mod distance;
pub mod error;
pub mod inspect;
pub mod io;
pub mod kernel;
pub mod morph;
pub mod neighbourhood;
pub mod resample;

pub use array::NdArray;
pub use config::NdMorphConfig;
pub use error::{NdError, Result};
pub use neighbourhood::Neighbourhood;
