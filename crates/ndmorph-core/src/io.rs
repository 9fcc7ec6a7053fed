use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::array::NdArray;
use crate::error::{NdError, Result};

/// On-disk form of an array: dimensions plus values with axis 0 fastest.
///
/// Missing values are written as TOML `nan`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayFile {
    pub dims: Vec<usize>,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Vec<f64>>,
}

impl From<&NdArray> for ArrayFile {
    fn from(array: &NdArray) -> Self {
        let spacing = array
            .spacing()
            .iter()
            .any(|&s| s != 1.0)
            .then(|| array.spacing().to_vec());
        Self {
            dims: array.dims().to_vec(),
            data: array.data().to_vec(),
            spacing,
        }
    }
}

impl TryFrom<ArrayFile> for NdArray {
    type Error = NdError;

    fn try_from(file: ArrayFile) -> Result<Self> {
        let array = NdArray::new(file.dims, file.data)?;
        match file.spacing {
            Some(spacing) => array.with_spacing(spacing),
            None => Ok(array),
        }
    }
}

pub fn array_from_toml(text: &str) -> Result<NdArray> {
    let file: ArrayFile = toml::from_str(text)?;
    NdArray::try_from(file)
}

pub fn array_to_toml(array: &NdArray) -> Result<String> {
    Ok(toml::to_string_pretty(&ArrayFile::from(array))?)
}

pub fn load_array(path: &Path) -> Result<NdArray> {
    let text = fs::read_to_string(path)?;
    let array = array_from_toml(&text)?;
    debug!(path = %path.display(), dims = ?array.dims(), "Loaded array");
    Ok(array)
}

pub fn save_array(path: &Path, array: &NdArray) -> Result<()> {
    fs::write(path, array_to_toml(array)?)?;
    debug!(path = %path.display(), dims = ?array.dims(), "Saved array");
    Ok(())
}
