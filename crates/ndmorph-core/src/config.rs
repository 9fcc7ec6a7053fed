use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceConfig;
use crate::error::Result;
use crate::morph::MorphConfig;
use crate::resample::ResampleConfig;

/// Settings for every operation, as stored in a single TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NdMorphConfig {
    #[serde(default)]
    pub distance: DistanceConfig,
    #[serde(default)]
    pub morph: MorphConfig,
    #[serde(default)]
    pub resample: ResampleConfig,
}

impl NdMorphConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
