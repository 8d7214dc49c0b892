//! Configuration options for volslice.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cube::TexCoordConvention;
use crate::error::{Result, VolsliceError};
use crate::slicer::{SliceSettings, MIN_SLICE_STEP};
use crate::volume::VolumeDims;

/// Where the voxel data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSource {
    /// Path of the raw 8-bit voxel file.
    pub path: PathBuf,
    /// Voxel counts of the file.
    #[serde(default)]
    pub dims: VolumeDims,
}

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Slicing parameters applied every frame.
    pub slicing: SliceSettings,

    /// Range of the cube's texture coordinates.
    pub tex_coords: TexCoordConvention,

    /// Volume to load, if any.
    pub volume: Option<VolumeSource>,

    /// Window title.
    pub window_title: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            slicing: SliceSettings::default(),
            tex_coords: TexCoordConvention::default(),
            volume: None,
            window_title: "Volume Render".to_string(),
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loading options from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks values the slicer cannot work with.
    ///
    /// The step must be finite and at least [`MIN_SLICE_STEP`].
    pub fn validate(&self) -> Result<()> {
        let step = self.slicing.step;
        if !(step.is_finite() && step >= MIN_SLICE_STEP) {
            return Err(VolsliceError::InvalidStep(step));
        }
        if let Some(source) = &self.volume {
            source.dims.validate()?;
        }
        Ok(())
    }
}
