//! Raw 8-bit voxel volumes.
//!
//! Volumes are headerless byte dumps, x varying fastest, then y, then z.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolsliceError};

/// Voxel counts along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeDims {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl VolumeDims {
    /// Creates dimensions, rejecting any zero axis.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        let dims = Self {
            width,
            height,
            depth,
        };
        dims.validate()?;
        Ok(dims)
    }

    /// Cubic volume with `size` voxels per side.
    pub fn cube(size: u32) -> Result<Self> {
        Self::new(size, size, size)
    }

    /// Checks that no axis is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(VolsliceError::InvalidDimensions {
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        }
        Ok(())
    }

    /// Total number of voxels.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        Some(x as usize + w * (y as usize + h * z as usize))
    }
}

impl Default for VolumeDims {
    /// The 256³ scans the renderer was built around.
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            depth: 256,
        }
    }
}

/// An in-memory 8-bit scalar volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVolume {
    dims: VolumeDims,
    data: Vec<u8>,
}

impl RawVolume {
    /// Wraps voxel bytes, checking their count against `dims`.
    pub fn from_bytes(dims: VolumeDims, data: Vec<u8>) -> Result<Self> {
        dims.validate()?;
        let expected = dims.voxel_count();
        if data.len() != expected {
            return Err(VolsliceError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Reads a raw volume file.
    pub fn from_file(path: impl AsRef<Path>, dims: VolumeDims) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!(
            "read {} bytes of voxel data from {}",
            data.len(),
            path.display()
        );
        Self::from_bytes(dims, data)
    }

    #[must_use]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the voxel at `(x, y, z)`, or `None` outside the volume.
    #[must_use]
    pub fn voxel(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        self.dims.index(x, y, z).map(|i| self.data[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            VolumeDims::new(4, 0, 4),
            Err(VolsliceError::InvalidDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let dims = VolumeDims::cube(2).unwrap();
        let err = RawVolume::from_bytes(dims, vec![0; 7]).unwrap_err();
        assert!(matches!(
            err,
            VolsliceError::SizeMismatch {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_voxel_indexing_x_fastest() {
        let dims = VolumeDims::new(2, 3, 4).unwrap();
        let data: Vec<u8> = (0..24).collect();
        let volume = RawVolume::from_bytes(dims, data).unwrap();

        assert_eq!(volume.voxel(0, 0, 0), Some(0));
        assert_eq!(volume.voxel(1, 0, 0), Some(1));
        assert_eq!(volume.voxel(0, 1, 0), Some(2));
        assert_eq!(volume.voxel(0, 0, 1), Some(6));
        assert_eq!(volume.voxel(1, 2, 3), Some(23));
        assert_eq!(volume.voxel(2, 0, 0), None);
        assert_eq!(volume.voxel(0, 0, 4), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[7u8; 27]).unwrap();
        file.flush().unwrap();

        let volume = RawVolume::from_file(file.path(), VolumeDims::cube(3).unwrap()).unwrap();
        assert_eq!(volume.data().len(), 27);
        assert_eq!(volume.voxel(2, 2, 2), Some(7));
    }

    #[test]
    fn test_missing_file() {
        let err = RawVolume::from_file("/nonexistent/brain.raw", VolumeDims::default()).unwrap_err();
        assert!(matches!(err, VolsliceError::IoError(_)));
    }
}
