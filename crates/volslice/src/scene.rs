//! Camera, slicer and options wired together for an application loop.

use volslice_core::{
    CubeGeometry, FrameContext, Options, OutputMesh, RawVolume, Result, SliceStats, VolumeSlicer,
};
use volslice_render::{Camera, CameraCommand};

/// Everything an application needs to produce the slice mesh each frame.
///
/// The camera is the only thing that changes between frames; [`frame`]
/// reads its view matrix once and reslices the cube.
///
/// [`frame`]: VolumeScene::frame
#[derive(Debug, Clone)]
pub struct VolumeScene {
    camera: Camera,
    slicer: VolumeSlicer,
    options: Options,
}

impl VolumeScene {
    /// Creates a scene with the default camera.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        let slicer = VolumeSlicer::new(CubeGeometry::new(options.tex_coords));
        log::debug!(
            "created volume scene with slice step {}",
            options.slicing.step
        );
        Ok(Self {
            camera: Camera::default(),
            slicer,
            options,
        })
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Forwards a movement or rotation command to the camera.
    pub fn apply(&mut self, command: CameraCommand) {
        self.camera.apply(command);
    }

    /// Slices the cube for the camera's current view.
    pub fn frame(&mut self) -> &OutputMesh {
        let context = FrameContext::new(self.camera.view_matrix(), self.options.slicing);
        self.slicer.slice(&context)
    }

    /// Mesh from the most recent [`frame`](VolumeScene::frame) call.
    #[must_use]
    pub fn mesh(&self) -> &OutputMesh {
        self.slicer.mesh()
    }

    #[must_use]
    pub fn last_stats(&self) -> SliceStats {
        self.slicer.last_stats()
    }

    /// Reads the configured volume file, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its size does not
    /// match the configured dimensions.
    pub fn load_volume(&self) -> Result<Option<RawVolume>> {
        match &self.options.volume {
            Some(source) => RawVolume::from_file(&source.path, source.dims).map(Some),
            None => Ok(None),
        }
    }
}
