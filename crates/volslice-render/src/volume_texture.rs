//! 3D texture holding the scalar volume the slices sample.

use volslice_core::{RawVolume, VolumeDims};

use crate::error::{RenderError, RenderResult};

/// GPU resources for a volume: an `R8Unorm` 3D texture with a trilinear
/// sampler.
pub struct VolumeTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    dims: VolumeDims,
}

impl VolumeTexture {
    /// Uploads `volume` as a 3D texture.
    ///
    /// Fails if any axis exceeds the device's 3D texture limit.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        volume: &RawVolume,
    ) -> RenderResult<Self> {
        let dims = volume.dims();
        let limit = device.limits().max_texture_dimension_3d;
        check_fits(dims, limit)?;

        let size = wgpu::Extent3d {
            width: dims.width,
            height: dims.height,
            depth_or_array_layers: dims.depth,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("volume texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            volume.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(dims.width),
                rows_per_image: Some(dims.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D3),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("volume sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!(
            "uploaded {}x{}x{} volume texture",
            dims.width,
            dims.height,
            dims.depth
        );

        Ok(Self {
            texture,
            view,
            sampler,
            dims,
        })
    }

    #[must_use]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[must_use]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[must_use]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    #[must_use]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }
}

/// Checks every axis of `dims` against the 3D texture size limit.
pub fn check_fits(dims: VolumeDims, limit: u32) -> RenderResult<()> {
    if dims.width > limit || dims.height > limit || dims.depth > limit {
        return Err(RenderError::TextureTooLarge {
            width: dims.width,
            height: dims.height,
            depth: dims.depth,
            limit,
        });
    }
    Ok(())
}
