//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU GPU texture
//! resources, created from decoded image data by the texture loader in
//! [`crate::resources::texture`].

use image::GenericImageView;

/// A GPU texture with a view and sampler.
///
/// The sampler is the fixed default for model textures: repeat wrapping on
/// all axes with linear magnification/minification and linear mipmap
/// filtering.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Upload a decoded image as a GPU texture.
    ///
    /// The texture format follows the decoded channel count: single-channel
    /// images become `R8Unorm`, everything else is expanded to four channels
    /// (WGPU has no 8-bit three-channel format). `srgb` selects
    /// `Rgba8UnormSrgb` over `Rgba8Unorm` for the multi-channel case; color
    /// maps want it, data maps (normals, height) do not.
    ///
    /// No mipmap chain is generated: the texture is uploaded with a single
    /// mip level, and the default sampler's linear mipmap filter only takes
    /// effect if the caller fills further levels itself.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        srgb: bool,
    ) -> Self {
        let dimensions = img.dimensions();

        let (format, data, bytes_per_row) = match img.color().channel_count() {
            1 => (
                wgpu::TextureFormat::R8Unorm,
                img.to_luma8().into_raw(),
                dimensions.0,
            ),
            _ => (
                if srgb {
                    wgpu::TextureFormat::Rgba8UnormSrgb
                } else {
                    wgpu::TextureFormat::Rgba8Unorm
                },
                img.to_rgba8().into_raw(),
                4 * dimensions.0,
            ),
        };

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_default_sampler(device);
        Self {
            texture,
            view,
            sampler,
        }
    }

}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}
