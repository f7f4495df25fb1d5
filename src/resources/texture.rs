//! Texture file loading: disk read, decode, GPU upload.

use std::path::Path;

use crate::data_structures::texture::Texture;
use crate::error::DecodeError;
use crate::resources::TextureUpload;

/// Read a file into memory, attributing IO failures to the texture path.
pub fn load_binary(path: &Path) -> Result<Vec<u8>, DecodeError> {
    std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// WGPU-backed [`TextureUpload`] implementation.
///
/// Decodes image files with the `image` crate (format auto-detected from the
/// file contents) and uploads them through [`Texture::from_image`], which
/// picks the GPU format from the decoded channel count. `srgb` applies to
/// every texture this loader produces; use one loader per color space when
/// mixing color and data maps.
pub struct WgpuTextureLoader<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub srgb: bool,
}

impl<'a> WgpuTextureLoader<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            srgb: true,
        }
    }
}

impl TextureUpload for WgpuTextureLoader<'_> {
    type Texture = Texture;

    fn decode_and_upload(&mut self, path: &Path) -> Result<Texture, DecodeError> {
        let bytes = load_binary(path)?;
        let img = image::load_from_memory(&bytes).map_err(|source| DecodeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Texture::from_image(
            self.device,
            self.queue,
            &img,
            path.to_str(),
            self.srgb,
        ))
    }
}
