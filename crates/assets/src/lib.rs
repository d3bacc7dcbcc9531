//! Scene textures.
//!
//! The raymarch shader samples five images. Each is decoded from the asset
//! directory when present; anything missing or unreadable is replaced by a
//! generated texture so the scene always renders.

mod procedural;

use std::path::{Path, PathBuf};

/// The five images the raymarch shader samples, in binding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Saturn,
    SaturnRings,
    Galaxy1,
    Galaxy2,
    AccretionDisk,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 5] = [
        TextureSlot::Saturn,
        TextureSlot::SaturnRings,
        TextureSlot::Galaxy1,
        TextureSlot::Galaxy2,
        TextureSlot::AccretionDisk,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TextureSlot::Saturn => "saturn.jpg",
            TextureSlot::SaturnRings => "saturnrings.png",
            TextureSlot::Galaxy1 => "galaxy1.png",
            TextureSlot::Galaxy2 => "galaxy2.png",
            TextureSlot::AccretionDisk => "accretiondisk.jpg",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Generated stand-in for this slot.
    pub fn generate(self) -> TextureImage {
        match self {
            TextureSlot::Saturn => procedural::banded_planet(512, 256),
            TextureSlot::SaturnRings => procedural::ring_gradient(512),
            TextureSlot::Galaxy1 => procedural::starfield(1024, 512, 1, [0.55, 0.35, 0.85]),
            TextureSlot::Galaxy2 => procedural::starfield(1024, 512, 2, [0.95, 0.55, 0.3]),
            TextureSlot::AccretionDisk => procedural::disk_gradient(512),
        }
    }
}

/// Where a texture's pixels came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    File(PathBuf),
    Procedural,
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub source: TextureSource,
}

impl TextureImage {
    pub fn is_procedural(&self) -> bool {
        self.source == TextureSource::Procedural
    }

    /// Downscale, keeping aspect, so neither side exceeds `max_dim`.
    pub fn fit_within(self, max_dim: u32) -> Self {
        let longest = self.width.max(self.height);
        if longest <= max_dim || max_dim == 0 {
            return self;
        }
        let scale = max_dim as f32 / longest as f32;
        let width = ((self.width as f32 * scale) as u32).max(1);
        let height = ((self.height as f32 * scale) as u32).max(1);
        let Some(buffer) = image::RgbaImage::from_raw(self.width, self.height, self.rgba) else {
            tracing::warn!("texture buffer does not match its size; using a blank texture");
            return Self {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
                source: self.source,
            };
        };
        tracing::debug!(
            "downscaling texture {}x{} to {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        let resized =
            image::imageops::resize(&buffer, width, height, image::imageops::FilterType::Triangle);
        Self {
            width,
            height,
            rgba: resized.into_raw(),
            source: self.source,
        }
    }
}

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode one image file into RGBA8.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureImage, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    Ok(TextureImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
        source: TextureSource::File(path.to_path_buf()),
    })
}

/// All five scene textures.
#[derive(Debug, Clone)]
pub struct TextureSet {
    images: Vec<TextureImage>,
}

impl TextureSet {
    /// Load every slot from `dir`, generating whatever cannot be read.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let images = TextureSlot::ALL
            .iter()
            .map(|slot| {
                let path = dir.join(slot.file_name());
                match load_texture(&path) {
                    Ok(image) => {
                        tracing::debug!(
                            "loaded {} ({}x{})",
                            path.display(),
                            image.width,
                            image.height
                        );
                        image
                    }
                    Err(e) => {
                        tracing::warn!("{e}; using generated {:?} texture", slot);
                        slot.generate()
                    }
                }
            })
            .collect();
        Self { images }
    }

    /// Generated textures only, for targets without a filesystem.
    pub fn procedural() -> Self {
        Self {
            images: TextureSlot::ALL.iter().map(|s| s.generate()).collect(),
        }
    }

    pub fn get(&self, slot: TextureSlot) -> &TextureImage {
        &self.images[slot.index()]
    }

    /// Slots paired with their images, in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureSlot, &TextureImage)> {
        TextureSlot::ALL.into_iter().zip(self.images.iter())
    }

    pub fn procedural_count(&self) -> usize {
        self.images.iter().filter(|i| i.is_procedural()).count()
    }
}
