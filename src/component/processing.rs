//! Pixel transforms and cache I/O behind preprocessing and postprocessing.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::{self, BiLevel, FilterType};
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb};

use super::options::{ImageMode, Shape};
use crate::encoding::{bytes_to_data_url, decode_data_url, guess_mime_type};
use crate::error::ComponentError;

const CACHED_IMAGE_NAME: &str = "image.png";

/// Decode a base64 data URL into an image.
pub fn decode_image(data_url: &str) -> Result<DynamicImage, ComponentError> {
  let decoded = decode_data_url(data_url)?;
  Ok(image::load_from_memory(&decoded.bytes)?)
}

/// Encode an image as a PNG data URL.
pub fn image_to_data_url(image: &DynamicImage) -> Result<String, ComponentError> {
  let bytes = encode_png(image)?;
  Ok(bytes_to_data_url(&bytes, Some("image/png")))
}

/// Read a file and encode it as a data URL, typed by its extension when recognised.
pub fn file_to_data_url(path: &Path) -> Result<String, ComponentError> {
  let bytes = fs::read(path).map_err(|source| ComponentError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let mime_type = ImageFormat::from_path(path)
    .map(|format| format.to_mime_type())
    .unwrap_or_else(|_| guess_mime_type(&bytes));
  Ok(bytes_to_data_url(&bytes, Some(mime_type)))
}

/// Convert to the requested pixel format.
pub fn convert_mode(image: DynamicImage, mode: ImageMode) -> DynamicImage {
  match mode {
    ImageMode::Bilevel => {
      let mut luma = image.into_luma8();
      imageops::dither(&mut luma, &BiLevel);
      DynamicImage::ImageLuma8(luma)
    }
    ImageMode::L => DynamicImage::ImageLuma8(image.into_luma8()),
    ImageMode::Rgb => DynamicImage::ImageRgb8(image.into_rgb8()),
    ImageMode::Rgba => DynamicImage::ImageRgba8(image.into_rgba8()),
    ImageMode::I => DynamicImage::ImageLuma16(image.into_luma16()),
  }
}

/// Crop the centre of `image` to the target aspect ratio, then resize to the target size.
pub fn resize_and_crop(image: &DynamicImage, shape: Shape) -> DynamicImage {
  let (source_width, source_height) = image.dimensions();
  let target_width = shape.width.unwrap_or(source_width).max(1);
  let target_height = shape.height.unwrap_or(source_height).max(1);
  if source_width == 0 || source_height == 0 {
    return image.clone();
  }

  let target_ratio = f64::from(target_width) / f64::from(target_height);
  let source_ratio = f64::from(source_width) / f64::from(source_height);

  let (crop_width, crop_height) = if source_ratio > target_ratio {
    let width = (f64::from(source_height) * target_ratio).round() as u32;
    (width.clamp(1, source_width), source_height)
  } else {
    let height = (f64::from(source_width) / target_ratio).round() as u32;
    (source_width, height.clamp(1, source_height))
  };

  let x = (source_width - crop_width) / 2;
  let y = (source_height - crop_height) / 2;

  image
    .crop_imm(x, y, crop_width, crop_height)
    .resize_exact(target_width, target_height, FilterType::CatmullRom)
}

/// Replace a mask carrying transparency by an RGB image of its alpha channel, so that
/// every painted pixel reads as white.
pub fn whiten_mask(mask: DynamicImage) -> DynamicImage {
  if !mask.color().has_alpha() {
    return mask;
  }

  let rgba = mask.into_rgba8();
  let (width, height) = rgba.dimensions();
  let whitened: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
    let alpha = rgba.get_pixel(x, y).0[3];
    Rgb([alpha, alpha, alpha])
  });
  DynamicImage::ImageRgb8(whitened)
}

/// Write the image as PNG into a content-addressed directory under `cache_dir`.
pub fn save_image_to_cache(image: &DynamicImage, cache_dir: &Path) -> Result<PathBuf, ComponentError> {
  let bytes = encode_png(image)?;
  write_to_cache(&bytes, CACHED_IMAGE_NAME, cache_dir)
}

/// Copy a file into a content-addressed directory under `cache_dir`, keeping its file name.
pub fn copy_file_to_cache(path: &Path, cache_dir: &Path) -> Result<PathBuf, ComponentError> {
  let bytes = fs::read(path).map_err(|source| ComponentError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let file_name = path
    .file_name()
    .and_then(|name| name.to_str())
    .unwrap_or(CACHED_IMAGE_NAME);
  write_to_cache(&bytes, file_name, cache_dir)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ComponentError> {
  let mut bytes = Vec::new();
  image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
  Ok(bytes)
}

fn write_to_cache(bytes: &[u8], file_name: &str, cache_dir: &Path) -> Result<PathBuf, ComponentError> {
  let directory = cache_dir.join(content_digest(bytes));
  fs::create_dir_all(&directory).map_err(|source| ComponentError::Io {
    path: directory.clone(),
    source,
  })?;

  let target = directory.join(file_name);
  if !target.exists() {
    fs::write(&target, bytes).map_err(|source| ComponentError::Io {
      path: target.clone(),
      source,
    })?;
    log::info!("cached {} bytes at {}", bytes.len(), target.display());
  }
  Ok(target)
}

/// 64-bit FNV-1a, so cache directory names stay the same across toolchains.
fn content_digest(bytes: &[u8]) -> String {
  const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
  const PRIME: u64 = 0x0100_0000_01b3;
  let hash = bytes
    .iter()
    .fold(OFFSET_BASIS, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME));
  format!("{hash:016x}")
}
