//! Backend half of the LegacyImage component.
//!
//! The front end sends [`ImageData`] payloads holding base64 images; [`LegacyImage::preprocess`]
//! turns them into values a model function can consume, and [`LegacyImage::postprocess`] turns
//! model outputs back into payloads. Options are validated once, at construction.

mod options;
mod processing;

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::config::ComponentConfig;
use crate::coordinates::select_data_for_click;
use crate::error::ComponentError;
use crate::models::{ClickEvent, Event, ImageData, ImageElement, SelectData};
use crate::urls::{is_absolute_http_url, is_data_url};

pub use options::{ImageMode, LegacyImageOptions, OutputType, Shape, Source, Tool};
pub use processing::{
  convert_mode, copy_file_to_cache, decode_image, file_to_data_url, image_to_data_url,
  resize_and_crop, save_image_to_cache, whiten_mask,
};

/// Example value shown in example tables.
pub const EXAMPLE_IMAGE_URL: &str =
  "https://raw.githubusercontent.com/gradio-app/gradio/main/test/test_files/bus.png";

/// Image handed to or returned from a model function.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageValue {
  /// Decoded pixels.
  Image(DynamicImage),
  /// Local file.
  Path(PathBuf),
  /// Remote `http(s)` URL or inline `data:` URL.
  Url(String),
}

impl From<DynamicImage> for ImageValue {
  fn from(image: DynamicImage) -> Self {
    Self::Image(image)
  }
}

impl From<PathBuf> for ImageValue {
  fn from(path: PathBuf) -> Self {
    Self::Path(path)
  }
}

impl From<String> for ImageValue {
  fn from(value: String) -> Self {
    if is_absolute_http_url(&value) || is_data_url(&value) {
      Self::Url(value)
    } else {
      Self::Path(PathBuf::from(value))
    }
  }
}

/// Model-side value: the background image and an optional mask.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreprocessData {
  /// Background image.
  pub back: Option<ImageValue>,
  /// Sketch mask.
  pub mask: Option<ImageValue>,
}

/// A configured LegacyImage component.
#[derive(Debug, Clone)]
pub struct LegacyImage {
  options: LegacyImageOptions,
  tool: Tool,
  show_share_button: bool,
  cache_dir: PathBuf,
}

impl LegacyImage {
  /// Events the component dispatches.
  pub const EVENTS: [Event; 6] = [
    Event::Clear,
    Event::Change,
    Event::Stream,
    Event::Select,
    Event::Upload,
    Event::Edit,
  ];

  /// Validate options and build the component. Cached files land under `cache_dir`.
  pub fn new(options: LegacyImageOptions, cache_dir: impl Into<PathBuf>) -> Result<Self, ComponentError> {
    if options.streaming && options.source != Source::Webcam {
      return Err(ComponentError::StreamingRequiresWebcam);
    }

    let tool = options
      .tool
      .unwrap_or_else(|| Tool::default_for(options.source));
    let show_share_button = options.show_share_button.unwrap_or(false);

    Ok(Self {
      options,
      tool,
      show_share_button,
      cache_dir: cache_dir.into(),
    })
  }

  /// Build the component described by a loaded configuration.
  pub fn from_config(config: &ComponentConfig) -> Result<Self, ComponentError> {
    Self::new(config.component.clone(), config.cache_dir.clone())
  }

  /// Options the component was built from.
  pub fn options(&self) -> &LegacyImageOptions {
    &self.options
  }

  /// Effective editing tool.
  pub fn tool(&self) -> Tool {
    self.tool
  }

  /// Whether the share button is shown.
  pub fn show_share_button(&self) -> bool {
    self.show_share_button
  }

  /// Directory receiving cached files.
  pub fn cache_dir(&self) -> &Path {
    &self.cache_dir
  }

  /// Restate the webcam-only streaming rule that [`LegacyImage::new`] already enforces.
  ///
  /// Options are fixed after construction, so this always returns `Ok` for a built
  /// component. It exists for hosts that ask every component before opening a stream.
  pub fn check_streamable(&self) -> Result<(), ComponentError> {
    if self.options.streaming && self.options.source != Source::Webcam {
      return Err(ComponentError::StreamingRequiresWebcam);
    }
    Ok(())
  }

  fn sketches_mask(&self) -> bool {
    self.tool == Tool::Sketch && matches!(self.options.source, Source::Upload | Source::Webcam)
  }

  /// Decode a front-end payload into model inputs.
  pub fn preprocess(&self, payload: Option<ImageData>) -> Result<Option<PreprocessData>, ComponentError> {
    let Some(payload) = payload else {
      return Ok(None);
    };

    let mask = if self.sketches_mask() {
      payload.mask.as_deref().map(decode_image).transpose()?
    } else {
      None
    };
    let back = payload.back.as_deref().ok_or(ComponentError::MissingImage)?;
    let mut image = convert_mode(decode_image(back)?, self.options.image_mode);
    log::debug!(
      "decoded {}x{} image as {}",
      image.width(),
      image.height(),
      self.options.image_mode
    );

    if let Some(shape) = self.options.shape {
      image = resize_and_crop(&image, shape);
    }
    if self.options.invert_colors {
      image.invert();
    }
    if self.options.source == Source::Webcam
      && self.options.mirror_webcam
      && self.tool != Tool::ColorSketch
    {
      image = image.fliph();
    }

    if self.sketches_mask() {
      let mask = mask.map(whiten_mask);
      return Ok(Some(PreprocessData {
        back: Some(self.format_image(image)?),
        mask: mask.map(|mask| self.format_image(mask)).transpose()?,
      }));
    }

    Ok(Some(PreprocessData {
      back: Some(self.format_image(image)?),
      mask: None,
    }))
  }

  /// Encode a model output into a front-end payload.
  pub fn postprocess(&self, value: Option<PreprocessData>) -> Result<Option<ImageData>, ComponentError> {
    let Some(value) = value else {
      return Ok(None);
    };

    let back = match value.back.ok_or(ComponentError::MissingImage)? {
      ImageValue::Image(image) => image_to_data_url(&image)?,
      ImageValue::Path(path) => file_to_data_url(&path)?,
      ImageValue::Url(url) => url,
    };

    Ok(Some(ImageData {
      back: Some(back),
      mask: None,
    }))
  }

  /// Prepare an example value: local files are copied into the cache, URLs are kept.
  pub fn as_example(&self, input: Option<&str>) -> Result<Option<String>, ComponentError> {
    let Some(input) = input else {
      return Ok(None);
    };
    if is_absolute_http_url(input) || is_data_url(input) {
      return Ok(Some(input.to_string()));
    }

    let cached = copy_file_to_cache(Path::new(input), &self.cache_dir)?;
    Ok(Some(cached.to_string_lossy().into_owned()))
  }

  /// Value used to populate example tables.
  pub fn example_inputs(&self) -> &'static str {
    EXAMPLE_IMAGE_URL
  }

  /// Payload of the `select` event for a click, or `None` when it missed the image.
  pub fn select(&self, event: &ClickEvent, image: &ImageElement) -> Option<SelectData> {
    select_data_for_click(event, image)
  }

  fn format_image(&self, image: DynamicImage) -> Result<ImageValue, ComponentError> {
    match self.options.output_type {
      OutputType::Numpy | OutputType::Pil => Ok(ImageValue::Image(image)),
      OutputType::Filepath => save_image_to_cache(&image, &self.cache_dir).map(ImageValue::Path),
    }
  }
}
