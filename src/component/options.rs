//! Constructor options for the LegacyImage component.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

macro_rules! option_enum {
  (
    $(#[$meta:meta])*
    $name:ident, parameter = $parameter:literal, {
      $($(#[$variant_meta:meta])* $variant:ident => $text:literal),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
    #[serde(try_from = "String", into = "&'static str")]
    pub enum $name {
      $($(#[$variant_meta])* $variant),+
    }

    impl $name {
      /// Accepted spellings.
      pub const CHOICES: &'static [&'static str] = &[$($text),+];

      /// Spelling used by the host framework.
      pub fn as_str(self) -> &'static str {
        match self {
          $(Self::$variant => $text),+
        }
      }
    }

    impl FromStr for $name {
      type Err = ComponentError;

      fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
          $($text => Ok(Self::$variant),)+
          other => Err(ComponentError::InvalidOption {
            parameter: $parameter,
            value: other.to_string(),
            choices: Self::CHOICES,
          }),
        }
      }
    }

    impl TryFrom<String> for $name {
      type Error = ComponentError;

      fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
      }
    }

    impl From<$name> for &'static str {
      fn from(value: $name) -> Self {
        value.as_str()
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }
  };
}

option_enum! {
  /// Pixel format the background image is converted to before reaching the model.
  ImageMode, parameter = "image_mode", {
    /// 1-bit black and white, Floyd-Steinberg dithered.
    Bilevel => "1",
    /// 8-bit greyscale.
    L => "L",
    /// 8-bit colour.
    Rgb => "RGB",
    /// 8-bit colour with alpha.
    Rgba => "RGBA",
    /// 16-bit greyscale.
    I => "I",
  }
}

option_enum! {
  /// How preprocessed images are handed to the model.
  OutputType, parameter = "type", {
    /// In-memory pixel buffer.
    Numpy => "numpy",
    /// In-memory image object.
    Pil => "pil",
    /// Path to a PNG written into the cache directory.
    Filepath => "filepath",
  }
}

option_enum! {
  /// Where the image comes from in the front end.
  Source, parameter = "source", {
    /// File upload.
    Upload => "upload",
    /// Webcam capture.
    Webcam => "webcam",
    /// Blank drawing canvas.
    Canvas => "canvas",
  }
}

option_enum! {
  /// Editing tool offered on top of the image.
  Tool, parameter = "tool", {
    /// Crop and rotate.
    Editor => "editor",
    /// Pixel selection.
    Select => "select",
    /// Monochrome sketch producing a mask.
    Sketch => "sketch",
    /// Colour sketch painted onto the image.
    ColorSketch => "color-sketch",
  }
}

impl Default for ImageMode {
  fn default() -> Self {
    Self::Rgb
  }
}

impl Default for OutputType {
  fn default() -> Self {
    Self::Numpy
  }
}

impl Default for Source {
  fn default() -> Self {
    Self::Upload
  }
}

impl Tool {
  /// Tool used when none is configured: sketching on a canvas, editing otherwise.
  pub fn default_for(source: Source) -> Self {
    match source {
      Source::Canvas => Self::Sketch,
      Source::Upload | Source::Webcam => Self::Editor,
    }
  }
}

/// Target size for resize-and-crop. A missing side keeps the image's own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Shape {
  /// Target width.
  pub width: Option<u32>,
  /// Target height.
  pub height: Option<u32>,
}

/// Everything the component accepts at construction time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LegacyImageOptions {
  /// Display height in pixels.
  pub height: Option<u32>,
  /// Display width in pixels.
  pub width: Option<u32>,
  /// Pixel format handed to the model.
  pub image_mode: ImageMode,
  /// Representation handed to the model.
  #[serde(rename = "type")]
  pub output_type: OutputType,
  /// Component label.
  pub label: Option<String>,
  /// Whether the label is shown.
  pub show_label: Option<bool>,
  /// Whether the download button is shown.
  pub show_download_button: bool,
  /// Whether the component sits in a padded container.
  pub container: bool,
  /// Relative width next to sibling components.
  pub scale: Option<u32>,
  /// Minimum pixel width before wrapping.
  pub min_width: u32,
  /// Whether users may upload and edit.
  pub interactive: Option<bool>,
  /// Whether the component is rendered visible.
  pub visible: bool,
  /// Stream webcam frames continuously.
  pub streaming: bool,
  /// DOM id.
  pub elem_id: Option<String>,
  /// DOM classes.
  pub elem_classes: Vec<String>,
  /// Mirror webcam captures horizontally.
  pub mirror_webcam: bool,
  /// Whether the share button is shown.
  pub show_share_button: Option<bool>,
  /// Image source.
  pub source: Source,
  /// Invert colours before handing the image over.
  pub invert_colors: bool,
  /// Resize-and-crop target.
  pub shape: Option<Shape>,
  /// Editing tool; derived from the source when unset.
  pub tool: Option<Tool>,
  /// Brush radius for sketch tools.
  pub brush_radius: Option<f32>,
  /// Brush colour for sketch tools.
  pub brush_color: String,
  /// Opacity of the mask layer.
  pub mask_opacity: f32,
}

impl Default for LegacyImageOptions {
  fn default() -> Self {
    Self {
      height: None,
      width: None,
      image_mode: ImageMode::default(),
      output_type: OutputType::default(),
      label: None,
      show_label: None,
      show_download_button: true,
      container: true,
      scale: None,
      min_width: 160,
      interactive: None,
      visible: true,
      streaming: false,
      elem_id: None,
      elem_classes: Vec::new(),
      mirror_webcam: true,
      show_share_button: None,
      source: Source::default(),
      invert_colors: false,
      shape: None,
      tool: None,
      brush_radius: None,
      brush_color: "#000000".into(),
      mask_opacity: 0.7,
    }
  }
}
