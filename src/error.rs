//! Error types shared across the crate.

use std::path::PathBuf;

/// Failures while producing or reading base64 payloads.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
  /// The blob could not be read to completion.
  #[error("failed to read blob: {0}")]
  Read(#[from] std::io::Error),
  /// The input is not a base64 data URL.
  #[error("invalid data URL: {0}")]
  InvalidDataUrl(String),
  /// The payload is not valid base64.
  #[error("invalid base64 payload: {0}")]
  Decode(#[from] base64::DecodeError),
}

/// Failures raised by the backend component.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
  /// A constructor option holds a value outside its allowed set.
  #[error("invalid value for parameter `{parameter}`: {value}. Please choose from one of: {choices:?}")]
  InvalidOption {
    /// Option name.
    parameter: &'static str,
    /// Rejected value.
    value: String,
    /// Accepted values.
    choices: &'static [&'static str],
  },
  /// Streaming was requested for a source other than the webcam.
  #[error("image streaming only available if source is 'webcam'")]
  StreamingRequiresWebcam,
  /// The payload carried no background image.
  #[error("payload does not contain an image")]
  MissingImage,
  /// Decoding or encoding pixels failed.
  #[error("image codec error: {0}")]
  Image(#[from] image::ImageError),
  /// A base64 payload was malformed.
  #[error(transparent)]
  Encode(#[from] EncodeError),
  /// Reading or writing a cached file failed.
  #[error("failed to access {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
}
