#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(not(target_arch = "wasm32"))]
pub mod component;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod coordinates;
pub mod encoding;
pub mod error;
pub mod models;
pub mod normalise;
pub mod urls;

#[cfg(not(target_arch = "wasm32"))]
pub use component::{LegacyImage, LegacyImageOptions, PreprocessData};
#[cfg(not(target_arch = "wasm32"))]
pub use config::ComponentConfig;
pub use coordinates::get_coordinates_of_clicked_image;
pub use encoding::blob_to_base64;
pub use error::{ComponentError, EncodeError};
pub use models::{FileData, FileInput, ImageData, RootContext};
pub use normalise::normalise_file;
pub use urls::get_fetchable_url_or_file;
