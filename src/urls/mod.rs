//! Helpers for turning file and stream names into URLs the serving host can answer.
//!
//! Detection of already-absolute references lives apart from URL construction so that the
//! two halves can be tested independently. Both are pure string functions and are shared by
//! the file normaliser and the backend component.

mod fetchable;
mod filters;

pub use fetchable::{get_fetchable_url_or_file, get_stream_url};
pub use filters::{is_absolute_http_url, is_data_url};
