//! Rewriting file references into fetchable locations.

use crate::models::{FileData, FileInput};
use crate::urls::{get_fetchable_url_or_file, get_stream_url};

/// Resolve every descriptor in `file` to a URL the serving host can answer.
///
/// The shape of the input is preserved: `None` stays `None`, a list keeps its length and its
/// gaps, and a bare string becomes an inline descriptor without any URL resolution. The input
/// is consumed and a rewritten value is returned.
pub fn normalise_file(
  file: Option<FileInput>,
  root: &str,
  root_url: Option<&str>,
) -> Option<FileInput> {
  let normalised = match file? {
    FileInput::Text(data) => FileInput::File(FileData::inline(data)),
    FileInput::File(descriptor) => FileInput::File(normalise_descriptor(descriptor, root, root_url)),
    FileInput::List(entries) => FileInput::List(
      entries
        .into_iter()
        .map(|entry| entry.map(|descriptor| normalise_descriptor(descriptor, root, root_url)))
        .collect(),
    ),
  };
  Some(normalised)
}

/// Resolve a single descriptor. Descriptors flagged as neither file nor stream are returned
/// as they came in.
pub fn normalise_descriptor(mut descriptor: FileData, root: &str, root_url: Option<&str>) -> FileData {
  if descriptor.is_file {
    descriptor.data = Some(get_fetchable_url_or_file(
      Some(&descriptor.name),
      root,
      root_url,
    ));
  } else if descriptor.is_stream {
    descriptor.data = Some(get_stream_url(&descriptor.name, root, root_url));
  }
  descriptor
}
