//! Data structures exchanged with the host framework's front end.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::urls::{get_fetchable_url_or_file, get_stream_url};

/// Name given to descriptors lifted from a bare string.
pub const INLINE_FILE_NAME: &str = "file_data";

/// Reference to a file or live stream served by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileData {
  /// Path or filename on the serving host.
  pub name: String,
  /// Fetchable URL or embedded data, rewritten during normalisation.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<String>,
  /// The descriptor names a host-served file that needs a file route.
  #[serde(default)]
  pub is_file: bool,
  /// The descriptor names a live stream that needs a stream route.
  #[serde(default)]
  pub is_stream: bool,
}

impl FileData {
  /// Descriptor for a host-served file.
  pub fn file(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      is_file: true,
      ..Self::default()
    }
  }

  /// Descriptor for a live stream.
  pub fn stream(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      is_stream: true,
      ..Self::default()
    }
  }

  /// Wrap inline data that needs no URL resolution.
  pub fn inline(data: impl Into<String>) -> Self {
    Self {
      name: INLINE_FILE_NAME.to_string(),
      data: Some(data.into()),
      ..Self::default()
    }
  }
}

/// Every shape the file normaliser accepts. Null is modelled as `Option::None` around it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FileInput {
  /// Bare string, lifted into an inline descriptor.
  Text(String),
  /// Single descriptor.
  File(FileData),
  /// Ordered descriptors with gaps preserved.
  List(Vec<Option<FileData>>),
}

/// Base addresses used when building fetchable URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RootContext {
  /// Base URL of the serving host.
  pub root: String,
  /// Proxy base URL; when present every route is prefixed with `/proxy=`.
  #[serde(default)]
  pub root_url: Option<String>,
}

impl RootContext {
  /// Context serving directly from `root`.
  pub fn direct(root: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      root_url: None,
    }
  }

  /// Context routing requests through a proxy root.
  pub fn proxied(root: impl Into<String>, root_url: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      root_url: Some(root_url.into()),
    }
  }

  /// See [`get_fetchable_url_or_file`].
  pub fn fetchable_url(&self, path: Option<&str>) -> String {
    get_fetchable_url_or_file(path, &self.root, self.root_url.as_deref())
  }

  /// See [`get_stream_url`].
  pub fn stream_url(&self, name: &str) -> String {
    get_stream_url(name, &self.root, self.root_url.as_deref())
  }
}

/// Rendered bounding box of an element, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundingBox {
  /// Left edge.
  pub left: f64,
  /// Top edge.
  pub top: f64,
  /// Rendered width.
  pub width: f64,
  /// Rendered height.
  pub height: f64,
}

/// Image element as laid out by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ImageElement {
  /// Width of the decoded image in native pixels.
  pub natural_width: u32,
  /// Height of the decoded image in native pixels.
  pub natural_height: u32,
  /// Where the element is drawn.
  pub bounds: BoundingBox,
}

/// Pointer click in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ClickEvent {
  /// Horizontal viewport position.
  pub client_x: f64,
  /// Vertical viewport position.
  pub client_y: f64,
}

/// Payload carried between the front end and the backend component.
///
/// `back` holds the (possibly edited) image and `mask` the sketch layer, both as base64 data
/// URLs on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageData {
  /// Background image.
  #[serde(default)]
  pub back: Option<String>,
  /// Sketch mask.
  #[serde(default)]
  pub mask: Option<String>,
}

/// Payload of a `select` event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectData {
  /// Selected native pixel as `[x, y]`.
  pub index: [u32; 2],
  /// Value at the selected position, when the component reports one.
  pub value: Option<Value>,
  /// Whether the item became selected.
  #[serde(default = "selected_default")]
  pub selected: bool,
}

fn selected_default() -> bool {
  true
}

impl SelectData {
  /// Selection of a single pixel.
  pub fn pixel(x: u32, y: u32) -> Self {
    Self {
      index: [x, y],
      value: None,
      selected: true,
    }
  }
}

/// Events the component can dispatch to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
  /// The value was cleared.
  Clear,
  /// The value changed.
  Change,
  /// A webcam frame was streamed.
  Stream,
  /// A pixel was selected.
  Select,
  /// A file was uploaded.
  Upload,
  /// The image was edited.
  Edit,
}

impl Event {
  /// Name of the event as the host registers it.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Clear => "clear",
      Self::Change => "change",
      Self::Stream => "stream",
      Self::Select => "select",
      Self::Upload => "upload",
      Self::Edit => "edit",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_input_deserialises_each_shape() {
    let text: FileInput = serde_json::from_str(r#""abc""#).unwrap();
    assert_eq!(text, FileInput::Text("abc".into()));

    let file: FileInput = serde_json::from_str(r#"{"name":"a.png","is_file":true}"#).unwrap();
    assert_eq!(file, FileInput::File(FileData::file("a.png")));

    let list: FileInput =
      serde_json::from_str(r#"[{"name":"a.png","is_file":true},null,{"name":"s","is_stream":true}]"#)
        .unwrap();
    assert_eq!(
      list,
      FileInput::List(vec![
        Some(FileData::file("a.png")),
        None,
        Some(FileData::stream("s")),
      ])
    );
  }

  #[test]
  fn unresolved_data_is_omitted_when_serialising() {
    let json = serde_json::to_value(FileData::file("a.png")).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"name": "a.png", "is_file": true, "is_stream": false})
    );
  }

  #[test]
  fn select_data_defaults_to_selected() {
    let data: SelectData = serde_json::from_str(r#"{"index":[3,4],"value":null}"#).unwrap();
    assert_eq!(data, SelectData::pixel(3, 4));
  }

  #[test]
  fn events_use_host_names() {
    assert_eq!(serde_json::to_string(&Event::Select).unwrap(), r#""select""#);
    assert_eq!(Event::Upload.as_str(), "upload");
  }

  #[test]
  fn root_context_delegates_to_url_builders() {
    let direct = RootContext::direct("http://host");
    assert_eq!(direct.fetchable_url(Some("x.png")), "http://host/file=x.png");
    let proxied = RootContext::proxied("http://host", "proxyhost/");
    assert_eq!(proxied.stream_url("s1"), "/proxy=proxyhost/stream/s1");
  }
}
