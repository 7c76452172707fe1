//! Base64 data URL encoding and decoding for image payloads.

use std::io::Read;

use base64::{Engine as _, engine::general_purpose};

use crate::error::EncodeError;

/// MIME type used when a blob carries no type and its contents are not a known image.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

const BASE64_MARKER: &str = ";base64,";

/// Read a blob to completion and encode it as a `data:` URL.
///
/// Read failures are reported instead of leaving the caller waiting forever. When
/// `mime_type` is `None` or empty the type is sniffed from the leading bytes.
pub fn blob_to_base64<R: Read>(mut blob: R, mime_type: Option<&str>) -> Result<String, EncodeError> {
  let mut bytes = Vec::new();
  blob.read_to_end(&mut bytes)?;
  Ok(bytes_to_data_url(&bytes, mime_type))
}

/// Encode in-memory bytes as a `data:` URL.
pub fn bytes_to_data_url(bytes: &[u8], mime_type: Option<&str>) -> String {
  let mime_type = match mime_type.map(str::trim) {
    Some(mime) if !mime.is_empty() => mime,
    _ => guess_mime_type(bytes),
  };
  format!(
    "data:{mime_type}{BASE64_MARKER}{}",
    general_purpose::STANDARD.encode(bytes)
  )
}

/// Best-effort MIME type for raw bytes, based on image signatures.
pub fn guess_mime_type(bytes: &[u8]) -> &'static str {
  image::guess_format(bytes)
    .map(|format| format.to_mime_type())
    .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Contents of a decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUrl {
  /// Declared MIME type, when the input carried a header.
  pub mime_type: Option<String>,
  /// Decoded payload.
  pub bytes: Vec<u8>,
}

/// Decode a base64 `data:` URL, or a bare base64 string, into raw bytes.
pub fn decode_data_url(value: &str) -> Result<DecodedDataUrl, EncodeError> {
  let normalized = value.trim();

  let Some(rest) = strip_data_scheme(normalized) else {
    let bytes = general_purpose::STANDARD.decode(normalized)?;
    return Ok(DecodedDataUrl {
      mime_type: None,
      bytes,
    });
  };

  let (header, payload) = rest
    .split_once(',')
    .ok_or_else(|| EncodeError::InvalidDataUrl("missing ',' separator".to_string()))?;
  let Some(mime_type) = header
    .to_ascii_lowercase()
    .strip_suffix(";base64")
    .map(str::to_string)
  else {
    return Err(EncodeError::InvalidDataUrl(
      "only base64 payloads are supported".to_string(),
    ));
  };

  let bytes = general_purpose::STANDARD.decode(payload.trim())?;
  Ok(DecodedDataUrl {
    mime_type: (!mime_type.is_empty()).then_some(mime_type),
    bytes,
  })
}

fn strip_data_scheme(value: &str) -> Option<&str> {
  let prefix = value.get(..5)?;
  prefix
    .eq_ignore_ascii_case("data:")
    .then(|| &value[5..])
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io;

  const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

  struct FailingReader;

  impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
      Err(io::Error::other("disk went away"))
    }
  }

  #[test]
  fn encodes_blob_with_declared_type() {
    let url = blob_to_base64(&b"hello"[..], Some("text/plain")).unwrap();
    assert_eq!(url, "data:text/plain;base64,aGVsbG8=");
  }

  #[test]
  fn sniffs_image_types_when_undeclared() {
    let url = bytes_to_data_url(PNG_SIGNATURE, None);
    assert!(url.starts_with("data:image/png;base64,"));
  }

  #[test]
  fn falls_back_to_octet_stream() {
    assert_eq!(bytes_to_data_url(b"", Some("  ")), "data:application/octet-stream;base64,");
  }

  #[test]
  fn read_failures_are_reported() {
    let err = blob_to_base64(FailingReader, Some("image/png")).unwrap_err();
    assert!(matches!(err, EncodeError::Read(_)));
    assert!(err.to_string().contains("disk went away"));
  }

  #[test]
  fn decodes_data_urls() {
    let decoded = decode_data_url("data:text/plain;base64,aGVsbG8=").unwrap();
    assert_eq!(decoded.mime_type.as_deref(), Some("text/plain"));
    assert_eq!(decoded.bytes, b"hello");
  }

  #[test]
  fn decodes_bare_base64() {
    let decoded = decode_data_url("aGVsbG8=").unwrap();
    assert_eq!(decoded.mime_type, None);
    assert_eq!(decoded.bytes, b"hello");
  }

  #[test]
  fn rejects_percent_encoded_data_urls() {
    let err = decode_data_url("data:text/plain,hello").unwrap_err();
    assert!(matches!(err, EncodeError::InvalidDataUrl(_)));
  }

  #[test]
  fn rejects_corrupt_payloads() {
    let err = decode_data_url("data:image/png;base64,@@@").unwrap_err();
    assert!(matches!(err, EncodeError::Decode(_)));
  }

  #[test]
  fn encoding_then_decoding_keeps_bytes() {
    let url = bytes_to_data_url(PNG_SIGNATURE, None);
    assert_eq!(decode_data_url(&url).unwrap().bytes, PNG_SIGNATURE);
  }
}
