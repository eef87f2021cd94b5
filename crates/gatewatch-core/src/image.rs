//! Binary image payloads carried by events and subjects.
//!
//! A payload is always stored together with its media type. Over JSON the
//! bytes travel as standard base64.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Media type assumed when an upload does not declare one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Image bytes plus the media type they were uploaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
  #[serde(rename = "contentType")]
  pub media_type: String,
  #[serde(with = "base64_bytes")]
  pub data:       Bytes,
}

impl ImagePayload {
  pub fn new(media_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
    Self { media_type: media_type.into(), data: data.into() }
  }

  /// Build a payload from an optional, possibly blank, media type.
  pub fn with_optional_type(media_type: Option<&str>, data: impl Into<Bytes>) -> Self {
    let media_type = media_type
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .unwrap_or(DEFAULT_MEDIA_TYPE);
    Self::new(media_type, data)
  }

  pub fn is_empty(&self) -> bool { self.data.is_empty() }

  /// File extension used when the payload is attached to an outgoing message.
  pub fn extension(&self) -> &'static str {
    match self.media_type.as_str() {
      "image/png" => "png",
      "image/gif" => "gif",
      "image/webp" => "webp",
      _ => "jpg",
    }
  }
}

mod base64_bytes {
  use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
  use bytes::Bytes;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(data: &Bytes, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&B64.encode(data))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Bytes, D::Error> {
    let s = String::deserialize(de)?;
    B64.decode(s.as_bytes()).map(Bytes::from).map_err(D::Error::custom)
  }
}
