//! Collects a `multipart/form-data` upload into text fields and files.
//!
//! Field names are matched against a list of accepted aliases so that both
//! the current names and the ones older recognition clients send resolve.

use std::collections::HashMap;

use axum::extract::Multipart;
use gatewatch_core::image::ImagePayload;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct UploadForm {
  fields: HashMap<String, String>,
  files:  HashMap<String, ImagePayload>,
}

impl UploadForm {
  /// Drain `multipart`. A part is a file when it carries a file name;
  /// everything else is read as UTF-8 text. Empty file parts are dropped.
  pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
    let mut form = Self::default();

    while let Some(field) = multipart.next_field().await? {
      let Some(name) = field.name().map(str::to_owned) else { continue };

      if field.file_name().is_some() {
        let media_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;
        if !data.is_empty() {
          form.files.insert(name, ImagePayload::with_optional_type(media_type.as_deref(), data));
        }
      } else {
        let value = field.text().await?;
        form.fields.insert(name, value);
      }
    }

    Ok(form)
  }

  /// First non-blank text field among `names`, trimmed.
  pub fn text(&self, names: &[&str]) -> Option<String> {
    names
      .iter()
      .filter_map(|n| self.fields.get(*n))
      .map(|v| v.trim())
      .find(|v| !v.is_empty())
      .map(str::to_owned)
  }

  /// First file among `names`.
  pub fn take_file(&mut self, names: &[&str]) -> Option<ImagePayload> {
    names.iter().find_map(|n| self.files.remove(*n))
  }
}
