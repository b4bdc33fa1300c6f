//! Multipart form decoding shared by the generation and upload endpoints.
//!
//! The Android client posts `multipart/form-data` with a mix of text fields
//! and at most one file per field name. Decoding failures and missing
//! required fields are client errors (400), not server errors.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use crate::http::error::AppError;

/// A file field of a multipart request.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The decoded text and file fields of one multipart request.
#[derive(Default)]
pub struct FormFields {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormFields {
    /// Drain a multipart stream. Fields carrying a filename are collected
    /// as files, everything else as text. A repeated field name keeps the
    /// last occurrence.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
                fields.files.insert(
                    name,
                    UploadedFile {
                        filename,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let text = field.text().await.map_err(bad_multipart)?;
                fields.texts.insert(name, text);
            }
        }

        Ok(fields)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// A required text field; absence is a 400.
    pub fn require_text(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("missing form field '{name}'")))
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// A required file field; absence is a 400.
    pub fn require_file(&self, name: &str) -> Result<&UploadedFile, AppError> {
        self.file(name)
            .ok_or_else(|| AppError::Validation(format!("missing file field '{name}'")))
    }
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::Validation(format!("malformed multipart request: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with(texts: &[(&str, &str)]) -> FormFields {
        let mut fields = FormFields::default();
        for (name, value) in texts {
            fields.texts.insert(name.to_string(), value.to_string());
        }
        fields
    }

    #[test]
    fn test_require_text_present() {
        let fields = fields_with(&[("prompt", "a reading nook")]);
        assert_eq!(fields.require_text("prompt").unwrap(), "a reading nook");
    }

    #[test]
    fn test_require_text_missing_is_validation_error() {
        let fields = fields_with(&[]);
        let err = fields.require_text("prompt").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_require_file_missing_is_validation_error() {
        let fields = FormFields::default();
        assert!(matches!(
            fields.require_file("file").unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
