use crate::error::ClientError;
use bytes::Bytes;
use reqwest::multipart::Part;

const DEFAULT_FILE_NAME: &str = "upload";
const GENERIC_MEDIA_TYPE: &str = "application/octet-stream";

/// An image as uploaded by the user, before it is sent to the backend.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    data: Bytes,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl ImagePayload {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            content_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        self.file_name = (!file_name.trim().is_empty()).then_some(file_name);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.content_type = (!content_type.trim().is_empty()).then_some(content_type);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Checks the payload is a non-empty image and returns its media type.
    ///
    /// A declared media type must be `image/*`. Browsers declare
    /// `application/octet-stream` when they do not know, so that case and a
    /// missing declaration both fall back to sniffing the bytes.
    pub fn validate(&self) -> Result<String, ClientError> {
        if self.data.is_empty() {
            return Err(ClientError::Validation("no image was provided".into()));
        }

        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.eq_ignore_ascii_case(GENERIC_MEDIA_TYPE) => {
                if declared.to_ascii_lowercase().starts_with("image/") {
                    Ok(declared.to_string())
                } else {
                    Err(ClientError::Validation(format!(
                        "{} is not an image media type",
                        declared
                    )))
                }
            }
            _ => image::guess_format(&self.data)
                .map(|format| format.to_mime_type().to_string())
                .map_err(|_| {
                    ClientError::Validation("uploaded file is not a recognised image".into())
                }),
        }
    }

    pub(crate) fn into_part(self) -> Result<Part, ClientError> {
        let media_type = self.validate()?;
        let file_name = self
            .file_name
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        Part::bytes(self.data.to_vec())
            .file_name(file_name)
            .mime_str(&media_type)
            .map_err(|e| ClientError::Validation(format!("invalid media type {}: {}", media_type, e)))
    }
}

#[cfg(test)]
pub(crate) fn png_fixture() -> Vec<u8> {
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(8, 8, Rgb([255, 0, 0]));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
    cursor.into_inner()
}
