//! Detection request construction
//!
//! Pure and total: the same image and credentials always yield an equal
//! request, and therefore an equivalent multipart payload.

use detector_common::Credentials;
use reqwest::multipart::{Form, Part};

use crate::models::UploadedImage;

/// Model selector sent with every request
pub const DETECTION_MODEL: &str = "genai";

/// Name of the multipart file part
pub const MEDIA_FIELD: &str = "media";

/// One detection request, ready to be serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub model: &'static str,
    pub credentials: Credentials,
    pub image: UploadedImage,
}

/// Build a detection request from an upload
pub fn build_request(image: UploadedImage, credentials: Credentials) -> AnalysisRequest {
    AnalysisRequest {
        model: DETECTION_MODEL,
        credentials,
        image,
    }
}

impl AnalysisRequest {
    /// Text fields of the multipart payload, in send order
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("models", self.model),
            ("api_user", self.credentials.user_id()),
            ("api_secret", self.credentials.secret()),
        ]
    }

    /// Convert into a multipart form
    ///
    /// Fails only if the MIME type is not a syntactically valid media type.
    pub fn into_form(self) -> reqwest::Result<Form> {
        let fields = self
            .form_fields()
            .map(|(name, value)| (name, value.to_string()));

        let media = Part::bytes(self.image.bytes)
            .file_name(self.image.filename)
            .mime_str(&self.image.mime_type)?;

        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part(MEDIA_FIELD, media);

        Ok(form)
    }
}
