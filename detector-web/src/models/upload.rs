//! Uploaded image as received from the upload form

/// MIME types accepted by the upload form
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// One uploaded file
///
/// Owned by the analysis cycle that received it. Bytes are forwarded
/// untouched; the declared MIME type is not checked against the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Resolve the MIME type of an upload
///
/// Uses the declared content type when present, otherwise infers it from
/// the `.jpg`/`.jpeg`/`.png` extension. Returns `None` for anything outside
/// [`ACCEPTED_MIME_TYPES`]. An accepted declared type is returned verbatim.
pub fn resolve_mime_type(declared: Option<&str>, filename: &str) -> Option<String> {
    let declared = declared
        .map(str::trim)
        .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("application/octet-stream"));

    match declared {
        Some(mime) => ACCEPTED_MIME_TYPES
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(mime))
            .then(|| mime.to_string()),
        None => mime_from_extension(filename).map(str::to_string),
    }
}

fn mime_from_extension(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_kept_verbatim() {
        assert_eq!(
            resolve_mime_type(Some("image/png"), "photo.jpg").as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn test_missing_type_inferred_from_extension() {
        assert_eq!(resolve_mime_type(None, "IMG_0001.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(resolve_mime_type(None, "scan.jpeg").as_deref(), Some("image/jpeg"));
        assert_eq!(
            resolve_mime_type(Some("application/octet-stream"), "a.png").as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn test_unsupported_types_rejected() {
        assert_eq!(resolve_mime_type(Some("image/gif"), "anim.gif"), None);
        assert_eq!(resolve_mime_type(None, "notes.txt"), None);
        assert_eq!(resolve_mime_type(None, "no_extension"), None);
    }
}
