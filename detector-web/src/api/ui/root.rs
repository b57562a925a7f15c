//! Root page handler - upload form

use axum::response::{Html, IntoResponse};

use super::{page_header, PAGE_FOOTER};

/// GET /
///
/// Upload form. The page script posts the file to /api/analyze and renders
/// the preview, spinner, probability metric and result banners.
pub async fn root_page() -> impl IntoResponse {
    Html(format!(
        r#"{header}
        <section class="upload">
            <label for="file-input" class="button">Choose an image...</label>
            <input type="file" id="file-input" name="file" accept=".jpg,.jpeg,.png,image/jpeg,image/png" hidden>
        </section>

        <div id="banners">
            <div class="banner banner-info">Upload an image file (jpg, jpeg, png) to start the analysis.</div>
        </div>

        <figure id="preview" hidden>
            <img id="preview-image" alt="Uploaded Image">
            <figcaption>Uploaded Image</figcaption>
        </figure>

        <div id="spinner" class="spinner" hidden>Contacting machine learning model...</div>

        <div id="metric" class="metric" hidden>
            <div class="metric-label">AI Generation Probability</div>
            <div class="metric-value" id="metric-value"></div>
        </div>

        <pre id="detail" class="detail" hidden></pre>

        <script src="/static/detector.js"></script>
{footer}"#,
        header = page_header("AI Image Detector"),
        footer = PAGE_FOOTER,
    ))
}
