//! Setup page handler - shown when credentials are not configured

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::{escape_html, page_header, PAGE_FOOTER};
use crate::SetupState;

/// GET / while halted
///
/// Explains the configuration error and how to fix it. No upload form.
pub async fn setup_page(State(state): State<SetupState>) -> impl IntoResponse {
    Html(format!(
        r#"{header}
        <div class="banner banner-error">Machine learning model credentials not found! {error}</div>
        <div class="banner banner-info">Setup required</div>
        <pre class="detail">{instructions}</pre>
{footer}"#,
        header = page_header("AI Image Detector - Setup"),
        error = escape_html(&state.error),
        instructions = escape_html(&state.instructions),
        footer = PAGE_FOOTER,
    ))
}
