//! Static single-page UI.
//!
//! The whole front end is one embedded page: drag-drop upload with a local
//! preview, a loading state, the six labeled result sections, and the
//! disclaimer. All user-facing text is Indonesian.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Handler for `GET /`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
