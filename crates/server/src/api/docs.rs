use axum::response::Html;

/// Swagger UI page for /openapi.json
pub async fn serve_docs() -> Html<&'static str> {
    Html(include_str!("docs.html"))
}
