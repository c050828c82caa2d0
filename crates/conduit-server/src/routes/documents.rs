//! Tax document routes.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use conduit_proxy::catalog::tax;
use conduit_proxy::documents::{PDF_CACHE_CONTROL, PDF_CONTENT_TYPE};
use serde::Deserialize;

use crate::failure::ApiFailure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    url: Option<String>,
}

pub async fn proxy_pdf(State(state): State<AppState>, Query(query): Query<PdfQuery>) -> Response {
    match state.documents.fetch(query.url.as_deref()).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
                (header::CACHE_CONTROL, PDF_CACHE_CONTROL),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => ApiFailure::proxy(&e, &tax::PROXY_PDF).into_response(),
    }
}
