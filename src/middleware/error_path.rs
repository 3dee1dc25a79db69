//! Fills the `path` of error envelopes with the request URL.
//!
//! [`AppError`] responses carry their [`ErrorDetail`] in the response
//! extensions. Error responses produced elsewhere (the rate limiter, a
//! caught panic, axum's own fallbacks) get an envelope built from their
//! status.

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{HeaderMap, Uri, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use taskshelf_core::{AppError, ErrorDetail, ErrorEnvelope};

/// `http(s)://host/path?query` when a `Host` header is present, otherwise
/// the path and query alone.
pub fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty());

    match host {
        Some(host) => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|value| value.to_str().ok())
                .filter(|proto| proto.eq_ignore_ascii_case("https"))
                .map(|_| "https")
                .unwrap_or("http");
            format!("{}://{}{}", scheme, host, path_and_query)
        }
        None => path_and_query,
    }
}

pub async fn attach_error_path(req: Request, next: Next) -> Response {
    let url = request_url(req.headers(), req.uri());

    let response = next.run(req).await;
    let status = response.status();

    let detail = match response.extensions().get::<ErrorDetail>() {
        Some(detail) => detail.clone(),
        None if status.is_client_error() || status.is_server_error() => {
            let message = status.canonical_reason().unwrap_or("Error");
            AppError::new(status, anyhow::anyhow!(message)).detail()
        }
        None => return response,
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    let envelope = ErrorEnvelope {
        error: ErrorDetail {
            path: Some(url),
            ..detail
        },
    };
    let body: Body = Json(envelope).into_response().into_body();

    Response::from_parts(parts, body)
}
