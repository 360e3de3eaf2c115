//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a request or response body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level with their
/// bodies cut to [LOG_BODY_LENGTH_LIMIT] bytes. Longer bodies are logged in
/// full at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match buffer_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    log_body(
        &format!("Received request {} {}", parts.method, parts.uri),
        &body,
    );

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match buffer_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_body(&format!("Sending response {}", parts.status), &body);

    Response::from_parts(parts, Body::from(body))
}

async fn buffer_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

fn log_body(summary: &str, body: &[u8]) {
    let text = String::from_utf8_lossy(body);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{summary}\nbody: {}...", truncate(&text, LOG_BODY_LENGTH_LIMIT));
        tracing::debug!("Full body: {text:?}");
    } else {
        tracing::info!("{summary}\nbody: {text:?}");
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}
