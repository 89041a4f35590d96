//! Request correlation ids carried in `x-request-id`.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one HTTP request, available to handlers as an extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// The caller's id, if it is short printable ASCII.
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(&REQUEST_ID_HEADER)?.to_str().ok()?.trim();
        let usable = !value.is_empty()
            && value.len() <= MAX_REQUEST_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic());
        usable.then(|| Self(value.to_string()))
    }

    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attach a [`RequestId`] to the request, run it inside an `http` span and
/// echo the id on the response. Unusable caller ids are replaced.
pub async fn ensure_request_id(mut request: Request, next: Next) -> Response {
    let request_id = match RequestId::from_headers(request.headers()) {
        Some(id) => id,
        None => {
            let id = RequestId::generate();
            if let Ok(value) = HeaderValue::from_str(id.as_str()) {
                request.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            id
        }
    };

    let span = tracing::info_span!(
        "http",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path()
    );
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
