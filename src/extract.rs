use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::PairingError;

/// JSON body extractor whose rejections are `{"error": ...}` bodies.
///
/// An empty body reads as `{}`, so a request without fields reaches the
/// handler and fails its own required-field check. The content type is not
/// enforced.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PairingError;

    fn from_request(
        req: Request,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let body = Bytes::from_request(req, state);

        async move {
            let bytes = body.await.map_err(|e| {
                tracing::debug!("Unreadable request body: {}", e);
                PairingError::InvalidInput("Invalid request body")
            })?;

            let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
                b"{}"
            } else {
                &bytes
            };

            serde_json::from_slice(raw).map(ApiJson).map_err(|e| {
                tracing::debug!("Rejected JSON body: {}", e);
                PairingError::InvalidInput("Invalid JSON body")
            })
        }
    }
}
