//! Request body extraction.
//!
//! Clients post either HTML-form encoded or JSON bodies. [`Payload`] picks
//! the decoder from `Content-Type` and maps every rejection to
//! [`AppError::BadRequest`].

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A request body decoded from JSON or `application/x-www-form-urlencoded`.
///
/// A body-less request without a `Content-Type` decodes as an empty object,
/// so `DELETE` with no body reaches the handler instead of being rejected.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(Payload(value))
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(Payload(value))
            }
            Some(ct) => Err(AppError::BadRequest(format!(
                "Unsupported content type '{ct}', expected JSON or form data"
            ))),
            None => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                if !body.iter().all(u8::is_ascii_whitespace) {
                    return Err(AppError::BadRequest(
                        "Missing Content-Type for request body".into(),
                    ));
                }
                serde_json::from_value(serde_json::Value::Object(Default::default()))
                    .map(Payload)
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            }
        }
    }
}
