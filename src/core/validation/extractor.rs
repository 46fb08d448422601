//! Axum extractor for validated request payloads
//!
//! `Validated<T>` deserializes the JSON body into `T` and runs its
//! `validator::Validate` rules before the handler sees it.

use crate::core::error::{CheckoutError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_item(
///     State(state): State<AppState>,
///     Validated(payload): Validated<CreateItemRequest>,
/// ) -> CheckoutResult<Json<Item>> {
///     // payload already passed its validation rules
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<T> = Json::from_request(req, state).await.map_err(|e| {
            CheckoutError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
            .into_response()
        })?;

        payload.validate().map_err(|errors| {
            CheckoutError::Validation(ValidationError::from(errors)).into_response()
        })?;

        Ok(Validated(payload))
    }
}
