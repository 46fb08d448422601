//! Path extractors for entity identifiers
//!
//! Route parameters arrive as strings; malformed ids are rejected with a
//! typed `INVALID_ENTITY_ID` error instead of axum's plain-text rejection.

use crate::core::error::{CheckoutError, CheckoutResult, RequestError};
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

/// Parse a path segment as an entity id
pub fn parse_id(raw: &str) -> CheckoutResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        RequestError::InvalidEntityId {
            id: raw.to_string(),
        }
        .into()
    })
}

/// The single `{id}` parameter of an entity route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub Uuid);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = CheckoutError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidEntityId { id: e.body_text() })?;
        parse_id(&raw).map(EntityId)
    }
}

/// The `{id}` and `{item_id}` parameters of an order membership route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItemIds {
    pub order_id: Uuid,
    pub item_id: Uuid,
}

impl<S> FromRequestParts<S> for OrderItemIds
where
    S: Send + Sync,
{
    type Rejection = CheckoutError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((order_id, item_id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidEntityId { id: e.body_text() })?;
        Ok(Self {
            order_id: parse_id(&order_id)?,
            item_id: parse_id(&item_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_id(&format!(" {} ", id)).unwrap(), id);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ENTITY_ID");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
