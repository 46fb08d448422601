//! Order aggregate model and request payloads

use crate::impl_entity;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;

impl_entity!(Order, "order", "orders", {
    /// Member items; membership has set semantics
    #[serde(default)]
    item_ids: BTreeSet<Uuid>,
    #[serde(default)]
    discount_id: Option<Uuid>,
    #[serde(default)]
    tax_id: Option<Uuid>,
    /// Cached total in the reference currency, written only by the pricing engine
    #[serde(default)]
    total: Option<Decimal>,
});

impl Order {
    /// An order with no members and no adjustments
    pub fn empty() -> Self {
        Self::new(BTreeSet::new(), None, None, None)
    }

    /// Add items, ignoring ones already present. Returns how many were new.
    pub fn add_items(&mut self, ids: impl IntoIterator<Item = Uuid>) -> usize {
        let before = self.item_ids.len();
        self.item_ids.extend(ids);
        self.item_ids.len() - before
    }

    pub fn remove_item(&mut self, id: &Uuid) -> bool {
        self.item_ids.remove(id)
    }

    pub fn clear_items(&mut self) {
        self.item_ids.clear();
    }

    /// Drop the discount reference if it points at `id`
    pub fn detach_discount(&mut self, id: &Uuid) -> bool {
        if self.discount_id.as_ref() == Some(id) {
            self.discount_id = None;
            return true;
        }
        false
    }

    /// Drop the tax reference if it points at `id`
    pub fn detach_tax(&mut self, id: &Uuid) -> bool {
        if self.tax_id.as_ref() == Some(id) {
            self.tax_id = None;
            return true;
        }
        false
    }
}

/// Payload for `POST /orders`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[serde(default)]
    #[validate(length(max = 500))]
    pub item_ids: Vec<Uuid>,
    #[serde(default)]
    pub discount_id: Option<Uuid>,
    #[serde(default)]
    pub tax_id: Option<Uuid>,
}

/// Payload for `POST /orders/{id}/items`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddItemsRequest {
    #[validate(length(min = 1, max = 500))]
    pub item_ids: Vec<Uuid>,
}

/// Payload for `PUT /orders/{id}/discount` and `PUT /orders/{id}/tax`
///
/// `{"id": null}` clears the reference.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetAdjustmentRequest {
    pub id: Option<Uuid>,
}
