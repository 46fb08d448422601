//! Item entity model and request payloads

use crate::core::Currency;
use crate::core::validation::validators;
use crate::impl_entity;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

impl_entity!(Item, "item", "items", {
    name: String,
    #[serde(default)]
    description: Option<String>,
    /// Unit price in `currency`, two fractional digits
    price: Decimal,
    #[serde(default)]
    currency: Currency,
    /// Gateway price identifier, provisioned on first checkout
    #[serde(default)]
    external_price_id: Option<String>,
});

impl Item {
    /// Price converted into the reference currency
    pub fn normalized_price(&self) -> Decimal {
        self.currency.normalize(self.price)
    }
}

/// Payload for `POST /items`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validators::not_blank")
    )]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom(function = "validators::price"))]
    pub price: Decimal,

    #[serde(default)]
    pub currency: Currency,
}

impl CreateItemRequest {
    pub fn into_item(self) -> Item {
        Item::new(
            self.name.trim().to_string(),
            self.description,
            self.price,
            self.currency,
            None,
        )
    }
}

/// Payload for `PUT /items/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validators::not_blank")
    )]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom(function = "validators::price"))]
    pub price: Option<Decimal>,

    pub currency: Option<Currency>,
}

impl UpdateItemRequest {
    /// Apply the changes to `item`
    ///
    /// Returns true when the priced amount changed. Gateway prices are
    /// immutable, so a changed amount drops the provisioned price id.
    pub fn apply(self, item: &mut Item) -> bool {
        if let Some(name) = self.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }

        let mut repriced = false;
        if let Some(price) = self.price {
            repriced |= price != item.price;
            item.price = price;
        }
        if let Some(currency) = self.currency {
            repriced |= currency != item.currency;
            item.currency = currency;
        }
        if repriced {
            item.external_price_id = None;
        }

        item.touch();
        repriced
    }
}
