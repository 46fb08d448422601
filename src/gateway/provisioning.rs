//! Lazy provisioning of gateway-side records
//!
//! Discounts and taxes get a coupon and a tax rate right after they are
//! stored locally. Provisioning is best effort: a gateway failure is logged
//! and the external id stays empty, so checkout simply goes without that
//! adjustment. Item prices are provisioned on first checkout and are
//! required, so their failures propagate.

use super::{CouponRequest, PaymentGateway, PriceRequest, TaxRateRequest};
use crate::core::error::GatewayError;
use crate::core::money::to_minor_units;
use crate::core::CheckoutResult;
use crate::entities::Item;
use crate::store::EntityStore;
use std::sync::Arc;
use uuid::Uuid;

/// Ensures local records have their gateway counterparts
#[derive(Clone)]
pub struct Provisioner {
    gateway: Arc<dyn PaymentGateway>,
    store: EntityStore,
}

impl Provisioner {
    pub fn new(gateway: Arc<dyn PaymentGateway>, store: EntityStore) -> Self {
        Self { gateway, store }
    }

    pub fn gateway(&self) -> &Arc<dyn PaymentGateway> {
        &self.gateway
    }

    /// Create the coupon for a discount unless it already has one
    pub async fn ensure_coupon(&self, discount_id: Uuid) -> CheckoutResult<Option<String>> {
        let mut discount = self.store.discount(discount_id).await?;
        if let Some(id) = &discount.external_coupon_id {
            return Ok(Some(id.clone()));
        }

        let request = CouponRequest {
            name: discount.name.clone(),
            percent_off: discount.percent,
        };
        let coupon_id = match self.gateway.create_coupon(&request).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(discount_id = %discount_id, error = %e, "Coupon provisioning failed");
                return Ok(None);
            }
        };

        discount.external_coupon_id = Some(coupon_id.clone());
        discount.touch();
        self.store.discounts.update(&discount_id, discount).await?;
        tracing::info!(discount_id = %discount_id, %coupon_id, "Coupon provisioned");

        Ok(Some(coupon_id))
    }

    /// Create the tax rate for a tax unless it already has one
    pub async fn ensure_tax_rate(&self, tax_id: Uuid) -> CheckoutResult<Option<String>> {
        let mut tax = self.store.tax(tax_id).await?;
        if let Some(id) = &tax.external_tax_id {
            return Ok(Some(id.clone()));
        }

        let request = TaxRateRequest {
            display_name: tax.name.clone(),
            percentage: tax.percent,
            inclusive: false,
        };
        let tax_rate_id = match self.gateway.create_tax_rate(&request).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(tax_id = %tax_id, error = %e, "Tax rate provisioning failed");
                return Ok(None);
            }
        };

        tax.external_tax_id = Some(tax_rate_id.clone());
        tax.touch();
        self.store.taxes.update(&tax_id, tax).await?;
        tracing::info!(tax_id = %tax_id, %tax_rate_id, "Tax rate provisioned");

        Ok(Some(tax_rate_id))
    }

    /// Return the item's gateway price, creating it on first use
    pub async fn ensure_price(&self, item: &Item) -> CheckoutResult<String> {
        if let Some(id) = &item.external_price_id {
            return Ok(id.clone());
        }

        let unit_amount = to_minor_units(item.price).ok_or_else(|| GatewayError::InvalidAmount {
            amount: item.price.to_string(),
        })?;
        let request = PriceRequest {
            name: item.name.clone(),
            description: item.description.clone(),
            unit_amount,
            currency: item.currency,
        };
        let price_id = self.gateway.create_price(&request).await?;

        let mut stored = self.store.item(item.id).await?;
        stored.external_price_id = Some(price_id.clone());
        stored.touch();
        self.store.items.update(&item.id, stored).await?;
        tracing::info!(item_id = %item.id, %price_id, "Price provisioned");

        Ok(price_id)
    }
}
