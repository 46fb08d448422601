//! Hosted-checkout and payment-intent flows
//!
//! Orders are always repriced before anything is sent to the gateway. The
//! merchant account (and public key handed to the browser) is chosen by the
//! currency being charged: the item's or order's own currency for hosted
//! sessions, the reference currency for an order's payment intent.

use crate::config::CheckoutConfig;
use crate::core::error::{GatewayError, ValidationError};
use crate::core::money::to_minor_units;
use crate::core::{CheckoutResult, Currency};
use crate::entities::{Discount, Item, Order, Tax};
use crate::gateway::{
    CheckoutLineItem, CheckoutSession, CheckoutSessionRequest, PaymentIntent,
    PaymentIntentRequest, Provisioner,
};
use crate::pricing::{OrderService, PricedOrder};
use crate::store::EntityStore;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// What the item checkout page needs
#[derive(Debug, Clone, Serialize)]
pub struct ItemCheckoutView {
    pub item: Item,
    pub currency: Currency,
    pub public_key: String,
}

/// What the order checkout page needs
#[derive(Debug, Clone, Serialize)]
pub struct OrderCheckoutView {
    pub order: Order,
    pub items: Vec<Item>,
    pub discount: Option<Discount>,
    pub tax: Option<Tax>,
    pub currency: Currency,
    /// Total in the reference currency
    pub total: Decimal,
    /// Key of the account the hosted session is created on
    pub public_key: String,
    /// Key for confirming the order payment intent, which is charged in the
    /// reference currency
    pub intent_public_key: String,
}

#[derive(Clone)]
pub struct CheckoutService {
    store: EntityStore,
    orders: OrderService,
    provisioner: Provisioner,
    config: Arc<CheckoutConfig>,
}

impl CheckoutService {
    pub fn new(
        store: EntityStore,
        orders: OrderService,
        provisioner: Provisioner,
        config: Arc<CheckoutConfig>,
    ) -> Self {
        Self {
            store,
            orders,
            provisioner,
            config,
        }
    }

    pub async fn item_view(&self, item_id: Uuid) -> CheckoutResult<ItemCheckoutView> {
        let item = self.store.item(item_id).await?;
        Ok(ItemCheckoutView {
            currency: item.currency,
            public_key: self.config.keys_for(item.currency).public_key.clone(),
            item,
        })
    }

    pub async fn order_view(&self, order_id: Uuid) -> CheckoutResult<OrderCheckoutView> {
        let priced = self.orders.recompute_and_persist(order_id).await?;
        Ok(self.order_checkout_view(priced))
    }

    /// Hosted checkout for a single item, quantity one
    pub async fn item_session(&self, item_id: Uuid) -> CheckoutResult<CheckoutSession> {
        let item = self.store.item(item_id).await?;
        let price_id = self.provisioner.ensure_price(&item).await?;
        let return_url = self.config.url_for(&format!("checkout/items/{}", item_id));

        let request = CheckoutSessionRequest {
            currency: item.currency,
            line_items: vec![CheckoutLineItem {
                price_id,
                quantity: 1,
                tax_rate_ids: Vec::new(),
            }],
            coupon_id: None,
            success_url: return_url.clone(),
            cancel_url: return_url,
        };

        let session = self
            .provisioner
            .gateway()
            .create_checkout_session(&request)
            .await?;
        tracing::info!(item_id = %item_id, session_id = %session.id, "Checkout session created");
        Ok(session)
    }

    /// Hosted checkout for a whole order
    ///
    /// The tax rate goes on every line item and the coupon on the session,
    /// each only if it was provisioned. Both live on the reference-currency
    /// account, so sessions on another account go without them.
    pub async fn order_session(&self, order_id: Uuid) -> CheckoutResult<CheckoutSession> {
        let priced = self.orders.recompute_and_persist(order_id).await?;
        if priced.items.is_empty() {
            return Err(ValidationError::FieldError {
                field: "item_ids".to_string(),
                message: "order has no items to check out".to_string(),
            }
            .into());
        }

        let mut tax_rate_ids: Vec<String> = priced
            .tax
            .as_ref()
            .and_then(|tax| tax.external_tax_id.clone())
            .into_iter()
            .collect();
        let mut coupon_id = priced
            .discount
            .as_ref()
            .and_then(|discount| discount.external_coupon_id.clone());

        if priced.currency != Currency::REFERENCE
            && (coupon_id.is_some() || !tax_rate_ids.is_empty())
        {
            tracing::warn!(
                order_id = %order_id,
                currency = %priced.currency,
                "Coupon and tax rate belong to the {} account; leaving them off the session",
                Currency::REFERENCE
            );
            coupon_id = None;
            tax_rate_ids.clear();
        }

        let mut line_items = Vec::with_capacity(priced.items.len());
        for item in &priced.items {
            line_items.push(CheckoutLineItem {
                price_id: self.provisioner.ensure_price(item).await?,
                quantity: 1,
                tax_rate_ids: tax_rate_ids.clone(),
            });
        }

        let return_url = self.config.url_for(&format!("checkout/orders/{}", order_id));
        let request = CheckoutSessionRequest {
            currency: priced.currency,
            line_items,
            coupon_id,
            success_url: return_url.clone(),
            cancel_url: return_url,
        };

        let session = self
            .provisioner
            .gateway()
            .create_checkout_session(&request)
            .await?;
        tracing::info!(order_id = %order_id, session_id = %session.id, "Checkout session created");
        Ok(session)
    }

    pub async fn item_payment_intent(&self, item_id: Uuid) -> CheckoutResult<PaymentIntent> {
        let item = self.store.item(item_id).await?;
        let mut metadata = BTreeMap::new();
        metadata.insert("item_id".to_string(), item_id.to_string());

        self.payment_intent(item.price, item.currency, metadata).await
    }

    /// Payment intent for the order's total, charged in the reference
    /// currency the total is expressed in
    pub async fn order_payment_intent(&self, order_id: Uuid) -> CheckoutResult<PaymentIntent> {
        let priced = self.orders.recompute_and_persist(order_id).await?;
        let mut metadata = BTreeMap::new();
        metadata.insert("order_id".to_string(), order_id.to_string());
        metadata.insert("order_currency".to_string(), priced.currency.code().to_string());

        self.payment_intent(priced.total(), Currency::REFERENCE, metadata)
            .await
    }

    async fn payment_intent(
        &self,
        amount: Decimal,
        currency: Currency,
        metadata: BTreeMap<String, String>,
    ) -> CheckoutResult<PaymentIntent> {
        let minor = to_minor_units(amount)
            .filter(|minor| *minor > 0)
            .ok_or_else(|| GatewayError::InvalidAmount {
                amount: amount.to_string(),
            })?;

        let request = PaymentIntentRequest {
            amount: minor,
            currency,
            metadata,
        };
        let intent = self
            .provisioner
            .gateway()
            .create_payment_intent(&request)
            .await?;
        tracing::info!(payment_intent_id = %intent.id, amount = minor, %currency, "Payment intent created");
        Ok(intent)
    }

    fn order_checkout_view(&self, priced: PricedOrder) -> OrderCheckoutView {
        let total = priced.total();
        OrderCheckoutView {
            public_key: self.config.keys_for(priced.currency).public_key.clone(),
            intent_public_key: self
                .config
                .keys_for(Currency::REFERENCE)
                .public_key
                .clone(),
            currency: priced.currency,
            total,
            order: priced.order,
            items: priced.items,
            discount: priced.discount,
            tax: priced.tax,
        }
    }
}
