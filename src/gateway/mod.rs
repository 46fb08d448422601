//! Payment gateway boundary
//!
//! The checkout flows only talk to the [`PaymentGateway`] trait. Requests
//! carry amounts already converted to minor units and the currency whose
//! merchant account should be charged.

pub mod mock;
pub mod provisioning;
pub mod stripe;

use crate::core::Currency;
use crate::core::error::GatewayError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub use mock::MockGateway;
pub use provisioning::Provisioner;
pub use stripe::StripeGateway;

/// A one-off price for a catalog item
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRequest {
    pub name: String,
    pub description: Option<String>,
    /// Amount in minor units of `currency`
    pub unit_amount: i64,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLineItem {
    pub price_id: String,
    pub quantity: u32,
    pub tax_rate_ids: Vec<String>,
}

/// A hosted checkout session covering one or more line items
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionRequest {
    pub currency: Currency,
    pub line_items: Vec<CheckoutLineItem>,
    pub coupon_id: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentRequest {
    /// Amount in minor units of `currency`
    pub amount: i64,
    pub currency: Currency,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// A forever-valid percent-off coupon
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRequest {
    pub name: String,
    pub percent_off: Decimal,
}

/// An exclusive tax rate, added on top of the charged amount
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRateRequest {
    pub display_name: String,
    pub percentage: Decimal,
    pub inclusive: bool,
}

/// Operations the checkout backend needs from a payment processor
///
/// Each call returns an opaque identifier issued by the processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a product and its price, returning the price id
    async fn create_price(&self, request: &PriceRequest) -> Result<String, GatewayError>;

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError>;

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError>;

    /// Create a coupon, returning its id
    async fn create_coupon(&self, request: &CouponRequest) -> Result<String, GatewayError>;

    /// Create a tax rate, returning its id
    async fn create_tax_rate(&self, request: &TaxRateRequest) -> Result<String, GatewayError>;
}
