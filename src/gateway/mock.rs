//! In-process payment gateway for tests and local development
//!
//! Issues sequential fake identifiers and records every request it receives.
//! Can be switched into a failing mode to exercise error paths.

use super::{
    CheckoutSession, CheckoutSessionRequest, CouponRequest, PaymentGateway, PaymentIntent,
    PaymentIntentRequest, PriceRequest, TaxRateRequest,
};
use crate::core::error::GatewayError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A request received by [`MockGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Price(PriceRequest),
    CheckoutSession(CheckoutSessionRequest),
    PaymentIntent(PaymentIntentRequest),
    Coupon(CouponRequest),
    TaxRate(TaxRateRequest),
}

/// Recording gateway; clones share the same call log
#[derive(Clone, Default)]
pub struct MockGateway {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    failing: Arc<AtomicBool>,
    next_id: Arc<AtomicU64>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every request
    pub fn failing() -> Self {
        let gateway = Self::default();
        gateway.set_failing(true);
        gateway
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every request received so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn coupon_requests(&self) -> Vec<CouponRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Coupon(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn tax_rate_requests(&self) -> Vec<TaxRateRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::TaxRate(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn price_requests(&self) -> Vec<PriceRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Price(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn session_requests(&self) -> Vec<CheckoutSessionRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::CheckoutSession(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn payment_intent_requests(&self) -> Vec<PaymentIntentRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::PaymentIntent(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, prefix: &str, call: GatewayCall) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);

        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 400,
                message: "mock gateway is failing".to_string(),
            });
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{}_mock_{}", prefix, n))
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_price(&self, request: &PriceRequest) -> Result<String, GatewayError> {
        self.record("price", GatewayCall::Price(request.clone()))
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let id = self.record("cs", GatewayCall::CheckoutSession(request.clone()))?;
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.invalid/{}", id)),
            id,
        })
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError> {
        let id = self.record("pi", GatewayCall::PaymentIntent(request.clone()))?;
        Ok(PaymentIntent {
            client_secret: format!("{}_secret", id),
            id,
        })
    }

    async fn create_coupon(&self, request: &CouponRequest) -> Result<String, GatewayError> {
        self.record("co", GatewayCall::Coupon(request.clone()))
    }

    async fn create_tax_rate(&self, request: &TaxRateRequest) -> Result<String, GatewayError> {
        self.record("txr", GatewayCall::TaxRate(request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn coupon() -> CouponRequest {
        CouponRequest {
            name: "Spring".into(),
            percent_off: dec!(10),
        }
    }

    #[tokio::test]
    async fn test_issues_sequential_ids() {
        let gateway = MockGateway::new();
        assert_eq!(gateway.create_coupon(&coupon()).await.unwrap(), "co_mock_1");
        assert_eq!(gateway.create_coupon(&coupon()).await.unwrap(), "co_mock_2");
        assert_eq!(gateway.coupon_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_mode_still_records() {
        let gateway = MockGateway::failing();
        assert!(gateway.create_coupon(&coupon()).await.is_err());
        assert_eq!(gateway.calls().len(), 1);

        gateway.set_failing(false);
        assert!(gateway.create_coupon(&coupon()).await.is_ok());
    }
}
