//! Stripe adapter speaking the form-encoded REST API (no SDK dependency)

use super::{
    CheckoutSession, CheckoutSessionRequest, CouponRequest, PaymentGateway, PaymentIntent,
    PaymentIntentRequest, PriceRequest, TaxRateRequest,
};
use crate::config::{CurrencyKeys, GatewayConfig};
use crate::core::Currency;
use crate::core::error::GatewayError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

type Form = Vec<(String, String)>;

/// Payment gateway backed by the Stripe REST API
///
/// Prices, sessions and payment intents are created with the secret key of
/// the account matching their currency. Coupons and tax rates carry no
/// currency and live on the reference-currency account.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    keys: CurrencyKeys,
}

impl StripeGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            keys: config.keys.clone(),
        }
    }

    async fn post(&self, currency: Currency, path: &str, form: &Form) -> Result<Value, GatewayError> {
        let secret_key = &self.keys.for_currency(currency).secret_key;
        if secret_key.is_empty() {
            return Err(GatewayError::MissingKey { currency });
        }

        let url = format!("{}/{}", self.api_base, path);
        tracing::debug!(%url, %currency, "Calling payment gateway");

        let resp = self
            .client
            .post(&url)
            .basic_auth(secret_key, None::<&str>)
            .form(form)
            .send()
            .await?;
        let status = resp.status();
        let body: Value = resp.json().await?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

fn string_field(body: &Value, field: &str) -> Result<String, GatewayError> {
    body[field]
        .as_str()
        .map(String::from)
        .ok_or_else(|| GatewayError::InvalidResponse {
            message: format!("missing '{}' in {}", field, body),
        })
}

fn percentage(value: Decimal) -> String {
    value.normalize().to_string()
}

fn entry(key: impl Into<String>, value: impl Into<String>) -> (String, String) {
    (key.into(), value.into())
}

pub(crate) fn product_form(request: &PriceRequest) -> Form {
    let mut form = vec![entry("name", request.name.clone())];
    if let Some(description) = request.description.as_deref().filter(|d| !d.is_empty()) {
        form.push(entry("description", description));
    }
    form
}

pub(crate) fn price_form(request: &PriceRequest, product_id: &str) -> Form {
    vec![
        entry("product", product_id),
        entry("unit_amount", request.unit_amount.to_string()),
        entry("currency", request.currency.code()),
    ]
}

pub(crate) fn session_form(request: &CheckoutSessionRequest) -> Form {
    let mut form = vec![
        entry("mode", "payment"),
        entry("payment_method_types[0]", "card"),
        entry("success_url", request.success_url.clone()),
        entry("cancel_url", request.cancel_url.clone()),
    ];

    for (i, line) in request.line_items.iter().enumerate() {
        form.push(entry(format!("line_items[{i}][price]"), line.price_id.clone()));
        form.push(entry(format!("line_items[{i}][quantity]"), line.quantity.to_string()));
        for (j, tax_rate) in line.tax_rate_ids.iter().enumerate() {
            form.push(entry(format!("line_items[{i}][tax_rates][{j}]"), tax_rate.clone()));
        }
    }

    if let Some(coupon) = &request.coupon_id {
        form.push(entry("discounts[0][coupon]", coupon.clone()));
    }
    form
}

pub(crate) fn payment_intent_form(request: &PaymentIntentRequest) -> Form {
    let mut form = vec![
        entry("amount", request.amount.to_string()),
        entry("currency", request.currency.code()),
        entry("automatic_payment_methods[enabled]", "true"),
    ];
    for (key, value) in &request.metadata {
        form.push(entry(format!("metadata[{key}]"), value.clone()));
    }
    form
}

pub(crate) fn coupon_form(request: &CouponRequest) -> Form {
    vec![
        entry("name", request.name.clone()),
        entry("duration", "forever"),
        entry("percent_off", percentage(request.percent_off)),
    ]
}

pub(crate) fn tax_rate_form(request: &TaxRateRequest) -> Form {
    vec![
        entry("display_name", request.display_name.clone()),
        entry("percentage", percentage(request.percentage)),
        entry("inclusive", request.inclusive.to_string()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_price(&self, request: &PriceRequest) -> Result<String, GatewayError> {
        let product = self
            .post(request.currency, "products", &product_form(request))
            .await?;
        let product_id = string_field(&product, "id")?;

        let price = self
            .post(request.currency, "prices", &price_form(request, &product_id))
            .await?;
        string_field(&price, "id")
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let body = self
            .post(request.currency, "checkout/sessions", &session_form(request))
            .await?;
        Ok(CheckoutSession {
            id: string_field(&body, "id")?,
            url: body["url"].as_str().map(String::from),
        })
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError> {
        let body = self
            .post(request.currency, "payment_intents", &payment_intent_form(request))
            .await?;
        Ok(PaymentIntent {
            id: string_field(&body, "id")?,
            client_secret: string_field(&body, "client_secret")?,
        })
    }

    async fn create_coupon(&self, request: &CouponRequest) -> Result<String, GatewayError> {
        let body = self
            .post(Currency::REFERENCE, "coupons", &coupon_form(request))
            .await?;
        string_field(&body, "id")
    }

    async fn create_tax_rate(&self, request: &TaxRateRequest) -> Result<String, GatewayError> {
        let body = self
            .post(Currency::REFERENCE, "tax_rates", &tax_rate_form(request))
            .await?;
        string_field(&body, "id")
    }
}
