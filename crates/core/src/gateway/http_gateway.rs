//! HTTP client for the hosted payment gateway.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PaymentGatewayTrait, PendingPayment};
use crate::errors::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct InitiateRequest {
    amount: f64,
}

#[derive(Deserialize)]
struct InitiateResponse {
    /// Reference of the payment at the gateway; absent when the gateway
    /// settled the charge immediately.
    id: Option<String>,
    payment_url: Option<String>,
}

/// Gateway client speaking the hosted gateway's JSON API.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaymentGateway {
    /// Creates a client against `base_url` with a bounded request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("failed to build gateway client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn checkout_url(&self, reference: &str) -> String {
        format!("{}/checkout?gateway_id={}", self.base_url, reference)
    }
}

#[async_trait]
impl PaymentGatewayTrait for HttpPaymentGateway {
    async fn initiate_payment(&self, amount: Decimal) -> Result<Option<PendingPayment>> {
        let url = format!("{}/payments", self.base_url);
        let amount_f64 = amount
            .to_f64()
            .ok_or_else(|| Error::Unexpected(format!("amount {} not representable", amount)))?;

        debug!("initiating gateway payment of {} at {}", amount, url);

        let response = self
            .client
            .post(&url)
            .json(&InitiateRequest { amount: amount_f64 })
            .send()
            .await
            .map_err(|e| Error::Unexpected(format!("gateway request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Unexpected(format!("gateway rejected payment: {}", e)))?;

        let body: InitiateResponse = response
            .json()
            .await
            .map_err(|e| Error::Unexpected(format!("invalid gateway response: {}", e)))?;

        Ok(body.id.map(|reference| {
            let payment_url = body
                .payment_url
                .unwrap_or_else(|| self.checkout_url(&reference));
            PendingPayment {
                reference,
                payment_url,
            }
        }))
    }
}
