//! External payment gateway collaborator.
//!
//! The gateway is only asked to initiate a payment for an amount. It either
//! hands back an opaque pending-payment reference (asynchronous settlement,
//! confirmed later through the gateway callback) or nothing, in which case
//! the donation is treated as instantly settled. Settlement itself is not
//! modeled here.

pub(crate) mod http_gateway;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use http_gateway::HttpPaymentGateway;

/// A payment the gateway accepted but has not settled yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPayment {
    /// Opaque reference identifying the payment at the gateway.
    pub reference: String,
    /// Where the donor completes the payment out-of-band.
    pub payment_url: String,
}

/// Trait for the external payment gateway.
#[async_trait]
pub trait PaymentGatewayTrait: Send + Sync {
    /// Initiates a payment for the given amount.
    ///
    /// `Ok(Some(_))` means settlement is deferred; `Ok(None)` means the
    /// payment is settled instantly. Errors are the caller's to degrade.
    async fn initiate_payment(&self, amount: Decimal) -> Result<Option<PendingPayment>>;
}

/// Gateway used for fallback and local setups: every payment settles
/// instantly, no external call is made.
#[derive(Debug, Default)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGatewayTrait for SimulatedGateway {
    async fn initiate_payment(&self, _amount: Decimal) -> Result<Option<PendingPayment>> {
        Ok(None)
    }
}

/// Test support: a gateway that always defers settlement with a fresh
/// reference, so the pending/confirm path can be exercised.
pub mod testing {
    use super::*;

    #[derive(Debug, Default)]
    pub struct DeferringGateway;

    #[async_trait]
    impl PaymentGatewayTrait for DeferringGateway {
        async fn initiate_payment(&self, _amount: Decimal) -> Result<Option<PendingPayment>> {
            let reference = uuid::Uuid::new_v4().to_string();
            let payment_url = format!("https://pay.invalid/checkout?gateway_id={}", reference);
            Ok(Some(PendingPayment {
                reference,
                payment_url,
            }))
        }
    }

    /// Gateway whose call always fails, for exercising the lenient fallback.
    #[derive(Debug, Default)]
    pub struct FailingGateway;

    #[async_trait]
    impl PaymentGatewayTrait for FailingGateway {
        async fn initiate_payment(&self, _amount: Decimal) -> Result<Option<PendingPayment>> {
            Err(crate::errors::Error::Unexpected(
                "gateway unreachable".to_string(),
            ))
        }
    }
}
