//! Donation endpoint

use crate::client::AdvertboardClient;
use crate::endpoints::auth::User;
use crate::endpoints::subscriptions::PaymentMethod;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Smallest accepted donation
pub const MINIMUM_DONATION: f64 = 1.0;

/// Donation API interface
#[derive(Clone)]
pub struct DonationsApi {
    client: AdvertboardClient,
}

impl DonationsApi {
    /// Create a new donations API interface
    pub(crate) fn new(client: AdvertboardClient) -> Self {
        Self { client }
    }

    /// Make a donation
    ///
    /// POST /api/donations
    ///
    /// Amounts below [`MINIMUM_DONATION`] are rejected without a request.
    pub async fn donate(&self, request: &DonationRequest) -> ApiResult<DonationResponse> {
        request.validate()?;
        self.client.post("api/donations", request).await
    }
}

/// One-off or recurring donation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationType {
    /// Single payment, sent as `one-time`
    #[default]
    OneTime,
    /// Recurring payment
    Subscription,
}

/// Donation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    /// Amount, at least the minimum donation
    pub amount: f64,
    /// How the donation is paid
    pub payment_method: PaymentMethod,
    /// One-off or recurring
    pub donation_type: DonationType,
}

impl DonationRequest {
    /// Create a one-off card donation
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            payment_method: PaymentMethod::default(),
            donation_type: DonationType::default(),
        }
    }

    /// Reject amounts the backend would refuse
    pub fn validate(&self) -> ApiResult<()> {
        if !self.amount.is_finite() || self.amount < MINIMUM_DONATION {
            return Err(ApiError::validation(format!(
                "Minimum donation amount is {MINIMUM_DONATION}"
            )));
        }
        Ok(())
    }
}

/// Donation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationResponse {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// Thank-you text
    #[serde(default)]
    pub message: String,
    /// Refreshed user, for signed-in donors
    pub user: Option<User>,
}
