//! Subscription endpoints
//!
//! Premium access is granted by an active subscription. Purchases and
//! renewals return the refreshed user so callers can update their session.

use crate::client::{path_segment, AdvertboardClient};
use crate::endpoints::auth::User;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Subscription API interface
#[derive(Clone)]
pub struct SubscriptionsApi {
    client: AdvertboardClient,
}

impl SubscriptionsApi {
    /// Create a new subscriptions API interface
    pub(crate) fn new(client: AdvertboardClient) -> Self {
        Self { client }
    }

    /// Purchase a subscription
    ///
    /// POST /api/subscriptions
    pub async fn create(&self, request: &CreateSubscriptionRequest) -> ApiResult<SubscriptionWithUser> {
        self.client.post("api/subscriptions", request).await
    }

    /// The active subscription, if any
    ///
    /// GET /api/subscriptions/active
    pub async fn active(&self) -> ApiResult<ActiveSubscriptionResponse> {
        self.client.get("api/subscriptions/active").await
    }

    /// All subscriptions of the signed-in user
    ///
    /// GET /api/subscriptions/history
    pub async fn history(&self) -> ApiResult<SubscriptionHistoryResponse> {
        let history: SubscriptionHistoryResponse = self.client.get("api/subscriptions/history").await?;
        debug!(
            count = history.subscriptions.len(),
            premium = history.has_premium_access,
            "Fetched subscription history"
        );
        Ok(history)
    }

    /// Cancel a subscription
    ///
    /// POST /api/subscriptions/:id/cancel
    pub async fn cancel(&self, id: &str) -> ApiResult<SubscriptionResponse> {
        self.client
            .post_empty(&format!("api/subscriptions/{}/cancel", path_segment(id)?))
            .await
    }

    /// Renew a subscription
    ///
    /// POST /api/subscriptions/:id/renew
    pub async fn renew(&self, id: &str) -> ApiResult<SubscriptionWithUser> {
        self.client
            .post_empty(&format!("api/subscriptions/{}/renew", path_segment(id)?))
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Supported payment methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card
    #[default]
    Card,
    /// Bank transfer
    Bank,
    /// PayPal
    Paypal,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Card => "card",
            Self::Bank => "bank",
            Self::Paypal => "paypal",
        })
    }
}

/// Purchase request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    /// Price paid
    pub amount: f64,
    /// Currency code; the backend default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// How the purchase is paid
    pub payment_method: PaymentMethod,
    /// Renew at the end of the period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

impl CreateSubscriptionRequest {
    /// Create a request for `amount` paid with `payment_method`
    #[must_use]
    pub fn new(amount: f64, payment_method: PaymentMethod) -> Self {
        Self {
            amount,
            currency: None,
            payment_method,
            auto_renew: None,
        }
    }
}

/// Subscription record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SubscriptionWire")]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Plan name
    pub plan: String,
    /// Backend status, `active` while premium access lasts
    pub status: String,
    /// Start of the paid period
    pub start_date: Option<String>,
    /// End of the paid period
    pub end_date: Option<String>,
    /// Whether the backend renews automatically
    pub auto_renew: bool,
    /// Amount paid per period
    pub amount: f64,
    /// Currency code of `amount`
    pub currency: String,
    /// Creation timestamp
    pub created_at: Option<String>,
}

/// Subscription as the backend sends it; the identifier arrives as `_id`, `id` or both
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionWire {
    #[serde(rename = "_id")]
    underscore_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    plan: String,
    #[serde(default)]
    status: String,
    start_date: Option<String>,
    end_date: Option<String>,
    #[serde(default)]
    auto_renew: bool,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    currency: String,
    created_at: Option<String>,
}

impl From<SubscriptionWire> for Subscription {
    fn from(wire: SubscriptionWire) -> Self {
        let id = [wire.underscore_id, wire.id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        Self {
            id,
            plan: wire.plan,
            status: wire.status,
            start_date: wire.start_date,
            end_date: wire.end_date,
            auto_renew: wire.auto_renew,
            amount: wire.amount,
            currency: wire.currency,
            created_at: wire.created_at,
        }
    }
}

impl Subscription {
    /// Whether the backend reports this subscription as active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Purchase or renewal response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionWithUser {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// The purchased or renewed subscription
    pub subscription: Subscription,
    /// Refreshed user with the new entitlement
    pub user: User,
}

/// Cancellation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// The cancelled subscription
    pub subscription: Subscription,
}

/// Active subscription response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSubscriptionResponse {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// Active subscription, if any
    pub subscription: Option<Subscription>,
}

/// Premium period of the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumPeriod {
    /// Start of premium access
    pub start_date: String,
    /// End of premium access
    pub end_date: String,
}

/// Subscription history response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionHistoryResponse {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// Subscriptions in the order sent
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    /// Current entitlement
    #[serde(default)]
    pub has_premium_access: bool,
    /// Premium period, when the user has one
    pub premium_user: Option<PremiumPeriod>,
}
