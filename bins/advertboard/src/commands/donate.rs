//! Donate command

use super::subscriptions::Method;
use super::Context;
use crate::output::{self, Status};
use advertboard_api_client::endpoints::donations::{DonationRequest, DonationType};
use anyhow::Result;
use tracing::debug;

/// Make a donation
///
/// Anonymous donations are allowed. When a session is restored, the user
/// returned by the backend replaces the signed-in one.
pub async fn run(ctx: &Context, amount: f64, method: Method, recurring: bool) -> Result<()> {
    let request = DonationRequest {
        payment_method: method.into(),
        donation_type: if recurring {
            DonationType::Subscription
        } else {
            DonationType::OneTime
        },
        ..DonationRequest::new(amount)
    };

    let session = ctx.session.restore().await;
    let response = ctx.client.donations().donate(&request).await?;

    if let (true, Some(user)) = (session.authenticated, &response.user) {
        let absorbed = ctx.session.replace_user(user.clone()).await;
        debug!(absorbed, "Applied refreshed user");
    }

    if ctx.json() {
        return output::json(&response);
    }

    if response.message.is_empty() {
        Status::success(&format!("Thank you for donating {amount:.2}"));
    } else {
        Status::success(&response.message);
    }
    Ok(())
}
