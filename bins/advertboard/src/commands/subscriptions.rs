//! Subscription commands
//!
//! Purchases and renewals return the refreshed user, which is swapped into
//! the session so premium access shows up immediately.

use super::Context;
use crate::output::{self, Status};
use advertboard_api_client::endpoints::subscriptions::{
    CreateSubscriptionRequest, PaymentMethod, Subscription,
};
use anyhow::Result;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use tracing::debug;

/// Payment method flag values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Method {
    #[default]
    Card,
    Bank,
    Paypal,
}

impl From<Method> for PaymentMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Card => Self::Card,
            Method::Bank => Self::Bank,
            Method::Paypal => Self::Paypal,
        }
    }
}

/// Purchase a subscription
pub async fn create(
    ctx: &Context,
    amount: f64,
    method: Method,
    currency: Option<String>,
    auto_renew: bool,
) -> Result<()> {
    ctx.require_user().await?;

    let request = CreateSubscriptionRequest {
        currency,
        auto_renew: auto_renew.then_some(true),
        ..CreateSubscriptionRequest::new(amount, method.into())
    };
    let response = ctx.client.subscriptions().create(&request).await?;
    let absorbed = ctx.session.replace_user(response.user.clone()).await;
    debug!(absorbed, "Applied refreshed user");

    if ctx.json() {
        return output::json(&response);
    }

    Status::success("Subscription created");
    print_subscription(&response.subscription);
    if response.user.has_premium_access {
        Status::info("Premium access is active");
    }
    Ok(())
}

/// Show the active subscription
pub async fn active(ctx: &Context) -> Result<()> {
    let response = ctx.client.subscriptions().active().await?;

    if ctx.json() {
        return output::json(&response);
    }

    match &response.subscription {
        Some(subscription) => print_subscription(subscription),
        None => Status::info("No active subscription"),
    }
    Ok(())
}

/// Show every subscription of the signed-in user
pub async fn history(ctx: &Context) -> Result<()> {
    let history = ctx.client.subscriptions().history().await?;

    if ctx.json() {
        return output::json(&history);
    }

    Status::header(&output::format_count(
        history.subscriptions.len(),
        "subscription",
        "subscriptions",
    ));
    for subscription in &history.subscriptions {
        print_subscription(subscription);
    }

    println!();
    if history.has_premium_access {
        match &history.premium_user {
            Some(period) => Status::info(&format!(
                "Premium access from {} until {}",
                period.start_date, period.end_date
            )),
            None => Status::info("Premium access is active"),
        }
    } else {
        Status::info("No premium access");
    }
    Ok(())
}

/// Cancel a subscription
pub async fn cancel(ctx: &Context, id: &str) -> Result<()> {
    let response = ctx.client.subscriptions().cancel(id).await?;

    if ctx.json() {
        return output::json(&response);
    }

    Status::success("Subscription cancelled");
    print_subscription(&response.subscription);
    Ok(())
}

/// Renew a subscription
pub async fn renew(ctx: &Context, id: &str) -> Result<()> {
    ctx.require_user().await?;

    let response = ctx.client.subscriptions().renew(id).await?;
    ctx.session.replace_user(response.user.clone()).await;

    if ctx.json() {
        return output::json(&response);
    }

    Status::success("Subscription renewed");
    print_subscription(&response.subscription);
    Ok(())
}

fn print_subscription(subscription: &Subscription) {
    let status = if subscription.is_active() {
        subscription.status.green().to_string()
    } else {
        subscription.status.dimmed().to_string()
    };
    println!(
        "  {}  {}  {}  {:.2} {}",
        subscription.id.dimmed(),
        subscription.plan.bold(),
        status,
        subscription.amount,
        subscription.currency
    );
    if let (Some(start), Some(end)) = (&subscription.start_date, &subscription.end_date) {
        println!("    {start} → {end}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_maps_to_payment_method() {
        assert_eq!(PaymentMethod::from(Method::Paypal), PaymentMethod::Paypal);
        assert_eq!(PaymentMethod::from(Method::default()), PaymentMethod::Card);
    }
}
