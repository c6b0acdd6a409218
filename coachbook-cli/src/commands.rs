//! Subcommand implementations.

use coachbook_core::{CallbackParams, CheckoutForm, CheckoutState, PaymentMode};
use coachbook_sdk::objects::{ListOrdersQuery, PaymentStatus};
use tracing::{info, warn};
use url::Url;

use crate::state::AppState;

pub async fn list_services(state: &AppState) -> anyhow::Result<()> {
    let services = state.storefront.list_services().await?;
    info!(count = services.len(), "Fetched service catalog");
    for service in services {
        println!("{}\t{}\t{}", service.id, service.price, service.title);
    }
    Ok(())
}

pub async fn checkout(
    state: &AppState,
    service_id: &str,
    form: CheckoutForm,
    mode: PaymentMode,
) -> anyhow::Result<()> {
    let service = state.storefront.get_service(service_id).await?;
    state.cart.add_to_cart(&service).await;

    let mut flow = state.checkout_flow();
    flow.mount(&CallbackParams::default()).await;
    let outcome = flow.submit(form, mode).await;
    report_checkout(outcome)
}

fn report_checkout(outcome: CheckoutState) -> anyhow::Result<()> {
    match outcome {
        CheckoutState::Redirecting {
            authorization_url, ..
        } => {
            println!("Continue to payment: {authorization_url}");
        }
        CheckoutState::PayLaterSuccess {
            transaction_ref,
            redirect,
        } => {
            println!("Booking confirmed ({transaction_ref}). We will contact you about payment.");
            info!(to = %redirect.to, after = ?redirect.after, "Pay-later redirect");
        }
        other => {
            warn!(state = other.name(), "Checkout did not complete");
            println!("{}", serde_json::to_string_pretty(&other)?);
            anyhow::bail!("checkout did not complete ({})", other.name());
        }
    }
    Ok(())
}

/// Verify the gateway's return URL the way the checkout page would on load.
pub async fn verify(state: &AppState, callback_url: &Url) -> anyhow::Result<()> {
    let params = CallbackParams::from_url(callback_url);
    if !params.has_reference() {
        warn!(url = %callback_url, "No payment reference in callback url");
    }

    let mut flow = state.checkout_flow();
    let outcome = flow.mount(&params).await;
    report_verification(outcome)
}

fn report_verification(outcome: CheckoutState) -> anyhow::Result<()> {
    match outcome {
        CheckoutState::Success { receipt } => {
            println!("Payment successful ({})", receipt.transaction_ref);
        }
        CheckoutState::Failure { reference, .. } => {
            anyhow::bail!(
                "payment failed ({})",
                reference.as_deref().unwrap_or("unknown reference")
            );
        }
        other => {
            println!("{}", serde_json::to_string_pretty(&other)?);
            anyhow::bail!("payment was not verified ({})", other.name());
        }
    }
    Ok(())
}

pub async fn list_orders(state: &AppState, query: ListOrdersQuery) -> anyhow::Result<()> {
    let orders = state.admin()?.list_orders(&query).await?;
    info!(count = orders.len(), "Fetched orders");
    for order in orders {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            order.id, order.transaction_ref, order.payment_status, order.email, order.service_title
        );
    }
    Ok(())
}

pub async fn set_status(
    state: &AppState,
    order_id: &str,
    status: PaymentStatus,
) -> anyhow::Result<()> {
    let order = state
        .admin()?
        .update_payment_status(order_id, status)
        .await?;
    info!(order_id = %order.id, status = %order.payment_status, "Order updated");
    println!("{}\t{}", order.id, order.payment_status);
    Ok(())
}
