/*
[INPUT]:  API credentials from the environment and order parameters
[OUTPUT]: Balances, open orders, order placement/cancellation results
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use rust_decimal::Decimal;
use std::str::FromStr;

use bitso_adapter::http::ClientConfig;
use bitso_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Trading operations (requires signed requests)
///
/// Reads `BITSO_API_KEY` / `BITSO_API_SECRET` and talks to the development
/// environment. Set `BITSO_PLACE_ORDER=1` to actually place and cancel an order.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bitso Trading Example ===\n");

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Missing credentials: {}", e);
            return;
        }
    };

    let config = ClientConfig {
        environment: Environment::Development,
        ..ClientConfig::default()
    };
    let client = match BitsoClient::with_config(config, Some(credentials)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created against {}", client.base_url());

    match client.balance().await {
        Ok(balances) => {
            for balance in &balances.balances {
                println!("  {:>5} available {}", balance.currency, balance.available);
            }
        }
        Err(e) => println!("✗ Balance error: {}", e),
    }

    let book = "btc_mxn";
    match client.open_orders::<&str>(book, &[]).await {
        Ok(orders) => println!("✓ {} open orders in {}", orders.len(), book),
        Err(e) => println!("✗ Open orders error: {}", e),
    }

    // Rejected locally: market orders take no price
    let invalid = PlaceOrderRequest::market(book, Side::Buy, Decimal::from_str("0.001").unwrap_or_default())
        .with_price(Decimal::from(1_000));
    if let Err(e) = client.place_order(&invalid).await {
        println!("✓ Invalid order rejected before sending: {}", e);
    }

    if std::env::var("BITSO_PLACE_ORDER").as_deref() != Ok("1") {
        println!("\nSkipping order placement (set BITSO_PLACE_ORDER=1)");
        return;
    }

    let order = PlaceOrderRequest::limit(
        book,
        Side::Buy,
        Decimal::from_str("0.001").unwrap_or_default(),
        Decimal::from(100_000),
    );
    match client.place_order(&order).await {
        Ok(oid) => {
            println!("✓ Placed order {}", oid);
            match client.cancel_orders::<&str, &str>(&[oid.as_str()], &[]).await {
                Ok(cancelled) => println!("✓ Cancelled {:?}", cancelled),
                Err(e) => println!("✗ Cancel error: {}", e),
            }
        }
        Err(e) => println!("✗ Order error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
