/*
[INPUT]:  Book identifier (e.g., "btc_mxn")
[OUTPUT]: Market data (books, ticker, order book, trades)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use std::time::Duration;

use bitso_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query market data (no authentication required)
///
/// Set `RUST_LOG=bitso_adapter=debug` to see each outgoing request.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bitso Market Data Example ===\n");

    let client = match BitsoClient::public() {
        Ok(c) => c.with_deadline(Duration::from_secs(10)),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no auth required for public endpoints)\n");

    let book = "btc_mxn";

    println!("Querying available books...");
    match client.available_books().await {
        Ok(books) => println!("✓ {} books, first: {:?}", books.len(), books.first()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying ticker for {}...", book);
    match client.book_ticker(book).await {
        Ok(ticker) => println!("✓ last {} bid {} ask {}", ticker.last, ticker.bid, ticker.ask),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying order book for {}...", book);
    match client.order_book(book, Some(true)).await {
        Ok(depth) => println!(
            "✓ sequence {} best bid {:?} best ask {:?}",
            depth.sequence,
            depth.best_bid().map(|level| level.price),
            depth.best_ask().map(|level| level.price)
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying recent trades for {}...", book);
    match client.trades(book, &["limit=5"]).await {
        Ok(trades) => {
            for trade in trades {
                println!("  {} {:?} {} @ {}", trade.tid, trade.maker_side, trade.amount, trade.price);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
