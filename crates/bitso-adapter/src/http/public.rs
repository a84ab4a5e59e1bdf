/*
[INPUT]:  Book identifiers and query parameters
[OUTPUT]: Market data (books, tickers, order book, public trades)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::envelope::{array_payload, decode_array, decode_object, object_payload};
use crate::http::query::PathBuilder;
use crate::http::{BitsoClient, BitsoError, Result};
use crate::types::{BookInfo, OrderBook, PublicTrade, Ticker};

impl BitsoClient {
    /// List books available for trading with their limits
    ///
    /// GET /api/v3/available_books
    pub async fn available_books(&self) -> Result<Vec<BookInfo>> {
        let body = self.public_get("/api/v3/available_books").await?;
        decode_array(array_payload(&body)?)
    }

    /// Tickers for every book
    ///
    /// GET /api/v3/ticker
    pub async fn ticker(&self) -> Result<Vec<Ticker>> {
        let body = self.public_get("/api/v3/ticker").await?;
        decode_array(array_payload(&body)?)
    }

    /// Ticker for a single book
    ///
    /// GET /api/v3/ticker?book={book}
    pub async fn book_ticker(&self, book: &str) -> Result<Ticker> {
        let endpoint = PathBuilder::new("/api/v3/ticker")
            .param("book", require_book(book)?)
            .build();
        let body = self.public_get(&endpoint).await?;
        decode_object(object_payload(&body)?)
    }

    /// Order book, aggregated by price unless `aggregate` is `Some(false)`
    ///
    /// GET /api/v3/order_book?book={book}[&aggregate={bool}]
    pub async fn order_book(&self, book: &str, aggregate: Option<bool>) -> Result<OrderBook> {
        let mut path = PathBuilder::new("/api/v3/order_book").param("book", require_book(book)?);
        if let Some(aggregate) = aggregate {
            path = path.param("aggregate", aggregate);
        }
        let body = self.public_get(&path.build()).await?;
        decode_object(object_payload(&body)?)
    }

    /// Recent public trades; `params` are extra `key=value` filters such as `limit=50`
    ///
    /// GET /api/v3/trades?book={book}[&params]
    pub async fn trades<S: AsRef<str>>(&self, book: &str, params: &[S]) -> Result<Vec<PublicTrade>> {
        let endpoint = PathBuilder::new("/api/v3/trades")
            .param("book", require_book(book)?)
            .raw_params(params)
            .build();
        let body = self.public_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }
}

pub(crate) fn require_book(book: &str) -> Result<&str> {
    let book = book.trim();
    if book.is_empty() {
        return Err(BitsoError::invalid_input("book must not be empty"));
    }
    Ok(book)
}
