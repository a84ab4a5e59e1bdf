/*
[INPUT]:  Order requests, order identifiers and query parameters
[OUTPUT]: Orders, order fills, placed and cancelled order ids
[POS]:    HTTP layer - trading endpoints (require signed requests)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use serde_json::Value;

use crate::http::envelope::{array_payload, decode_array, decode_object, object_payload};
use crate::http::public::require_book;
use crate::http::query::{PathBuilder, has_any};
use crate::http::{BitsoClient, BitsoError, Result};
use crate::types::{Order, PlaceOrderRequest, PlaceOrderResponse, UserTrade};

impl BitsoClient {
    /// Fills of a single order
    ///
    /// GET /api/v3/order_trades/{oid}
    pub async fn order_trades(&self, oid: &str) -> Result<Vec<UserTrade>> {
        let oid = oid.trim();
        if oid.is_empty() {
            return Err(BitsoError::invalid_input("order id must not be empty"));
        }

        let endpoint = PathBuilder::new("/api/v3/order_trades").segment(oid)?.build();
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }

    /// Open orders in a book
    ///
    /// GET /api/v3/open_orders?book={book}[&params]
    pub async fn open_orders<S: AsRef<str>>(&self, book: &str, params: &[S]) -> Result<Vec<Order>> {
        let endpoint = PathBuilder::new("/api/v3/open_orders")
            .param("book", require_book(book)?)
            .raw_params(params)
            .build();
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }

    /// Look orders up by id
    ///
    /// GET /api/v3/orders/{oid}-{oid}
    pub async fn lookup_orders<S: AsRef<str>>(&self, oids: &[S]) -> Result<Vec<Order>> {
        if !has_any(oids) {
            return Err(BitsoError::invalid_input("at least one order id is required"));
        }

        let endpoint = PathBuilder::new("/api/v3/orders").ids(oids)?.build();
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }

    /// Place an order and return its id.
    ///
    /// The request is validated first; an invalid order never reaches the
    /// network.
    ///
    /// POST /api/v3/orders
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<String> {
        request.validate()?;

        let body = self.private_post("/api/v3/orders", Some(request)).await?;
        let placed: PlaceOrderResponse = decode_object(object_payload(&body)?)?;
        Ok(placed.oid)
    }

    /// Cancel orders by id, or by `params` when no ids are given; returns the
    /// ids the exchange reports as cancelled
    ///
    /// DELETE /api/v3/orders/{oid}-{oid} or /api/v3/orders?params
    pub async fn cancel_orders<I, P>(&self, oids: &[I], params: &[P]) -> Result<Vec<String>>
    where
        I: AsRef<str>,
        P: AsRef<str>,
    {
        match (has_any(oids), has_any(params)) {
            (true, true) => {
                return Err(BitsoError::invalid_input(
                    "cancel takes order ids or query parameters, not both",
                ));
            }
            (false, false) => {
                return Err(BitsoError::invalid_input(
                    "cancel needs order ids or query parameters",
                ));
            }
            _ => {}
        }

        let endpoint = PathBuilder::new("/api/v3/orders")
            .ids(oids)?
            .raw_params(params)
            .build();
        let body = self.private_delete(&endpoint).await?;

        array_payload(&body)?
            .into_iter()
            .map(|item| match item {
                Value::String(oid) => Ok(oid),
                other => Err(BitsoError::InvalidResponse(format!(
                    "expected cancelled order id, got {other}"
                ))),
            })
            .collect()
    }
}
