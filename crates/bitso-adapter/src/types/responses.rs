/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - small payloads returned by write endpoints
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub oid: String,
}

/// Where to send funds to credit the account in a currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingDestination {
    pub account_identifier_name: String,
    pub account_identifier: String,
}

/// Entry of the Mexican bank code catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankCode {
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_funding_destination() {
        let destination: FundingDestination = serde_json::from_value(json!({
            "account_identifier_name": "SPEI CLABE",
            "account_identifier": "646180115400346012"
        }))
        .unwrap();

        assert_eq!(destination.account_identifier_name, "SPEI CLABE");
        assert_eq!(destination.account_identifier, "646180115400346012");
    }

    #[test]
    fn test_place_order_response_ignores_extra_fields() {
        let response: PlaceOrderResponse =
            serde_json::from_value(json!({"oid": "qlbga6b600n3xta7", "status": "queued"})).unwrap();
        assert_eq!(response.oid, "qlbga6b600n3xta7");
    }
}
