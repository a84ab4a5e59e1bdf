/*
[INPUT]:  Withdrawal requests, currencies and transfer identifiers
[OUTPUT]: Withdrawals, funding destinations, bank codes, legacy deposit data
[POS]:    HTTP layer - funding and withdrawal endpoints
[UPDATE]: When adding withdrawal methods or retiring legacy endpoints
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::http::envelope::{
    array_payload, decode_array, decode_object, legacy_object_payload, object_payload,
    string_payload,
};
use crate::http::query::PathBuilder;
use crate::http::{BitsoClient, BitsoError, Result};
use crate::types::{
    BankCode, CurrencyWithdrawal, CurrencyWithdrawalRequest, DebitCardWithdrawalRequest,
    FundingDestination, PhoneWithdrawalRequest, SpeiWithdrawalRequest, Transfer, Withdrawal,
};

impl BitsoClient {
    /// Account identifier to fund the account in `currency`
    ///
    /// GET /api/v3/funding_destination?fund_currency={currency}
    pub async fn funding_destination(&self, currency: &str) -> Result<FundingDestination> {
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(BitsoError::invalid_input("currency must not be empty"));
        }

        let endpoint = PathBuilder::new("/api/v3/funding_destination")
            .param("fund_currency", currency.to_lowercase())
            .build();
        let body = self.private_get(&endpoint).await?;
        decode_object(object_payload(&body)?)
    }

    /// Withdraw crypto to an address
    ///
    /// POST /api/v3/bitcoin_withdrawal | /api/v3/ether_withdrawal
    pub async fn currency_withdrawal(
        &self,
        kind: CurrencyWithdrawal,
        request: &CurrencyWithdrawalRequest,
    ) -> Result<Withdrawal> {
        request.validate()?;

        let endpoint = PathBuilder::new("/api/v3").segment(kind.path_segment())?.build();
        let body = self.private_post(&endpoint, Some(request)).await?;
        decode_object(object_payload(&body)?)
    }

    pub async fn bitcoin_withdrawal(&self, amount: Decimal, address: &str) -> Result<Withdrawal> {
        let request = CurrencyWithdrawalRequest::new(amount, address);
        self.currency_withdrawal(CurrencyWithdrawal::Bitcoin, &request).await
    }

    pub async fn ether_withdrawal(&self, amount: Decimal, address: &str) -> Result<Withdrawal> {
        let request = CurrencyWithdrawalRequest::new(amount, address);
        self.currency_withdrawal(CurrencyWithdrawal::Ether, &request).await
    }

    /// POST /api/v3/spei_withdrawal
    pub async fn spei_withdrawal(&self, request: &SpeiWithdrawalRequest) -> Result<Withdrawal> {
        request.validate()?;
        let body = self.private_post("/api/v3/spei_withdrawal", Some(request)).await?;
        decode_object(object_payload(&body)?)
    }

    /// Mexican bank catalogue keyed by bank code
    ///
    /// GET /api/v3/mx_bank_codes
    pub async fn bank_codes(&self) -> Result<BTreeMap<String, String>> {
        let body = self.private_get("/api/v3/mx_bank_codes").await?;
        let banks: Vec<BankCode> = decode_array(array_payload(&body)?)?;
        Ok(banks.into_iter().map(|bank| (bank.code, bank.name)).collect())
    }

    /// POST /api/v3/debit_card_withdrawal
    pub async fn debit_card_withdrawal(
        &self,
        request: &DebitCardWithdrawalRequest,
    ) -> Result<Withdrawal> {
        request.validate()?;
        let body = self
            .private_post("/api/v3/debit_card_withdrawal", Some(request))
            .await?;
        decode_object(object_payload(&body)?)
    }

    /// POST /api/v3/phone_withdrawal
    pub async fn phone_withdrawal(&self, request: &PhoneWithdrawalRequest) -> Result<Withdrawal> {
        request.validate()?;
        let body = self.private_post("/api/v3/phone_withdrawal", Some(request)).await?;
        decode_object(object_payload(&body)?)
    }

    /// Bitcoin deposit address (legacy endpoint)
    ///
    /// POST /api/v2/bitcoin_deposit_address
    pub async fn deposit_address(&self) -> Result<String> {
        let body = self
            .private_post::<()>("/api/v2/bitcoin_deposit_address", None)
            .await?;
        string_payload(&body)
    }

    /// Status of a transfer (legacy endpoint)
    ///
    /// GET /api/v2/transfer/{id}
    pub async fn transfer_status(&self, transfer_id: &str) -> Result<Transfer> {
        let transfer_id = transfer_id.trim();
        if transfer_id.is_empty() {
            return Err(BitsoError::invalid_input("transfer id must not be empty"));
        }

        let endpoint = PathBuilder::new("/api/v2/transfer").segment(transfer_id)?.build();
        let body = self.public_get(&endpoint).await?;
        decode_object(legacy_object_payload(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::http::{BitsoClient, BitsoError, ClientConfig};
    use crate::types::{
        CurrencyWithdrawal, CurrencyWithdrawalRequest, DebitCardWithdrawalRequest,
        SpeiWithdrawalRequest,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> BitsoClient {
        let credentials = Credentials::new("test-key", "test-secret").expect("credentials");
        BitsoClient::with_base_url(ClientConfig::default(), &server.uri(), Some(credentials))
            .expect("client init")
    }

    fn ok(payload: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "payload": payload
        }))
    }

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn withdrawal_json(method: &str, currency: &str, amount: &str) -> serde_json::Value {
        serde_json::json!({
            "wid": "c5b8d7f0768ee91d3b33bee648318688",
            "status": "pending",
            "created_at": "2016-04-08T17:52:31.000+00:00",
            "currency": currency,
            "method": method,
            "amount": amount,
            "details": {}
        })
    }

    #[tokio::test]
    async fn test_funding_destination() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/funding_destination"))
            .and(query_param("fund_currency", "btc"))
            .respond_with(ok(serde_json::json!({
                "account_identifier_name": "Bitcoin address",
                "account_identifier": "3CEWgs1goBbafUoThjWff4oX4wQKfxqpeV"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let destination = client
            .funding_destination("BTC")
            .await
            .expect("funding_destination failed");
        assert_eq!(destination.account_identifier, "3CEWgs1goBbafUoThjWff4oX4wQKfxqpeV");

        assert!(client.funding_destination(" ").await.unwrap_err().is_input_error());
    }

    #[tokio::test]
    async fn test_currency_withdrawal_paths() {
        let server = MockServer::start().await;
        let _btc = Mock::given(method("POST"))
            .and(path("/api/v3/bitcoin_withdrawal"))
            .and(body_json(serde_json::json!({"amount": "0.5", "address": "btc-address"})))
            .respond_with(ok(withdrawal_json("Bitcoin", "btc", "0.5")))
            .expect(1)
            .mount(&server)
            .await;
        let _eth = Mock::given(method("POST"))
            .and(path("/api/v3/ether_withdrawal"))
            .respond_with(ok(withdrawal_json("Ether", "eth", "2")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let btc = client
            .bitcoin_withdrawal(dec("0.5"), "btc-address")
            .await
            .expect("bitcoin_withdrawal failed");
        assert_eq!(btc.currency, "btc");

        let request = CurrencyWithdrawalRequest::new(dec("2"), "0xabc");
        let eth = client
            .currency_withdrawal(CurrencyWithdrawal::Ether, &request)
            .await
            .expect("ether_withdrawal failed");
        assert_eq!(eth.amount, dec("2"));
    }

    #[tokio::test]
    async fn test_spei_withdrawal() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/v3/spei_withdrawal"))
            .and(body_json(serde_json::json!({
                "amount": "1500",
                "recipient_given_names": "Ana",
                "recipient_family_names": "Lopez",
                "clabe": "012180000118359719",
                "notes_ref": "rent",
                "numeric_ref": "1234567"
            })))
            .respond_with(ok(withdrawal_json("SPEI Transfer", "mxn", "1500")))
            .expect(1)
            .mount(&server)
            .await;

        let request = SpeiWithdrawalRequest {
            amount: dec("1500"),
            recipient_given_names: "Ana".to_string(),
            recipient_family_names: "Lopez".to_string(),
            clabe: "012180000118359719".to_string(),
            notes_ref: "rent".to_string(),
            numeric_ref: "1234567".to_string(),
        };
        let withdrawal = client(&server)
            .spei_withdrawal(&request)
            .await
            .expect("spei_withdrawal failed");
        assert_eq!(withdrawal.method, "SPEI Transfer");
    }

    #[tokio::test]
    async fn test_invalid_withdrawals_not_sent() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .respond_with(ok(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(
            client
                .ether_withdrawal(dec("0"), "0xabc")
                .await
                .unwrap_err()
                .is_input_error()
        );

        let card = DebitCardWithdrawalRequest {
            amount: dec("100"),
            recipient_given_names: "Ana".to_string(),
            recipient_family_names: "Lopez".to_string(),
            card_number: String::new(),
            bank_code: "40012".to_string(),
        };
        assert!(client.debit_card_withdrawal(&card).await.unwrap_err().is_input_error());
    }

    #[tokio::test]
    async fn test_bank_codes() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/mx_bank_codes"))
            .respond_with(ok(serde_json::json!([
                {"code": "01", "name": "Banregio"},
                {"code": "02", "name": "BBVA Bancomer"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let banks = client(&server).bank_codes().await.expect("bank_codes failed");
        assert_eq!(banks.len(), 2);
        assert_eq!(banks["02"], "BBVA Bancomer");
    }

    #[tokio::test]
    async fn test_deposit_address_accepts_bare_string() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/v2/bitcoin_deposit_address"))
            .and(header_exists("authorization"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#""3CEWgs1goBbafUoThjWff4oX4wQKfxqpeV""#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let address = client(&server)
            .deposit_address()
            .await
            .expect("deposit_address failed");
        assert_eq!(address, "3CEWgs1goBbafUoThjWff4oX4wQKfxqpeV");

        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests[0].body.is_empty());
        assert!(requests[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_transfer_status_legacy_and_error() {
        let server = MockServer::start().await;
        let _ok = Mock::given(method("GET"))
            .and(path("/api/v2/transfer/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "t1",
                "status": "completed",
                "btc_amount": "0.1",
                "currency": "MXN",
                "fields": {}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let _err = Mock::given(method("GET"))
            .and(path("/api/v2/transfer/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": 101, "message": "Transfer not found"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let transfer = client.transfer_status("t1").await.expect("transfer_status failed");
        assert_eq!(transfer.status, "completed");
        assert_eq!(transfer.btc_amount, Some(dec("0.1")));

        let err = client.transfer_status("missing").await.unwrap_err();
        assert!(matches!(err, BitsoError::Api { code: 101, .. }));

        assert!(client.transfer_status("").await.unwrap_err().is_input_error());
    }
}
