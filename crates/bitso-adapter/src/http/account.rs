/*
[INPUT]:  Identifier lists, ledger filters and query parameters
[OUTPUT]: Account data (status, balances, fees, ledger, fundings, withdrawals, trades)
[POS]:    HTTP layer - private account endpoints (require signed requests)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use crate::http::envelope::{array_payload, decode_array, decode_object, object_payload};
use crate::http::query::{PathBuilder, ids_or_filter};
use crate::http::{BitsoClient, Result};
use crate::types::{
    AccountStatus, Balances, Fees, Funding, LedgerEntry, LedgerKind, UserTrade, Withdrawal,
};

impl BitsoClient {
    /// GET /api/v3/account_status
    pub async fn account_status(&self) -> Result<AccountStatus> {
        let body = self.private_get("/api/v3/account_status").await?;
        decode_object(object_payload(&body)?)
    }

    /// GET /api/v3/balance
    pub async fn balance(&self) -> Result<Balances> {
        let body = self.private_get("/api/v3/balance").await?;
        decode_object(object_payload(&body)?)
    }

    /// GET /api/v3/fees
    pub async fn fees(&self) -> Result<Fees> {
        let body = self.private_get("/api/v3/fees").await?;
        decode_object(object_payload(&body)?)
    }

    /// Ledger entries, optionally restricted to one operation kind
    ///
    /// GET /api/v3/ledger[/{kind}][?params]
    pub async fn ledger<S: AsRef<str>>(
        &self,
        kind: Option<LedgerKind>,
        params: &[S],
    ) -> Result<Vec<LedgerEntry>> {
        let endpoint = PathBuilder::new("/api/v3/ledger")
            .segment(kind.map(LedgerKind::path_segment).unwrap_or_default())?
            .raw_params(params)
            .build();
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }

    /// Withdrawals by id, or filtered by `params`; supplying both is an input error
    ///
    /// GET /api/v3/withdrawals[/{wid}-{wid}][?params]
    pub async fn withdrawals<I, P>(&self, ids: &[I], params: &[P]) -> Result<Vec<Withdrawal>>
    where
        I: AsRef<str>,
        P: AsRef<str>,
    {
        let endpoint = ids_or_filter("/api/v3/withdrawals", ids, params)?;
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }

    /// Fundings by id, or filtered by `params`; supplying both is an input error
    ///
    /// GET /api/v3/fundings[/{fid}-{fid}][?params]
    pub async fn fundings<I, P>(&self, ids: &[I], params: &[P]) -> Result<Vec<Funding>>
    where
        I: AsRef<str>,
        P: AsRef<str>,
    {
        let endpoint = ids_or_filter("/api/v3/fundings", ids, params)?;
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }

    /// Own trades by id, or filtered by `params`; supplying both is an input error
    ///
    /// GET /api/v3/user_trades[/{tid}-{tid}][?params]
    pub async fn user_trades<I, P>(&self, ids: &[I], params: &[P]) -> Result<Vec<UserTrade>>
    where
        I: AsRef<str>,
        P: AsRef<str>,
    {
        let endpoint = ids_or_filter("/api/v3/user_trades", ids, params)?;
        let body = self.private_get(&endpoint).await?;
        decode_array(array_payload(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::http::{BitsoClient, BitsoError, ClientConfig};
    use crate::types::LedgerKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    const NO_PARAMS: &[&str] = &[];

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

    fn authorization(request: &Request) -> String {
        request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_balance_is_signed() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/balance"))
            .and(header_exists("authorization"))
            .respond_with(ok(serde_json::json!({
                "balances": [
                    {"currency": "mxn", "total": "100.1234", "locked": "25.1234", "available": "75.0000"},
                    {"currency": "btc", "total": "4.12345678", "locked": "0", "available": "4.12345678"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let balances = client(&server).balance().await.expect("balance failed");
        assert_eq!(
            balances.get("btc").map(|b| b.available),
            Some(Decimal::from_str("4.12345678").unwrap())
        );

        let requests = server.received_requests().await.unwrap_or_default();
        let auth = authorization(&requests[0]);
        let parts: Vec<&str> = auth.trim_start_matches("Bitso ").split(':').collect();
        assert!(auth.starts_with("Bitso "));
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "test-key");
        assert!(parts[1].parse::<u64>().is_ok());
        assert_eq!(parts[2].len(), 64);
    }

    #[tokio::test]
    async fn test_account_status() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/account_status"))
            .respond_with(ok(serde_json::json!({
                "client_id": "1234",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "status": "active",
                "daily_limit": "5300.00",
                "monthly_limit": "32000.00",
                "daily_remaining": "3300.00",
                "monthly_remaining": "31000.00",
                "cellphone_number": "verified",
                "official_id": "submitted",
                "proof_of_residency": "submitted",
                "signed_contract": "unsubmitted",
                "origin_of_funds": "unsubmitted"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let status = client(&server).account_status().await.expect("account_status failed");
        assert_eq!(status.client_id, "1234");
        assert_eq!(status.daily_remaining, Decimal::from(3300));
        assert_eq!(status.email_stored, "");
    }

    #[tokio::test]
    async fn test_fees() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/fees"))
            .respond_with(ok(serde_json::json!({
                "fees": [{"book": "btc_mxn", "fee_decimal": "0.0001", "fee_percent": "0.01"}],
                "withdrawal_fees": {"btc": "0.001"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fees = client(&server).fees().await.expect("fees failed");
        assert_eq!(
            fees.for_book("btc_mxn").map(|fee| fee.fee_percent),
            Some(Decimal::from_str("0.01").unwrap())
        );
    }

    #[tokio::test]
    async fn test_ledger_by_kind_with_params() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/ledger/fundings"))
            .and(query_param("limit", "1"))
            .respond_with(ok(serde_json::json!([
                {
                    "eid": "2d6a3ae9b2e4",
                    "operation": "funding",
                    "created_at": "2016-04-08T17:52:31.000+00:00",
                    "balance_updates": [{"currency": "btc", "amount": "0.48650929"}],
                    "details": {"fid": "fc23c28a23e8", "method": "btc"}
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let entries = client(&server)
            .ledger(Some(LedgerKind::Fundings), &["limit=1"])
            .await
            .expect("ledger failed");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, "funding");
        assert_eq!(entries[0].details["method"], "btc");
    }

    #[tokio::test]
    async fn test_ledger_without_kind() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/ledger"))
            .respond_with(ok(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let entries = client(&server).ledger(None, NO_PARAMS).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_fundings_by_ids() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/fundings/f1-f2"))
            .respond_with(ok(serde_json::json!([
                {
                    "fid": "f1",
                    "status": "complete",
                    "created_at": "2016-04-08T17:52:31.000+00:00",
                    "currency": "mxn",
                    "method": "sp",
                    "amount": "300.15",
                    "details": []
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let fundings = client(&server)
            .fundings(&["f1", "", "f2"], NO_PARAMS)
            .await
            .expect("fundings failed");
        assert_eq!(fundings[0].fid, "f1");
        assert!(fundings[0].details.is_array());
    }

    #[tokio::test]
    async fn test_withdrawals_by_filter() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/withdrawals"))
            .and(query_param("limit", "2"))
            .respond_with(ok(serde_json::json!([
                {
                    "wid": "c5b8d7f0768ee91d3b33bee648318688",
                    "status": "pending",
                    "created_at": "2016-04-08T17:52:31.000+00:00",
                    "currency": "btc",
                    "method": "Bitcoin",
                    "amount": "0.48650929",
                    "details": {"withdrawal_address": "18MsnATiNiKLqUHDTRKjurwMg7inCrdNEp"}
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let withdrawals = client(&server)
            .withdrawals::<&str, &str>(&[], &["limit=2"])
            .await
            .expect("withdrawals failed");
        assert_eq!(withdrawals[0].method, "Bitcoin");
    }

    #[tokio::test]
    async fn test_user_trades_ids_and_params_rejected() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .respond_with(ok(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.user_trades(&["1234"], &["limit=5"]).await.unwrap_err();
        assert!(matches!(err, BitsoError::InvalidInput(_)));

        let err = client.withdrawals(&["w1"], &["status=pending"]).await.unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_missing_payload() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/v3/fees"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).fees().await.unwrap_err();
        assert!(matches!(err, BitsoError::MissingPayload));
    }
}
