//! JSON gateway client for the ledger network.

use std::time::Duration;

use async_trait::async_trait;
use hbar_types::{AccountId, Tinybar};
use serde::Deserialize;

use crate::error::EngineError;
use crate::ledger::{LedgerClient, Receipt};

/// HTTP client for a ledger gateway speaking JSON.
///
/// Every request is a POST of `{"action": ..., ...params}`; the gateway answers
/// with `{"result": ...}` or `{"error": "..."}`. Transaction bytes travel as hex.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    gateway_url: String,
}

impl GatewayClient {
    /// Create a client targeting the given base URL (e.g. `http://127.0.0.1:50211`).
    pub fn new(gateway_url: impl Into<String>) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| EngineError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            gateway_url: gateway_url.into(),
        })
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Send a request and return the `result` field.
    async fn call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, EngineError> {
        let body = action_body(action, params)?;

        let response = self
            .http
            .post(&self.gateway_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Network(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(EngineError::Network(format!(
                "gateway returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EngineError::Network(format!("invalid JSON response: {e}")))?;

        unwrap_result(json)
    }
}

fn action_body(action: &str, params: serde_json::Value) -> Result<serde_json::Value, EngineError> {
    let mut body = params;
    body.as_object_mut()
        .ok_or_else(|| EngineError::Network("params must be a JSON object".into()))?
        .insert("action".to_string(), serde_json::json!(action));
    Ok(body)
}

fn unwrap_result(json: serde_json::Value) -> Result<serde_json::Value, EngineError> {
    if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
        return Err(EngineError::Network(format!("gateway error: {err}")));
    }
    Ok(json.get("result").cloned().unwrap_or(json))
}

/// Balance response from the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalanceResult {
    pub account: String,
    /// Tinybars as a decimal string.
    pub balance: String,
}

/// Response to `submit_transaction`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResult {
    pub transaction_id: String,
    pub status: String,
}

fn parse_balance(result: serde_json::Value) -> Result<Tinybar, EngineError> {
    let resp: AccountBalanceResult = serde_json::from_value(result)
        .map_err(|e| EngineError::Network(format!("invalid balance response: {e}")))?;
    resp.balance
        .parse()
        .map_err(|e| EngineError::Network(format!("invalid balance value: {e}")))
}

#[async_trait]
impl LedgerClient for GatewayClient {
    async fn account_balance(&self, account: &AccountId) -> Result<Tinybar, EngineError> {
        let result = self
            .call(
                "account_balance",
                serde_json::json!({ "account": account.to_string() }),
            )
            .await?;
        parse_balance(result)
    }

    async fn submit(&self, signed_bytes: &[u8]) -> Result<Receipt, EngineError> {
        let result = self
            .call(
                "submit_transaction",
                serde_json::json!({ "transaction": hex::encode(signed_bytes) }),
            )
            .await?;

        let resp: SubmitResult = serde_json::from_value(result)
            .map_err(|e| EngineError::Network(format!("invalid submit response: {e}")))?;
        Ok(Receipt {
            transaction_id: resp.transaction_id,
            status: resp.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_creation() {
        let client = GatewayClient::new("http://127.0.0.1:50211").unwrap();
        assert_eq!(client.gateway_url(), "http://127.0.0.1:50211");
    }

    #[test]
    fn action_is_merged_into_params() {
        let body = action_body("account_balance", json!({ "account": "0.0.2" })).unwrap();
        assert_eq!(body, json!({ "action": "account_balance", "account": "0.0.2" }));
        assert!(action_body("x", json!([1, 2])).is_err());
    }

    #[test]
    fn error_field_becomes_network_error() {
        let err = unwrap_result(json!({ "error": "account not found" })).unwrap_err();
        assert!(matches!(err, EngineError::Network(ref m) if m.contains("account not found")));
    }

    #[test]
    fn balance_response_parses() {
        let result = unwrap_result(json!({ "result": { "account": "0.0.2", "balance": "1000000000" } }))
            .unwrap();
        assert_eq!(parse_balance(result).unwrap(), Tinybar::new(1_000_000_000));
        assert!(parse_balance(json!({ "account": "0.0.2", "balance": "-1" })).is_err());
    }
}
