//! On-chain account introspection
//!
//! Reads a token mint through JSON-RPC `getAccountInfo` and scores the
//! authorities still attached to it.

use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::rules::{clamp_score, FREEZE_AUTHORITY_PENALTY, MAX_SCORE, MINT_AUTHORITY_PENALTY};
use super::SignalError;
use crate::models::{Check, RiskLevel, ScanResult};

/// Authorities found on a mint account. `None` = revoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintAuthorities {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
}

#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: Value,
}

pub struct OnChainClient {
    rpc_url: String,
    http_client: reqwest::Client,
}

impl OnChainClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, SignalError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SignalError::from_reqwest)?;

        Ok(Self {
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Single attempt, no retries
    pub async fn fetch_authorities(&self, address: &str) -> Result<MintAuthorities, SignalError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "getAccountInfo",
            params: json!([address, { "encoding": "jsonParsed" }]),
        };

        let response = self.http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(SignalError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(SignalError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await
            .map_err(|e| SignalError::Parse(e.to_string()))?;

        parse_account_info(&body)
    }
}

/// Extract authorities from a `getAccountInfo` response body
pub fn parse_account_info(body: &Value) -> Result<MintAuthorities, SignalError> {
    // RPC-level errors are raised for malformed pubkeys: nothing exists there
    if let Some(error) = body.get("error") {
        tracing::debug!("RPC rejected account lookup: {}", error);
        return Err(SignalError::NotFound);
    }

    let value = body
        .get("result")
        .and_then(|r| r.get("value"))
        .ok_or_else(|| SignalError::Parse("missing result.value".to_string()))?;

    if value.is_null() {
        return Err(SignalError::NotFound);
    }

    // Wallets, holder accounts and programs are not token mints
    if value.pointer("/data/parsed/type").and_then(Value::as_str) != Some("mint") {
        return Err(SignalError::NotFound);
    }
    let info = value
        .pointer("/data/parsed/info")
        .ok_or(SignalError::NotFound)?;

    let authority = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(MintAuthorities {
        mint_authority: authority("mintAuthority"),
        freeze_authority: authority("freezeAuthority"),
    })
}

pub fn score_authorities(authorities: &MintAuthorities) -> ScanResult {
    let mint_active = authorities.mint_authority.is_some();
    let freeze_active = authorities.freeze_authority.is_some();

    let mut raw = MAX_SCORE;
    if mint_active {
        raw -= MINT_AUTHORITY_PENALTY;
    }
    if freeze_active {
        raw -= FREEZE_AUTHORITY_PENALTY;
    }
    let score = clamp_score(raw);

    let checks = vec![
        Check::new("MINT AUTH", if mint_active { "ENABLED" } else { "DISABLED" }, !mint_active),
        Check::new("FREEZE AUTH", if freeze_active { "ENABLED" } else { "DISABLED" }, !freeze_active),
    ];

    let summary = if mint_active {
        "Mint authority is still active: supply can be inflated at any time."
    } else if freeze_active {
        "Freeze authority is active: holder accounts can be frozen."
    } else {
        "Mint and freeze authorities are revoked."
    };

    ScanResult {
        score,
        risk: RiskLevel::from_score(score),
        checks: Some(checks),
        summary: summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};

    fn mint_body(mint: Value, freeze: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 1 },
                "value": {
                    "data": {
                        "parsed": {
                            "info": {
                                "decimals": 6,
                                "mintAuthority": mint,
                                "freezeAuthority": freeze,
                                "supply": "1000000"
                            },
                            "type": "mint"
                        },
                        "program": "spl-token"
                    }
                }
            }
        })
    }

    #[test]
    fn test_parse_revoked_authorities() {
        let parsed = parse_account_info(&mint_body(Value::Null, Value::Null)).unwrap();
        assert_eq!(parsed, MintAuthorities::default());
    }

    #[test]
    fn test_parse_missing_account() {
        let body = json!({ "jsonrpc": "2.0", "id": 1, "result": { "value": null } });
        assert!(matches!(parse_account_info(&body), Err(SignalError::NotFound)));

        let rpc_error = json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32602, "message": "Invalid param" } });
        assert!(matches!(parse_account_info(&rpc_error), Err(SignalError::NotFound)));
    }

    #[test]
    fn test_token_holder_account_is_not_a_mint() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 1 },
                "value": {
                    "data": {
                        "parsed": {
                            "info": {
                                "isNative": false,
                                "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                                "owner": "Owner1111",
                                "state": "initialized",
                                "tokenAmount": { "amount": "10", "decimals": 6, "uiAmountString": "0.00001" }
                            },
                            "type": "account"
                        },
                        "program": "spl-token"
                    }
                }
            }
        });
        assert!(matches!(parse_account_info(&body), Err(SignalError::NotFound)));

        let wallet = json!({ "result": { "value": { "data": ["", "base64"], "owner": "11111111111111111111111111111111" } } });
        assert!(matches!(parse_account_info(&wallet), Err(SignalError::NotFound)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_account_info(&json!({ "hello": 1 })), Err(SignalError::Parse(_))));
    }

    #[test]
    fn test_scoring_is_asymmetric() {
        let both = score_authorities(&MintAuthorities {
            mint_authority: Some("Auth1".into()),
            freeze_authority: Some("Auth2".into()),
        });
        assert_eq!(both.score, 40);
        assert_eq!(both.risk, RiskLevel::High);
        assert!(both.summary.starts_with("Mint authority"));

        let mint_only = score_authorities(&MintAuthorities {
            mint_authority: Some("Auth1".into()),
            freeze_authority: None,
        });
        let freeze_only = score_authorities(&MintAuthorities {
            mint_authority: None,
            freeze_authority: Some("Auth2".into()),
        });
        assert_eq!(mint_only.score, 60);
        assert_eq!(freeze_only.score, 80);
        assert!(mint_only.score < freeze_only.score);
        assert_eq!(freeze_only.risk, RiskLevel::Low);
        assert!(freeze_only.summary.starts_with("Freeze authority"));

        let clean = score_authorities(&MintAuthorities::default());
        assert_eq!(clean.score, 100);
        assert!(clean.checks.unwrap().iter().all(|c| c.safe));
    }

    #[tokio::test]
    async fn test_fetch_against_rpc() {
        let app = Router::new().route(
            "/",
            post(|Json(req): Json<Value>| async move {
                assert_eq!(req["method"], "getAccountInfo");
                assert_eq!(req["params"][1]["encoding"], "jsonParsed");
                Json(mint_body(json!("MintAuth111"), Value::Null))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let client = OnChainClient::new(&format!("http://{}/", addr), Duration::from_secs(2)).unwrap();
        let authorities = client.fetch_authorities("Mint1111").await.unwrap();
        assert_eq!(authorities.mint_authority.as_deref(), Some("MintAuth111"));
        assert_eq!(authorities.freeze_authority, None);
    }
}
