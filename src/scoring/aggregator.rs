//! Scam-aggregator danger score
//!
//! The aggregator reports danger on an open-ended scale (higher = riskier).
//! It is inverted into a 0-100 safety score.

use reqwest::Url;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

use super::rules::{clamp_score, DANGER_DIVISOR, MAX_SCORE};
use super::SignalError;
use crate::models::{Check, RiskLevel, ScanResult};

pub const CLEAN_SUMMARY: &str = "No risks reported by the scam aggregator.";

#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorReport {
    #[serde(alias = "score")]
    pub danger: f64,
    /// Some upstreams send `null` for an empty list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub risks: Vec<AggregatorRisk>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorRisk {
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct AggregatorClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl AggregatorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SignalError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SignalError::from_reqwest)?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SignalError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SignalError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// `{base}/v1/tokens/{address}/report/summary`, address as one encoded segment
    fn report_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "tokens"])
                .push(address)
                .extend(["report", "summary"]);
        }
        url
    }

    /// Single attempt, no retries
    pub async fn fetch_report(&self, address: &str) -> Result<AggregatorReport, SignalError> {
        let url = self.report_url(address);

        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(SignalError::from_reqwest)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SignalError::NotFound);
        }
        if !status.is_success() {
            return Err(SignalError::Status(status.as_u16()));
        }

        response.json().await
            .map_err(|e| SignalError::Parse(e.to_string()))
    }
}

/// `safety = clamp(100 - trunc(danger / 100), 0, 100)`
pub fn safety_from_danger(danger: f64) -> u8 {
    // `as` saturates, so huge or negative danger values still clamp cleanly
    let penalty = (danger / DANGER_DIVISOR).trunc() as i64;
    clamp_score(MAX_SCORE.saturating_sub(penalty))
}

pub fn score_report(report: &AggregatorReport) -> ScanResult {
    let score = safety_from_danger(report.danger);

    let checks: Vec<Check> = report
        .risks
        .iter()
        .map(|risk| {
            let status = risk
                .level
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_else(|| "DETECTED".to_string());
            Check::new(risk.name.clone(), status, false)
        })
        .collect();

    // First-listed risk is the most salient finding
    let summary = match report.risks.first() {
        Some(risk) => match &risk.description {
            Some(desc) if !desc.trim().is_empty() => format!("Top risk: {} ({}).", risk.name, desc.trim()),
            _ => format!("Top risk: {}.", risk.name),
        },
        None => CLEAN_SUMMARY.to_string(),
    };

    ScanResult {
        score,
        risk: RiskLevel::from_score(score),
        checks: if checks.is_empty() { None } else { Some(checks) },
        summary,
    }
}
