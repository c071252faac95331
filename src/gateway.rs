//! Bet submission gateway.
//!
//! The remote call that durably persists a finalized bet. The outcome is
//! a tagged variant so the manager can distinguish real persistence from
//! a degraded/unavailable backend; the transport layer never fabricates
//! success.

use crate::config::GatewayConfig;
use crate::error::{SlipError, SlipResult};
use crate::models::Bet;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

/// Result of handing a bet to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The bet was durably persisted under the returned identifier
    Persisted { id: String },
    /// The backend could not take the bet; the slip must stay intact
    Unavailable { reason: String },
}

/// Remote capability that persists a finalized bet
#[async_trait]
pub trait BetGateway: Send + Sync {
    async fn submit(&self, bet: &Bet) -> SlipResult<SubmitOutcome>;
}

/// Wire response shape: `{ success: boolean, id?: string }`
#[derive(Debug, Deserialize)]
struct GatewayResponse {
    success: bool,
    id: Option<String>,
}

/// HTTP implementation of the bet gateway
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> SlipResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| SlipError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl BetGateway for HttpGateway {
    async fn submit(&self, bet: &Bet) -> SlipResult<SubmitOutcome> {
        let response = match self.client.post(&self.url).json(bet).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Bet gateway unreachable: {}", e);
                return Ok(SubmitOutcome::Unavailable {
                    reason: format!("Transport error: {}", e),
                });
            }
        };

        if !response.status().is_success() {
            return Ok(SubmitOutcome::Unavailable {
                reason: format!("Gateway returned HTTP {}", response.status()),
            });
        }

        let body: GatewayResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return Ok(SubmitOutcome::Unavailable {
                    reason: format!("Malformed gateway response: {}", e),
                })
            }
        };

        match body {
            GatewayResponse {
                success: true,
                id: Some(id),
            } => Ok(SubmitOutcome::Persisted { id }),
            GatewayResponse {
                success: true,
                id: None,
            } => Ok(SubmitOutcome::Unavailable {
                reason: "Gateway accepted the bet but returned no id".to_string(),
            }),
            _ => Ok(SubmitOutcome::Unavailable {
                reason: "Gateway rejected the bet".to_string(),
            }),
        }
    }
}
