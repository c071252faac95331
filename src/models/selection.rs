use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single leg of a bet: one chosen outcome with its odds.
///
/// `event_id`, `match_name` and `market_name` are denormalized references
/// to an external event/market, carried for display and conflict keying,
/// never validated against a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub id: Uuid,
    pub event: String,
    pub selection: String,
    pub odds: Decimal, // decimal multiplier, > 1.0 in realistic usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,
}

/// A selection as supplied by the caller, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDraft {
    pub event: String,
    pub selection: String,
    pub odds: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_name: Option<String>,
}

impl SelectionDraft {
    /// Create a draft from the bare event/outcome/odds triple
    pub fn new(event: impl Into<String>, selection: impl Into<String>, odds: Decimal) -> Self {
        Self {
            event: event.into(),
            selection: selection.into(),
            odds,
            event_id: None,
            match_name: None,
            market_name: None,
        }
    }

    /// Attach the structured event/market identifiers
    pub fn with_market(mut self, event_id: impl Into<String>, market_name: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self.market_name = Some(market_name.into());
        self
    }

    /// Validate that the draft is structurally usable
    pub fn validate(&self) -> Result<(), String> {
        if self.event.trim().is_empty() {
            return Err("Event label must not be empty".to_string());
        }
        if self.selection.trim().is_empty() {
            return Err("Outcome label must not be empty".to_string());
        }
        if self.odds <= Decimal::ZERO {
            return Err("Odds must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Promote the draft into a Selection with a fresh id
    pub fn into_selection(self) -> Selection {
        Selection {
            id: Uuid::new_v4(),
            event: self.event,
            selection: self.selection,
            odds: self.odds,
            event_id: self.event_id,
            match_name: self.match_name,
            market_name: self.market_name,
        }
    }
}

impl Selection {
    /// Structured conflict key, present only when both identifiers are set
    pub fn market_key(&self) -> Option<(&str, &str)> {
        match (self.event_id.as_deref(), self.market_name.as_deref()) {
            (Some(event_id), Some(market)) => Some((event_id, market)),
            _ => None,
        }
    }

    /// First whitespace-delimited token of the outcome label, used by the
    /// legacy conflict heuristic when no structured key is available
    pub fn outcome_family(&self) -> &str {
        self.selection.split_whitespace().next().unwrap_or("")
    }
}
