use crate::models::{Currency, Selection};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted bet.
///
/// Bets are always created `Pending`; `Won`/`Lost` appear only on bets
/// rehydrated from the backing store for history display. Settlement is
/// not computed client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
}

impl BetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "pending",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
        }
    }
}

/// A slip selection with the client-only id stripped, as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetItem {
    pub event: String,
    pub selection: String,
    pub odds: Decimal,
}

impl From<&Selection> for BetItem {
    fn from(selection: &Selection) -> Self {
        Self {
            event: selection.event.clone(),
            selection: selection.selection.clone(),
            odds: selection.odds,
        }
    }
}

/// Bet submission payload, constructed from the slip at submit time.
///
/// `amount` and `potential_winnings` are normalized to RWF regardless of
/// the display currency; `currency` records the display currency at
/// submission for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub user_id: String,
    pub items: Vec<BetItem>,
    pub total_odds: Decimal,
    pub amount: Decimal,
    pub potential_winnings: Decimal,
    pub timestamp: DateTime<Utc>,
    pub status: BetStatus,
    pub currency: Currency,
}

impl Bet {
    /// Create a new pending Bet timestamped now
    pub fn new(
        user_id: String,
        items: Vec<BetItem>,
        total_odds: Decimal,
        amount: Decimal,
        potential_winnings: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            user_id,
            items,
            total_odds,
            amount,
            potential_winnings,
            timestamp: Utc::now(),
            status: BetStatus::Pending,
            currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bet_is_pending() {
        let bet = Bet::new(
            "user-1".to_string(),
            vec![],
            Decimal::ONE,
            Decimal::new(1000, 0),
            Decimal::new(1000, 0),
            Currency::Rwf,
        );
        assert_eq!(bet.status, BetStatus::Pending);
        assert_eq!(bet.status.as_str(), "pending");
    }

    #[test]
    fn test_wire_shape_field_names() {
        let bet = Bet::new(
            "guest".to_string(),
            vec![BetItem {
                event: "A vs B".to_string(),
                selection: "A to win".to_string(),
                odds: Decimal::new(20, 1),
            }],
            Decimal::new(20, 1),
            Decimal::new(1000, 0),
            Decimal::new(2000, 0),
            Currency::Rwf,
        );

        let json = serde_json::to_value(&bet).unwrap();
        assert_eq!(json["userId"], "guest");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["currency"], "RWF");
        assert!(json["totalOdds"].is_number());
        assert!(json["items"][0].get("id").is_none());
    }
}
