use crate::config::SlipConfig;
use crate::error::{SlipError, SlipResult};
use crate::gateway::{BetGateway, SubmitOutcome};
use crate::models::{Bet, BetItem, Currency, Selection, SelectionDraft};
use crate::session::{SessionProvider, GUEST_USER_ID};
use crate::store::{SlipStore, CURRENCY_KEY, SELECTIONS_KEY};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::timeout;
use tracing::{error, info, warn};
use uuid::Uuid;

/// How `add_selection` resolved: a fresh leg, or a replacement of a
/// conflicting leg on the same event/market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Replaced,
}

/// Returned by a successful submission
#[derive(Debug, Clone)]
pub struct BetReceipt {
    pub bet_id: String,
    pub total_odds: Decimal,
    /// Stake normalized to RWF
    pub amount_rwf: Decimal,
    /// Potential winnings normalized to RWF
    pub potential_winnings_rwf: Decimal,
}

struct SlipState {
    selections: Vec<Selection>,
    currency: Currency,
}

/// Betting slip manager.
///
/// Owns the ordered list of pending selections and the display currency,
/// persists both through the injected store on every mutation, and
/// submits a finalized bet through the gateway. Construct one instance at
/// application start and share it (`Arc`); state sits behind a mutex so
/// each operation's read-modify-write is atomic, and the gateway await in
/// `submit` never holds the lock.
pub struct SlipService {
    state: Mutex<SlipState>,
    store: Arc<dyn SlipStore>,
    gateway: Arc<dyn BetGateway>,
    session: Arc<dyn SessionProvider>,
    config: SlipConfig,
}

impl SlipService {
    /// Create a manager, rehydrating selections and currency from the
    /// store. Absent or malformed persisted data resets to an empty slip
    /// in RWF rather than failing construction.
    pub fn new(
        store: Arc<dyn SlipStore>,
        gateway: Arc<dyn BetGateway>,
        session: Arc<dyn SessionProvider>,
        config: SlipConfig,
    ) -> Self {
        let selections = match store.get(SELECTIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Selection>>(&raw) {
                Ok(selections) => selections,
                Err(e) => {
                    warn!("Malformed persisted selections, resetting slip: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Failed to read persisted selections, resetting slip: {}", e);
                Vec::new()
            }
        };

        let currency = match store.get(CURRENCY_KEY) {
            Ok(Some(raw)) => raw.parse::<Currency>().unwrap_or_else(|e| {
                warn!("Malformed persisted currency, resetting to RWF: {}", e);
                Currency::default()
            }),
            Ok(None) => Currency::default(),
            Err(e) => {
                error!("Failed to read persisted currency, resetting to RWF: {}", e);
                Currency::default()
            }
        };

        if !selections.is_empty() {
            info!("Rehydrated slip with {} selection(s)", selections.len());
        }

        Self {
            state: Mutex::new(SlipState {
                selections,
                currency,
            }),
            store,
            gateway,
            session,
            config,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SlipState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_selections(&self, state: &SlipState) -> SlipResult<()> {
        let raw = serde_json::to_string(&state.selections)?;
        self.store.set(SELECTIONS_KEY, &raw)
    }

    /// Add a leg to the slip. A candidate that conflicts with an existing
    /// leg on the same event/market replaces it in place (keeping its
    /// position, taking the fresh id); otherwise it is appended.
    pub fn add_selection(&self, draft: SelectionDraft) -> SlipResult<AddOutcome> {
        draft.validate().map_err(SlipError::InvalidInput)?;

        let mut state = self.lock_state();
        let candidate = draft.into_selection();

        let outcome = match state
            .selections
            .iter()
            .position(|existing| conflicts(existing, &candidate))
        {
            Some(index) => {
                info!(
                    "Replacing selection on event {:?}: {:?} -> {:?}",
                    candidate.event, state.selections[index].selection, candidate.selection
                );
                state.selections[index] = candidate;
                AddOutcome::Replaced
            }
            None => {
                info!(
                    "Adding selection: event={:?}, outcome={:?}, odds={}",
                    candidate.event, candidate.selection, candidate.odds
                );
                state.selections.push(candidate);
                AddOutcome::Added
            }
        };

        self.persist_selections(&state)?;
        Ok(outcome)
    }

    /// Remove the leg with the given id. Removing an unknown id is a
    /// no-op, not an error.
    pub fn remove_selection(&self, id: Uuid) -> SlipResult<()> {
        let mut state = self.lock_state();
        let before = state.selections.len();
        state.selections.retain(|s| s.id != id);

        if state.selections.len() < before {
            info!("Removed selection {}", id);
        }

        self.persist_selections(&state)
    }

    /// Empty the slip. Idempotent.
    pub fn clear(&self) -> SlipResult<()> {
        let mut state = self.lock_state();
        state.selections.clear();
        self.persist_selections(&state)
    }

    /// Change the display currency. Odds are currency-independent
    /// multipliers and are not converted; stake amounts tracked by the
    /// caller should go through [`convert`](Self::convert).
    pub fn set_currency(&self, currency: Currency) -> SlipResult<()> {
        let mut state = self.lock_state();
        state.currency = currency;
        self.store.set(CURRENCY_KEY, currency.as_str())
    }

    /// Convert an amount between display currencies at the configured
    /// fixed rate
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Decimal {
        if from == to {
            return amount;
        }
        match (from, to) {
            (Currency::Usd, Currency::Rwf) => amount * self.config.rwf_per_usd,
            (Currency::Rwf, Currency::Usd) => amount / self.config.rwf_per_usd,
            (Currency::Rwf, Currency::Rwf) | (Currency::Usd, Currency::Usd) => amount,
        }
    }

    /// Product of all selection odds; 1 for an empty slip
    pub fn aggregate_odds(&self) -> Decimal {
        let state = self.lock_state();
        state
            .selections
            .iter()
            .fold(Decimal::ONE, |acc, s| acc * s.odds)
    }

    /// Winnings a stake in the display currency would pay at the current
    /// aggregate odds, in the same currency
    pub fn potential_winnings(&self, stake: Decimal) -> Decimal {
        stake * self.aggregate_odds()
    }

    /// Snapshot of the current selections in display order
    pub fn selections(&self) -> Vec<Selection> {
        self.lock_state().selections.clone()
    }

    /// Current display currency
    pub fn currency(&self) -> Currency {
        self.lock_state().currency
    }

    pub fn len(&self) -> usize {
        self.lock_state().selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().selections.is_empty()
    }

    /// Submit the slip as a single bet with `stake` in the display
    /// currency.
    ///
    /// Precondition order is a contract: empty slip or non-positive stake
    /// first, then authentication, then the currency minimum. On gateway
    /// success the submitted legs are removed from the slip (legs added
    /// while the call was in flight are kept); on any failure (unavailable
    /// backend, transport error, timeout) the slip stays intact and the
    /// error is `SubmissionFailed`. No retry is attempted. The persistence
    /// write after a successful submission is fire-and-forget: a store
    /// failure is logged, never reported as a submission failure.
    pub async fn submit(&self, stake: Decimal) -> SlipResult<BetReceipt> {
        let (bet, submitted_ids) = {
            let state = self.lock_state();

            if state.selections.is_empty() {
                return Err(SlipError::InvalidInput(
                    "Betting slip is empty".to_string(),
                ));
            }

            if stake <= Decimal::ZERO {
                return Err(SlipError::InvalidInput(
                    "Stake must be a positive amount".to_string(),
                ));
            }

            if !self.session.is_authenticated() {
                return Err(SlipError::AuthRequired);
            }

            let minimum = match state.currency {
                Currency::Rwf => self.config.min_stake_rwf,
                Currency::Usd => self.config.min_stake_usd,
            };
            if stake < minimum {
                return Err(SlipError::InvalidInput(format!(
                    "Stake is below the minimum of {} {}",
                    minimum, state.currency
                )));
            }

            let total_odds = state
                .selections
                .iter()
                .fold(Decimal::ONE, |acc, s| acc * s.odds);
            let amount_rwf = self.convert(stake, state.currency, Currency::Rwf);
            let potential_winnings = amount_rwf * total_odds;
            let user_id = self
                .session
                .user_id()
                .unwrap_or_else(|| GUEST_USER_ID.to_string());
            let items: Vec<BetItem> = state.selections.iter().map(BetItem::from).collect();
            let submitted_ids: Vec<Uuid> = state.selections.iter().map(|s| s.id).collect();

            (
                Bet::new(
                    user_id,
                    items,
                    total_odds,
                    amount_rwf,
                    potential_winnings,
                    state.currency,
                ),
                submitted_ids,
            )
        };

        info!(
            "Submitting bet: user={}, legs={}, total_odds={}, amount_rwf={}",
            bet.user_id,
            bet.items.len(),
            bet.total_odds,
            bet.amount
        );

        let outcome = match timeout(self.config.gateway.timeout(), self.gateway.submit(&bet)).await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!("Bet gateway error: {}", e);
                return Err(SlipError::SubmissionFailed(e.to_string()));
            }
            Err(_) => {
                error!(
                    "Bet gateway timed out after {}s",
                    self.config.gateway.timeout_secs
                );
                return Err(SlipError::SubmissionFailed(format!(
                    "Gateway timed out after {}s",
                    self.config.gateway.timeout_secs
                )));
            }
        };

        match outcome {
            SubmitOutcome::Persisted { id } => {
                let mut state = self.lock_state();
                state.selections.retain(|s| !submitted_ids.contains(&s.id));
                // The bet is already durably accepted; a failed store write
                // must not turn the success into a reported failure
                if let Err(e) = self.persist_selections(&state) {
                    error!("Failed to persist slip after bet {}: {}", id, e);
                }
                info!("Bet {} persisted, submitted legs cleared", id);

                Ok(BetReceipt {
                    bet_id: id,
                    total_odds: bet.total_odds,
                    amount_rwf: bet.amount,
                    potential_winnings_rwf: bet.potential_winnings,
                })
            }
            SubmitOutcome::Unavailable { reason } => {
                warn!("Bet gateway unavailable, slip left intact: {}", reason);
                Err(SlipError::SubmissionFailed(reason))
            }
        }
    }
}

/// Conflict detection for selection replacement.
///
/// Structured keys win: when both legs carry `event_id` and `market_name`
/// the decision is exact equality of that pair. Only legs without
/// structured identifiers fall back to the legacy heuristic of same event
/// label plus first-token overlap of the outcome labels.
fn conflicts(existing: &Selection, candidate: &Selection) -> bool {
    if let (Some(existing_key), Some(candidate_key)) =
        (existing.market_key(), candidate.market_key())
    {
        return existing_key == candidate_key;
    }

    existing.event == candidate.event
        && existing.selection.contains(candidate.outcome_family())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn selection(event: &str, outcome: &str) -> Selection {
        SelectionDraft::new(event, outcome, Decimal::new(20, 1)).into_selection()
    }

    #[test]
    fn test_conflict_heuristic_same_event_and_family() {
        let existing = selection("A vs B", "A to win");
        let candidate = selection("A vs B", "A to win by 2");
        assert!(conflicts(&existing, &candidate));
    }

    #[test]
    fn test_no_conflict_across_events() {
        let existing = selection("A vs B", "A to win");
        let candidate = selection("C vs D", "A to win");
        assert!(!conflicts(&existing, &candidate));
    }

    #[test]
    fn test_structured_key_overrides_heuristic() {
        let existing = SelectionDraft::new("A vs B", "Over 2.5", Decimal::new(18, 1))
            .with_market("ev-1", "totals")
            .into_selection();

        // Same market, differently-worded outcome: heuristic would miss it
        let candidate = SelectionDraft::new("A vs B", "Under 2.5", Decimal::new(21, 1))
            .with_market("ev-1", "totals")
            .into_selection();
        assert!(conflicts(&existing, &candidate));

        // Same event, different market: heuristic alone could false-positive
        let other_market = SelectionDraft::new("A vs B", "Over 9.5 corners", Decimal::new(19, 1))
            .with_market("ev-1", "corners")
            .into_selection();
        assert!(!conflicts(&existing, &other_market));
    }
}
