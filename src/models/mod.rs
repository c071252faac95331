//! Domain models for the betting slip.
//!
//! This module contains the entities the slip manager owns: selections
//! (the atomic legs of a bet), the display currency, and the bet payload
//! handed to the submission gateway.

pub mod bet;
pub mod currency;
pub mod selection;

// Re-export all models for convenient access
pub use bet::{Bet, BetItem, BetStatus};
pub use currency::Currency;
pub use selection::{Selection, SelectionDraft};
