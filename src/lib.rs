//! Betting slip state manager.
//!
//! Owns an ordered cart of selections with odds aggregation, fixed-rate
//! currency conversion, durable persistence of in-progress state, and
//! atomic bet submission against a remote gateway. External collaborators
//! (storage, the submission backend, authentication) are injected trait
//! capabilities, so the crate is embedded rather than run.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::{GatewayConfig, SlipConfig};
pub use error::{SlipError, SlipResult};
pub use gateway::{BetGateway, HttpGateway, SubmitOutcome};
pub use models::{Bet, BetItem, BetStatus, Currency, Selection, SelectionDraft};
pub use services::{AddOutcome, BetReceipt, SlipService};
pub use session::{SessionProvider, StaticSession, GUEST_USER_ID};
pub use store::{FileStore, MemoryStore, SlipStore};
