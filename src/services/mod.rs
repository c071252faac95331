pub mod slip_service;

pub use slip_service::{AddOutcome, BetReceipt, SlipService};
