//! Background processors.
//!
//! - `IntentReaper`: periodically evicts abandoned and long-finalized intents

pub mod intent_reaper;

pub use intent_reaper::IntentReaper;
