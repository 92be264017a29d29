#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod amount;
pub mod config;
pub mod currency;
pub mod gateway;
pub mod intent;
pub mod processors;
pub mod services;
