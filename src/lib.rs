#![doc(test(attr(deny(warnings))))]

//! Dompet is the ledger core of a client-side personal finance tracker:
//! wallets, categorized transactions, monthly budgets, and derived reports,
//! persisted through a synchronous key-value storage abstraction.
//!
//! The crate exposes only data-shaped inputs and outputs. A rendering layer
//! (web page, CLI, anything) calls the mutation and query operations on
//! [`ledger::LedgerStore`] and displays whatever comes back; no presentation
//! state lives here.

pub mod clock;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod reports;
pub mod seed;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Dompet tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
