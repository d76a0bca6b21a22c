#![doc(test(attr(deny(warnings))))]

//! Calendar Core provides the recurrence expansion and balance projection
//! engine behind a personal budgeting calendar, together with the JSON record
//! store and interactive shell that present it.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod i18n;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Calendar Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
