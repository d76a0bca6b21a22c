//! Application services orchestrating the record store and the calendar
//! engine.

pub mod calendar_service;
pub mod settings_service;
pub mod transaction_service;

pub use calendar_service::{CalendarService, MonthView};
pub use settings_service::SettingsService;
pub use transaction_service::{EditScope, TransactionService};
