//! Calendar engine: day arithmetic, the transaction model, recurrence
//! expansion, and running-balance projection.

pub mod balance;
pub mod dates;
pub mod expand;
pub mod transaction;

pub use balance::{compute_calendar_view, CalendarView};
pub use dates::{date_key, month_grid_window, parse_date_key, DateWindow};
pub use expand::{occurrence_days, DailyActivity};
pub use transaction::{
    Recurrence, Settings, Transaction, TransactionDraft, TransactionId, TransactionOccurrence,
};
