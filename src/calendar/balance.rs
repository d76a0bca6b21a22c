use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::dates::DateWindow;
use super::expand::DailyActivity;
use super::transaction::{Transaction, TransactionOccurrence};

/// Per-day balances and occurrences for a visible window. Map keys
/// serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CalendarView {
    pub balances: BTreeMap<NaiveDate, f64>,
    pub occurrences: BTreeMap<NaiveDate, Vec<TransactionOccurrence>>,
}

impl CalendarView {
    pub fn balance_on(&self, day: NaiveDate) -> Option<f64> {
        self.balances.get(&day).copied()
    }

    pub fn occurrences_on(&self, day: NaiveDate) -> &[TransactionOccurrence] {
        self.occurrences.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Walks the running balance over `activity` and restricts the result to
/// `window`.
///
/// The walk starts at the earliest contributing day when history precedes
/// the window: an adjustment can reset the balance discontinuously, so
/// starting at the window edge would be wrong whenever older records exist.
/// Days before the window are scaffolding and never appear in the output;
/// every day inside the window gets a balance entry, transactions or not.
pub fn project(activity: &DailyActivity, initial_balance: f64, window: DateWindow) -> CalendarView {
    let start = activity
        .earliest_day()
        .map(|earliest| earliest.min(window.start))
        .unwrap_or(window.start);

    let mut view = CalendarView::default();
    let mut balance = initial_balance;
    let mut day = start;
    while day <= window.end {
        if let Some(reset) = activity.adjustments.get(&day) {
            balance = *reset;
        } else if let Some(net) = activity.net_amounts.get(&day) {
            balance += *net;
        }

        if day >= window.start {
            view.balances.insert(day, balance);
            if let Some(occurrences) = activity.occurrences.get(&day) {
                view.occurrences.insert(day, occurrences.clone());
            }
        }
        day = day + Duration::days(1);
    }
    view
}

/// The single pure operation of the core: expand every transaction of the
/// snapshot (history included), then project balances over the window.
pub fn compute_calendar_view(
    transactions: &[Transaction],
    initial_balance: f64,
    window: DateWindow,
) -> CalendarView {
    let activity = DailyActivity::collect(transactions, window.end);
    tracing::debug!(
        transactions = transactions.len(),
        window_start = %window.start,
        window_end = %window.end,
        "computing calendar view"
    );
    project(&activity, initial_balance, window)
}
