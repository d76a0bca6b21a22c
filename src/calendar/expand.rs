use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use super::dates;
use super::transaction::{Recurrence, Transaction, TransactionOccurrence};

/// Concrete, non-excluded occurrence days of one transaction.
///
/// `horizon` is the end of the requested window (or any later day); an
/// open-ended series is expanded one month past it, which is as far as any
/// caller can observe. A bounded series runs to its own end day. The cursor
/// strictly advances each step, so the loop always terminates.
pub fn occurrence_days(txn: &Transaction, horizon: NaiveDate) -> Vec<NaiveDate> {
    let anchor = txn.anchor_day();
    let step = match txn.recurrence {
        Recurrence::None => {
            if txn.is_excluded(anchor) {
                return Vec::new();
            }
            return vec![anchor];
        }
        recurring => recurring,
    };

    let limit = txn.end_day().unwrap_or_else(|| dates::add_months(horizon, 1));
    let interval = txn.interval();
    let mut days = Vec::new();
    let mut cursor = anchor;
    while cursor <= limit {
        if !txn.is_excluded(cursor) {
            days.push(cursor);
        }
        cursor = match step {
            Recurrence::Weekly => cursor + Duration::weeks(interval as i64),
            Recurrence::Monthly => dates::add_months(cursor, interval as i32),
            Recurrence::None => unreachable!("handled above"),
        };
    }
    days
}

/// Per-day activity accumulated from expanding every transaction of a
/// snapshot: summed net amounts, balance adjustments, and the occurrence
/// multimap used for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyActivity {
    pub net_amounts: BTreeMap<NaiveDate, f64>,
    pub adjustments: BTreeMap<NaiveDate, f64>,
    pub occurrences: BTreeMap<NaiveDate, Vec<TransactionOccurrence>>,
}

impl DailyActivity {
    /// Expands the whole snapshot up to `horizon`.
    ///
    /// Transactions are processed in ascending id order, so when several
    /// adjustments land on the same day the highest id wins.
    pub fn collect(transactions: &[Transaction], horizon: NaiveDate) -> Self {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|txn| txn.id);

        let mut activity = DailyActivity::default();
        for txn in ordered {
            for day in occurrence_days(txn, horizon) {
                activity.record(txn, day);
            }
        }
        activity
    }

    fn record(&mut self, txn: &Transaction, day: NaiveDate) {
        if txn.is_adjustment {
            self.adjustments.insert(day, txn.amount);
        } else {
            *self.net_amounts.entry(day).or_default() += txn.amount;
        }
        self.occurrences
            .entry(day)
            .or_default()
            .push(TransactionOccurrence {
                transaction: txn.clone(),
                date: day,
            });
    }

    /// The first day carrying any amount or adjustment; the projection walk
    /// must start no later than this.
    pub fn earliest_day(&self) -> Option<NaiveDate> {
        let first_amount = self.net_amounts.keys().next().copied();
        let first_adjustment = self.adjustments.keys().next().copied();
        match (first_amount, first_adjustment) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (day, None) | (None, day) => day,
        }
    }
}
