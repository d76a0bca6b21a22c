//! Business logic for transaction records and occurrence-level edits.

use chrono::{Duration, NaiveDate};

use crate::calendar::{dates, Recurrence, Transaction, TransactionDraft, TransactionId};
use crate::errors::Result;
use crate::store::RecordStore;

/// How far an edit or delete of one occurrence reaches into its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Only the occurrence on the chosen day.
    Single,
    /// The chosen day and every later occurrence.
    Future,
    /// The whole record.
    All,
}

/// Validated CRUD helpers plus the occurrence-level workflows of the
/// calendar UI.
pub struct TransactionService;

impl TransactionService {
    pub fn add(store: &mut impl RecordStore, draft: TransactionDraft) -> Result<Transaction> {
        store.create_transaction(draft)
    }

    pub fn update(
        store: &mut impl RecordStore,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<Transaction> {
        store.update_transaction(id, draft)
    }

    pub fn remove(store: &mut impl RecordStore, id: TransactionId) -> Result<Transaction> {
        store.delete_transaction(id)
    }

    pub fn list(store: &impl RecordStore) -> Result<Vec<Transaction>> {
        store.list_transactions()
    }

    /// Applies an edit of the occurrence on `day` with the chosen scope.
    ///
    /// `Single` suppresses that day in the series and records the draft as a
    /// standalone one-off. `Future` truncates the series the day before and
    /// starts a new series from the draft, unless `day` is the series anchor,
    /// in which case the record is simply replaced. `All` replaces the record.
    pub fn edit_occurrence(
        store: &mut impl RecordStore,
        id: TransactionId,
        day: NaiveDate,
        draft: TransactionDraft,
        scope: EditScope,
    ) -> Result<()> {
        match scope {
            EditScope::All => {
                store.update_transaction(id, draft)?;
            }
            EditScope::Single => {
                let mut original = store.transaction(id)?;
                original.exclude(day);
                store.update_transaction(id, original.draft())?;

                let mut replacement = draft;
                replacement.recurrence = Recurrence::None;
                replacement.recurrence_interval = 1;
                replacement.recurrence_end_date = None;
                replacement.excluded_dates.clear();
                store.create_transaction(replacement)?;
            }
            EditScope::Future => {
                let original = store.transaction(id)?;
                if original.anchor_day() == day {
                    store.update_transaction(id, draft)?;
                } else {
                    truncate_before(store, original, day)?;
                    store.create_transaction(draft)?;
                }
                tracing::debug!(id, %day, "series split applied");
            }
        }
        Ok(())
    }

    /// Deletes the occurrence on `day` with the chosen scope: an exclusion,
    /// a truncation, or the whole record.
    pub fn remove_occurrence(
        store: &mut impl RecordStore,
        id: TransactionId,
        day: NaiveDate,
        scope: EditScope,
    ) -> Result<()> {
        match scope {
            EditScope::All => {
                store.delete_transaction(id)?;
            }
            EditScope::Single => {
                let mut original = store.transaction(id)?;
                original.exclude(day);
                store.update_transaction(id, original.draft())?;
            }
            EditScope::Future => {
                let original = store.transaction(id)?;
                truncate_before(store, original, day)?;
            }
        }
        Ok(())
    }
}

/// Ends the series the day before `day`, so the split day itself belongs
/// exclusively to whatever replaces it.
fn truncate_before(
    store: &mut impl RecordStore,
    original: Transaction,
    day: NaiveDate,
) -> Result<Transaction> {
    let id = original.id;
    let mut draft = original.draft();
    draft.recurrence_end_date = Some(dates::day_start(day - Duration::days(1)));
    store.update_transaction(id, draft)
}
