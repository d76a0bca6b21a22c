//! Record persistence: transactions and the settings singleton, keyed by
//! store-assigned identifiers.

pub mod json_backend;

pub use json_backend::JsonStore;

use crate::calendar::{Settings, Transaction, TransactionDraft, TransactionId};
use crate::errors::Result;

/// CRUD surface the application layers depend on.
///
/// Implementations must hand out a consistent snapshot per call: one
/// `list_transactions` result is enough for one view computation.
pub trait RecordStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>>;
    fn transaction(&self, id: TransactionId) -> Result<Transaction>;
    /// Persists a new record and returns it with its assigned id.
    fn create_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction>;
    fn update_transaction(&mut self, id: TransactionId, draft: TransactionDraft)
        -> Result<Transaction>;
    fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction>;
    /// Reads the settings singleton, creating and persisting the default
    /// record on first access.
    fn settings(&mut self) -> Result<Settings>;
    fn save_settings(&mut self, settings: Settings) -> Result<()>;
}
