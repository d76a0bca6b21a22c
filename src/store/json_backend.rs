use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::calendar::{Settings, Transaction, TransactionDraft, TransactionId};
use crate::config;
use crate::errors::{CalendarError, Result};
use crate::utils::ensure_dir;

use super::RecordStore;

const TMP_SUFFIX: &str = "tmp";
const FIRST_ID: TransactionId = 1;

/// File-backed record store: the whole state lives in one JSON document and
/// every mutation is persisted through a temp-file + rename, so a failed
/// write never corrupts the previous snapshot.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    state: StoreState,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreState {
    #[serde(default = "first_id")]
    next_id: TransactionId,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    settings: Option<Settings>,
}

fn first_id() -> TransactionId {
    FIRST_ID
}

impl JsonStore {
    /// Opens (or initializes) the store at `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            StoreState {
                next_id: FIRST_ID,
                ..StoreState::default()
            }
        };
        Ok(Self { path, state })
    }

    /// Opens the store at the configured application data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(config::store_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn position(&self, id: TransactionId) -> Result<usize> {
        self.state
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(CalendarError::TransactionNotFound(id))
    }
}

impl RecordStore for JsonStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.state.transactions.clone())
    }

    fn transaction(&self, id: TransactionId) -> Result<Transaction> {
        let index = self.position(id)?;
        Ok(self.state.transactions[index].clone())
    }

    fn create_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        validate(&draft)?;
        let id = self.state.next_id;
        self.state.next_id += 1;
        let txn = draft.into_transaction(id);
        self.state.transactions.push(txn.clone());
        self.persist()?;
        tracing::debug!(id, "transaction created");
        Ok(txn)
    }

    fn update_transaction(
        &mut self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<Transaction> {
        validate(&draft)?;
        let index = self.position(id)?;
        let txn = draft.into_transaction(id);
        self.state.transactions[index] = txn.clone();
        self.persist()?;
        tracing::debug!(id, "transaction updated");
        Ok(txn)
    }

    fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction> {
        let index = self.position(id)?;
        let removed = self.state.transactions.remove(index);
        self.persist()?;
        tracing::debug!(id, "transaction deleted");
        Ok(removed)
    }

    fn settings(&mut self) -> Result<Settings> {
        if let Some(settings) = &self.state.settings {
            return Ok(settings.clone());
        }
        let defaults = Settings::default();
        self.state.settings = Some(defaults.clone());
        self.persist()?;
        tracing::debug!("settings initialized with defaults");
        Ok(defaults)
    }

    fn save_settings(&mut self, settings: Settings) -> Result<()> {
        if !settings.initial_balance.is_finite() {
            return Err(CalendarError::InvalidInput(
                "initial balance must be a finite number".into(),
            ));
        }
        self.state.settings = Some(settings);
        self.persist()
    }
}

fn validate(draft: &TransactionDraft) -> Result<()> {
    if !draft.amount.is_finite() {
        return Err(CalendarError::InvalidInput(
            "amount must be a finite number".into(),
        ));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TransactionDraft;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::open(temp.path().join("store.json")).expect("json store");
        (store, temp)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let (mut store, _guard) = store_with_temp_dir();
        let first = store
            .create_transaction(TransactionDraft::new(10.0, "a", day(2024, 1, 1)))
            .unwrap();
        let second = store
            .create_transaction(TransactionDraft::new(20.0, "b", day(2024, 1, 2)))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn reopen_preserves_records_and_counter() {
        let (mut store, guard) = store_with_temp_dir();
        store
            .create_transaction(TransactionDraft::new(10.0, "a", day(2024, 1, 1)))
            .unwrap();
        store.delete_transaction(1).unwrap();

        let mut reopened = JsonStore::open(guard.path().join("store.json")).unwrap();
        let created = reopened
            .create_transaction(TransactionDraft::new(5.0, "b", day(2024, 1, 2)))
            .unwrap();
        // Deleted ids are never reused.
        assert_eq!(created.id, 2);
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let (mut store, _guard) = store_with_temp_dir();
        let err = store
            .create_transaction(TransactionDraft::new(f64::NAN, "broken", day(2024, 1, 1)))
            .expect_err("NaN amounts must not be stored");
        assert!(matches!(err, CalendarError::InvalidInput(_)));
    }
}
