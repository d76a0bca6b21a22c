use crate::calendar::Settings;
use crate::errors::{CalendarError, Result};
use crate::store::RecordStore;

pub struct SettingsService;

impl SettingsService {
    /// Reads the singleton, creating the default record on first access.
    pub fn get(store: &mut impl RecordStore) -> Result<Settings> {
        store.settings()
    }

    /// Persists updated settings after normalizing the language and checking
    /// the balance.
    pub fn update(store: &mut impl RecordStore, mut settings: Settings) -> Result<Settings> {
        if !settings.initial_balance.is_finite() {
            return Err(CalendarError::InvalidInput(
                "initial balance must be a finite number".into(),
            ));
        }
        if settings.currency.trim().is_empty() {
            return Err(CalendarError::InvalidInput("currency must not be empty".into()));
        }
        settings.currency = settings.currency.trim().to_uppercase();
        settings.language = match settings.language.trim() {
            "en" => "en".into(),
            _ => "fr".into(),
        };
        store.save_settings(settings.clone())?;
        Ok(settings)
    }
}
