use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates;

pub type TransactionId = i64;

/// How a transaction repeats from its anchor date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

/// A recorded transaction, one-off or the template of a recurring series.
///
/// The wire shape is camelCase JSON with ISO date-time strings; in memory
/// all date comparisons happen on calendar days, never on timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: f64,
    pub description: String,
    #[serde(with = "serde_iso_datetime")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default = "default_interval")]
    pub recurrence_interval: u32,
    #[serde(default, with = "serde_iso_datetime_opt")]
    pub recurrence_end_date: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_excluded_dates")]
    pub excluded_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub is_adjustment: bool,
}

impl Transaction {
    /// The calendar day anchoring the series (or the single occurrence).
    pub fn anchor_day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Inclusive last occurrence day of a bounded series.
    pub fn end_day(&self) -> Option<NaiveDate> {
        self.recurrence_end_date.map(|ts| ts.date_naive())
    }

    /// Recurrence interval with the defensive floor applied, so expansion
    /// always advances.
    pub fn interval(&self) -> u32 {
        self.recurrence_interval.max(1)
    }

    pub fn is_excluded(&self, day: NaiveDate) -> bool {
        self.excluded_dates.contains(&day)
    }

    /// Suppresses the occurrence on `day` without touching the rest of the
    /// series.
    pub fn exclude(&mut self, day: NaiveDate) {
        self.excluded_dates.insert(day);
    }

    /// The same record without its identity, ready to feed back into an
    /// update or to seed a new record.
    pub fn draft(&self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
            recurrence: self.recurrence,
            recurrence_interval: self.recurrence_interval,
            recurrence_end_date: self.recurrence_end_date,
            excluded_dates: self.excluded_dates.clone(),
            is_adjustment: self.is_adjustment,
        }
    }
}

/// Create/update payload: a transaction before the store assigns its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub amount: f64,
    pub description: String,
    #[serde(with = "serde_iso_datetime")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default = "default_interval")]
    pub recurrence_interval: u32,
    #[serde(default, with = "serde_iso_datetime_opt")]
    pub recurrence_end_date: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_excluded_dates")]
    pub excluded_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub is_adjustment: bool,
}

impl TransactionDraft {
    pub fn new(amount: f64, description: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            amount,
            description: description.into(),
            date: dates::day_start(day),
            recurrence: Recurrence::None,
            recurrence_interval: 1,
            recurrence_end_date: None,
            excluded_dates: BTreeSet::new(),
            is_adjustment: false,
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence, interval: u32) -> Self {
        self.recurrence = recurrence;
        self.recurrence_interval = interval;
        self
    }

    pub fn ending_on(mut self, day: NaiveDate) -> Self {
        self.recurrence_end_date = Some(dates::day_start(day));
        self
    }

    pub fn as_adjustment(mut self) -> Self {
        self.is_adjustment = true;
        self
    }

    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            date: self.date,
            recurrence: self.recurrence,
            recurrence_interval: self.recurrence_interval,
            recurrence_end_date: self.recurrence_end_date,
            excluded_dates: self.excluded_dates,
            is_adjustment: self.is_adjustment,
        }
    }
}

/// One concrete dated instance of a transaction. Derived and ephemeral;
/// every occurrence of a series carries the same transaction id, so
/// `(id, date)` is the identity.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOccurrence {
    pub transaction: Transaction,
    pub date: NaiveDate,
}

/// Singleton application settings record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub initial_balance: f64,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "AUD".into(),
            initial_balance: 0.0,
            language: "fr".into(),
        }
    }
}

fn default_interval() -> u32 {
    1
}

mod serde_iso_datetime {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::calendar::dates::parse_iso_datetime;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(de)?;
        parse_iso_datetime(&raw).ok_or_else(|| Error::custom(format!("invalid date `{raw}`")))
    }
}

mod serde_iso_datetime_opt {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::calendar::dates::parse_iso_datetime;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => ser.serialize_some(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(de)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_iso_datetime(&raw)
                .map(Some)
                .ok_or_else(|| Error::custom(format!("invalid date `{raw}`"))),
        }
    }
}

mod serde_excluded_dates {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::calendar::dates::{date_key, parse_date_key};

    pub fn serialize<S: Serializer>(
        value: &BTreeSet<NaiveDate>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        if value.is_empty() {
            return ser.serialize_none();
        }
        let joined = value.iter().map(|day| date_key(*day)).collect::<Vec<_>>().join(",");
        ser.serialize_some(&joined)
    }

    // Unparsable tokens come from hand-edited records; they are dropped
    // rather than rejected.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<BTreeSet<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(de)?.unwrap_or_default();
        Ok(raw.split(',').filter_map(parse_date_key).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wire_shape_uses_camel_case_and_iso_dates() {
        let txn = TransactionDraft::new(-20.0, "Gym", day(2024, 1, 1))
            .with_recurrence(Recurrence::Weekly, 2)
            .ending_on(day(2024, 6, 1))
            .into_transaction(7);
        let json = serde_json::to_value(&txn).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["recurrence"], "WEEKLY");
        assert_eq!(json["recurrenceInterval"], 2);
        assert_eq!(json["date"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["recurrenceEndDate"], "2024-06-01T00:00:00.000Z");
        assert!(json["excludedDates"].is_null());
        assert_eq!(json["isAdjustment"], false);
    }

    #[test]
    fn deserializes_legacy_wire_records() {
        let json = r#"{
            "id": 3,
            "amount": 200.5,
            "description": "Rent",
            "date": "2024-01-15T00:00:00.000Z",
            "recurrence": "MONTHLY",
            "recurrenceInterval": 1,
            "recurrenceEndDate": null,
            "excludedDates": "2024-02-15,garbage,2024-03-15"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.anchor_day(), day(2024, 1, 15));
        assert_eq!(txn.recurrence, Recurrence::Monthly);
        assert!(txn.is_excluded(day(2024, 2, 15)));
        assert!(txn.is_excluded(day(2024, 3, 15)));
        assert_eq!(txn.excluded_dates.len(), 2);
        assert!(!txn.is_adjustment);
    }

    #[test]
    fn excluded_dates_roundtrip_through_the_comma_encoding() {
        let mut txn = TransactionDraft::new(10.0, "Coffee", day(2024, 1, 1))
            .with_recurrence(Recurrence::Weekly, 1)
            .into_transaction(1);
        txn.exclude(day(2024, 1, 8));
        txn.exclude(day(2024, 1, 22));

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"excludedDates\":\"2024-01-08,2024-01-22\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn interval_floor_guards_against_zero() {
        let mut txn = TransactionDraft::new(1.0, "t", day(2024, 1, 1))
            .with_recurrence(Recurrence::Weekly, 0)
            .into_transaction(1);
        assert_eq!(txn.interval(), 1);
        txn.recurrence_interval = 4;
        assert_eq!(txn.interval(), 4);
    }
}
