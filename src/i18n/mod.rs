//! Pure lookup translation table for the presentation layer.
//!
//! The table is immutable and loaded once; unknown languages fall back to
//! French, the application's historical default.

use std::collections::HashMap;

use once_cell::sync::Lazy;

const FALLBACK: &str = "fr";

static TABLE: Lazy<HashMap<(&'static str, &'static str), &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str, &str)] = &[
        ("fr", "title", "Calendrier budgétaire"),
        ("en", "title", "Budget Calendar"),
        ("fr", "tagline", "Chaque jour affiche le solde prévisionnel basé sur vos transactions."),
        ("en", "tagline", "Each day shows the projected balance based on your transactions."),
        ("fr", "add_transaction", "Ajouter une transaction"),
        ("en", "add_transaction", "Add Transaction"),
        ("fr", "edit_transaction", "Modifier la transaction"),
        ("en", "edit_transaction", "Edit Transaction"),
        ("fr", "amount", "Montant"),
        ("en", "amount", "Amount"),
        ("fr", "description", "Description"),
        ("en", "description", "Description"),
        ("fr", "date", "Date"),
        ("en", "date", "Date"),
        ("fr", "recurrence", "Récurrence"),
        ("en", "recurrence", "Recurrence"),
        ("fr", "recurrence_none", "Aucune"),
        ("en", "recurrence_none", "None"),
        ("fr", "recurrence_weekly", "Hebdomadaire"),
        ("en", "recurrence_weekly", "Weekly"),
        ("fr", "recurrence_monthly", "Mensuelle"),
        ("en", "recurrence_monthly", "Monthly"),
        ("fr", "interval_weeks", "semaines"),
        ("en", "interval_weeks", "weeks"),
        ("fr", "interval_months", "mois"),
        ("en", "interval_months", "months"),
        ("fr", "end_date", "Date de fin (optionnel)"),
        ("en", "end_date", "End date (optional)"),
        ("fr", "adjustment", "Ajustement du solde"),
        ("en", "adjustment", "Balance adjustment"),
        ("fr", "edit_mode", "Type de modification"),
        ("en", "edit_mode", "Edit mode"),
        ("fr", "scope_single", "Uniquement cette occurrence"),
        ("en", "scope_single", "Only this occurrence"),
        ("fr", "scope_future", "Cette occurrence et les suivantes"),
        ("en", "scope_future", "This and following occurrences"),
        ("fr", "scope_all", "Toute la série"),
        ("en", "scope_all", "The whole series"),
        ("fr", "occurrence_date", "Date de l'occurrence"),
        ("en", "occurrence_date", "Occurrence date"),
        ("fr", "settings", "Paramètres"),
        ("en", "settings", "Settings"),
        ("fr", "currency", "Devise"),
        ("en", "currency", "Currency"),
        ("fr", "initial_balance", "Solde initial"),
        ("en", "initial_balance", "Initial balance"),
        ("fr", "language", "Langue"),
        ("en", "language", "Language"),
        ("fr", "balance_on", "Solde au"),
        ("en", "balance_on", "Balance on"),
    ];
    entries
        .iter()
        .map(|(lang, key, value)| ((*lang, *key), *value))
        .collect()
});

static WEEKDAYS_FR: [&str; 7] = ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"];
static WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

static MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
static MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn normalize(language: &str) -> &'static str {
    if language == "en" {
        "en"
    } else {
        FALLBACK
    }
}

/// Looks up a UI string, falling back to French and then to the key itself.
pub fn translate(language: &str, key: &'static str) -> &'static str {
    let lang = normalize(language);
    TABLE
        .get(&(lang, key))
        .or_else(|| TABLE.get(&(FALLBACK, key)))
        .copied()
        .unwrap_or(key)
}

/// Monday-first weekday column labels.
pub fn weekday_labels(language: &str) -> [&'static str; 7] {
    match normalize(language) {
        "en" => WEEKDAYS_EN,
        _ => WEEKDAYS_FR,
    }
}

/// Display name of a month (1-based).
pub fn month_label(language: &str, month: u32) -> &'static str {
    let index = (month.clamp(1, 12) - 1) as usize;
    match normalize(language) {
        "en" => MONTHS_EN[index],
        _ => MONTHS_FR[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_french() {
        assert_eq!(translate("de", "settings"), "Paramètres");
        assert_eq!(translate("en", "settings"), "Settings");
    }

    #[test]
    fn unknown_key_echoes_the_key() {
        assert_eq!(translate("fr", "does_not_exist"), "does_not_exist");
    }

    #[test]
    fn month_labels_are_one_based() {
        assert_eq!(month_label("fr", 1), "janvier");
        assert_eq!(month_label("en", 12), "December");
    }
}
