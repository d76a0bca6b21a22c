use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::calendar::{dates, Recurrence, Settings, Transaction, TransactionDraft};
use crate::errors::CliError;
use crate::i18n::translate;
use crate::services::EditScope;

/// Guided transaction form. `defaults` pre-fills the prompts when editing;
/// `default_day` seeds the date prompt.
pub fn transaction_form(
    theme: &ColorfulTheme,
    language: &str,
    defaults: Option<&Transaction>,
    default_day: NaiveDate,
) -> Result<TransactionDraft, CliError> {
    let amount = Input::<f64>::with_theme(theme)
        .with_prompt(translate(language, "amount"))
        .default(defaults.map(|txn| txn.amount).unwrap_or(0.0))
        .interact_text()?;

    let description = Input::<String>::with_theme(theme)
        .with_prompt(translate(language, "description"))
        .default(
            defaults
                .map(|txn| txn.description.clone())
                .unwrap_or_default(),
        )
        .interact_text()?;

    let date = prompt_day(
        theme,
        translate(language, "date"),
        defaults.map(|txn| txn.anchor_day()).unwrap_or(default_day),
    )?;

    let recurrence_items = [
        translate(language, "recurrence_none"),
        translate(language, "recurrence_weekly"),
        translate(language, "recurrence_monthly"),
    ];
    let default_recurrence = defaults.map(|txn| txn.recurrence).unwrap_or_default();
    let selected = Select::with_theme(theme)
        .with_prompt(translate(language, "recurrence"))
        .items(&recurrence_items)
        .default(match default_recurrence {
            Recurrence::None => 0,
            Recurrence::Weekly => 1,
            Recurrence::Monthly => 2,
        })
        .interact()?;
    let recurrence = match selected {
        1 => Recurrence::Weekly,
        2 => Recurrence::Monthly,
        _ => Recurrence::None,
    };

    let mut draft = TransactionDraft::new(amount, description, date);
    if recurrence.is_recurring() {
        let unit = if recurrence == Recurrence::Weekly {
            translate(language, "interval_weeks")
        } else {
            translate(language, "interval_months")
        };
        let interval = Input::<u32>::with_theme(theme)
            .with_prompt(format!("{} ({unit})", translate(language, "recurrence")))
            .default(defaults.map(|txn| txn.interval()).unwrap_or(1))
            .interact_text()?;
        draft = draft.with_recurrence(recurrence, interval.max(1));

        let end_raw = Input::<String>::with_theme(theme)
            .with_prompt(translate(language, "end_date"))
            .allow_empty(true)
            .default(
                defaults
                    .and_then(|txn| txn.end_day())
                    .map(dates::date_key)
                    .unwrap_or_default(),
            )
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() || dates::parse_date_key(input).is_some() {
                    Ok(())
                } else {
                    Err("expected YYYY-MM-DD")
                }
            })
            .interact_text()?;
        if let Some(end) = dates::parse_date_key(&end_raw) {
            draft = draft.ending_on(end);
        }
    }

    let is_adjustment = Confirm::with_theme(theme)
        .with_prompt(translate(language, "adjustment"))
        .default(defaults.map(|txn| txn.is_adjustment).unwrap_or(false))
        .interact()?;
    if is_adjustment {
        draft = draft.as_adjustment();
    }

    Ok(draft)
}

/// Asks how far an edit or delete should reach into a recurring series.
pub fn occurrence_scope_form(
    theme: &ColorfulTheme,
    language: &str,
) -> Result<EditScope, CliError> {
    let items = [
        translate(language, "scope_single"),
        translate(language, "scope_future"),
        translate(language, "scope_all"),
    ];
    let selected = Select::with_theme(theme)
        .with_prompt(translate(language, "edit_mode"))
        .items(&items)
        .default(0)
        .interact()?;
    Ok(match selected {
        0 => EditScope::Single,
        1 => EditScope::Future,
        _ => EditScope::All,
    })
}

/// Asks which concrete occurrence day a scoped edit refers to.
pub fn occurrence_day_form(
    theme: &ColorfulTheme,
    language: &str,
    default_day: NaiveDate,
) -> Result<NaiveDate, CliError> {
    prompt_day(theme, translate(language, "occurrence_date"), default_day)
}

pub fn settings_form(
    theme: &ColorfulTheme,
    current: &Settings,
) -> Result<Settings, CliError> {
    let language = current.language.as_str();
    let currency = Input::<String>::with_theme(theme)
        .with_prompt(translate(language, "currency"))
        .default(current.currency.clone())
        .interact_text()?;
    let initial_balance = Input::<f64>::with_theme(theme)
        .with_prompt(translate(language, "initial_balance"))
        .default(current.initial_balance)
        .interact_text()?;
    let languages = ["fr", "en"];
    let selected = Select::with_theme(theme)
        .with_prompt(translate(language, "language"))
        .items(&["Français", "English"])
        .default(if language == "en" { 1 } else { 0 })
        .interact()?;
    Ok(Settings {
        currency,
        initial_balance,
        language: languages[selected].to_string(),
    })
}

fn prompt_day(
    theme: &ColorfulTheme,
    prompt: &str,
    default_day: NaiveDate,
) -> Result<NaiveDate, CliError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(dates::date_key(default_day))
        .validate_with(|input: &String| -> Result<(), &str> {
            if dates::parse_date_key(input).is_some() {
                Ok(())
            } else {
                Err("expected YYYY-MM-DD")
            }
        })
        .interact_text()?;
    dates::parse_date_key(&raw)
        .ok_or_else(|| CliError::Input(format!("invalid date `{raw}`")))
}
