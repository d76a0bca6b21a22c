//! Shell state, command registry, and dispatch.

use chrono::{Datelike, Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::calendar::{dates, Recurrence, Transaction, TransactionDraft};
use crate::cli::forms;
use crate::cli::grid::MonthGrid;
use crate::cli::output;
use crate::currency::format_currency;
use crate::errors::CliError;
use crate::i18n::translate;
use crate::services::{CalendarService, EditScope, SettingsService, TransactionService};
use crate::store::{JsonStore, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    summary: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "show",
        usage: "show",
        summary: "Render the focused month grid with daily balances",
    },
    CommandSpec {
        name: "next",
        usage: "next",
        summary: "Move the focus one month forward",
    },
    CommandSpec {
        name: "prev",
        usage: "prev",
        summary: "Move the focus one month back",
    },
    CommandSpec {
        name: "goto",
        usage: "goto <YYYY-MM>",
        summary: "Focus a specific month",
    },
    CommandSpec {
        name: "list",
        usage: "list",
        summary: "List every recorded transaction",
    },
    CommandSpec {
        name: "add",
        usage: "add [<amount> <description> <date> [NONE|WEEKLY|MONTHLY] [interval]]",
        summary: "Record a transaction (wizard without arguments)",
    },
    CommandSpec {
        name: "edit",
        usage: "edit <id>",
        summary: "Edit a transaction, an occurrence, or the rest of a series",
    },
    CommandSpec {
        name: "remove",
        usage: "remove <id> [single|future|all] [date]",
        summary: "Delete a transaction, an occurrence, or the rest of a series",
    },
    CommandSpec {
        name: "balance",
        usage: "balance [YYYY-MM-DD]",
        summary: "Print the projected end-of-day balance",
    },
    CommandSpec {
        name: "settings",
        usage: "settings",
        summary: "Edit currency, initial balance, and language",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "Show this command list",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
];

pub struct ShellContext {
    pub running: bool,
    pub mode: CliMode,
    pub last_command: Option<String>,
    store: JsonStore,
    month: NaiveDate,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let store = JsonStore::open_default()?;
        let today = Local::now().date_naive();
        Ok(Self {
            running: true,
            mode,
            last_command: None,
            store,
            month: first_of_month(today),
            theme: ColorfulTheme::default(),
        })
    }

    pub fn command_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = COMMANDS.iter().map(|spec| spec.name).collect();
        names.push("quit");
        names
    }

    pub fn prompt(&self) -> String {
        format!("{}-{:02}> ", self.month.year(), self.month.month())
    }

    pub fn report_error(&self, err: CliError) {
        output::error(err);
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CliError> {
        match command {
            "show" => self.cmd_show()?,
            "next" => self.shift_month(1)?,
            "prev" => self.shift_month(-1)?,
            "goto" => self.cmd_goto(args)?,
            "list" => self.cmd_list()?,
            "add" => self.cmd_add(args)?,
            "edit" => self.cmd_edit(args)?,
            "remove" => self.cmd_remove(args)?,
            "balance" => self.cmd_balance(args)?,
            "settings" => self.cmd_settings()?,
            "help" => self.cmd_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            unknown => {
                let mut message = format!("Unknown command `{unknown}`.");
                if let Some(suggestion) = suggest(unknown) {
                    message.push_str(&format!(" Did you mean `{suggestion}`?"));
                }
                output::error(message);
            }
        }
        Ok(LoopControl::Continue)
    }

    fn language(&mut self) -> String {
        SettingsService::get(&mut self.store)
            .map(|settings| settings.language)
            .unwrap_or_else(|_| "fr".into())
    }

    fn cmd_show(&mut self) -> Result<(), CliError> {
        let month = CalendarService::month_view(&mut self.store, self.month.year(), self.month.month())?;
        let grid = MonthGrid::new(&month);
        let rendered = if output::preferences().plain_mode {
            grid.plain().render()
        } else {
            grid.render()
        };
        println!("{rendered}");
        Ok(())
    }

    fn shift_month(&mut self, step: i32) -> Result<(), CliError> {
        self.month = first_of_month(dates::add_months(self.month, step));
        self.cmd_show()
    }

    fn cmd_goto(&mut self, args: &[&str]) -> Result<(), CliError> {
        let raw = args
            .first()
            .ok_or_else(|| CliError::Input("usage: goto <YYYY-MM>".into()))?;
        let month = parse_month(raw)
            .ok_or_else(|| CliError::Input(format!("invalid month `{raw}`, expected YYYY-MM")))?;
        self.month = month;
        self.cmd_show()
    }

    fn cmd_list(&mut self) -> Result<(), CliError> {
        let settings = SettingsService::get(&mut self.store)?;
        let transactions = TransactionService::list(&self.store)?;
        if transactions.is_empty() {
            output::info("No transactions recorded.");
            return Ok(());
        }
        for txn in &transactions {
            println!(
                "#{:<4} {}  {:>14}  {:<24} {}",
                txn.id,
                dates::date_key(txn.anchor_day()),
                format_currency(txn.amount, &settings.currency, &settings.language),
                describe_recurrence(txn, &settings.language),
                txn.description
            );
        }
        Ok(())
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<(), CliError> {
        let draft = if args.is_empty() {
            if self.mode == CliMode::Script {
                return Err(CliError::Input(
                    "script mode requires: add <amount> <description> <date> [recurrence] [interval]"
                        .into(),
                ));
            }
            let language = self.language();
            forms::transaction_form(&self.theme, &language, None, self.month)?
        } else {
            parse_add_args(args)?
        };
        let created = TransactionService::add(&mut self.store, draft)?;
        output::success(format!("Transaction #{} created.", created.id));
        Ok(())
    }

    fn cmd_edit(&mut self, args: &[&str]) -> Result<(), CliError> {
        if self.mode == CliMode::Script {
            return Err(CliError::Input("`edit` is interactive only".into()));
        }
        let id = parse_id(args)?;
        let original = self.store.transaction(id)?;
        let language = self.language();
        let draft =
            forms::transaction_form(&self.theme, &language, Some(&original), self.month)?;
        if original.recurrence.is_recurring() {
            let scope = forms::occurrence_scope_form(&self.theme, &language)?;
            let day = match scope {
                EditScope::All => original.anchor_day(),
                _ => forms::occurrence_day_form(&self.theme, &language, original.anchor_day())?,
            };
            TransactionService::edit_occurrence(&mut self.store, id, day, draft, scope)?;
        } else {
            TransactionService::update(&mut self.store, id, draft)?;
        }
        output::success(format!("Transaction #{id} updated."));
        Ok(())
    }

    fn cmd_remove(&mut self, args: &[&str]) -> Result<(), CliError> {
        let id = parse_id(args)?;
        let original = self.store.transaction(id)?;
        let scope = match args.get(1).copied() {
            Some("single") => EditScope::Single,
            Some("future") => EditScope::Future,
            Some("all") | None if !original.recurrence.is_recurring() => EditScope::All,
            Some("all") => EditScope::All,
            Some(other) => {
                return Err(CliError::Input(format!(
                    "unknown scope `{other}`, expected single|future|all"
                )))
            }
            None if self.mode == CliMode::Script => EditScope::All,
            None => {
                let language = self.language();
                forms::occurrence_scope_form(&self.theme, &language)?
            }
        };
        let day = match scope {
            EditScope::All => original.anchor_day(),
            _ => match args.get(2).copied() {
                Some(raw) => dates::parse_date_key(raw)
                    .ok_or_else(|| CliError::Input(format!("invalid date `{raw}`")))?,
                None if self.mode == CliMode::Script => original.anchor_day(),
                None => {
                    let language = self.language();
                    forms::occurrence_day_form(&self.theme, &language, original.anchor_day())?
                }
            },
        };
        TransactionService::remove_occurrence(&mut self.store, id, day, scope)?;
        output::success(format!("Transaction #{id} removed."));
        Ok(())
    }

    fn cmd_balance(&mut self, args: &[&str]) -> Result<(), CliError> {
        let day = match args.first() {
            Some(raw) => dates::parse_date_key(raw)
                .ok_or_else(|| CliError::Input(format!("invalid date `{raw}`")))?,
            None => Local::now().date_naive(),
        };
        let settings = SettingsService::get(&mut self.store)?;
        let balance = CalendarService::balance_on(&mut self.store, day)?;
        output::info(format!(
            "{} {}: {}",
            translate(&settings.language, "balance_on"),
            dates::date_key(day),
            format_currency(balance, &settings.currency, &settings.language)
        ));
        Ok(())
    }

    fn cmd_settings(&mut self) -> Result<(), CliError> {
        if self.mode == CliMode::Script {
            return Err(CliError::Input("`settings` is interactive only".into()));
        }
        let current = SettingsService::get(&mut self.store)?;
        let updated = forms::settings_form(&self.theme, &current)?;
        let saved = SettingsService::update(&mut self.store, updated)?;
        output::success(format!(
            "Settings saved ({}, {}).",
            saved.currency, saved.language
        ));
        Ok(())
    }

    fn cmd_help(&mut self) {
        let language = self.language();
        output::section(translate(&language, "title"));
        output::info("Commands:");
        for spec in COMMANDS {
            println!("  {:<58} {}", spec.usage, spec.summary);
        }
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn parse_id(args: &[&str]) -> Result<i64, CliError> {
    let raw = args
        .first()
        .ok_or_else(|| CliError::Input("expected a transaction id".into()))?;
    raw.parse::<i64>()
        .map_err(|_| CliError::Input(format!("invalid transaction id `{raw}`")))
}

fn parse_add_args(args: &[&str]) -> Result<TransactionDraft, CliError> {
    if args.len() < 3 {
        return Err(CliError::Input(
            "usage: add <amount> <description> <date> [NONE|WEEKLY|MONTHLY] [interval]".into(),
        ));
    }
    let amount: f64 = args[0]
        .parse()
        .map_err(|_| CliError::Input(format!("invalid amount `{}`", args[0])))?;
    let day = dates::parse_date_key(args[2])
        .ok_or_else(|| CliError::Input(format!("invalid date `{}`", args[2])))?;
    let mut draft = TransactionDraft::new(amount, args[1], day);
    if let Some(raw) = args.get(3) {
        let recurrence = match raw.to_ascii_uppercase().as_str() {
            "NONE" => Recurrence::None,
            "WEEKLY" => Recurrence::Weekly,
            "MONTHLY" => Recurrence::Monthly,
            other => {
                return Err(CliError::Input(format!(
                    "invalid recurrence `{other}`, expected NONE|WEEKLY|MONTHLY"
                )))
            }
        };
        let interval = match args.get(4) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| CliError::Input(format!("invalid interval `{raw}`")))?,
            None => 1,
        };
        draft = draft.with_recurrence(recurrence, interval.max(1));
    }
    Ok(draft)
}

fn describe_recurrence(txn: &Transaction, language: &str) -> String {
    match txn.recurrence {
        Recurrence::None => translate(language, "recurrence_none").to_string(),
        Recurrence::Weekly if txn.interval() == 1 => {
            translate(language, "recurrence_weekly").to_string()
        }
        Recurrence::Monthly if txn.interval() == 1 => {
            translate(language, "recurrence_monthly").to_string()
        }
        Recurrence::Weekly => format!(
            "{} ({} {})",
            translate(language, "recurrence_weekly"),
            txn.interval(),
            translate(language, "interval_weeks")
        ),
        Recurrence::Monthly => format!(
            "{} ({} {})",
            translate(language, "recurrence_monthly"),
            txn.interval(),
            translate(language, "interval_months")
        ),
    }
}

fn suggest(unknown: &str) -> Option<&'static str> {
    ShellContext::command_names()
        .into_iter()
        .map(|name| (levenshtein(unknown, name), name))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}
