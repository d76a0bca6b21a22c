use chrono::{Datelike, NaiveDate};
use colored::Colorize;

use crate::currency::format_amount;
use crate::i18n;
use crate::services::MonthView;

const MIN_CELL_WIDTH: usize = 9;

/// Renders a computed month as a Monday-first grid, two text rows per week:
/// day numbers (starred when the day carries occurrences) above end-of-day
/// balances.
pub struct MonthGrid<'a> {
    month: &'a MonthView,
    plain: bool,
}

impl<'a> MonthGrid<'a> {
    pub fn new(month: &'a MonthView) -> Self {
        Self { month, plain: false }
    }

    /// Disables color for script mode and tests.
    pub fn plain(mut self) -> Self {
        self.plain = true;
        self
    }

    pub fn render(&self) -> String {
        let language = self.month.settings.language.as_str();
        let width = self.cell_width();
        let mut out = String::new();

        out.push_str(&self.title());
        out.push('\n');

        let header = i18n::weekday_labels(language)
            .iter()
            .map(|label| pad_right(label, width))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(header.trim_end());
        out.push('\n');
        out.push_str(&"-".repeat((width + 1) * 7 - 1));
        out.push('\n');

        let days: Vec<NaiveDate> = self.month.window.days().collect();
        for week in days.chunks(7) {
            let mut day_row = Vec::with_capacity(7);
            let mut balance_row = Vec::with_capacity(7);
            for day in week {
                day_row.push(self.day_cell(*day, width));
                balance_row.push(self.balance_cell(*day, width, language));
            }
            out.push_str(day_row.join(" ").trim_end());
            out.push('\n');
            out.push_str(balance_row.join(" ").trim_end());
            out.push('\n');
        }
        out
    }

    fn title(&self) -> String {
        let language = self.month.settings.language.as_str();
        let label = capitalize(i18n::month_label(language, self.month.month_start.month()));
        let title = format!(
            "{} {} · {}",
            label,
            self.month.month_start.year(),
            self.month.settings.currency
        );
        if self.plain {
            title
        } else {
            title.bold().to_string()
        }
    }

    fn day_cell(&self, day: NaiveDate, width: usize) -> String {
        let marker = if self.month.view.occurrences_on(day).is_empty() {
            ' '
        } else {
            '*'
        };
        let cell = pad_right(&format!("{:>2}{}", day.day(), marker), width);
        if self.plain {
            return cell;
        }
        if self.month.in_focused_month(day) {
            cell.bold().to_string()
        } else {
            cell.dimmed().to_string()
        }
    }

    fn balance_cell(&self, day: NaiveDate, width: usize, language: &str) -> String {
        let balance = self.month.view.balance_on(day);
        let text = balance
            .map(|value| format_amount(value, language))
            .unwrap_or_default();
        let cell = pad_right(&text, width);
        if self.plain {
            return cell;
        }
        match balance {
            Some(value) if value < 0.0 => cell.bright_red().to_string(),
            _ if !self.month.in_focused_month(day) => cell.dimmed().to_string(),
            _ => cell,
        }
    }

    fn cell_width(&self) -> usize {
        let language = self.month.settings.language.as_str();
        let widest_balance = self
            .month
            .view
            .balances
            .values()
            .map(|value| format_amount(*value, language).len())
            .max()
            .unwrap_or(0);
        let wanted = widest_balance.max(MIN_CELL_WIDTH);
        match crossterm::terminal::size() {
            Ok((columns, _rows)) if columns > 14 => {
                let fitting = (columns as usize - 6) / 7;
                wanted.min(fitting.max(MIN_CELL_WIDTH))
            }
            _ => wanted,
        }
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let mut cell = String::from(text);
    let visible = cell.chars().count();
    for _ in visible..width {
        cell.push(' ');
    }
    cell
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{compute_calendar_view, month_grid_window, Settings, TransactionDraft};
    use crate::services::MonthView;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_month() -> MonthView {
        let window = month_grid_window(2024, 1).unwrap();
        let txn = TransactionDraft::new(50.0, "Gift", day(2024, 1, 5)).into_transaction(1);
        let settings = Settings::default();
        let view = compute_calendar_view(&[txn], 100.0, window);
        MonthView {
            month_start: day(2024, 1, 1),
            window,
            view,
            settings,
        }
    }

    #[test]
    fn plain_render_shows_header_days_and_balances() {
        let month = sample_month();
        let rendered = MonthGrid::new(&month).plain().render();
        assert!(rendered.contains("Janvier 2024 · AUD"));
        assert!(rendered.contains("Lun"));
        assert!(rendered.contains("Dim"));
        // The transaction day is starred and its balance reflects the credit.
        assert!(rendered.contains(" 5*"));
        assert!(rendered.contains("150,00"));
    }

    #[test]
    fn weeks_render_two_rows_each() {
        let month = sample_month();
        let rendered = MonthGrid::new(&month).plain().render();
        let week_count = month.window.days().count() / 7;
        // Title + weekday header + rule, then two rows per week.
        assert_eq!(rendered.trim_end().lines().count(), 3 + week_count * 2);
    }
}
