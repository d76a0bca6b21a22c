use chrono::{Datelike, NaiveDate};

use crate::calendar::{
    compute_calendar_view, month_grid_window, CalendarView, DateWindow, Settings,
};
use crate::errors::Result;
use crate::store::RecordStore;

/// A computed month: the focused month, its padded grid window, the
/// projected view, and the settings the projection used.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub month_start: NaiveDate,
    pub window: DateWindow,
    pub view: CalendarView,
    pub settings: Settings,
}

pub struct CalendarService;

impl CalendarService {
    /// Builds the view for one month: a Monday-led grid spanning the month's
    /// lead and trail days, projected over the full store snapshot.
    pub fn month_view(store: &mut impl RecordStore, year: i32, month: u32) -> Result<MonthView> {
        let settings = store.settings()?;
        let transactions = store.list_transactions()?;
        let window = month_grid_window(year, month)?;
        let view = compute_calendar_view(&transactions, settings.initial_balance, window);
        Ok(MonthView {
            month_start: NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(window.start),
            window,
            view,
            settings,
        })
    }

    /// End-of-day balance for a single day (the "today" figure of the
    /// application header).
    pub fn balance_on(store: &mut impl RecordStore, day: NaiveDate) -> Result<f64> {
        let settings = store.settings()?;
        let transactions = store.list_transactions()?;
        let view =
            compute_calendar_view(&transactions, settings.initial_balance, DateWindow::single(day));
        Ok(view.balance_on(day).unwrap_or(settings.initial_balance))
    }
}

impl MonthView {
    /// True when the day belongs to the focused month rather than its lead
    /// or trail padding.
    pub fn in_focused_month(&self, day: NaiveDate) -> bool {
        day.year() == self.month_start.year() && day.month() == self.month_start.month()
    }
}
