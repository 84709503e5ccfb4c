//! Month grid backing the visit-date picker.

use chrono::{Datelike, Months, NaiveDate};

const INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_past: bool,
}

impl CalendarMonth {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// `month` is 1-based. Returns `None` for out-of-range values.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn days_in_month(&self) -> u32 {
        self.dates().count() as u32
    }

    /// Empty cells before day 1 in a grid whose weeks start on Sunday.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day.weekday().num_days_from_sunday()
    }

    pub fn previous(&self) -> Self {
        self.shift(|d| d.checked_sub_months(Months::new(1)))
    }

    pub fn next(&self) -> Self {
        self.shift(|d| d.checked_add_months(Months::new(1)))
    }

    /// e.g. "March 2025"
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn days(&self, today: NaiveDate, selected: Option<NaiveDate>) -> Vec<CalendarDay> {
        self.dates()
            .map(|date| CalendarDay {
                date,
                day: date.day(),
                is_today: date == today,
                is_selected: selected == Some(date),
                is_past: date < today,
            })
            .collect()
    }

    fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first_day.month();
        self.first_day.iter_days().take_while(move |d| d.month() == month)
    }

    fn shift(&self, step: impl Fn(NaiveDate) -> Option<NaiveDate>) -> Self {
        step(self.first_day)
            .map(|first_day| Self { first_day })
            .unwrap_or(*self)
    }
}

pub fn format_for_input(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

pub fn parse_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, INPUT_FORMAT).ok()
}

/// Renders a stored `YYYY-MM-DD` value as e.g. "Thu, Mar 6, 2025".
pub fn format_for_display(value: &str) -> String {
    parse_input(value)
        .map(|date| date.format("%a, %b %-d, %Y").to_string())
        .unwrap_or_default()
}
