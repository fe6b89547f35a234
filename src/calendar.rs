// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Backend-independent boundary math.
//!
//! Quarter and year-block (decade, century, millennium) boundaries are
//! computed here directly from the Gregorian fields of the instant, so they
//! never depend on how a particular [`Adapter`] treats those units. The
//! stable-month grid is assembled from adapter primitives that every backend
//! shares (`start_of` month/week, `add` days, `end_of` day).

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc, Weekday};

use crate::adapter::{Adapter, AdapterOptions};
use crate::duration::Duration;
use crate::period::Interval;
use crate::unit::AdapterUnit;

/// Days in a stable-month grid (six rows of seven).
pub const STABLE_MONTH_DAYS: i64 = 42;

/// Weeks in a stable-month grid.
pub const STABLE_MONTH_WEEKS: i64 = 6;

/// Smallest step between the inclusive end of one period and the start of
/// the next.
#[inline]
pub fn resolution() -> TimeDelta {
    TimeDelta::milliseconds(1)
}

/// Maps `0..=6` (0 = Sunday) to a weekday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Inverse of [`weekday_from_index`].
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    weekday.num_days_from_sunday() as u8
}

/// Days to walk back from `weekday` to reach `week_start`.
pub fn days_since_week_start(weekday: Weekday, week_start: Weekday) -> u32 {
    (weekday.num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7
}

fn year_start(year: i32) -> Option<DateTime<Utc>> {
    month_start(year, 1)
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Some(
        NaiveDate::from_ymd_opt(year, month, 1)?
            .and_hms_opt(0, 0, 0)?
            .and_utc(),
    )
}

/// `(year, quarter index 0..=3)` of an instant.
pub fn quarter_key(date: DateTime<Utc>) -> (i32, u32) {
    (date.year(), date.month0() / 3)
}

/// Inclusive bounds of the calendar quarter containing `date`.
pub fn quarter_bounds(date: DateTime<Utc>) -> Option<Interval> {
    let (year, quarter) = quarter_key(date);
    let start = month_start(year, quarter * 3 + 1)?;
    let next = if quarter == 3 {
        year_start(year.checked_add(1)?)?
    } else {
        month_start(year, quarter * 3 + 4)?
    };
    Some(Interval::new(start, next.checked_sub_signed(resolution())?))
}

/// First year of the `span`-year block containing `year`
/// (`floor(year / span) * span`).
pub fn year_block_start(year: i32, span: u32) -> Option<i32> {
    let span = i32::try_from(span).ok().filter(|s| *s > 0)?;
    year.div_euclid(span).checked_mul(span)
}

/// Inclusive bounds of the `span`-year block (decade = 10, century = 100,
/// millennium = 1000) containing `date`.
pub fn year_block_bounds(date: DateTime<Utc>, span: u32) -> Option<Interval> {
    let first = year_block_start(date.year(), span)?;
    let start = year_start(first)?;
    let next = year_start(first.checked_add(i32::try_from(span).ok()?)?)?;
    Some(Interval::new(start, next.checked_sub_signed(resolution())?))
}

/// Inclusive bounds of the 42-day grid for the month containing `date`.
///
/// The grid starts on the configured week start on or before the first of
/// the month and always ends 41 days later at end of day, whatever the
/// number of weeks the month actually touches.
pub fn stable_month_bounds(
    adapter: &dyn Adapter,
    date: DateTime<Utc>,
    options: &AdapterOptions,
) -> Option<Interval> {
    let first_of_month = adapter.start_of(date, AdapterUnit::Month, options)?;
    let grid_start = adapter.start_of(first_of_month, AdapterUnit::Week, options)?;
    let last_day = adapter.add(grid_start, &Duration::days(STABLE_MONTH_DAYS - 1))?;
    let grid_end = adapter.end_of(last_day, AdapterUnit::Day, options)?;
    Some(Interval::new(grid_start, grid_end))
}
