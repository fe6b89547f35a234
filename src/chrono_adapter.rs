// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reference [`Adapter`] built on `chrono`'s proleptic Gregorian calendar.

use chrono::{DateTime, Datelike, Months, NaiveDate, Timelike, Utc};

use crate::adapter::{Adapter, AdapterOptions};
use crate::calendar::{days_since_week_start, resolution};
use crate::duration::Duration;
use crate::unit::AdapterUnit;

/// Calendar backend over `chrono::DateTime<Utc>`.
///
/// Ends are inclusive at millisecond resolution, so the end of a day is
/// `23:59:59.999`.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, TimeZone, Utc};
/// use tempoch_calendar::{Adapter, AdapterOptions, AdapterUnit, ChronoAdapter};
///
/// let adapter = ChronoAdapter::new();
/// let date = Utc.with_ymd_and_hms(2024, 2, 15, 10, 0, 0).unwrap();
/// let end = adapter
///     .end_of(date, AdapterUnit::Month, &AdapterOptions::default())
///     .unwrap();
/// assert_eq!(end.day(), 29);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChronoAdapter;

impl ChronoAdapter {
    pub const fn new() -> Self {
        Self
    }
}

fn shift_months(date: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

fn midnight(day: NaiveDate) -> Option<DateTime<Utc>> {
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

impl Adapter for ChronoAdapter {
    fn name(&self) -> &str {
        "chrono"
    }

    fn start_of(
        &self,
        date: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> Option<DateTime<Utc>> {
        let day = date.date_naive();
        match unit {
            AdapterUnit::Year => midnight(NaiveDate::from_ymd_opt(date.year(), 1, 1)?),
            AdapterUnit::Quarter => {
                midnight(NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1)?)
            }
            AdapterUnit::Month => midnight(day.with_day(1)?),
            AdapterUnit::Week => {
                let back = days_since_week_start(day.weekday(), options.week_starts_on);
                midnight(day.checked_sub_days(chrono::Days::new(u64::from(back)))?)
            }
            AdapterUnit::Day => midnight(day),
            AdapterUnit::Hour => Some(day.and_hms_opt(date.hour(), 0, 0)?.and_utc()),
            AdapterUnit::Minute => Some(day.and_hms_opt(date.hour(), date.minute(), 0)?.and_utc()),
            AdapterUnit::Second => Some(
                day.and_hms_opt(date.hour(), date.minute(), date.second())?
                    .and_utc(),
            ),
        }
    }

    fn end_of(
        &self,
        date: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> Option<DateTime<Utc>> {
        let start = self.start_of(date, unit, options)?;
        let next = self.add(start, &Duration::of(unit, 1))?;
        next.checked_sub_signed(resolution())
    }

    fn add(&self, date: DateTime<Utc>, duration: &Duration) -> Option<DateTime<Utc>> {
        let shifted = shift_months(date, duration.total_months()?)?;
        shifted.checked_add_signed(duration.fixed_delta()?)
    }

    fn each_interval(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        unit: AdapterUnit,
        options: &AdapterOptions,
    ) -> Box<dyn Iterator<Item = DateTime<Utc>> + '_> {
        let step = Duration::of(unit, 1);
        let first = self.start_of(start, unit, options);
        Box::new(
            std::iter::successors(first, move |current| self.add(*current, &step))
                .take_while(move |current| *current <= end),
        )
    }
}
