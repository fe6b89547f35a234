// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Unit-aware equality of instants and periods.

use chrono::{DateTime, Datelike, Utc};

use crate::calendar::{quarter_key, stable_month_bounds, year_block_start};
use crate::error::PeriodError;
use crate::period::TimeAnchor;
use crate::registry::PeriodRule;
use crate::temporal::Temporal;
use crate::unit::Unit;

/// Whether `a` and `b` fall in the same `unit` period.
///
/// Periods are compared through their reference date. Quarters and year
/// blocks are compared on calendar fields, a `stableMonth` on its grid
/// start, adapter units through [`Adapter::is_same`](crate::Adapter::is_same)
/// and plugin units on the start of the period their rule derives. Under
/// `custom` only identical anchors are the same.
///
/// # Errors
///
/// [`PeriodError::UnknownUnit`] if `unit` is not registered, or whatever a
/// plugin rule reports.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{is_same, ChronoAdapter, Temporal, Unit};
///
/// let feb = Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap();
/// let mar = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
/// let temporal = Temporal::with_adapter(ChronoAdapter::new(), feb).unwrap();
///
/// assert!(is_same(&temporal, feb, mar, Unit::Quarter).unwrap());
/// assert!(!is_same(&temporal, feb, mar, Unit::Month).unwrap());
/// ```
pub fn is_same(
    temporal: &Temporal,
    a: impl TimeAnchor,
    b: impl TimeAnchor,
    unit: impl Into<Unit>,
) -> Result<bool, PeriodError> {
    let unit = unit.into();
    let (a, b) = (a.anchor(), b.anchor());
    if unit == Unit::Custom {
        return Ok(a == b);
    }

    let rule = temporal.registry().require(&unit)?.rule();
    match rule {
        PeriodRule::Adapter(adapter_unit) => Ok(temporal.adapter().is_same(
            a,
            b,
            *adapter_unit,
            &temporal.adapter_options(),
        )),
        PeriodRule::Quarter => Ok(quarter_key(a) == quarter_key(b)),
        PeriodRule::YearBlock(span) => {
            Ok(year_block_start(a.year(), *span) == year_block_start(b.year(), *span))
        }
        PeriodRule::StableMonth => Ok(grid_start(temporal, a)? == grid_start(temporal, b)?),
        PeriodRule::Function(_) => {
            Ok(rule.bounds(temporal, a)?.start == rule.bounds(temporal, b)?.start)
        }
    }
}

fn grid_start(temporal: &Temporal, date: DateTime<Utc>) -> Result<DateTime<Utc>, PeriodError> {
    stable_month_bounds(temporal.adapter(), date, &temporal.adapter_options())
        .map(|grid| grid.start)
        .ok_or(PeriodError::OutOfRange)
}
