// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moving from a period to its neighbours.

use chrono::TimeDelta;
use tracing::warn;

use crate::calendar::resolution;
use crate::divide::MAX_DIVISIONS;
use crate::duration::Duration;
use crate::error::PeriodError;
use crate::factory::create_period;
use crate::period::Period;
use crate::registry::PeriodRule;
use crate::temporal::Temporal;
use crate::unit::{AdapterUnit, Unit};

/// The period of the same unit following `period`.
pub fn next(temporal: &Temporal, period: &Period) -> Result<Period, PeriodError> {
    go(temporal, period, 1)
}

/// The period of the same unit preceding `period`.
pub fn previous(temporal: &Temporal, period: &Period) -> Result<Period, PeriodError> {
    go(temporal, period, -1)
}

/// The period `steps` units away from `period` (negative steps go back).
///
/// Calendar units move their reference date through the adapter and rebuild
/// the period from it, so the result is always normalized: a `month` built
/// from January 31st moves to the whole of February. Quarters move by three
/// months, decades and larger by their span in years, and a `stableMonth`
/// by whole months. Plugin units step across their own boundaries one
/// period at a time, so a plugin jump costs one rule call per step and is
/// limited to [`MAX_DIVISIONS`] steps either way. A `custom` period shifts
/// by its inclusive length and keeps it exactly.
///
/// `go(.., 0)` returns the period unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{create_period, go, ChronoAdapter, Temporal, Unit};
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
/// let temporal = Temporal::with_adapter(ChronoAdapter::new(), date).unwrap();
/// let january = create_period(&temporal, Unit::Month, date).unwrap();
///
/// let april = go(&temporal, &january, 3).unwrap();
/// assert_eq!(april.start(), Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
/// ```
pub fn go(temporal: &Temporal, period: &Period, steps: i64) -> Result<Period, PeriodError> {
    if steps == 0 {
        return Ok(period.clone());
    }
    let unit = period.unit();
    if *unit == Unit::Custom {
        return shift_custom(period, steps);
    }

    let step = match temporal.registry().require(unit)?.rule() {
        PeriodRule::Adapter(adapter_unit) => Duration::of(*adapter_unit, 1),
        PeriodRule::Quarter => Duration::of(AdapterUnit::Quarter, 1),
        PeriodRule::YearBlock(span) => Duration::years(i64::from(*span)),
        PeriodRule::StableMonth => Duration::months(1),
        PeriodRule::Function(_) => return step_across(temporal, period, steps),
    };
    let date = temporal
        .adapter()
        .add(period.date(), &step.scaled(steps))
        .ok_or(PeriodError::OutOfRange)?;
    create_period(temporal, unit.clone(), date)
}

fn shift_custom(period: &Period, steps: i64) -> Result<Period, PeriodError> {
    let length = period.duration() + resolution();
    let offset = length
        .num_milliseconds()
        .checked_mul(steps)
        .and_then(TimeDelta::try_milliseconds)
        .ok_or(PeriodError::OutOfRange)?;
    let start = period
        .start()
        .checked_add_signed(offset)
        .ok_or(PeriodError::OutOfRange)?;
    let end = period
        .end()
        .checked_add_signed(offset)
        .ok_or(PeriodError::OutOfRange)?;
    Period::custom(start, end)
}

fn step_across(temporal: &Temporal, period: &Period, steps: i64) -> Result<Period, PeriodError> {
    if steps.unsigned_abs() > MAX_DIVISIONS as u64 {
        warn!(
            unit = %period.unit(),
            steps,
            limit = MAX_DIVISIONS,
            "plugin navigation exceeds the step ceiling"
        );
        return Err(PeriodError::DivisionTooLarge {
            limit: MAX_DIVISIONS,
        });
    }
    let mut current = period.clone();
    for _ in 0..steps.unsigned_abs() {
        let probe = if steps > 0 {
            current.end().checked_add_signed(resolution())
        } else {
            current.start().checked_sub_signed(resolution())
        }
        .ok_or(PeriodError::OutOfRange)?;
        current = create_period(temporal, current.unit().clone(), probe)?;
    }
    Ok(current)
}
