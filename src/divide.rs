// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Subdividing a period into smaller ones.
//!
//! [`divide`] breaks a period into the natural periods of a smaller unit;
//! [`split`] generalizes it to equal-count and fixed-duration partitions.
//! Every loop is capped at [`MAX_DIVISIONS`] results.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{trace, warn};

use crate::calendar::resolution;
use crate::duration::Duration;
use crate::error::PeriodError;
use crate::factory::create_period;
use crate::period::Period;
use crate::registry::PeriodRule;
use crate::temporal::Temporal;
use crate::unit::Unit;

/// Most periods a single `divide` or `split` may produce.
pub const MAX_DIVISIONS: usize = 1000;

/// How [`split`] partitions a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOptions {
    /// Natural periods of a unit, as [`divide`].
    By(Unit),
    /// This many equal `custom` segments.
    Count(usize),
    /// Consecutive `custom` chunks of this length, the last one clipped.
    Duration(Duration),
}

impl SplitOptions {
    pub fn by(unit: impl Into<Unit>) -> Self {
        SplitOptions::By(unit.into())
    }
}

impl From<Duration> for SplitOptions {
    fn from(duration: Duration) -> Self {
        SplitOptions::Duration(duration)
    }
}

fn too_large(period: &Period) -> PeriodError {
    warn!(
        period = %period,
        limit = MAX_DIVISIONS,
        "division exceeds the period ceiling"
    );
    PeriodError::DivisionTooLarge {
        limit: MAX_DIVISIONS,
    }
}

fn step_past(instant: DateTime<Utc>) -> Result<DateTime<Utc>, PeriodError> {
    instant
        .checked_add_signed(resolution())
        .ok_or(PeriodError::OutOfRange)
}

/// Divides `period` into the contiguous `unit` periods covering it.
///
/// When `unit` does not tile the period (weeks of a month), the first and
/// last sub-periods keep their full natural bounds and reach past the
/// period's edges.
///
/// A `stableMonth` divides into exactly 6 weeks or 42 days and into nothing
/// else.
///
/// The `divisions` listed on a unit definition guide [`merge`](crate::merge)
/// and zooming only; they are not checked here. Dividing by a unit larger
/// than the period yields the whole period(s) of that unit around it.
///
/// # Errors
///
/// - [`PeriodError::UnsupportedDivision`] when dividing by `stableMonth` or
///   `custom`, or a `stableMonth` by anything but `week` or `day`.
/// - [`PeriodError::UnknownUnit`] if `unit` is not registered.
/// - [`PeriodError::DivisionTooLarge`] past [`MAX_DIVISIONS`] results.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{create_period, divide, ChronoAdapter, Temporal, Unit};
///
/// let date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
/// let temporal = Temporal::with_adapter(ChronoAdapter::new(), date).unwrap();
/// let year = create_period(&temporal, Unit::Year, date).unwrap();
///
/// let months = divide(&temporal, &year, Unit::Month).unwrap();
/// assert_eq!(months.len(), 12);
/// assert_eq!(months[0].start(), year.start());
/// assert_eq!(months[11].end(), year.end());
/// ```
pub fn divide(
    temporal: &Temporal,
    period: &Period,
    unit: impl Into<Unit>,
) -> Result<Vec<Period>, PeriodError> {
    let unit = unit.into();
    let unsupported = || PeriodError::UnsupportedDivision {
        from: period.unit().clone(),
        by: unit.clone(),
    };

    if matches!(unit, Unit::StableMonth | Unit::Custom) {
        return Err(unsupported());
    }
    if *period.unit() == Unit::StableMonth && !matches!(unit, Unit::Week | Unit::Day) {
        return Err(unsupported());
    }

    let definition = temporal.registry().require(&unit)?;
    let periods = match definition.rule() {
        PeriodRule::Adapter(adapter_unit) => {
            let dates: Vec<_> = temporal
                .adapter()
                .each_interval(
                    period.start(),
                    period.end(),
                    *adapter_unit,
                    &temporal.adapter_options(),
                )
                .take(MAX_DIVISIONS + 1)
                .collect();
            if dates.len() > MAX_DIVISIONS {
                return Err(too_large(period));
            }
            dates
                .into_iter()
                .map(|date| create_period(temporal, unit.clone(), date))
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => walk(temporal, period, &unit)?,
    };

    trace!(
        from = %period.unit(),
        by = %unit,
        count = periods.len(),
        "divided period"
    );
    Ok(periods)
}

/// Builds consecutive `unit` periods from `period.start` until one reaches
/// `period.end`.
fn walk(temporal: &Temporal, period: &Period, unit: &Unit) -> Result<Vec<Period>, PeriodError> {
    let mut periods = Vec::new();
    let mut cursor = period.start();
    while cursor <= period.end() {
        if periods.len() == MAX_DIVISIONS {
            return Err(too_large(period));
        }
        let current = create_period(temporal, unit.clone(), cursor)?;
        cursor = step_past(current.end())?;
        periods.push(current);
    }
    Ok(periods)
}

/// Partitions `period` according to `options`.
///
/// `By` keeps the unit of the produced periods; `Count` and `Duration`
/// produce `custom` periods that exactly cover `[start, end]`.
///
/// # Errors
///
/// Those of [`divide`] for `By`. For `Count`, [`PeriodError::InvalidPeriod`]
/// when the count is zero or exceeds the period's length in milliseconds.
/// For `Duration`, [`PeriodError::InvalidPeriod`] when the duration does not
/// move time forward. Both report [`PeriodError::DivisionTooLarge`] past
/// [`MAX_DIVISIONS`] segments.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{create_period, split, ChronoAdapter, SplitOptions, Temporal, Unit};
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let temporal = Temporal::with_adapter(ChronoAdapter::new(), date).unwrap();
/// let day = create_period(&temporal, Unit::Day, date).unwrap();
///
/// let shifts = split(&temporal, &day, SplitOptions::Count(3)).unwrap();
/// assert_eq!(shifts.len(), 3);
/// assert_eq!(shifts[1].start(), Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
/// assert_eq!(shifts[2].end(), day.end());
/// ```
pub fn split(
    temporal: &Temporal,
    period: &Period,
    options: SplitOptions,
) -> Result<Vec<Period>, PeriodError> {
    match options {
        SplitOptions::By(unit) => divide(temporal, period, unit),
        SplitOptions::Count(count) => split_count(period, count),
        SplitOptions::Duration(duration) => split_duration(temporal, period, &duration),
    }
}

fn split_count(period: &Period, count: usize) -> Result<Vec<Period>, PeriodError> {
    if count == 0 {
        return Err(PeriodError::invalid_period("cannot split into zero segments"));
    }
    if count > MAX_DIVISIONS {
        return Err(too_large(period));
    }

    // Inclusive span in milliseconds.
    let span = (period.end() - period.start() + resolution()).num_milliseconds();
    let parts = count as i64;
    if span < parts {
        return Err(PeriodError::invalid_period(format!(
            "{period} is too short for {count} segments"
        )));
    }
    let size = TimeDelta::milliseconds(span / parts);

    let mut segments = Vec::with_capacity(count);
    let mut cursor = period.start();
    for index in 0..count {
        if index + 1 == count {
            segments.push(Period::custom(cursor, period.end())?);
            break;
        }
        let next = cursor.checked_add_signed(size).ok_or(PeriodError::OutOfRange)?;
        segments.push(Period::custom(cursor, next - resolution())?);
        cursor = next;
    }
    trace!(period = %period, count, "split period by count");
    Ok(segments)
}

fn split_duration(
    temporal: &Temporal,
    period: &Period,
    duration: &Duration,
) -> Result<Vec<Period>, PeriodError> {
    if duration.is_zero() {
        return Err(PeriodError::invalid_period("cannot split by a zero duration"));
    }

    let adapter = temporal.adapter();
    let mut segments = Vec::new();
    let mut cursor = period.start();
    while cursor <= period.end() {
        if segments.len() == MAX_DIVISIONS {
            return Err(too_large(period));
        }
        let next = adapter.add(cursor, duration).ok_or(PeriodError::OutOfRange)?;
        if next <= cursor {
            return Err(PeriodError::invalid_period(format!(
                "split duration {duration:?} does not advance past {cursor}"
            )));
        }
        let end = (next - resolution()).min(period.end());
        segments.push(Period::custom(cursor, end)?);
        cursor = next;
    }
    trace!(period = %period, count = segments.len(), "split period by duration");
    Ok(segments)
}
