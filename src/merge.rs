// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Merging runs of periods back into one.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::trace;

use crate::error::PeriodError;
use crate::factory::{create_period, custom_from_interval};
use crate::period::{Interval, Period};
use crate::temporal::Temporal;
use crate::unit::Unit;

/// Gap (or overlap) tolerated between one period's end and the next start.
const CONTIGUITY_TOLERANCE: TimeDelta = TimeDelta::seconds(1);

/// Tolerance on a day-like period's length, in days (one hour).
const DAY_LENGTH_TOLERANCE: f64 = 1.0 / 24.0;

fn close(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    (a - b).abs() < CONTIGUITY_TOLERANCE
}

fn is_contiguous(sorted: &[&Period]) -> bool {
    sorted
        .windows(2)
        .all(|pair| close(pair[1].start(), pair[0].end()))
}

fn is_day_like(period: &Period) -> bool {
    (period.duration_days().value() - 1.0).abs() <= DAY_LENGTH_TOLERANCE
}

/// Merges `periods` into the single period spanning them.
///
/// Input order does not matter. An empty slice gives `None` and a single
/// period comes back unchanged. Otherwise, in order:
///
/// 1. Seven contiguous day-long periods become a `week` over exactly their
///    span, aligned or not.
/// 2. A contiguous run of one unit becomes the first parent unit (its
///    `merges_to`, then every unit listing it among its divisions) whose
///    period built from the first start spans the run. Twelve months of a
///    calendar year give a `year`, three months of a quarter a `quarter`.
/// 3. Anything else becomes a `custom` period from the earliest start to the
///    latest end.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{create_period, divide, merge, ChronoAdapter, Temporal, Unit};
///
/// let date = Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap();
/// let temporal = Temporal::with_adapter(ChronoAdapter::new(), date).unwrap();
/// let quarter = create_period(&temporal, Unit::Quarter, date).unwrap();
///
/// let months = divide(&temporal, &quarter, Unit::Month).unwrap();
/// let merged = merge(&temporal, &months).unwrap().unwrap();
/// assert_eq!(merged.unit(), &Unit::Quarter);
/// assert_eq!(merged.interval(), quarter.interval());
/// ```
pub fn merge(temporal: &Temporal, periods: &[Period]) -> Result<Option<Period>, PeriodError> {
    let mut sorted: Vec<&Period> = periods.iter().collect();
    sorted.sort_by_key(|period| period.start());

    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(None),
    };
    if sorted.len() == 1 {
        return Ok(Some(first.clone()));
    }

    let contiguous = is_contiguous(&sorted);
    if contiguous && sorted.len() == 7 && sorted.iter().all(|period| is_day_like(period)) {
        let week = Period::from_parts(
            Unit::Week,
            first.start(),
            Interval::new(first.start(), last.end()),
        )?;
        trace!(period = %week, "merged seven days into a week");
        return Ok(Some(week));
    }

    let end = sorted
        .iter()
        .map(|period| period.end())
        .max()
        .unwrap_or(last.end());
    let span = Interval::new(first.start(), end);

    let unit = first.unit();
    if contiguous && *unit != Unit::Custom && sorted.iter().all(|p| p.unit() == unit) {
        if let Some(parent) = natural_parent(temporal, unit, span) {
            trace!(period = %parent, count = sorted.len(), "merged into parent unit");
            return Ok(Some(parent));
        }
    }

    let merged = custom_from_interval(span)?;
    trace!(period = %merged, count = sorted.len(), "merged into custom period");
    Ok(Some(merged))
}

/// First parent of `unit` whose period from `span.start` covers `span`.
fn natural_parent(temporal: &Temporal, unit: &Unit, span: Interval) -> Option<Period> {
    let registry = temporal.registry();
    let mut candidates: Vec<&Unit> = registry.merges_to(unit).into_iter().collect();
    for parent in registry.parents_of(unit) {
        if !candidates.contains(&parent) {
            candidates.push(parent);
        }
    }

    candidates.into_iter().find_map(|candidate| {
        match create_period(temporal, candidate, span.start) {
            Ok(period) if close(period.start(), span.start) && close(period.end(), span.end) => {
                Some(period)
            }
            Ok(_) => None,
            Err(err) => {
                trace!(unit = %candidate, error = %err, "skipping merge candidate");
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::resolution;
    use crate::chrono_adapter::ChronoAdapter;
    use crate::divide::divide;
    use crate::registry::UnitDefinition;
    use chrono::{Datelike, TimeZone};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn temporal() -> Temporal {
        Temporal::with_adapter(ChronoAdapter::new(), utc(2024, 3, 15)).unwrap()
    }

    fn days_from(t: &Temporal, start: DateTime<Utc>, count: i64) -> Vec<Period> {
        (0..count)
            .map(|i| create_period(t, Unit::Day, start + TimeDelta::days(i)).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_and_single() {
        let t = temporal();
        assert_eq!(merge(&t, &[]).unwrap(), None);
        let day = create_period(&t, Unit::Day, utc(2024, 1, 1)).unwrap();
        assert_eq!(merge(&t, &[day.clone()]).unwrap(), Some(day));
    }

    #[test]
    fn test_seven_days_make_a_week() {
        let t = temporal();
        // Wednesday to Tuesday: not a calendar week, still a week.
        let days = days_from(&t, utc(2024, 3, 13), 7);
        let week = merge(&t, &days).unwrap().unwrap();
        assert_eq!(week.unit(), &Unit::Week);
        assert_eq!(week.start(), days[0].start());
        assert_eq!(week.end(), days[6].end());
    }

    #[test]
    fn test_twelve_months_make_a_year() {
        let t = temporal();
        let year = create_period(&t, Unit::Year, utc(2023, 1, 1)).unwrap();
        let mut months = divide(&t, &year, Unit::Month).unwrap();
        months.reverse();
        let merged = merge(&t, &months).unwrap().unwrap();
        assert_eq!(merged.unit(), &Unit::Year);
        assert_eq!(merged.interval(), year.interval());
    }

    #[test]
    fn test_twelve_months_across_years_stay_custom() {
        let t = temporal();
        let months: Vec<_> = (0..12)
            .map(|i| {
                let date = utc(2023 + (6 + i) / 12, ((6 + i) % 12 + 1) as u32, 1);
                create_period(&t, Unit::Month, date).unwrap()
            })
            .collect();
        let merged = merge(&t, &months).unwrap().unwrap();
        assert_eq!(merged.unit(), &Unit::Custom);
        assert_eq!(merged.start(), utc(2023, 7, 1));
        assert_eq!(merged.end().year(), 2024);
    }

    #[test]
    fn test_hours_make_a_day_and_years_a_decade() {
        let t = temporal();
        let day = create_period(&t, Unit::Day, utc(2024, 2, 29)).unwrap();
        let hours = divide(&t, &day, Unit::Hour).unwrap();
        assert_eq!(merge(&t, &hours).unwrap().unwrap(), day);

        let decade = create_period(&t, Unit::Decade, utc(2024, 2, 29)).unwrap();
        let years = divide(&t, &decade, Unit::Year).unwrap();
        let merged = merge(&t, &years).unwrap().unwrap();
        assert_eq!(merged.unit(), &Unit::Decade);
    }

    #[test]
    fn test_gaps_and_mixed_units_give_custom() {
        let t = temporal();
        let jan = create_period(&t, Unit::Month, utc(2024, 1, 10)).unwrap();
        let mar = create_period(&t, Unit::Month, utc(2024, 3, 10)).unwrap();
        let merged = merge(&t, &[mar.clone(), jan.clone()]).unwrap().unwrap();
        assert_eq!(merged.unit(), &Unit::Custom);
        assert_eq!(merged.start(), jan.start());
        assert_eq!(merged.end(), mar.end());

        let feb_day = create_period(&t, Unit::Day, utc(2024, 2, 1)).unwrap();
        let merged = merge(&t, &[jan.clone(), feb_day.clone()]).unwrap().unwrap();
        assert_eq!(merged.unit(), &Unit::Custom);
        assert_eq!(merged.end(), feb_day.end());
    }

    #[test]
    fn test_contiguity_tolerates_sub_second_jitter() {
        let t = temporal();
        let a = Period::custom(utc(2024, 1, 1), utc(2024, 1, 2) - resolution()).unwrap();
        let b = Period::custom(
            utc(2024, 1, 2) + TimeDelta::milliseconds(400),
            utc(2024, 1, 3) - resolution(),
        )
        .unwrap();
        let c = Period::custom(utc(2024, 1, 3), utc(2024, 1, 4) - resolution()).unwrap();
        let d = Period::custom(utc(2024, 1, 4), utc(2024, 1, 5) - resolution()).unwrap();
        let e = Period::custom(utc(2024, 1, 5), utc(2024, 1, 6) - resolution()).unwrap();
        let f = Period::custom(utc(2024, 1, 6), utc(2024, 1, 7) - resolution()).unwrap();
        let g = Period::custom(utc(2024, 1, 7), utc(2024, 1, 8) - resolution()).unwrap();
        let week = merge(&t, &[a, b, c, d, e, f, g]).unwrap().unwrap();
        assert_eq!(week.unit(), &Unit::Week);
    }

    #[test]
    fn test_divide_merge_round_trip() {
        let t = temporal();
        for (unit, by) in [
            (Unit::Month, Unit::Week),
            (Unit::Month, Unit::Day),
            (Unit::StableMonth, Unit::Day),
            (Unit::Year, Unit::Quarter),
            (Unit::Quarter, Unit::Week),
        ] {
            let period = create_period(&t, unit.clone(), utc(2024, 5, 17)).unwrap();
            let parts = divide(&t, &period, by.clone()).unwrap();
            let merged = merge(&t, &parts).unwrap().unwrap();
            assert_eq!(merged.start(), parts[0].start(), "{unit} by {by}");
            assert_eq!(merged.end(), parts[parts.len() - 1].end(), "{unit} by {by}");
        }

        let month = create_period(&t, Unit::Month, utc(2024, 5, 17)).unwrap();
        let days = divide(&t, &month, Unit::Day).unwrap();
        assert_eq!(merge(&t, &days).unwrap().unwrap().interval(), month.interval());
    }

    #[test]
    fn test_plugin_units_participate() {
        let mut t = temporal();
        t.define_unit(
            "semester",
            UnitDefinition::new(|_, date| {
                let first_half = date.month() <= 6;
                let start = utc(date.year(), if first_half { 1 } else { 7 }, 1);
                let next = if first_half {
                    utc(date.year(), 7, 1)
                } else {
                    utc(date.year() + 1, 1, 1)
                };
                Ok(Interval::new(start, next - resolution()))
            })
            .with_divisions(["quarter", "month"])
            .with_merges_to("year"),
        )
        .unwrap();

        let q3 = create_period(&t, Unit::Quarter, utc(2024, 8, 1)).unwrap();
        let q4 = create_period(&t, Unit::Quarter, utc(2024, 11, 1)).unwrap();
        let merged = merge(&t, &[q3, q4]).unwrap().unwrap();
        assert_eq!(merged.unit(), &Unit::from("semester"));
        assert_eq!(merged.start(), utc(2024, 7, 1));

        let semester = create_period(&t, "semester", utc(2024, 3, 1)).unwrap();
        let next = create_period(&t, "semester", utc(2024, 9, 1)).unwrap();
        let year = merge(&t, &[semester, next]).unwrap().unwrap();
        assert_eq!(year.unit(), &Unit::Year);
    }
}
