// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Period construction.

use chrono::{DateTime, Utc};

use crate::error::PeriodError;
use crate::period::{Interval, Period};
use crate::temporal::Temporal;
use crate::unit::Unit;

/// Builds the `unit` period containing `date`.
///
/// The unit is resolved through the context's registry, so built-in and
/// plugin units go through the same path. `custom` periods have no rule and
/// must be built with [`create_custom_period`].
///
/// # Errors
///
/// - [`PeriodError::UnknownUnit`] if `unit` is not registered.
/// - [`PeriodError::InvalidPeriod`] for `custom`, for a rule that returns
///   bounds not containing `date`, or when the unit's `validate` check
///   rejects the result.
/// - [`PeriodError::OutOfRange`] when the adapter cannot represent a bound.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{create_period, ChronoAdapter, Temporal, Unit};
///
/// let date = Utc.with_ymd_and_hms(2024, 8, 15, 0, 0, 0).unwrap();
/// let temporal = Temporal::with_adapter(ChronoAdapter::new(), date).unwrap();
///
/// let q3 = create_period(&temporal, Unit::Quarter, date).unwrap();
/// assert_eq!(q3.start(), Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
/// ```
pub fn create_period(
    temporal: &Temporal,
    unit: impl Into<Unit>,
    date: DateTime<Utc>,
) -> Result<Period, PeriodError> {
    let unit = unit.into();
    if unit == Unit::Custom {
        return Err(PeriodError::invalid_period(
            "custom periods are built from explicit bounds",
        ));
    }
    let definition = temporal.registry().require(&unit)?;
    let bounds = definition.rule().bounds(temporal, date)?;
    let period = Period::from_parts(unit, date, bounds)?;
    if !definition.validate(&period) {
        return Err(PeriodError::invalid_period(format!(
            "{period} failed its unit's validation"
        )));
    }
    Ok(period)
}

/// Builds a `custom` period over `[start, end]`, with `date = start`.
pub fn create_custom_period(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Period, PeriodError> {
    Period::custom(start, end)
}

/// Builds a `custom` period from bare bounds.
pub(crate) fn custom_from_interval(bounds: Interval) -> Result<Period, PeriodError> {
    Period::custom(bounds.start, bounds.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrono_adapter::ChronoAdapter;
    use crate::registry::UnitDefinition;
    use chrono::{TimeDelta, TimeZone};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn end_of_day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 23, 59, 59).unwrap() + TimeDelta::milliseconds(999)
    }

    fn temporal() -> Temporal {
        Temporal::with_adapter(ChronoAdapter::new(), utc(2024, 3, 15)).unwrap()
    }

    #[test]
    fn test_builtin_units() {
        let t = temporal();
        let date = utc(2024, 2, 15);

        let year = create_period(&t, Unit::Year, date).unwrap();
        assert_eq!(year.start(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(year.end(), end_of_day(2024, 12, 31));

        let month = create_period(&t, "month", date).unwrap();
        assert_eq!(month.end(), end_of_day(2024, 2, 29));
        assert_eq!(month.date(), date);

        let q1 = create_period(&t, Unit::Quarter, date).unwrap();
        assert_eq!(q1.end(), end_of_day(2024, 3, 31));

        let millennium = create_period(&t, Unit::Millennium, date).unwrap();
        assert_eq!(millennium.start(), Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(millennium.end(), end_of_day(2999, 12, 31));
    }

    #[test]
    fn test_week_follows_context_week_start() {
        let t = temporal();
        // 2024-03-13 is a Wednesday.
        let week = create_period(&t, Unit::Week, utc(2024, 3, 13)).unwrap();
        assert_eq!(week.start(), Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(week.end(), end_of_day(2024, 3, 17));
    }

    #[test]
    fn test_custom_through_factory_rejected() {
        let err = create_period(&temporal(), Unit::Custom, utc(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_unknown_unit() {
        let err = create_period(&temporal(), "fortnight", utc(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            PeriodError::UnknownUnit {
                unit: Unit::from("fortnight")
            }
        );
    }

    #[test]
    fn test_plugin_rule_and_validation() {
        let mut t = temporal();
        t.define_unit(
            "shift",
            UnitDefinition::new(|_, date| {
                let start = date - TimeDelta::hours(1);
                Ok(Interval::new(start, date + TimeDelta::hours(1)))
            })
            .with_validate(|p| p.duration() == TimeDelta::hours(2)),
        )
        .unwrap();
        let shift = create_period(&t, "shift", utc(2024, 1, 1)).unwrap();
        assert_eq!(shift.duration(), TimeDelta::hours(2));

        t.define_unit(
            "broken",
            UnitDefinition::new(|_, date| Ok(Interval::new(date, date)))
                .with_validate(|_| false),
        )
        .unwrap();
        let err = create_period(&t, "broken", utc(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_plugin_bounds_must_contain_date() {
        let mut t = temporal();
        t.define_unit(
            "elsewhere",
            UnitDefinition::new(|_, date| {
                let start = date + TimeDelta::days(1);
                Ok(Interval::new(start, start + TimeDelta::days(1)))
            }),
        )
        .unwrap();
        let err = create_period(&t, "elsewhere", utc(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_custom_period() {
        let p = create_custom_period(utc(2024, 1, 1), utc(2024, 1, 4)).unwrap();
        assert_eq!(p.unit(), &Unit::Custom);
        assert_eq!(p.date(), utc(2024, 1, 1));
        assert!(create_custom_period(utc(2024, 1, 4), utc(2024, 1, 1)).is_err());
    }
}
