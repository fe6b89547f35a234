// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The temporal context shared by every operation.
//!
//! A [`Temporal`] bundles the adapter, the week-start setting, the unit
//! registry and two host-owned periods: `browsing` (what the host is looking
//! at) and `now`. Operations only ever read the context; the host moves
//! `browsing` and refreshes `now` through `&mut` methods.

use std::sync::Arc;

use chrono::{DateTime, Utc, Weekday};
use tracing::debug;

use crate::adapter::{Adapter, AdapterOptions};
use crate::calendar::{weekday_from_index, weekday_index};
use crate::config::TemporalOptions;
use crate::error::PeriodError;
use crate::factory::create_period;
use crate::period::Period;
use crate::registry::{UnitDefinition, UnitRegistry};
use crate::unit::Unit;

/// Adapter, configuration and navigation state.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{ChronoAdapter, Temporal, TemporalOptions, Unit};
///
/// let temporal = Temporal::new(
///     TemporalOptions::new()
///         .with_adapter(ChronoAdapter::new())
///         .with_date(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()),
/// )
/// .unwrap();
///
/// assert_eq!(temporal.week_starts_on(), 1);
/// assert_eq!(temporal.browsing().unit(), &Unit::Month);
/// ```
#[derive(Debug, Clone)]
pub struct Temporal {
    adapter: Arc<dyn Adapter>,
    week_starts_on: Weekday,
    registry: UnitRegistry,
    browsing: Period,
    now: Period,
}

impl Temporal {
    /// Builds a context, failing fast on a missing adapter or reference
    /// date.
    pub fn new(mut options: TemporalOptions) -> Result<Self, PeriodError> {
        options.validate()?;
        let adapter = options
            .adapter()
            .cloned()
            .ok_or_else(|| PeriodError::configuration("an adapter is required"))?;
        let date = options
            .date()
            .ok_or_else(|| PeriodError::configuration("a reference date is required"))?;
        let week_starts_on = weekday_from_index(options.week_starts_on())
            .ok_or_else(|| PeriodError::configuration("week_starts_on must be within 0..=6"))?;
        let now = options.now().unwrap_or_else(Utc::now);
        let browsing_unit = options.browsing_unit();
        let registry = options.take_registry();

        // Placeholders until the factory can run against the finished context.
        let placeholder = Period::custom(date, date)?;
        let mut temporal = Self {
            adapter,
            week_starts_on,
            registry,
            browsing: placeholder.clone(),
            now: placeholder,
        };
        temporal.browsing = create_period(&temporal, browsing_unit, date)?;
        temporal.now = create_period(&temporal, Unit::Second, now)?;

        debug!(
            adapter = temporal.adapter.name(),
            week_starts_on = weekday_index(week_starts_on),
            browsing = %temporal.browsing,
            "created temporal context"
        );
        Ok(temporal)
    }

    /// Shorthand for the two required options.
    pub fn with_adapter(
        adapter: impl Adapter + 'static,
        date: DateTime<Utc>,
    ) -> Result<Self, PeriodError> {
        Self::new(TemporalOptions::new().with_adapter(adapter).with_date(date))
    }

    pub fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    /// First day of the week, 0 = Sunday .. 6 = Saturday.
    pub fn week_starts_on(&self) -> u8 {
        weekday_index(self.week_starts_on)
    }

    pub fn week_start(&self) -> Weekday {
        self.week_starts_on
    }

    /// Options forwarded to week-sensitive adapter calls.
    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            week_starts_on: self.week_starts_on,
        }
    }

    /// Period the host is currently looking at.
    pub fn browsing(&self) -> &Period {
        &self.browsing
    }

    pub fn set_browsing(&mut self, period: Period) {
        self.browsing = period;
    }

    /// Second-precision period containing the last refreshed instant.
    pub fn now(&self) -> &Period {
        &self.now
    }

    /// Re-derives `now` from `instant`.
    pub fn refresh_now(&mut self, instant: DateTime<Utc>) -> Result<(), PeriodError> {
        self.now = create_period(self, Unit::Second, instant)?;
        Ok(())
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Registers or replaces a unit; see [`UnitRegistry::define`].
    pub fn define_unit(
        &mut self,
        name: &str,
        definition: UnitDefinition,
    ) -> Result<(), PeriodError> {
        self.registry.define(name, definition)
    }

    pub fn unit_definition(&self, unit: impl Into<Unit>) -> Option<&UnitDefinition> {
        self.registry.get(&unit.into())
    }

    pub fn has_unit(&self, unit: impl Into<Unit>) -> bool {
        self.registry.contains(&unit.into())
    }

    pub fn registered_units(&self) -> Vec<Unit> {
        self.registry.units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrono_adapter::ChronoAdapter;
    use crate::registry::UnitDefinition;
    use crate::period::Interval;
    use chrono::{TimeDelta, TimeZone};

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_new_requires_adapter_and_date() {
        let err = Temporal::new(TemporalOptions::new().with_date(date())).unwrap_err();
        assert!(matches!(err, PeriodError::Configuration { .. }));
        let err = Temporal::new(TemporalOptions::new().with_adapter(ChronoAdapter::new()))
            .unwrap_err();
        assert!(matches!(err, PeriodError::Configuration { .. }));
    }

    #[test]
    fn test_initial_periods() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 5).unwrap() + TimeDelta::milliseconds(40);
        let temporal = Temporal::new(
            TemporalOptions::new()
                .with_adapter(ChronoAdapter::new())
                .with_date(date())
                .with_now(now),
        )
        .unwrap();
        assert_eq!(temporal.browsing().unit(), &Unit::Month);
        assert_eq!(
            temporal.browsing().start(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(temporal.now().unit(), &Unit::Second);
        assert_eq!(
            temporal.now().start(),
            Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 5).unwrap()
        );
        assert_eq!(temporal.now().date(), now);
    }

    #[test]
    fn test_browsing_unit_option() {
        let temporal = Temporal::new(
            TemporalOptions::new()
                .with_adapter(ChronoAdapter::new())
                .with_date(date())
                .with_browsing_unit("week")
                .with_week_starts_on(0),
        )
        .unwrap();
        assert_eq!(temporal.week_start(), Weekday::Sun);
        assert_eq!(temporal.browsing().unit(), &Unit::Week);
        assert_eq!(
            temporal.browsing().start(),
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_host_mutates_navigation_state() {
        let mut temporal = Temporal::with_adapter(ChronoAdapter::new(), date()).unwrap();
        let day = create_period(&temporal, Unit::Day, date()).unwrap();
        temporal.set_browsing(day.clone());
        assert_eq!(temporal.browsing(), &day);

        let later = date() + TimeDelta::hours(1);
        temporal.refresh_now(later).unwrap();
        assert_eq!(temporal.now().date(), later);
    }

    #[test]
    fn test_registry_api() {
        let mut temporal = Temporal::with_adapter(ChronoAdapter::new(), date()).unwrap();
        assert!(temporal.has_unit("quarter"));
        assert!(!temporal.has_unit("semester"));
        temporal
            .define_unit(
                "semester",
                UnitDefinition::new(|_, d| Ok(Interval::new(d, d))).with_merges_to("year"),
            )
            .unwrap();
        assert!(temporal.has_unit("semester"));
        assert_eq!(
            temporal.unit_definition("semester").and_then(UnitDefinition::merges_to),
            Some(&Unit::Year)
        );
        assert!(temporal.registered_units().contains(&Unit::from("semester")));
        assert!(temporal
            .define_unit("__proto__", UnitDefinition::new(|_, d| Ok(Interval::new(d, d))))
            .is_err());
    }

    #[test]
    fn test_temporal_is_send_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Temporal>();
    }
}
