// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Construction options for a [`Temporal`](crate::Temporal) context.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::adapter::Adapter;
use crate::calendar::weekday_from_index;
use crate::error::PeriodError;
use crate::registry::UnitRegistry;
use crate::unit::Unit;

/// Default first day of the week (Monday).
pub const DEFAULT_WEEK_STARTS_ON: u8 = 1;

/// Options for building a temporal context.
///
/// The adapter and the reference date are required; everything else has a
/// default. Nothing is defaulted silently for the required pair:
/// [`validate`](Self::validate) rejects a configuration missing either.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{ChronoAdapter, TemporalOptions};
///
/// let options = TemporalOptions::new()
///     .with_adapter(ChronoAdapter::new())
///     .with_date(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
///     .with_week_starts_on(0);
///
/// assert!(options.validate().is_ok());
/// assert!(TemporalOptions::new().validate().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemporalOptions {
    /// Backend doing the calendar arithmetic.
    adapter: Option<Arc<dyn Adapter>>,
    /// Reference instant for the initial browsing period.
    date: Option<DateTime<Utc>>,
    /// Instant for the initial `now` period; the system clock when unset.
    now: Option<DateTime<Utc>>,
    /// First day of the week, 0 = Sunday .. 6 = Saturday.
    week_starts_on: Option<u8>,
    /// Unit of the initial browsing period; month when unset.
    browsing_unit: Option<Unit>,
    /// Unit table; the built-in table when unset.
    registry: Option<UnitRegistry>,
}

impl TemporalOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the calendar backend.
    pub fn with_adapter(mut self, adapter: impl Adapter + 'static) -> Self {
        self.adapter = Some(Arc::new(adapter));
        self
    }

    /// Sets a shared calendar backend.
    pub fn with_shared_adapter(mut self, adapter: Arc<dyn Adapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Sets the reference date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the instant used for the `now` period.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Sets the first day of the week (0 = Sunday).
    pub fn with_week_starts_on(mut self, week_starts_on: u8) -> Self {
        self.week_starts_on = Some(week_starts_on);
        self
    }

    /// Sets the unit of the initial browsing period.
    pub fn with_browsing_unit(mut self, unit: impl Into<Unit>) -> Self {
        self.browsing_unit = Some(unit.into());
        self
    }

    /// Replaces the built-in unit table.
    pub fn with_registry(mut self, registry: UnitRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn adapter(&self) -> Option<&Arc<dyn Adapter>> {
        self.adapter.as_ref()
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn now(&self) -> Option<DateTime<Utc>> {
        self.now
    }

    /// Configured week start, or [`DEFAULT_WEEK_STARTS_ON`].
    pub fn week_starts_on(&self) -> u8 {
        self.week_starts_on.unwrap_or(DEFAULT_WEEK_STARTS_ON)
    }

    /// Configured browsing unit, or [`Unit::Month`].
    pub fn browsing_unit(&self) -> Unit {
        self.browsing_unit.clone().unwrap_or(Unit::Month)
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the adapter or the reference date is missing, or
    /// if the week start is outside `0..=6`.
    pub fn validate(&self) -> Result<(), PeriodError> {
        if self.adapter.is_none() {
            return Err(PeriodError::configuration(
                "an adapter is required to build a temporal context",
            ));
        }
        if self.date.is_none() {
            return Err(PeriodError::configuration(
                "a reference date is required to build a temporal context",
            ));
        }
        let week_starts_on = self.week_starts_on();
        if weekday_from_index(week_starts_on).is_none() {
            return Err(PeriodError::configuration(format!(
                "week_starts_on must be within 0..=6, got {week_starts_on}"
            )));
        }
        if self.browsing_unit() == Unit::Custom {
            return Err(PeriodError::configuration(
                "the browsing period cannot be a custom period",
            ));
        }
        Ok(())
    }

    pub(crate) fn take_registry(&mut self) -> UnitRegistry {
        self.registry
            .take()
            .unwrap_or_else(UnitRegistry::with_builtins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrono_adapter::ChronoAdapter;
    use chrono::TimeZone;

    fn complete() -> TemporalOptions {
        TemporalOptions::new()
            .with_adapter(ChronoAdapter::new())
            .with_date(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_defaults() {
        let options = TemporalOptions::default();
        assert_eq!(options.week_starts_on(), 1);
        assert_eq!(options.browsing_unit(), Unit::Month);
        assert!(options.adapter().is_none());
        assert!(options.date().is_none());
        assert!(options.now().is_none());
    }

    #[test]
    fn test_missing_adapter() {
        let options =
            TemporalOptions::new().with_date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("adapter"));
    }

    #[test]
    fn test_missing_date() {
        let options = TemporalOptions::new().with_adapter(ChronoAdapter::new());
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("reference date"));
    }

    #[test]
    fn test_week_start_range() {
        assert!(complete().with_week_starts_on(6).validate().is_ok());
        let err = complete().with_week_starts_on(7).validate().unwrap_err();
        assert!(matches!(err, PeriodError::Configuration { .. }));
    }

    #[test]
    fn test_custom_browsing_unit_rejected() {
        assert!(complete().with_browsing_unit("custom").validate().is_err());
        assert!(complete().with_browsing_unit("week").validate().is_ok());
    }
}
