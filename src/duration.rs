// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-aware duration handed to [`Adapter::add`](crate::Adapter::add).
//!
//! Unlike [`chrono::TimeDelta`], a [`Duration`] keeps years and months
//! separate from the fixed-length part, because "one month" has no fixed
//! length. Adapters apply the calendar part first (with end-of-month
//! clamping) and the fixed part afterwards.

use chrono::TimeDelta;

use crate::unit::AdapterUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of duration components. Every field defaults to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Duration {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl Duration {
    /// The zero duration.
    pub const ZERO: Self = Self {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    pub const fn years(years: i64) -> Self {
        Self { years, ..Self::ZERO }
    }

    pub const fn months(months: i64) -> Self {
        Self { months, ..Self::ZERO }
    }

    pub const fn weeks(weeks: i64) -> Self {
        Self { weeks, ..Self::ZERO }
    }

    pub const fn days(days: i64) -> Self {
        Self { days, ..Self::ZERO }
    }

    pub const fn hours(hours: i64) -> Self {
        Self { hours, ..Self::ZERO }
    }

    pub const fn minutes(minutes: i64) -> Self {
        Self { minutes, ..Self::ZERO }
    }

    pub const fn seconds(seconds: i64) -> Self {
        Self { seconds, ..Self::ZERO }
    }

    pub const fn milliseconds(milliseconds: i64) -> Self {
        Self {
            milliseconds,
            ..Self::ZERO
        }
    }

    /// `amount` of an adapter unit. A quarter is three months.
    pub const fn of(unit: AdapterUnit, amount: i64) -> Self {
        match unit {
            AdapterUnit::Year => Self::years(amount),
            AdapterUnit::Quarter => Self::months(amount.saturating_mul(3)),
            AdapterUnit::Month => Self::months(amount),
            AdapterUnit::Week => Self::weeks(amount),
            AdapterUnit::Day => Self::days(amount),
            AdapterUnit::Hour => Self::hours(amount),
            AdapterUnit::Minute => Self::minutes(amount),
            AdapterUnit::Second => Self::seconds(amount),
        }
    }

    pub const fn with_days(self, days: i64) -> Self {
        Self { days, ..self }
    }

    pub const fn with_hours(self, hours: i64) -> Self {
        Self { hours, ..self }
    }

    pub const fn with_weeks(self, weeks: i64) -> Self {
        Self { weeks, ..self }
    }

    /// `true` when every component is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Every component negated.
    pub const fn negated(self) -> Self {
        self.scaled(-1)
    }

    /// Every component multiplied by `factor`.
    pub const fn scaled(self, factor: i64) -> Self {
        Self {
            years: self.years.saturating_mul(factor),
            months: self.months.saturating_mul(factor),
            weeks: self.weeks.saturating_mul(factor),
            days: self.days.saturating_mul(factor),
            hours: self.hours.saturating_mul(factor),
            minutes: self.minutes.saturating_mul(factor),
            seconds: self.seconds.saturating_mul(factor),
            milliseconds: self.milliseconds.saturating_mul(factor),
        }
    }

    /// Years and months folded into a month count, or `None` on overflow.
    pub fn total_months(&self) -> Option<i64> {
        self.years.checked_mul(12)?.checked_add(self.months)
    }

    /// The fixed-length part (weeks and below) as a [`TimeDelta`], or
    /// `None` on overflow.
    pub fn fixed_delta(&self) -> Option<TimeDelta> {
        [
            TimeDelta::try_weeks(self.weeks)?,
            TimeDelta::try_days(self.days)?,
            TimeDelta::try_hours(self.hours)?,
            TimeDelta::try_minutes(self.minutes)?,
            TimeDelta::try_seconds(self.seconds)?,
            TimeDelta::try_milliseconds(self.milliseconds)?,
        ]
        .into_iter()
        .try_fold(TimeDelta::zero(), |acc, part| acc.checked_add(&part))
    }
}
