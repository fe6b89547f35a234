// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Unit vocabulary.
//!
//! Two enums live here:
//!
//! - [`Unit`] — the open set of period kinds. Built-in calendar units are
//!   variants; anything registered by a plugin is carried as
//!   [`Unit::Named`].
//! - [`AdapterUnit`] — the fixed, small vocabulary an [`Adapter`](crate::Adapter)
//!   understands.
//!
//! `Unit` converts from `&str`, so every public operation accepts either
//! `Unit::Month` or `"month"`.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Granularity a period is built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    /// One thousand years, `floor(year / 1000) * 1000` aligned.
    Millennium,
    /// One hundred years, `floor(year / 100) * 100` aligned.
    Century,
    /// Ten years, `floor(year / 10) * 10` aligned.
    Decade,
    /// Calendar year.
    Year,
    /// Calendar quarter (Jan–Mar, Apr–Jun, Jul–Sep, Oct–Dec).
    Quarter,
    /// Calendar month.
    Month,
    /// Fixed 42-day grid covering a month, aligned to the week start.
    StableMonth,
    /// Seven days starting on the configured week start.
    Week,
    /// Calendar day.
    Day,
    /// Clock hour.
    Hour,
    /// Clock minute.
    Minute,
    /// Clock second.
    Second,
    /// Caller-supplied bounds with no unit derivation.
    Custom,
    /// A unit registered at runtime (fiscal quarter, sprint, ...).
    Named(Arc<str>),
}

impl Unit {
    /// Canonical name of the unit.
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Millennium => "millennium",
            Unit::Century => "century",
            Unit::Decade => "decade",
            Unit::Year => "year",
            Unit::Quarter => "quarter",
            Unit::Month => "month",
            Unit::StableMonth => "stableMonth",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Custom => "custom",
            Unit::Named(name) => &**name,
        }
    }

    /// Every unit the default registry seeds, largest first.
    pub const BUILTIN: [Unit; 12] = [
        Unit::Millennium,
        Unit::Century,
        Unit::Decade,
        Unit::Year,
        Unit::Quarter,
        Unit::Month,
        Unit::StableMonth,
        Unit::Week,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    /// The adapter unit with the same meaning, if the adapter vocabulary
    /// has one.
    pub fn adapter_unit(&self) -> Option<AdapterUnit> {
        match self {
            Unit::Year => Some(AdapterUnit::Year),
            Unit::Quarter => Some(AdapterUnit::Quarter),
            Unit::Month => Some(AdapterUnit::Month),
            Unit::Week => Some(AdapterUnit::Week),
            Unit::Day => Some(AdapterUnit::Day),
            Unit::Hour => Some(AdapterUnit::Hour),
            Unit::Minute => Some(AdapterUnit::Minute),
            Unit::Second => Some(AdapterUnit::Second),
            _ => None,
        }
    }

    /// `true` for units registered at runtime.
    pub fn is_named(&self) -> bool {
        matches!(self, Unit::Named(_))
    }
}

impl From<&str> for Unit {
    fn from(name: &str) -> Self {
        match name {
            "millennium" => Unit::Millennium,
            "century" => Unit::Century,
            "decade" => Unit::Decade,
            "year" => Unit::Year,
            "quarter" => Unit::Quarter,
            "month" => Unit::Month,
            "stableMonth" => Unit::StableMonth,
            "week" => Unit::Week,
            "day" => Unit::Day,
            "hour" => Unit::Hour,
            "minute" => Unit::Minute,
            "second" => Unit::Second,
            "custom" => Unit::Custom,
            other => Unit::Named(Arc::from(other)),
        }
    }
}

impl From<String> for Unit {
    fn from(name: String) -> Self {
        Unit::from(name.as_str())
    }
}

impl From<&Unit> for Unit {
    fn from(unit: &Unit) -> Self {
        unit.clone()
    }
}

impl From<AdapterUnit> for Unit {
    fn from(unit: AdapterUnit) -> Self {
        match unit {
            AdapterUnit::Year => Unit::Year,
            AdapterUnit::Quarter => Unit::Quarter,
            AdapterUnit::Month => Unit::Month,
            AdapterUnit::Week => Unit::Week,
            AdapterUnit::Day => Unit::Day,
            AdapterUnit::Hour => Unit::Hour,
            AdapterUnit::Minute => Unit::Minute,
            AdapterUnit::Second => Unit::Second,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Unit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Unit::from(name))
    }
}

/// Calendar units every adapter must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdapterUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for AdapterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Unit::from(*self).fmt(f)
    }
}
