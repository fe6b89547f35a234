// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar Periods
//!
//! This crate computes hierarchical calendar periods: the year, quarter,
//! month, week or day containing an instant, and the operations that move
//! between them. Wall-clock arithmetic is delegated to a pluggable
//! [`Adapter`]; [`ChronoAdapter`] is the bundled backend.
//!
//! # Core types
//!
//! - [`Period`] — immutable `[start, end]` span tagged with its [`Unit`] and
//!   reference date. Both ends are inclusive.
//! - [`Temporal`] — context holding the adapter, the week start, the unit
//!   registry and the host's `browsing` and `now` periods.
//! - [`UnitRegistry`] — table of [`UnitDefinition`]s; the built-in units are
//!   seeded by [`UnitRegistry::with_builtins`] and plugins add their own.
//! - [`Duration`] — calendar duration handed to [`Adapter::add`].
//! - [`PeriodError`] — every failure the crate reports.
//!
//! # Operations
//!
//! | Function | Result |
//! |----------|--------|
//! | [`create_period`] | the `unit` period containing an instant |
//! | [`divide`] | the `unit` periods covering a period |
//! | [`split`] | a period partitioned by unit, count or duration |
//! | [`merge`] | one period spanning several, natural unit when one fits |
//! | [`next`] / [`previous`] / [`go`] | neighbouring periods of the same unit |
//! | [`is_same`] | whether two instants share a `unit` period |
//! | [`contains`] | inclusive membership test |
//! | [`zoom_in`] / [`zoom_out`] | the child or parent period around the reference date |
//!
//! # Units
//!
//! | Unit | Bounds |
//! |------|--------|
//! | `millennium`, `century`, `decade` | `floor(year / N) * N` blocks |
//! | `year`, `month`, `week`, `day`, `hour`, `minute`, `second` | adapter `start_of` / `end_of` |
//! | `quarter` | Jan–Mar, Apr–Jun, Jul–Sep, Oct–Dec |
//! | `stableMonth` | 42-day grid starting on the week start on or before the 1st |
//! | `custom` | caller-supplied bounds |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tempoch_calendar::{create_period, divide, merge, next, ChronoAdapter, Temporal, Unit};
//!
//! let date = Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();
//! let temporal = Temporal::with_adapter(ChronoAdapter::new(), date).unwrap();
//!
//! let february = create_period(&temporal, Unit::Month, date).unwrap();
//! assert_eq!(divide(&temporal, &february, Unit::Day).unwrap().len(), 29);
//!
//! let march = next(&temporal, &february).unwrap();
//! let merged = merge(&temporal, &[february, march]).unwrap().unwrap();
//! assert_eq!(merged.unit(), &Unit::Custom);
//! ```

mod adapter;
pub mod calendar;
mod chrono_adapter;
mod compare;
mod config;
mod divide;
mod duration;
mod error;
mod factory;
mod merge;
mod navigate;
mod period;
mod registry;
mod temporal;
mod unit;
mod zoom;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use adapter::{Adapter, AdapterOptions};
pub use calendar::{STABLE_MONTH_DAYS, STABLE_MONTH_WEEKS};
pub use chrono_adapter::ChronoAdapter;
pub use compare::is_same;
pub use config::{TemporalOptions, DEFAULT_WEEK_STARTS_ON};
pub use divide::{divide, split, SplitOptions, MAX_DIVISIONS};
pub use duration::Duration;
pub use error::PeriodError;
pub use factory::{create_custom_period, create_period};
pub use merge::merge;
pub use navigate::{go, next, previous};
pub use period::{contains, Interval, Period, TimeAnchor};
pub use registry::{
    validate_unit_name, CreatePeriodFn, PeriodRule, UnitDefinition, UnitRegistry, ValidateFn,
};
pub use temporal::Temporal;
pub use unit::{AdapterUnit, Unit};
pub use zoom::{is_current, parent_unit, zoom_in, zoom_out};
