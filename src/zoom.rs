// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moving up and down the unit hierarchy around a reference date.

use crate::divide::divide;
use crate::error::PeriodError;
use crate::factory::create_period;
use crate::period::Period;
use crate::temporal::Temporal;
use crate::unit::Unit;

/// The `unit` sub-period of `period` that contains its reference date.
///
/// Goes through [`divide`], so the same restrictions apply (a
/// `stableMonth` only zooms into weeks and days).
pub fn zoom_in(
    temporal: &Temporal,
    period: &Period,
    unit: impl Into<Unit>,
) -> Result<Period, PeriodError> {
    let date = period.date();
    divide(temporal, period, unit)?
        .into_iter()
        .find(|part| part.interval().contains(date))
        .ok_or_else(|| {
            PeriodError::invalid_period(format!("no sub-period of {period} contains {date}"))
        })
}

/// The `unit` period containing the reference date of `period`.
pub fn zoom_out(
    temporal: &Temporal,
    period: &Period,
    unit: impl Into<Unit>,
) -> Result<Period, PeriodError> {
    create_period(temporal, unit, period.date())
}

/// Registered parent of `unit`, if any.
pub fn parent_unit(temporal: &Temporal, unit: &Unit) -> Option<Unit> {
    temporal.registry().merges_to(unit).cloned()
}

/// Whether the context's `now` lies inside `period`.
pub fn is_current(temporal: &Temporal, period: &Period) -> bool {
    period.contains(temporal.now().date())
}
