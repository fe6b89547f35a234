// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible period operation.

use crate::unit::Unit;

/// Error type for all fallible operations in this crate.
///
/// Every computation is deterministic, so none of these is transient:
/// retrying the same call yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    /// The temporal context was built without a required option, or with an
    /// out-of-range one.
    #[error("invalid temporal configuration: {reason}")]
    Configuration {
        /// What is missing or wrong.
        reason: String,
    },

    /// The unit has no built-in handling and no registry entry.
    #[error("unknown unit `{unit}`")]
    UnknownUnit {
        /// The unit that could not be resolved.
        unit: Unit,
    },

    /// The requested division is not defined for the source period.
    #[error("cannot divide a `{from}` period by `{by}`")]
    UnsupportedDivision {
        /// Unit of the period being divided.
        from: Unit,
        /// Requested target unit.
        by: Unit,
    },

    /// A division or split would produce more periods than the ceiling.
    #[error("division would produce more than {limit} periods")]
    DivisionTooLarge {
        /// The ceiling that was exceeded.
        limit: usize,
    },

    /// A unit name was rejected at registration time.
    #[error("invalid unit name `{name}`: {reason}")]
    InvalidUnitName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Period bounds or split parameters are inconsistent.
    #[error("invalid period: {reason}")]
    InvalidPeriod {
        /// What is inconsistent.
        reason: String,
    },

    /// Date arithmetic left the representable range of the backend.
    #[error("date arithmetic out of range")]
    OutOfRange,
}

impl PeriodError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_period(reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            reason: reason.into(),
        }
    }
}
