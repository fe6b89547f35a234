// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Unit registry.
//!
//! Every unit the engine can build a period for, built-in or not, has one
//! [`UnitDefinition`] in a [`UnitRegistry`]. The factory, `divide`, `merge`,
//! navigation and comparison all resolve a unit through the same lookup and
//! then dispatch on its [`PeriodRule`]; none of them special-cases unit
//! names beyond the stable-month grid rules.
//!
//! ```text
//! Unit ──registry──▶ UnitDefinition ─┬─ rule: PeriodRule ──▶ Interval
//!                                    ├─ validate (optional)
//!                                    ├─ divisions
//!                                    └─ merges_to
//! ```
//!
//! A registry is owned by each [`Temporal`] context; there is no
//! process-wide table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::calendar::{quarter_bounds, stable_month_bounds, year_block_bounds};
use crate::error::PeriodError;
use crate::period::{Interval, Period};
use crate::temporal::Temporal;
use crate::unit::{AdapterUnit, Unit};

/// Signature of a plugin period rule.
pub type CreatePeriodFn =
    dyn Fn(&Temporal, DateTime<Utc>) -> Result<Interval, PeriodError> + Send + Sync;

/// Signature of an optional period shape check.
pub type ValidateFn = dyn Fn(&Period) -> bool + Send + Sync;

/// Names that must never become registry keys, on their own or as a prefix.
const RESERVED_PREFIXES: [&str; 7] = [
    "__proto__",
    "constructor",
    "prototype",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
];

/// How a unit turns a reference instant into bounds.
#[derive(Clone)]
pub enum PeriodRule {
    /// `start_of` / `end_of` of the adapter.
    Adapter(AdapterUnit),
    /// Calendar quarter, derived locally.
    Quarter,
    /// Block of this many years, derived locally.
    YearBlock(u32),
    /// 42-day grid anchored on a month.
    StableMonth,
    /// Plugin-supplied rule.
    Function(Arc<CreatePeriodFn>),
}

impl PeriodRule {
    /// Bounds of the period containing `date`.
    pub fn bounds(
        &self,
        temporal: &Temporal,
        date: DateTime<Utc>,
    ) -> Result<Interval, PeriodError> {
        let options = temporal.adapter_options();
        match self {
            PeriodRule::Adapter(unit) => {
                let adapter = temporal.adapter();
                let start = adapter
                    .start_of(date, *unit, &options)
                    .ok_or(PeriodError::OutOfRange)?;
                let end = adapter
                    .end_of(date, *unit, &options)
                    .ok_or(PeriodError::OutOfRange)?;
                Ok(Interval::new(start, end))
            }
            PeriodRule::Quarter => quarter_bounds(date).ok_or(PeriodError::OutOfRange),
            PeriodRule::YearBlock(span) => {
                year_block_bounds(date, *span).ok_or(PeriodError::OutOfRange)
            }
            PeriodRule::StableMonth => stable_month_bounds(temporal.adapter(), date, &options)
                .ok_or(PeriodError::OutOfRange),
            PeriodRule::Function(create) => create(temporal, date),
        }
    }
}

impl fmt::Debug for PeriodRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodRule::Adapter(unit) => f.debug_tuple("Adapter").field(unit).finish(),
            PeriodRule::Quarter => f.write_str("Quarter"),
            PeriodRule::YearBlock(span) => f.debug_tuple("YearBlock").field(span).finish(),
            PeriodRule::StableMonth => f.write_str("StableMonth"),
            PeriodRule::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Everything the engine knows about one unit.
///
/// # Examples
///
/// A two-week sprint anchored on a fixed Monday:
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use tempoch_calendar::{Interval, UnitDefinition};
///
/// let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let sprint = UnitDefinition::new(move |_temporal, date| {
///     let length = TimeDelta::weeks(2);
///     let index = (date - epoch).num_milliseconds().div_euclid(length.num_milliseconds());
///     let start = epoch + TimeDelta::milliseconds(index * length.num_milliseconds());
///     Ok(Interval::new(start, start + length - TimeDelta::milliseconds(1)))
/// })
/// .with_divisions(["week", "day"]);
///
/// assert_eq!(sprint.divisions().len(), 2);
/// ```
#[derive(Clone)]
pub struct UnitDefinition {
    rule: PeriodRule,
    validate: Option<Arc<ValidateFn>>,
    divisions: Vec<Unit>,
    merges_to: Option<Unit>,
}

impl UnitDefinition {
    /// A definition backed by a plugin rule.
    pub fn new<F>(create_period: F) -> Self
    where
        F: Fn(&Temporal, DateTime<Utc>) -> Result<Interval, PeriodError> + Send + Sync + 'static,
    {
        Self::from_rule(PeriodRule::Function(Arc::new(create_period)))
    }

    pub fn from_rule(rule: PeriodRule) -> Self {
        Self {
            rule,
            validate: None,
            divisions: Vec::new(),
            merges_to: None,
        }
    }

    /// Adds a shape check run on every period the factory builds.
    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&Period) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Units this unit may be divided into, most natural first.
    pub fn with_divisions<I, U>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<Unit>,
    {
        self.divisions = units.into_iter().map(Into::into).collect();
        self
    }

    /// Unit a complete run of this unit's periods merges into.
    pub fn with_merges_to(mut self, unit: impl Into<Unit>) -> Self {
        self.merges_to = Some(unit.into());
        self
    }

    pub fn rule(&self) -> &PeriodRule {
        &self.rule
    }

    pub fn divisions(&self) -> &[Unit] {
        &self.divisions
    }

    pub fn merges_to(&self) -> Option<&Unit> {
        self.merges_to.as_ref()
    }

    /// Runs the shape check; periods pass when there is none.
    pub fn validate(&self, period: &Period) -> bool {
        self.validate.as_ref().map_or(true, |check| check(period))
    }
}

impl fmt::Debug for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDefinition")
            .field("rule", &self.rule)
            .field("validate", &self.validate.is_some())
            .field("divisions", &self.divisions)
            .field("merges_to", &self.merges_to)
            .finish()
    }
}

/// Checks a registration name and returns the unit it denotes.
pub fn validate_unit_name(name: &str) -> Result<Unit, PeriodError> {
    let reject = |reason| PeriodError::InvalidUnitName {
        name: name.to_string(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(reject("name must not be empty"));
    }
    if RESERVED_PREFIXES
        .iter()
        .any(|reserved| name.starts_with(reserved))
    {
        return Err(reject("name starts with a reserved object-model token"));
    }
    match Unit::from(name) {
        Unit::Custom => Err(reject("`custom` is reserved for caller-bounded periods")),
        unit => Ok(unit),
    }
}

/// Table of unit definitions.
#[derive(Clone, Default)]
pub struct UnitRegistry {
    definitions: BTreeMap<Unit, UnitDefinition>,
}

impl UnitRegistry {
    /// An empty registry. Most callers want [`UnitRegistry::with_builtins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with every built-in calendar unit.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for unit in Unit::BUILTIN {
            if let Some(definition) = builtin_definition(&unit) {
                registry.definitions.insert(unit, definition);
            }
        }
        registry
    }

    /// Registers `definition` under `name`.
    ///
    /// Redefining an existing unit, built-ins included, replaces it and logs
    /// a warning.
    pub fn define(&mut self, name: &str, definition: UnitDefinition) -> Result<(), PeriodError> {
        let unit = validate_unit_name(name)?;
        if self.definitions.contains_key(&unit) {
            warn!(unit = %unit, "overwriting existing unit definition");
        } else {
            debug!(unit = %unit, rule = ?definition.rule, "registered unit definition");
        }
        self.definitions.insert(unit, definition);
        Ok(())
    }

    pub fn get(&self, unit: &Unit) -> Option<&UnitDefinition> {
        self.definitions.get(unit)
    }

    /// Like [`get`](Self::get) but reports a missing unit as an error.
    pub fn require(&self, unit: &Unit) -> Result<&UnitDefinition, PeriodError> {
        self.get(unit).ok_or_else(|| PeriodError::UnknownUnit { unit: unit.clone() })
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.definitions.contains_key(unit)
    }

    /// Registered units, built-ins first (largest to smallest), then named
    /// units alphabetically.
    pub fn units(&self) -> Vec<Unit> {
        self.definitions.keys().cloned().collect()
    }

    pub fn divisions(&self, unit: &Unit) -> &[Unit] {
        self.get(unit).map(UnitDefinition::divisions).unwrap_or(&[])
    }

    pub fn merges_to(&self, unit: &Unit) -> Option<&Unit> {
        self.get(unit).and_then(UnitDefinition::merges_to)
    }

    /// Units whose `divisions` list `unit`, in registry order.
    pub fn parents_of<'a>(&'a self, unit: &'a Unit) -> impl Iterator<Item = &'a Unit> + 'a {
        self.definitions
            .iter()
            .filter(move |(_, definition)| definition.divisions.contains(unit))
            .map(|(parent, _)| parent)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.definitions.keys()).finish()
    }
}

fn builtin_definition(unit: &Unit) -> Option<UnitDefinition> {
    use Unit::*;

    let (rule, divisions, merges_to) = match unit {
        Millennium => (PeriodRule::YearBlock(1000), vec![Century], None),
        Century => (PeriodRule::YearBlock(100), vec![Decade], Some(Millennium)),
        Decade => (PeriodRule::YearBlock(10), vec![Year], Some(Century)),
        Year => (
            PeriodRule::Adapter(AdapterUnit::Year),
            vec![Quarter, Month, Week, Day],
            Some(Decade),
        ),
        Quarter => (PeriodRule::Quarter, vec![Month, Week, Day], Some(Year)),
        Month => (PeriodRule::Adapter(AdapterUnit::Month), vec![Week, Day], Some(Year)),
        StableMonth => (PeriodRule::StableMonth, vec![Week, Day], None),
        Week => (PeriodRule::Adapter(AdapterUnit::Week), vec![Day], None),
        Day => (PeriodRule::Adapter(AdapterUnit::Day), vec![Hour], Some(Week)),
        Hour => (PeriodRule::Adapter(AdapterUnit::Hour), vec![Minute], Some(Day)),
        Minute => (PeriodRule::Adapter(AdapterUnit::Minute), vec![Second], Some(Hour)),
        Second => (PeriodRule::Adapter(AdapterUnit::Second), vec![], Some(Minute)),
        Custom | Named(_) => return None,
    };

    let definition = UnitDefinition::from_rule(rule).with_divisions(divisions);
    Some(match merges_to {
        Some(parent) => definition.with_merges_to(parent),
        None => definition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> UnitDefinition {
        UnitDefinition::new(|_, date| Ok(Interval::new(date, date)))
    }

    #[test]
    fn test_builtins_seeded() {
        let registry = UnitRegistry::with_builtins();
        assert_eq!(registry.len(), Unit::BUILTIN.len());
        for unit in Unit::BUILTIN {
            assert!(registry.contains(&unit), "missing {unit}");
        }
        assert!(!registry.contains(&Unit::Custom));
        assert_eq!(registry.units()[0], Unit::Millennium);
    }

    #[test]
    fn test_builtin_hierarchy() {
        let registry = UnitRegistry::with_builtins();
        assert_eq!(registry.divisions(&Unit::StableMonth), &[Unit::Week, Unit::Day]);
        assert_eq!(registry.merges_to(&Unit::Month), Some(&Unit::Year));
        assert_eq!(registry.merges_to(&Unit::Millennium), None);
        let parents: Vec<_> = registry.parents_of(&Unit::Month).cloned().collect();
        assert_eq!(parents, vec![Unit::Year, Unit::Quarter]);
    }

    #[test]
    fn test_define_and_lookup() {
        let mut registry = UnitRegistry::with_builtins();
        registry
            .define("sprint", noop().with_divisions(["day"]).with_merges_to("quarter"))
            .unwrap();
        let sprint = Unit::from("sprint");
        assert!(registry.contains(&sprint));
        assert_eq!(registry.divisions(&sprint), &[Unit::Day]);
        assert_eq!(registry.merges_to(&sprint), Some(&Unit::Quarter));
        assert_eq!(registry.units().last(), Some(&sprint));
    }

    #[test]
    fn test_define_overwrites() {
        let mut registry = UnitRegistry::new();
        registry.define("sprint", noop()).unwrap();
        registry
            .define("sprint", noop().with_divisions(["week"]))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.divisions(&Unit::from("sprint")), &[Unit::Week]);
    }

    #[test]
    fn test_reserved_names_rejected() {
        let mut registry = UnitRegistry::new();
        for name in ["__proto__", "constructor", "prototype", "__proto__x", "constructorUnit"] {
            let err = registry.define(name, noop()).unwrap_err();
            assert!(
                matches!(err, PeriodError::InvalidUnitName { .. }),
                "{name} accepted"
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_and_custom_names_rejected() {
        assert!(matches!(
            validate_unit_name(""),
            Err(PeriodError::InvalidUnitName { .. })
        ));
        assert!(matches!(
            validate_unit_name("   "),
            Err(PeriodError::InvalidUnitName { .. })
        ));
        assert!(matches!(
            validate_unit_name("custom"),
            Err(PeriodError::InvalidUnitName { .. })
        ));
        assert_eq!(validate_unit_name("month").unwrap(), Unit::Month);
    }

    #[test]
    fn test_validate_defaults_to_pass() {
        let def = noop();
        let p = Period::custom(Utc::now(), Utc::now() + chrono::TimeDelta::hours(1)).unwrap();
        assert!(def.validate(&p));
        let strict = noop().with_validate(|period| period.duration().num_hours() > 2);
        assert!(!strict.validate(&p));
    }

    #[test]
    fn test_require_reports_unknown_unit() {
        let registry = UnitRegistry::with_builtins();
        let err = registry.require(&Unit::from("semester")).unwrap_err();
        assert_eq!(err.to_string(), "unknown unit `semester`");
    }
}
