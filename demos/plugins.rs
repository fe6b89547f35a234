use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use tempoch_calendar::{
    calendar::resolution, create_period, divide, go, is_same, merge, ChronoAdapter, Duration,
    Interval, PeriodError, Temporal, Unit, UnitDefinition,
};
use tracing_subscriber::EnvFilter;

/// Fiscal quarters of a year starting on April 1st.
fn fiscal_quarter() -> UnitDefinition {
    UnitDefinition::new(|temporal, date| {
        let offset = (date.month0() + 9) % 12;
        let start_month0 = (offset / 3 * 3 + 3) % 12;
        let year = if start_month0 > date.month0() {
            date.year() - 1
        } else {
            date.year()
        };
        let start = Utc
            .with_ymd_and_hms(year, start_month0 + 1, 1, 0, 0, 0)
            .single()
            .ok_or(PeriodError::OutOfRange)?;
        let end = temporal
            .adapter()
            .add(start, &Duration::months(3))
            .ok_or(PeriodError::OutOfRange)?;
        Ok(Interval::new(start, end - resolution()))
    })
    .with_divisions(["month", "week", "day"])
    .with_merges_to("year")
}

/// Two-week sprints counted from a fixed Monday.
fn sprint(epoch: DateTime<Utc>) -> UnitDefinition {
    UnitDefinition::new(move |_, date| {
        let length = TimeDelta::weeks(2).num_milliseconds();
        let index = (date - epoch).num_milliseconds().div_euclid(length);
        let start = epoch + TimeDelta::milliseconds(index * length);
        Ok(Interval::new(
            start,
            start + TimeDelta::milliseconds(length) - resolution(),
        ))
    })
    .with_divisions(["week", "day"])
    .with_validate(|period| period.duration() + resolution() == TimeDelta::weeks(2))
}

fn main() -> Result<(), PeriodError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tempoch_calendar=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let date = Utc.with_ymd_and_hms(2025, 5, 14, 0, 0, 0).unwrap();
    let mut temporal = Temporal::with_adapter(ChronoAdapter::new(), date)?;
    temporal.define_unit("fiscalQuarter", fiscal_quarter())?;
    temporal.define_unit(
        "sprint",
        sprint(Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()),
    )?;
    println!("units: {:?}", temporal.registered_units());

    let fq = create_period(&temporal, "fiscalQuarter", date)?;
    println!("fiscal quarter: {fq}");
    let months = divide(&temporal, &fq, Unit::Month)?;
    if let Some(merged) = merge(&temporal, &months)? {
        println!("merged back: {merged}");
    }

    let current = create_period(&temporal, "sprint", date)?;
    for steps in 0..3 {
        println!("sprint +{steps}: {}", go(&temporal, &current, steps)?);
    }
    let same = is_same(&temporal, date, date + TimeDelta::days(10), "sprint")?;
    println!("10 days later, same sprint: {same}");

    if let Err(err) = temporal.define_unit("__proto__", fiscal_quarter()) {
        println!("rejected: {err}");
    }
    Ok(())
}
