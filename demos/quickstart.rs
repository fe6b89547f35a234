use chrono::{TimeZone, Utc};
use tempoch_calendar::{
    create_period, divide, is_current, merge, next, split, ChronoAdapter, PeriodError,
    SplitOptions, Temporal, TemporalOptions, Unit,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), PeriodError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tempoch_calendar=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let date = Utc.with_ymd_and_hms(2026, 2, 10, 9, 30, 0).unwrap();
    let temporal = Temporal::new(
        TemporalOptions::new()
            .with_adapter(ChronoAdapter::new())
            .with_date(date)
            .with_browsing_unit(Unit::StableMonth),
    )?;

    let grid = temporal.browsing();
    println!("browsing: {grid}");
    for week in divide(&temporal, grid, Unit::Week)? {
        let days = divide(&temporal, &week, Unit::Day)?;
        let row: Vec<String> = days
            .iter()
            .map(|day| {
                if grid.contains(day) {
                    day.start().format("%e").to_string()
                } else {
                    " .".to_string()
                }
            })
            .collect();
        println!("  {}", row.join(" "));
    }

    let quarter = create_period(&temporal, Unit::Quarter, date)?;
    println!("quarter: {quarter} (current: {})", is_current(&temporal, &quarter));
    println!("next quarter: {}", next(&temporal, &quarter)?);

    let months = divide(&temporal, &quarter, Unit::Month)?;
    if let Some(merged) = merge(&temporal, &months)? {
        println!("merged {} months into: {merged}", months.len());
    }

    let day = create_period(&temporal, Unit::Day, date)?;
    for shift in split(&temporal, &day, SplitOptions::Count(3))? {
        println!("shift: {}", shift.interval());
    }

    Ok(())
}
