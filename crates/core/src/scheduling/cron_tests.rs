// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};
use yare::parameterized;

fn at(day: u32, hour: u32, minute: u32, second: u32) -> chrono::DateTime<Utc> {
    // March 2026: the 2nd is a Monday, the 6th a Friday, the 8th a Sunday
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, second)
        .unwrap()
}

#[parameterized(
    weekday_morning_at_eight = { "0 8 * * 1-5", 2, 8, 0, true },
    weekday_morning_one_minute_late = { "0 8 * * 1-5", 2, 8, 1, false },
    weekday_morning_one_minute_early = { "0 8 * * 1-5", 2, 7, 59, false },
    weekday_morning_on_saturday = { "0 8 * * 1-5", 7, 8, 0, false },
    friday_afternoon = { "0 17 * * 5", 6, 17, 0, true },
    friday_afternoon_on_monday = { "0 17 * * 5", 2, 17, 0, false },
    sunday_as_zero = { "0 0 * * 0", 8, 0, 0, true },
    sunday_as_seven = { "0 0 * * 7", 8, 0, 0, true },
    wrapping_weekend_range = { "0 9 * * 5-7", 8, 9, 0, true },
    every_fifteen_minutes = { "*/15 * * * *", 3, 10, 30, true },
    every_fifteen_minutes_off_step = { "*/15 * * * *", 3, 10, 31, false },
    day_of_month = { "30 9 1 * *", 1, 9, 30, true },
    named_weekdays = { "0 8 * * mon-fri", 6, 8, 0, true },
    full_week_range = { "0 9 * * 0-7", 2, 9, 0, true },
    full_week_range_on_sunday = { "0 9 * * 0-7", 8, 9, 0, true },
    day_of_month_or_weekday_on_monday = { "0 9 1 * 1", 2, 9, 0, true },
    day_of_month_or_weekday_on_first = { "0 9 1 * 1", 1, 9, 0, true },
    day_of_month_or_weekday_on_tuesday = { "0 9 1 * 1", 3, 9, 0, false },
    day_of_month_wildcard_keeps_weekday = { "0 9 * * 1", 3, 9, 0, false },
)]
fn fires_at_matching_minutes(expr: &str, day: u32, hour: u32, minute: u32, expected: bool) {
    let schedule = CronSchedule::parse(expr).unwrap();
    assert_eq!(schedule.fires_at(&at(day, hour, minute, 0)), expected);
}

#[test]
fn seconds_within_the_minute_do_not_matter() {
    let schedule = CronSchedule::parse("0 8 * * 1-5").unwrap();
    assert!(schedule.fires_at(&at(2, 8, 0, 0)));
    assert!(schedule.fires_at(&at(2, 8, 0, 59)));
}

#[test]
fn next_after_is_strictly_later() {
    let schedule = CronSchedule::parse("0 8 * * 1-5").unwrap();
    // Friday 08:00 -> next is Monday 08:00
    let next = schedule.next_after(&at(6, 8, 0, 0)).unwrap();
    assert_eq!(
        next,
        Utc.with_ymd_and_hms(2026, 3, 9, 8, 0, 0).unwrap()
    );
}

#[test]
fn next_after_merges_day_of_month_and_weekday() {
    let schedule = CronSchedule::parse("0 9 15 * 1").unwrap();
    // Tuesday the 10th -> Sunday the 15th comes before Monday the 16th
    let next = schedule.next_after(&at(10, 9, 0, 0)).unwrap();
    assert_eq!(next, at(15, 9, 0, 0));
    // Sunday the 15th -> Monday the 16th
    let next = schedule.next_after(&at(15, 9, 0, 0)).unwrap();
    assert_eq!(next, at(16, 9, 0, 0));
}

#[test]
fn macros_are_accepted() {
    let schedule = CronSchedule::parse("@daily").unwrap();
    assert!(schedule.fires_at(&at(4, 0, 0, 0)));
    assert!(!schedule.fires_at(&at(4, 0, 1, 0)));
}

#[parameterized(
    too_few_fields = { "0 8 * *" },
    seconds_field_not_allowed = { "0 0 8 * * 1-5" },
    bad_weekday = { "0 8 * * 9" },
    bad_minute = { "61 8 * * *" },
    empty = { "" },
)]
fn invalid_expressions_are_rejected(expr: &str) {
    assert!(CronSchedule::parse(expr).is_err());
}

#[test]
fn truncate_drops_seconds_and_nanos() {
    let dt = at(2, 8, 0, 42) + chrono::Duration::milliseconds(250);
    assert_eq!(truncate_to_minute(&dt), at(2, 8, 0, 0));
}

#[test]
fn expression_is_kept_as_written() {
    let schedule = CronSchedule::parse("  0 8 * * 1-5 ").unwrap();
    assert_eq!(schedule.expression(), "0 8 * * 1-5");
    assert_eq!(schedule.to_string(), "0 8 * * 1-5");
}
