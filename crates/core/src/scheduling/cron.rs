// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron expressions for routine schedules
//!
//! Accepts the standard five-field form (`min hour dom month dow`, with
//! Sunday as 0 or 7) plus the `@daily`-style macros. Expressions are
//! normalised into the seconds-first dialect of the `cron` crate.
//!
//! When both day-of-month and day-of-week are restricted, a day matches if
//! either field matches. The `cron` crate requires both, so such
//! expressions are split into two schedules and their fire times merged.

use chrono::{DateTime, Duration, TimeZone, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WEEKDAYS: [&str; 8] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Errors from parsing a cron expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
    #[error("expected 5 fields in cron expression '{expression}', found {found}")]
    FieldCount { expression: String, found: usize },
    #[error("invalid day-of-week '{value}' in cron expression '{expression}'")]
    Weekday { expression: String, value: String },
    #[error("invalid cron expression '{expression}': {message}")]
    Invalid { expression: String, message: String },
}

/// A parsed cron schedule
#[derive(Clone)]
pub struct CronSchedule {
    expression: String,
    schedules: Vec<::cron::Schedule>,
}

impl CronSchedule {
    pub fn parse(expression: &str) -> Result<Self, CronError> {
        let schedules = normalize(expression)?
            .iter()
            .map(|normalized| {
                ::cron::Schedule::from_str(normalized).map_err(|e| CronError::Invalid {
                    expression: expression.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            expression: expression.trim().to_string(),
            schedules,
        })
    }

    /// The expression as written in configuration
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First fire time strictly after `after`
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.schedules
            .iter()
            .filter_map(|schedule| schedule.after(after).next())
            .min()
    }

    /// Whether the schedule fires in the minute containing `now`.
    ///
    /// Searches from one minute before the truncated minute and compares
    /// the prediction against it, so the boundary minute is matched without
    /// depending on sub-minute timer precision.
    pub fn fires_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let minute = truncate_to_minute(now);
        let look_back = minute.clone() - Duration::minutes(1);
        self.next_after(&look_back)
            .is_some_and(|next| truncate_to_minute(&next) == minute)
    }
}

impl fmt::Debug for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CronSchedule").field(&self.expression).finish()
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl PartialEq for CronSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or_else(|| dt.clone())
}

/// One `cron`-crate expression, or two when day-of-month and day-of-week
/// are both restricted.
fn normalize(expression: &str) -> Result<Vec<String>, CronError> {
    let trimmed = expression.trim();
    if trimmed.starts_with('@') {
        return Ok(vec![trimmed.to_string()]);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(CronError::FieldCount {
            expression: expression.to_string(),
            found: fields.len(),
        });
    }

    let weekdays = normalize_weekdays(fields[4]).ok_or_else(|| CronError::Weekday {
        expression: expression.to_string(),
        value: fields[4].to_string(),
    })?;

    let (minute, hour, dom, month) = (fields[0], fields[1], fields[2], fields[3]);
    let line = |dom: &str, dow: &str| format!("0 {} {} {} {} {}", minute, hour, dom, month, dow);

    if is_restricted(dom) && is_restricted(fields[4]) {
        return Ok(vec![line(dom, "*"), line("*", weekdays.as_str())]);
    }
    Ok(vec![line(dom, weekdays.as_str())])
}

/// Day fields not starting with `*` restrict the day
fn is_restricted(field: &str) -> bool {
    !field.starts_with('*') && field != "?"
}

/// Rewrite numeric weekdays (0-7, Sunday = 0 or 7) as names; the `cron`
/// crate numbers Sunday as 1.
fn normalize_weekdays(field: &str) -> Option<String> {
    let mut parts = Vec::new();

    for item in field.split(',') {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };

        let rewritten = match range.split_once('-') {
            Some((lo, hi)) => {
                let lo_name = weekday_name(lo)?;
                // "0-7" names Sunday twice and covers the whole week
                if lo == "0" && hi == "7" {
                    match step {
                        Some(step) => parts.push(format!("Sun-Sat/{}", step)),
                        None => parts.push("*".to_string()),
                    }
                    continue;
                }
                // "5-7" has to wrap through Sunday, which cron cannot express
                if hi == "7" && lo != "0" && lo != "7" {
                    if step.is_some() {
                        return None;
                    }
                    parts.push(format!("{}-Sat", lo_name));
                    parts.push("Sun".to_string());
                    continue;
                }
                format!("{}-{}", lo_name, weekday_name(hi)?)
            }
            None if range == "*" || range == "?" => range.to_string(),
            None => weekday_name(range)?,
        };

        match step {
            Some(step) => parts.push(format!("{}/{}", rewritten, step)),
            None => parts.push(rewritten),
        }
    }

    Some(parts.join(","))
}

fn weekday_name(token: &str) -> Option<String> {
    match token.parse::<usize>() {
        Ok(n) => WEEKDAYS.get(n).map(|name| name.to_string()),
        Err(_) if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic()) => {
            let mut chars = token.chars();
            let first = chars.next()?.to_ascii_uppercase();
            Some(std::iter::once(first).chain(chars.map(|c| c.to_ascii_lowercase())).collect())
        }
        Err(_) => None,
    }
}
