// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prompt construction for routine triggers

use super::routine::{Routine, RoutineError};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Header prepended to every routine prompt
pub fn time_context<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("Current time: {}\n\n", now.format("%A, %B %d, %Y %I:%M %p"))
}

/// Time header followed by the rendered routine template.
///
/// Templates may reference `routine`, `channel`, `date`, `time` and
/// `weekday`; plain text passes through unchanged.
pub fn render_prompt<Tz: TimeZone>(
    routine: &Routine,
    now: &DateTime<Tz>,
) -> Result<String, RoutineError>
where
    Tz::Offset: Display,
{
    let env = minijinja::Environment::new();
    let body = env
        .render_str(
            &routine.prompt,
            minijinja::context! {
                routine => routine.name.as_str(),
                channel => routine.channel.as_deref().unwrap_or_default(),
                date => now.format("%Y-%m-%d").to_string(),
                time => now.format("%H:%M").to_string(),
                weekday => now.format("%A").to_string(),
            },
        )
        .map_err(|e| RoutineError::Template {
            name: routine.name.clone(),
            message: e.to_string(),
        })?;

    Ok(format!("{}{}", time_context(now), body))
}
