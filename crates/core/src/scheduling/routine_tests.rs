// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};

fn config(name: &str) -> RoutineConfig {
    RoutineConfig {
        name: name.to_string(),
        schedule: "0 8 * * 1-5".to_string(),
        prompt: "Time for the daily brief.".to_string(),
        channel: Some("general".to_string()),
        enabled: true,
    }
}

#[test]
fn registry_preserves_declaration_order() {
    let registry =
        RoutineRegistry::from_configs(vec![config("b"), config("a"), config("c")]).unwrap();
    assert_eq!(registry.names(), vec!["b", "a", "c"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn duplicate_names_are_rejected() {
    let err = RoutineRegistry::from_configs(vec![config("brief"), config("brief")]).unwrap_err();
    assert_eq!(err, RoutineError::Duplicate("brief".to_string()));
}

#[test]
fn unknown_routine_lists_available_names() {
    let registry = RoutineRegistry::from_configs(vec![config("morning"), config("evening")]).unwrap();
    let err = registry.get("noon").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown routine: noon (available: morning, evening)"
    );
}

#[test]
fn enabled_filters_disabled_routines() {
    let mut off = config("off");
    off.enabled = false;
    let registry = RoutineRegistry::from_configs(vec![config("on"), off]).unwrap();

    let enabled: Vec<&str> = registry.enabled().map(|r| r.name.as_str()).collect();
    assert_eq!(enabled, vec!["on"]);
    assert!(registry.get("off").is_ok());
}

#[test]
fn bad_schedule_names_the_routine() {
    let mut bad = config("broken");
    bad.schedule = "every morning".to_string();
    let err = Routine::from_config(bad).unwrap_err();
    assert!(matches!(err, RoutineError::Schedule { ref name, .. } if name == "broken"));
}

#[test]
fn bad_template_is_rejected_at_load() {
    let mut bad = config("broken");
    bad.prompt = "Hello {{ unclosed".to_string();
    assert!(matches!(
        Routine::from_config(bad),
        Err(RoutineError::Template { .. })
    ));
}

#[test]
fn routines_deserialize_with_defaults() {
    #[derive(serde::Deserialize)]
    struct File {
        routines: Vec<RoutineConfig>,
    }
    let file: File = toml::from_str(
        r#"
[[routines]]
name = "weekly_review"
schedule = "0 17 * * 5"
prompt = "It's Friday."
"#,
    )
    .unwrap();

    assert_eq!(file.routines.len(), 1);
    assert!(file.routines[0].enabled);
    assert!(file.routines[0].channel.is_none());
}

#[test]
fn prompt_has_time_header_then_body() {
    let routine = Routine::from_config(config("morning")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();

    let prompt = render_prompt(&routine, &now).unwrap();

    assert_eq!(
        prompt,
        "Current time: Monday, March 02, 2026 08:00 AM\n\nTime for the daily brief."
    );
}

#[test]
fn prompt_template_sees_routine_context() {
    let mut cfg = config("evening");
    cfg.prompt = "{{ routine }} for {{ weekday }} {{ date }} in #{{ channel }}".to_string();
    let routine = Routine::from_config(cfg).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 6, 18, 0, 0).unwrap();

    let prompt = render_prompt(&routine, &now).unwrap();

    assert!(prompt.ends_with("evening for Friday 2026-03-06 in #general"));
    assert!(prompt.starts_with("Current time: Friday, March 06, 2026 06:00 PM"));
}
