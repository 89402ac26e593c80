use planner_core::db::{open_db, open_db_in_memory};
use planner_core::store::planner_store::{quote_key, SETTINGS_KEY, STREAK_KEY, TASKS_KEY};
use planner_core::{
    quote_for, Accent, BgMode, DateKey, EditOutcome, KeyValueStore, PlannerService,
    ServiceError, Settings, SettingsPatch, SqliteKeyValueStore, StreakState, StreakUpdate,
    TaskListError,
};
use rusqlite::Connection;
use serde_json::json;

fn day(d: u32) -> DateKey {
    DateKey::from_ymd(2024, 1, d).unwrap()
}

fn service(conn: &Connection) -> PlannerService<SqliteKeyValueStore<'_>> {
    PlannerService::open(SqliteKeyValueStore::try_new(conn).unwrap()).unwrap()
}

fn stored_json(conn: &Connection, key: &str) -> serde_json::Value {
    let raw = SqliteKeyValueStore::try_new(conn)
        .unwrap()
        .get_item(key)
        .unwrap()
        .unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn add_toggle_toggle_scenario() {
    let conn = open_db_in_memory().unwrap();
    let mut planner = service(&conn);
    let today = day(6);

    assert_eq!(planner.progress_percent(), 0);
    let index = planner.add_task("Read chapter 3").unwrap().unwrap();
    assert_eq!(planner.tasks().len(), 1);
    assert!(!planner.tasks().get(index).unwrap().completed);
    assert_eq!(planner.progress_percent(), 0);

    let report = planner.toggle_task(index, today).unwrap();
    assert!(report.completed);
    assert_eq!(report.progress, 100);
    assert_eq!(
        planner.tasks().get(index).unwrap().completed_date,
        Some(today)
    );

    let report = planner.toggle_task(index, today).unwrap();
    assert!(!report.completed);
    assert_eq!(report.progress, 0);
    assert_eq!(planner.tasks().get(index).unwrap().completed_date, None);

    assert_eq!(
        stored_json(&conn, TASKS_KEY),
        json!([{"text": "Read chapter 3", "completed": false, "completedDate": null}])
    );
}

#[test]
fn blank_add_is_ignored_without_write() {
    let conn = open_db_in_memory().unwrap();
    let mut planner = service(&conn);

    assert_eq!(planner.add_task("   ").unwrap(), None);
    assert!(planner.tasks().is_empty());
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(kv.get_item(TASKS_KEY).unwrap(), None);
}

#[test]
fn every_mutation_writes_full_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let mut planner = service(&conn);

    planner.add_task("a").unwrap();
    planner.add_task("b").unwrap();
    planner.add_task("c").unwrap();
    planner.remove_task(1).unwrap();
    assert_eq!(
        planner.edit_task(0, "a2").unwrap(),
        EditOutcome::Updated
    );

    let stored = stored_json(&conn, TASKS_KEY);
    let texts: Vec<&str> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["a2", "c"]);

    assert!(matches!(
        planner.edit_task(1, "  ").unwrap(),
        EditOutcome::Removed(_)
    ));
    assert_eq!(stored_json(&conn, TASKS_KEY).as_array().unwrap().len(), 1);
}

#[test]
fn unknown_position_is_reported_and_state_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut planner = service(&conn);
    planner.add_task("only").unwrap();

    let err = planner.toggle_task(4, day(6)).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Task(TaskListError::NotFound { index: 4, len: 1 })
    ));
    assert!(planner.remove_task(1).is_err());
    assert_eq!(planner.tasks().completed_count(), 0);
}

#[test]
fn streak_continues_on_next_day_and_resets_after_gap() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
    kv.set_item(STREAK_KEY, r#"{"count":3,"lastDate":"2024-01-05"}"#)
        .unwrap();
    let mut planner = service(&conn);
    planner.add_task("essay").unwrap();

    let report = planner.toggle_task(0, day(6)).unwrap();
    assert!(report.streak.incremented());
    assert_eq!(planner.streak(), StreakState::new(4, Some(day(6))));
    assert_eq!(
        stored_json(&conn, STREAK_KEY),
        json!({"count": 4, "lastDate": "2024-01-06"})
    );

    // Gap of two days.
    planner.add_task("lab report").unwrap();
    planner.toggle_task(1, day(8)).unwrap();
    assert_eq!(planner.streak(), StreakState::new(1, Some(day(8))));
}

#[test]
fn streak_counts_once_per_day() {
    let conn = open_db_in_memory().unwrap();
    let mut planner = service(&conn);
    planner.add_task("a").unwrap();
    planner.add_task("b").unwrap();

    let first = planner.toggle_task(0, day(6)).unwrap();
    assert!(first.streak.incremented());
    let second = planner.toggle_task(1, day(6)).unwrap();
    assert_eq!(second.streak, StreakUpdate::Unchanged);
    assert_eq!(planner.evaluate_streak(day(6)).unwrap(), StreakUpdate::Unchanged);
    assert_eq!(planner.streak().count, 1);

    // Reopening today's tasks does not take the day back.
    planner.toggle_task(0, day(6)).unwrap();
    planner.toggle_task(1, day(6)).unwrap();
    assert_eq!(planner.streak().count, 1);
}

#[test]
fn reset_day_reopens_todays_completions_only() {
    let conn = open_db_in_memory().unwrap();
    let mut planner = service(&conn);
    planner.add_task("old").unwrap();
    planner.add_task("new").unwrap();
    planner.toggle_task(0, day(5)).unwrap();
    planner.toggle_task(1, day(6)).unwrap();

    assert_eq!(planner.reset_day(day(6)).unwrap(), 1);
    assert!(planner.tasks().get(0).unwrap().completed);
    assert!(!planner.tasks().get(1).unwrap().completed);
    assert_eq!(planner.progress_percent(), 50);
    assert_eq!(planner.streak().last_date, Some(day(6)));
}

#[test]
fn quote_is_cached_per_day_and_stable_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.sqlite3");
    let today = day(6);

    let first = {
        let conn = open_db(&path).unwrap();
        let planner = service(&conn);
        let quote = planner.quote_for(today).unwrap();
        assert_eq!(quote, quote_for(today));
        assert_eq!(planner.quote_for(today).unwrap(), quote);
        quote
    };

    let conn = open_db(&path).unwrap();
    assert_eq!(stored_json(&conn, &quote_key(today)), json!(first));
    let planner = service(&conn);
    assert_eq!(planner.quote_for(today).unwrap(), first);
}

#[test]
fn cached_quote_wins_over_recomputation() {
    let conn = open_db_in_memory().unwrap();
    let today = day(6);
    SqliteKeyValueStore::try_new(&conn)
        .unwrap()
        .set_item(&quote_key(today), "\"Written earlier.\"")
        .unwrap();

    let planner = service(&conn);
    assert_eq!(planner.quote_for(today).unwrap(), "Written earlier.");
}

#[test]
fn settings_patch_merges_onto_persisted_value() {
    let conn = open_db_in_memory().unwrap();
    SqliteKeyValueStore::try_new(&conn)
        .unwrap()
        .set_item(SETTINGS_KEY, r#"{"bgMode":"solid","accent":"teal"}"#)
        .unwrap();
    let mut planner = service(&conn);

    assert_eq!(planner.settings().bg_mode, BgMode::Solid);
    assert_eq!(planner.settings().accent, Accent::Blue);

    let patch = SettingsPatch {
        reduced_motion: Some(true),
        ..SettingsPatch::default()
    };
    let merged = planner.update_settings(&patch).unwrap();
    assert_eq!(
        merged,
        Settings {
            bg_mode: BgMode::Solid,
            reduced_motion: true,
            accent: Accent::Blue,
        }
    );
    assert_eq!(
        stored_json(&conn, SETTINGS_KEY),
        json!({"bgMode": "solid", "reducedMotion": true, "accent": "blue"})
    );

    let defaults = planner.reset_settings().unwrap();
    assert_eq!(defaults, Settings::default());
    assert_eq!(
        stored_json(&conn, SETTINGS_KEY),
        json!({"bgMode": "image", "reducedMotion": false, "accent": "blue"})
    );
}

#[test]
fn malformed_store_opens_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
    kv.set_item(TASKS_KEY, "[{\"text\": ").unwrap();
    kv.set_item(STREAK_KEY, "not json").unwrap();
    kv.set_item(SETTINGS_KEY, "{").unwrap();

    let mut planner = service(&conn);
    assert!(planner.tasks().is_empty());
    assert_eq!(planner.streak(), StreakState::default());
    assert_eq!(planner.settings(), Settings::default());

    // The next write replaces the broken blob.
    planner.add_task("fresh start").unwrap();
    assert_eq!(stored_json(&conn, TASKS_KEY).as_array().unwrap().len(), 1);
}

#[test]
fn legacy_task_entries_load() {
    let conn = open_db_in_memory().unwrap();
    SqliteKeyValueStore::try_new(&conn)
        .unwrap()
        .set_item(
            TASKS_KEY,
            r#"["plain string task", {"text": "done", "completed": true, "completedDate": "2024-01-06"}, {"text": "   "}]"#,
        )
        .unwrap();

    let planner = service(&conn);
    assert_eq!(planner.tasks().len(), 2);
    assert_eq!(planner.tasks().get(0).unwrap().text, "plain string task");
    assert!(planner.tasks().get(1).unwrap().is_done_on(day(6)));
    assert_eq!(planner.progress_percent(), 50);
}

#[test]
fn one_bad_task_entry_does_not_drop_its_siblings() {
    let conn = open_db_in_memory().unwrap();
    SqliteKeyValueStore::try_new(&conn)
        .unwrap()
        .set_item(
            TASKS_KEY,
            r#"[{"text": "essay", "completed": false, "completedDate": null},
                {"text": "lab", "completed": true, "completedDate": "2024-01-06"},
                {"text": "notes", "completedDate": 0}]"#,
        )
        .unwrap();

    let mut planner = service(&conn);
    assert_eq!(planner.tasks().len(), 3);
    assert!(planner.tasks().get(1).unwrap().is_done_on(day(6)));
    assert!(!planner.tasks().get(2).unwrap().completed);

    planner.add_task("new").unwrap();
    let stored = stored_json(&conn, TASKS_KEY);
    let texts: Vec<&str> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["essay", "lab", "notes", "new"]);
    assert_eq!(stored[1]["completedDate"], json!("2024-01-06"));

    let reopened = service(&conn);
    assert_eq!(reopened.tasks().len(), 4);
}

#[test]
fn null_task_entries_are_skipped_on_load() {
    let conn = open_db_in_memory().unwrap();
    SqliteKeyValueStore::try_new(&conn)
        .unwrap()
        .set_item(TASKS_KEY, r#"["essay", null, {"text": "lab"}]"#)
        .unwrap();

    let planner = service(&conn);
    let texts: Vec<&str> = planner.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["essay", "lab"]);
}
