// goal_lifecycle.rs: End-to-end test of a goal list across app restarts.
//
// Exercises the full flow against the file-backed store:
//
//   1. Write a config.toml choosing the oldest-first, completed-last policy
//   2. Open a store on an empty data dir
//   3. Add goals over two different days, ignore a blank one
//   4. Toggle one goal, flush, close
//   5. Reopen and check order, flags, dates, and display rows
//
// VERIFY:
//   - The on-disk blob is a JSON array with the four wire fields
//   - Ids survive the restart unchanged
//   - Re-sorting on toggle splits a date run and repeats its separator

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use dl_goal::{
    load_goals, AppConfig, DataPaths, DisplayRow, FileKeyValueStore, FixedClock, GoalStore,
    StoreOptions,
};

fn clock_on(day: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 6, day, 8, 0, 0).unwrap(),
    ))
}

#[tokio::test]
async fn goals_survive_restart_with_configured_policy() {
    let dir = tempdir().unwrap();
    let paths = DataPaths::for_data_dir(dir.path());
    std::fs::write(
        &paths.config_file,
        "date_format = \"%Y-%m-%d\"\n\n[ordering]\ninsertion = \"append\"\ncompleted_last = true\n",
    )
    .unwrap();

    let config = AppConfig::load(&paths.config_file).unwrap();
    let options = StoreOptions::from(&config);
    let backend = Arc::new(FileKeyValueStore::new(&paths.store_dir).unwrap());

    // Day one: two goals.
    let mut store = GoalStore::open_with_clock(backend.clone(), options.clone(), clock_on(1))
        .await
        .unwrap();
    assert!(store.is_empty());
    let stretch = store.add("Stretch").unwrap().id.clone();
    store.add("Read a chapter").unwrap();
    assert!(store.add("   ").is_none());
    store.close().await.unwrap();

    // Day two: one more goal, then finish the first one.
    let mut store = GoalStore::open_with_clock(backend.clone(), options.clone(), clock_on(2))
        .await
        .unwrap();
    assert_eq!(store.len(), 2);
    store.add("Run 5k").unwrap();
    assert_eq!(store.toggle_completion(&stretch), Some(true));
    store.close().await.unwrap();

    // The raw blob uses the documented wire format.
    let raw = std::fs::read_to_string(backend.key_path("goals")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &json.as_array().unwrap()[0];
    for field in ["id", "text", "completed", "date"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }

    // Restart once more and inspect everything.
    let store = GoalStore::open_with_clock(backend.clone(), options, clock_on(3))
        .await
        .unwrap();
    let texts: Vec<&str> = store.goals().iter().map(|g| g.text.as_str()).collect();
    assert_eq!(texts, vec!["Read a chapter", "Run 5k", "Stretch"]);
    assert!(store.get(&stretch).unwrap().completed);

    let dates: Vec<&str> = store
        .display_rows()
        .iter()
        .filter_map(|row| match row {
            DisplayRow::DateSeparator { date } => Some(*date),
            DisplayRow::Goal { .. } => None,
        })
        .collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-02", "2025-06-01"]);

    let loaded = load_goals(backend.as_ref(), "goals").await.unwrap();
    assert_eq!(loaded, store.goals());
}

#[tokio::test]
async fn default_config_keeps_newest_first() {
    let dir = tempdir().unwrap();
    let paths = DataPaths::for_data_dir(dir.path());
    let config = AppConfig::load_or_default(&paths.config_file);
    let backend = Arc::new(FileKeyValueStore::new(&paths.store_dir).unwrap());

    let mut store = GoalStore::open_with_clock(backend.clone(), StoreOptions::from(&config), clock_on(1))
        .await
        .unwrap();
    store.add("Oldest");
    store.add("Newest");
    store.close().await.unwrap();

    let loaded = load_goals(backend.as_ref(), &config.storage_key).await.unwrap();
    let texts: Vec<&str> = loaded.iter().map(|g| g.text.as_str()).collect();
    assert_eq!(texts, vec!["Newest", "Oldest"]);
    assert_eq!(loaded[0].date, "01/06/2025");
}
