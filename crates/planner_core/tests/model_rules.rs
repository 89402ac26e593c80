use planner_core::{evaluate_streak, quote_for, DateKey, StreakState, TaskList, QUOTES};

fn date(key: &str) -> DateKey {
    key.parse().unwrap()
}

fn completed_on(key: &str) -> TaskList {
    let mut list = TaskList::new();
    list.add("problem set");
    list.toggle_complete(0, date(key)).unwrap();
    list
}

#[test]
fn progress_matches_rounded_ratio_for_all_small_lists() {
    for total in 1..=12usize {
        for done in 0..=total {
            let mut list = TaskList::new();
            for i in 0..total {
                list.add(&format!("task {i}"));
            }
            for i in 0..done {
                list.toggle_complete(i, date("2024-03-01")).unwrap();
            }
            let expected = (100.0 * done as f64 / total as f64).round() as u8;
            assert_eq!(list.progress_percent(), expected, "{done}/{total}");
        }
    }
    assert_eq!(TaskList::new().progress_percent(), 0);
}

#[test]
fn double_toggle_restores_original_state() {
    let mut list = TaskList::new();
    list.add("flashcards");
    let before = list.get(0).unwrap().clone();

    list.toggle_complete(0, date("2024-03-01")).unwrap();
    list.toggle_complete(0, date("2024-03-01")).unwrap();
    assert_eq!(list.get(0).unwrap(), &before);

    let mut done = completed_on("2024-03-01");
    let before = done.get(0).unwrap().clone();
    done.toggle_complete(0, date("2024-03-02")).unwrap();
    done.toggle_complete(0, date("2024-03-01")).unwrap();
    assert_eq!(done.get(0).unwrap(), &before);
}

#[test]
fn consecutive_day_increments_and_gap_resets() {
    let state = StreakState::new(3, Some(date("2024-01-05")));

    let next = evaluate_streak(&state, &completed_on("2024-01-06"), date("2024-01-06"));
    assert_eq!(
        next.new_state(),
        Some(StreakState::new(4, Some(date("2024-01-06"))))
    );

    let gap = evaluate_streak(&state, &completed_on("2024-01-08"), date("2024-01-08"));
    assert_eq!(
        gap.new_state(),
        Some(StreakState::new(1, Some(date("2024-01-08"))))
    );
}

#[test]
fn evaluation_is_idempotent_within_a_day() {
    let tasks = completed_on("2024-01-06");
    let start = StreakState::new(3, Some(date("2024-01-05")));

    let first = evaluate_streak(&start, &tasks, date("2024-01-06"))
        .new_state()
        .unwrap();
    let second = evaluate_streak(&first, &tasks, date("2024-01-06"));
    assert_eq!(second.new_state(), None);
    assert_eq!(first.count, 4);
}

#[test]
fn streak_runs_across_month_boundary() {
    let mut state = StreakState::default();
    let mut day = date("2024-02-27");
    for expected in 1..=5u32 {
        let key = day.to_string();
        state = evaluate_streak(&state, &completed_on(&key), day)
            .new_state()
            .unwrap();
        assert_eq!(state.count, expected);
        day = day.next_day();
    }
    assert_eq!(state.last_date, Some(date("2024-03-02")));
}

#[test]
fn quote_is_a_shipped_entry_and_repeatable() {
    let today = date("2024-09-01");
    let quote = quote_for(today);
    assert!(QUOTES.contains(&quote));
    assert_eq!(quote_for(today), quote);
}
