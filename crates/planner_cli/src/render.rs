//! Plain-text rendering of planner state.

use planner_core::{DateKey, Settings, StreakState, TaskList, ToggleReport};

pub fn task_list(tasks: &TaskList, today: DateKey) -> String {
    if tasks.is_empty() {
        return format!("No tasks yet.\n{}", progress(0));
    }
    let mut out = String::new();
    for (index, task) in tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        out.push_str(&format!("{:>3}. [{mark}] {}", index + 1, task.text));
        if task.is_done_on(today) {
            out.push_str("  (done today)");
        }
        out.push('\n');
    }
    out.push_str(&progress(tasks.progress_percent()));
    out
}

pub fn progress(percent: u8) -> String {
    format!("{percent}% complete")
}

pub fn streak(state: &StreakState) -> String {
    let days = if state.count == 1 { "day" } else { "days" };
    match state.last_date {
        Some(last) => format!("Streak: {} {days} (last completion {last})", state.count),
        None => format!("Streak: {} {days}", state.count),
    }
}

pub fn toggle(
    report: &ToggleReport,
    text: &str,
    streak_state: &StreakState,
    settings: &Settings,
) -> String {
    let verb = if report.completed { "Completed" } else { "Reopened" };
    let mut out = format!("{verb}: {text}\n{}", progress(report.progress));
    if report.streak.incremented() {
        out.push('\n');
        if report.streak.should_animate(settings) {
            out.push_str("*** Streak up! ***\n");
        }
        out.push_str(&streak(streak_state));
    }
    out
}

pub fn quote(text: &str) -> String {
    format!("\"{text}\"")
}

pub fn settings(settings: &Settings) -> String {
    format!(
        "bg-mode: {}\nreduced-motion: {}\naccent: {}",
        settings.bg_mode.as_str(),
        settings.reduced_motion,
        settings.accent.as_str()
    )
}
