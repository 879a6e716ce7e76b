//! Completion metrics shown on the dashboard.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;

use crate::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Productivity {
    pub on_time: usize,
    pub late: usize,
    pub total: usize,
    pub on_time_percentage: f64,
}

pub fn count_by_status(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: tasks.len(),
        ..Default::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Overdue => counts.overdue += 1,
            TaskStatus::Done => counts.done += 1,
        }
    }
    counts
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Share of all tasks completed on the same calendar day as `now`.
pub fn completed_today_percentage(tasks: &[Task], now: DateTime<Utc>) -> f64 {
    let today = now.date_naive();
    let completed_today = tasks
        .iter()
        .filter_map(|t| t.completed_at)
        .filter(|completed| completed.date_naive() == today)
        .count();
    percentage(completed_today, tasks.len())
}

/// Share of all tasks completed since the start of the week (Sunday 00:00).
pub fn completed_this_week_percentage(tasks: &[Task], now: DateTime<Utc>) -> f64 {
    let days_since_sunday = i64::from(now.weekday().num_days_from_sunday());
    let start_of_week = (now.date_naive() - Duration::days(days_since_sunday))
        .and_time(NaiveTime::MIN)
        .and_utc();
    let completed = tasks
        .iter()
        .filter_map(|t| t.completed_at)
        .filter(|completed| *completed >= start_of_week)
        .count();
    percentage(completed, tasks.len())
}

/// Mean days from creation to completion over done tasks, one decimal.
pub fn average_completion_days(tasks: &[Task]) -> f64 {
    let durations: Vec<i64> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .filter_map(|t| t.completed_at.map(|c| (c - t.created_at).num_milliseconds()))
        .collect();

    if durations.is_empty() {
        return 0.0;
    }

    let avg_ms = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
    let avg_days = avg_ms / (1000.0 * 60.0 * 60.0 * 24.0);
    (avg_days * 10.0).round() / 10.0
}

/// Done tasks split by whether they met their deadline.
pub fn productivity(tasks: &[Task]) -> Productivity {
    let (on_time, late) = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .filter_map(|t| t.completed_at.map(|c| c <= t.expected_completion_at))
        .fold((0, 0), |(on_time, late), met| {
            if met {
                (on_time + 1, late)
            } else {
                (on_time, late + 1)
            }
        });

    Productivity {
        on_time,
        late,
        total: on_time + late,
        on_time_percentage: percentage(on_time, on_time + late),
    }
}
