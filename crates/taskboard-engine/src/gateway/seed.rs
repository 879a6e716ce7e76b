//! Data served by the simulated backend.

use chrono::{DateTime, TimeZone, Utc};
use taskboard_domain::{Column, Task, TaskStatus, User};

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    on(2025, month, day, hour)
}

fn on(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new(1, "To Do", TaskStatus::Todo).with_limit(5),
        Column::new(2, "In Progress", TaskStatus::InProgress).with_limit(3),
        Column::new(3, "Overdue", TaskStatus::Overdue),
        Column::new(4, "Done", TaskStatus::Done),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        user(1, "João Silva", "joao.silva@example.com"),
        user(2, "Maria Santos", "maria.santos@example.com"),
        user(3, "Pedro Oliveira", "pedro.oliveira@example.com"),
        user(4, "Ana Costa", "ana.costa@example.com"),
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Set up CI pipeline".to_string(),
            description: "Build and test on every push".to_string(),
            status: TaskStatus::Done,
            created_at: at(1, 6, 9),
            expected_completion_at: at(1, 10, 18),
            completed_at: Some(at(1, 9, 16)),
            column_id: 4,
            responsible_user_id: 1,
        },
        Task {
            id: 2,
            title: "Fix login bug".to_string(),
            description: "Session expires right after sign in".to_string(),
            status: TaskStatus::InProgress,
            created_at: at(1, 8, 10),
            expected_completion_at: on(2030, 12, 20, 18),
            completed_at: None,
            column_id: 2,
            responsible_user_id: 2,
        },
        Task {
            id: 3,
            title: "Design dashboard".to_string(),
            description: "Completion metrics and productivity chart".to_string(),
            status: TaskStatus::Todo,
            created_at: at(1, 9, 14),
            expected_completion_at: on(2030, 12, 31, 18),
            completed_at: None,
            column_id: 1,
            responsible_user_id: 3,
        },
        Task {
            id: 4,
            title: "Write API docs".to_string(),
            description: "Document the task endpoints".to_string(),
            status: TaskStatus::Todo,
            created_at: at(1, 12, 11),
            expected_completion_at: on(2030, 12, 15, 18),
            completed_at: None,
            column_id: 1,
            responsible_user_id: 4,
        },
        Task {
            id: 5,
            title: "Migrate user table".to_string(),
            description: "Add the email column and backfill it".to_string(),
            status: TaskStatus::Overdue,
            created_at: at(1, 2, 8),
            expected_completion_at: at(1, 5, 18),
            completed_at: None,
            column_id: 3,
            responsible_user_id: 1,
        },
        Task {
            id: 6,
            title: "Release 1.0".to_string(),
            description: "Tag, changelog and announcement".to_string(),
            status: TaskStatus::Done,
            created_at: at(1, 3, 9),
            expected_completion_at: at(1, 7, 18),
            completed_at: Some(at(1, 8, 12)),
            column_id: 4,
            responsible_user_id: 2,
        },
    ]
}

fn user(id: u32, name: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}
