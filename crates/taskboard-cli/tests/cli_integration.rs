use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::tempdir;

fn taskboard(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.env_remove("TASKBOARD_DATA_DIR")
        .env_remove("TASKBOARD_DEBUG_LOG")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--fast");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn run(data_dir: &Path, args: &[&str]) -> Value {
    let output = taskboard(data_dir)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json_output(&output);
    assert!(json["success"].as_bool().unwrap());
    json
}

fn column_ids(json: &Value) -> Vec<u64> {
    json["data"]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect()
}

fn task_status(data_dir: &Path, id: u64) -> String {
    let json = run(data_dir, &["tasks", "--per-page", "50"]);
    json["data"]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"].as_u64() == Some(id))
        .map(|t| t["status"].as_str().unwrap().to_string())
        .unwrap()
}

mod board_tests {
    use super::*;

    #[test]
    fn test_board_shows_every_column() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["board"]);

        let columns = json["data"]["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0]["column"]["title"], "To Do");
        assert_eq!(columns[0]["column"]["type"], "todo");
        assert_eq!(columns[0]["total_count"], 2);
    }

    #[test]
    fn test_board_search_narrows_tasks() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["board", "--search", "BUG"]);

        let titles: Vec<&str> = json["data"]["columns"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|c| c["tasks"].as_array().unwrap())
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Fix login bug"]);
    }

    #[test]
    fn test_tasks_paginates() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["tasks", "--per-page", "2", "--page", "2"]);

        assert_eq!(json["data"]["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["total_pages"], 3);
        assert_eq!(json["data"]["total_matching"], 6);
    }

    #[test]
    fn test_tasks_filtered_by_status() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["tasks", "--status", "done"]);

        assert_eq!(json["data"]["total_matching"], 2);
        assert!(json["data"]["filters_active"].as_bool().unwrap());
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args(["tasks", "--status", "blocked"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown status"));
    }
}

mod drag_tests {
    use super::*;

    #[test]
    fn test_move_task_to_done_column_completes_it() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["move-task", "--task", "3", "--to-column", "4"]);

        assert_eq!(json["data"]["task"]["status"], "done");
        assert_eq!(json["data"]["task"]["columnId"], 4);
        assert!(json["data"]["task"]["completedAt"].is_string());
        assert_eq!(json["data"]["generation"], 1);
        assert!(json["data"]["notifications"].as_array().unwrap().is_empty());

        assert_eq!(task_status(dir.path(), 3), "done");
    }

    #[test]
    fn test_move_task_over_task_takes_its_column() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["move-task", "--task", "3", "--over-task", "2"]);

        assert_eq!(json["data"]["task"]["status"], "in_progress");
        assert_eq!(json["data"]["task"]["columnId"], 2);
    }

    #[test]
    fn test_failed_move_is_reverted() {
        let dir = tempdir().unwrap();
        let json = run(
            dir.path(),
            &["move-task", "--task", "3", "--to-column", "4", "--fail"],
        );

        assert_eq!(json["data"]["task"]["status"], "todo");
        let notifications = json["data"]["notifications"].as_array().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["level"], "error");
        assert_eq!(
            notifications[0]["message"],
            "Failed to move task. Changes will be reverted."
        );

        assert_eq!(task_status(dir.path(), 3), "todo");
    }

    #[test]
    fn test_move_unknown_task_fails() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args(["move-task", "--task", "404", "--to-column", "4"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("Task 404 not found"));
    }

    #[test]
    fn test_move_task_needs_a_target() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args(["move-task", "--task", "3"])
            .assert()
            .failure();
    }

    #[test]
    fn test_move_column_persists_order() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["move-column", "--column", "1", "--over", "3"]);
        assert_eq!(column_ids(&json), vec![2, 3, 1, 4]);

        let board = run(dir.path(), &["board"]);
        let order: Vec<u64> = board["data"]["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["column"]["id"].as_u64().unwrap())
            .collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }
}

mod task_tests {
    use super::*;

    #[test]
    fn test_add_task_gets_next_id() {
        let dir = tempdir().unwrap();
        let json = run(
            dir.path(),
            &["add-task", "--title", "Plan sprint", "--column", "1", "--user", "2"],
        );

        assert_eq!(json["data"]["id"], 7);
        assert_eq!(json["data"]["status"], "todo");

        let second = run(
            dir.path(),
            &["add-task", "--title", "Retro", "--column", "2", "--user", "1"],
        );
        assert_eq!(second["data"]["id"], 8);
        assert_eq!(second["data"]["status"], "in_progress");
    }

    #[test]
    fn test_add_task_into_unknown_column_fails() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args(["add-task", "--title", "Lost", "--column", "99", "--user", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));
    }

    #[test]
    fn test_edit_task_into_done_column() {
        let dir = tempdir().unwrap();
        let json = run(
            dir.path(),
            &["edit-task", "--id", "4", "--title", "Write REST docs", "--column", "4"],
        );

        assert_eq!(json["data"]["title"], "Write REST docs");
        assert_eq!(json["data"]["status"], "done");
        assert_eq!(json["data"]["description"], "Document the task endpoints");
        assert_eq!(task_status(dir.path(), 4), "done");
    }

    #[test]
    fn test_sweep_overdue_moves_late_task() {
        let dir = tempdir().unwrap();
        let created = run(
            dir.path(),
            &[
                "add-task",
                "--title",
                "Late",
                "--column",
                "1",
                "--user",
                "1",
                "--due",
                "2020-01-01T00:00:00Z",
            ],
        );
        let id = created["data"]["id"].as_u64().unwrap();

        let json = run(dir.path(), &["sweep-overdue"]);
        assert_eq!(json["data"]["moved"], 1);
        assert_eq!(task_status(dir.path(), id), "overdue");

        let again = run(dir.path(), &["sweep-overdue"]);
        assert_eq!(again["data"]["moved"], 0);
    }

    #[test]
    fn test_dashboard_counts_seed_board() {
        let dir = tempdir().unwrap();
        let json = run(dir.path(), &["dashboard"]);

        assert_eq!(json["data"]["counts"]["total"], 6);
        assert_eq!(json["data"]["counts"]["done"], 2);
        assert_eq!(json["data"]["productivity"]["total"], 2);
    }
}

mod user_tests {
    use super::*;

    #[test]
    fn test_add_user_then_list() {
        let dir = tempdir().unwrap();
        let json = run(
            dir.path(),
            &["add-user", "--name", "Rita Lima", "--email", "rita.lima@example.com"],
        );
        assert_eq!(json["data"]["id"], 5);

        let users = run(dir.path(), &["users"]);
        assert_eq!(users["data"]["count"], 5);
        assert_eq!(users["data"]["items"][4]["name"], "Rita Lima");
    }
}

#[test]
fn test_completions_bash() {
    let dir = tempdir().unwrap();
    taskboard(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskboard"));
}
