mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestBoard;

#[test]
fn fresh_board_shows_seed_without_writing() {
    let board = TestBoard::new();

    let out = board.json(&["board"]);
    assert_eq!(out["schema_version"], "taskboard.v1");
    assert_eq!(out["command"], "board");
    assert_eq!(out["status"], "success");

    assert_eq!(
        board.column_ids("todo"),
        vec!["e5f6g7h8", "q7r8s9t0", "u1v2w3x4"]
    );
    assert_eq!(board.column_ids("inProgress"), vec!["a1b2c3d4", "m3n4o5p6"]);
    assert_eq!(board.column_ids("completed"), vec!["i9j0k1l2"]);
    assert!(!board.snapshot_path().exists());
}

#[test]
fn human_board_lists_columns() {
    let board = TestBoard::new();
    board
        .cmd()
        .arg("board")
        .assert()
        .success()
        .stdout(contains("Todo (3)"))
        .stdout(contains("In Progress (2)"))
        .stdout(contains("Design Landing Page"));
}

#[test]
fn init_writes_snapshot_and_refuses_overwrite() {
    let board = TestBoard::new();

    let out = board.json(&["init"]);
    assert_eq!(out["data"]["tasks"], 6);
    assert_eq!(out["data"]["created"]["config"], true);
    assert!(board.snapshot_path().exists());
    assert!(board.path().join("taskboard.toml").exists());

    board
        .cmd()
        .arg("init")
        .assert()
        .code(2)
        .stderr(contains("--force"));

    board.cmd().args(["init", "--force"]).assert().success();
}

#[test]
fn cross_column_move_persists_status_and_order() {
    let board = TestBoard::new();

    let out = board.json(&["move", "a1b2c3d4", "--to", "todo", "--index", "1"]);
    assert_eq!(out["data"]["moved"], true);
    assert_eq!(out["data"]["column"], "todo");
    assert_eq!(out["data"]["index"], 1);

    assert_eq!(
        board.column_ids("todo"),
        vec!["e5f6g7h8", "a1b2c3d4", "q7r8s9t0", "u1v2w3x4"]
    );
    assert_eq!(board.column_ids("inProgress"), vec!["m3n4o5p6"]);

    let show = board.json(&["show", "a1b2c3d4"]);
    assert_eq!(show["data"]["task"]["status"], "Todo");

    let stored: Value =
        serde_json::from_str(&std::fs::read_to_string(board.snapshot_path()).unwrap()).unwrap();
    let task = stored["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|task| task["id"] == "a1b2c3d4")
        .unwrap();
    assert_eq!(task["status"], "Todo");
    assert!(task["dueDate"].is_string());
}

#[test]
fn same_column_move_keeps_drag_order() {
    let board = TestBoard::new();

    board
        .cmd()
        .args(["move", "u1v2w3x4", "--to", "todo", "--index", "0"])
        .assert()
        .success();

    assert_eq!(
        board.column_ids("todo"),
        vec!["u1v2w3x4", "e5f6g7h8", "q7r8s9t0"]
    );
}

#[test]
fn same_column_drop_at_length_lands_at_tail() {
    let board = TestBoard::new();

    let out = board.json(&["move", "e5f6g7h8", "--to", "todo", "--index", "3"]);
    assert_eq!(out["status"], "success");
    assert_eq!(out["data"]["index"], 2);
    assert_eq!(
        board.column_ids("todo"),
        vec!["q7r8s9t0", "u1v2w3x4", "e5f6g7h8"]
    );

    board
        .cmd()
        .args(["move", "e5f6g7h8", "--to", "todo", "--index", "4"])
        .assert()
        .code(2)
        .stderr(contains("Invalid move"));
}

#[test]
fn move_in_place_is_a_no_op() {
    let board = TestBoard::new();

    let out = board.json(&["move", "q7r8s9t0", "--to", "todo", "--index", "1"]);
    assert_eq!(out["data"]["moved"], false);
    assert!(!board.snapshot_path().exists());
}

#[test]
fn move_rejects_bad_targets() {
    let board = TestBoard::new();

    board
        .cmd()
        .args(["move", "a1b2c3d4", "--to", "archive"])
        .assert()
        .code(2)
        .stderr(contains("Column not found"));

    board
        .cmd()
        .args(["move", "a1b2c3d4", "--to", "completed", "--index", "5"])
        .assert()
        .code(2)
        .stderr(contains("Invalid move"));

    let out = board.json(&["move", "zzz", "--to", "todo"]);
    assert_eq!(out["status"], "error");
    assert_eq!(out["error"]["kind"], "not_found");
    assert_eq!(out["error"]["code"], 2);
    assert_eq!(out["error"]["hint"], "taskboard board");
}

#[test]
fn add_appends_to_column() {
    let board = TestBoard::new();

    let out = board.json(&[
        "add",
        "--column",
        "inProgress",
        "--title",
        "Write release notes",
        "--priority",
        "medium",
        "--due",
        "2024-12-01",
        "--assignee",
        "Jane Smith",
    ]);
    assert_eq!(out["status"], "success");
    assert_eq!(out["data"]["persisted"], true);
    let id = out["data"]["task"]["id"].as_str().unwrap().to_string();
    assert_eq!(out["data"]["task"]["status"], "In Progress");
    assert_eq!(out["data"]["task"]["assignee"]["id"], "2");

    let ids = board.column_ids("inProgress");
    assert_eq!(ids.last(), Some(&id));
    assert_eq!(ids.len(), 3);
}

#[test]
fn add_reports_every_invalid_field() {
    let board = TestBoard::new();

    let out = board.json(&["add", "--title", "x"]);
    assert_eq!(out["status"], "error");
    assert_eq!(out["error"]["kind"], "validation");
    let fields: Vec<&str> = out["error"]["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|field| field["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "priority", "dueDate", "assignee"]);
    assert!(!board.snapshot_path().exists());
}

#[test]
fn edit_status_moves_task() {
    let board = TestBoard::new();

    let out = board.json(&["edit", "e5f6g7h8", "--status", "completed", "--title", "Schema sign-off"]);
    assert_eq!(out["data"]["applied"], true);
    assert_eq!(out["data"]["task"]["title"], "Schema sign-off");

    assert_eq!(board.column_ids("todo"), vec!["q7r8s9t0", "u1v2w3x4"]);
    assert!(board.column_ids("completed").contains(&"e5f6g7h8".to_string()));
}

#[test]
fn edit_and_delete_of_unknown_task_change_nothing() {
    let board = TestBoard::new();

    let out = board.json(&["edit", "nope", "--title", "Anything"]);
    assert_eq!(out["status"], "success");
    assert_eq!(out["data"]["applied"], false);

    board
        .cmd()
        .args(["delete", "nope", "--yes"])
        .assert()
        .success()
        .stdout(contains("no change"));

    assert!(!board.snapshot_path().exists());
}

#[test]
fn delete_requires_confirmation() {
    let board = TestBoard::new();

    board
        .cmd()
        .args(["delete", "a1b2c3d4"])
        .assert()
        .code(2)
        .stderr(contains("--yes"));
    assert_eq!(board.column_ids("inProgress").len(), 2);

    board
        .cmd()
        .args(["delete", "a1b2c3d4", "--yes"])
        .assert()
        .success();
    assert_eq!(board.column_ids("inProgress"), vec!["m3n4o5p6"]);

    board.cmd().args(["show", "a1b2c3d4"]).assert().code(2);
}

#[test]
fn config_can_disable_seed_and_rename_snapshot() {
    let board = TestBoard::new();
    board
        .write_config("[storage]\nkey = \"work\"\n\n[board]\nseed_when_empty = false\n")
        .unwrap();

    assert!(board.column_ids("todo").is_empty());

    board
        .cmd()
        .args([
            "add",
            "--title",
            "First task",
            "--priority",
            "High",
            "--due",
            "2025-01-10",
            "--assignee",
            "3",
        ])
        .assert()
        .success();

    assert!(board.path().join("work.json").exists());
    assert!(!board.snapshot_path().exists());
    assert_eq!(board.column_ids("todo").len(), 1);
}

#[test]
fn corrupt_snapshot_falls_back_to_seed() {
    let board = TestBoard::new();
    std::fs::write(board.snapshot_path(), "{not json").unwrap();

    assert_eq!(board.column_ids("completed"), vec!["i9j0k1l2"]);
}
