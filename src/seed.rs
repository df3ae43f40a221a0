//! Built-in snapshot used when nothing has been stored yet.

use chrono::{DateTime, Utc};

use crate::model::{default_columns, Priority, Snapshot, Status, Task};
use crate::people;

struct SeedTask {
    id: &'static str,
    title: &'static str,
    status: Status,
    priority: Priority,
    due: &'static str,
    description: &'static str,
    assignee: &'static str,
}

const SEED_TASKS: [SeedTask; 6] = [
    SeedTask {
        id: "a1b2c3d4",
        title: "Design Landing Page",
        status: Status::InProgress,
        priority: Priority::High,
        due: "2024-11-25T18:30:00Z",
        description: "Finalize the landing page design for the new product launch. Include responsive features and ensure adherence to branding guidelines.",
        assignee: "1",
    },
    SeedTask {
        id: "e5f6g7h8",
        title: "Database Schema Review",
        status: Status::Todo,
        priority: Priority::Medium,
        due: "2024-11-30T18:30:00Z",
        description: "Review the proposed database schema for the analytics module and provide feedback.",
        assignee: "2",
    },
    SeedTask {
        id: "i9j0k1l2",
        title: "Prepare Quarterly Report",
        status: Status::Completed,
        priority: Priority::Low,
        due: "2024-11-15T18:30:00Z",
        description: "Compile all necessary data and prepare the quarterly report for stakeholders.",
        assignee: "4",
    },
    SeedTask {
        id: "m3n4o5p6",
        title: "Fix Bug in Login Module",
        status: Status::InProgress,
        priority: Priority::High,
        due: "2024-11-23T18:30:00Z",
        description: "Resolve the issue with user login not persisting session cookies on mobile devices.",
        assignee: "3",
    },
    SeedTask {
        id: "q7r8s9t0",
        title: "Team Meeting Agenda",
        status: Status::Todo,
        priority: Priority::Low,
        due: "2024-11-26T18:30:00Z",
        description: "Draft and share the agenda for the upcoming team meeting next week.",
        assignee: "4",
    },
    SeedTask {
        id: "u1v2w3x4",
        title: "Content Audit",
        status: Status::Todo,
        priority: Priority::Medium,
        due: "2024-11-28T18:30:00Z",
        description: "Audit the existing blog content to identify outdated posts and suggest updates.",
        assignee: "1",
    },
];

/// The example board: six tasks across the three standard columns.
pub fn default_snapshot() -> Snapshot {
    let tasks = SEED_TASKS
        .iter()
        .filter_map(|seed| {
            let due_date = DateTime::parse_from_rfc3339(seed.due)
                .ok()?
                .with_timezone(&Utc);
            Some(Task {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                status: seed.status,
                priority: seed.priority,
                due_date,
                description: seed.description.to_string(),
                assignee: people::resolve(seed.assignee)?,
            })
        })
        .collect();

    Snapshot {
        tasks,
        columns: default_columns(),
    }
}
