//! Static assignee directory.

use crate::model::Assignee;

/// (id, name, avatar)
const PEOPLE: [(&str, &str, &str); 4] = [
    ("1", "John Doe", "https://i.pravatar.cc/150?img=3"),
    ("2", "Jane Smith", "https://i.pravatar.cc/150?img=2"),
    ("3", "Bob Johnson", "https://i.pravatar.cc/150?img=67"),
    ("4", "Alice Brown", "https://i.pravatar.cc/150?img=1"),
];

pub fn all() -> Vec<Assignee> {
    PEOPLE.iter().map(|entry| to_assignee(*entry)).collect()
}

/// Resolve an assignee by id, or by case-insensitive name.
pub fn resolve(key: &str) -> Option<Assignee> {
    let key = key.trim();
    PEOPLE
        .iter()
        .find(|(id, name, _)| *id == key || name.eq_ignore_ascii_case(key))
        .map(|entry| to_assignee(*entry))
}

fn to_assignee((id, name, avatar): (&str, &str, &str)) -> Assignee {
    Assignee {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
    }
}
