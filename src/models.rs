// Data models for the task list

use serde::{Deserialize, Serialize};

/// A single to-do record.
///
/// Serializes to the snapshot's wire form: fields `id` (int), `text`
/// (string), `name` (string), `completed` (bool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub text: String,
    pub name: String,
    pub completed: bool,
}

impl Task {
    /// True when `name` or `text` contains `term` as a case-insensitive
    /// substring. An empty term matches every task.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.text.to_lowercase().contains(&term) || self.name.to_lowercase().contains(&term)
    }
}
