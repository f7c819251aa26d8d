//! List View Projection
//!
//! Pure helpers turning the task snapshot into what a page displays.

use crate::models::Task;

/// Completion filter used by the Active / Completed pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.done,
            Filter::Completed => task.done,
        }
    }
}

/// Search by case-insensitive substring, then open tasks before done ones.
/// The sort is stable so each group keeps its insertion order.
pub fn visible_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    let query = query.trim().to_lowercase();
    let mut visible: Vec<Task> = if query.is_empty() {
        tasks.to_vec()
    } else {
        tasks
            .iter()
            .filter(|t| t.text.to_lowercase().contains(&query))
            .cloned()
            .collect()
    };
    visible.sort_by_key(|t| t.done);
    visible
}

/// Tasks matching `filter`, in insertion order
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}
