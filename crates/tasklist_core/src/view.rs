use crate::model::{Filter, Task};

pub const EMPTY_ALL_MESSAGE: &str = "No tasks yet. Add one above!";
pub const EMPTY_FILTERED_MESSAGE: &str = "No tasks in this filter.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub active_count: usize,
}

/// One displayable row. Plain data only; whatever binds this to a screen
/// decides markup, icons and layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub rows: Vec<TaskRow>,
    pub items_left: String,
    pub empty_message: Option<&'static str>,
}

/// Order-preserving projection of the collection through the filter.
pub fn visible_tasks(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

pub fn summary(tasks: &[Task]) -> Summary {
    Summary {
        active_count: tasks.iter().filter(|task| !task.completed).count(),
    }
}

pub fn items_left_label(active_count: usize) -> String {
    if active_count == 1 {
        "1 item left".to_string()
    } else {
        format!("{active_count} items left")
    }
}

/// Projects the full view: filtered rows, the items-left line, and the
/// empty-state message when nothing is visible. The message distinguishes
/// a genuinely empty list from a filter that narrowed everything away.
pub fn project(tasks: &[Task], filter: Filter, editing: Option<&str>) -> ViewModel {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .map(|task| TaskRow {
            id: task.id.clone(),
            text: task.text.clone(),
            completed: task.completed,
            created_at: task.created_at.clone(),
            editing: editing == Some(task.id.as_str()),
        })
        .collect();

    let empty_message = if rows.is_empty() {
        if matches!(filter, Filter::All) {
            Some(EMPTY_ALL_MESSAGE)
        } else {
            Some(EMPTY_FILTERED_MESSAGE)
        }
    } else {
        None
    };

    ViewModel {
        rows,
        items_left: items_left_label(summary(tasks).active_count),
        empty_message,
    }
}
