use crate::model::Task;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Mutations over the in-memory collection. Each function either applies
/// exactly one change and returns a clone of the affected task, or leaves
/// the collection untouched and returns `None`. Blank input and stale ids
/// are deliberate no-ops, not errors; persistence is the caller's job and
/// should happen only when a change was reported.

/// Trims `raw_text` and prepends a fresh task (most-recent-first order).
/// Whitespace-only input leaves the collection unchanged.
pub fn add_task(tasks: &mut Vec<Task>, raw_text: &str) -> Option<Task> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    let task = Task {
        id: format!("task-{}", Uuid::new_v4()),
        text: trimmed.to_string(),
        completed: false,
        created_at,
    };

    tasks.insert(0, task.clone());
    Some(task)
}

/// Flips the completion flag of the task with `id`, if present.
pub fn toggle_task(tasks: &mut [Task], id: &str) -> Option<Task> {
    for task in tasks.iter_mut() {
        if task.id == id {
            task.completed = !task.completed;
            return Some(task.clone());
        }
    }

    None
}

/// Replaces the text of the task with `id` when the trimmed replacement is
/// non-empty. An empty edit never blanks or deletes the task.
pub fn edit_task(tasks: &mut [Task], id: &str, raw_text: &str) -> Option<Task> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for task in tasks.iter_mut() {
        if task.id == id {
            task.text = trimmed.to_string();
            return Some(task.clone());
        }
    }

    None
}

/// Removes the task with `id`, if present. Idempotent.
pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    let index = tasks.iter().position(|task| task.id == id)?;
    Some(tasks.remove(index))
}

/// Removes every completed task, preserving the relative order of the
/// rest, and reports how many were removed.
pub fn clear_completed(tasks: &mut Vec<Task>) -> usize {
    let before = tasks.len();
    tasks.retain(|task| !task.completed);
    before - tasks.len()
}

#[cfg(test)]
mod tests {
    use super::{add_task, clear_completed, delete_task, edit_task, toggle_task};
    use crate::model::Task;
    use std::collections::HashSet;
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    fn sample(id: &str, text: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            text: text.to_string(),
            completed,
            created_at: "2026-08-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn add_task_trims_text_and_prepends() {
        let mut tasks = vec![sample("task-old", "existing", false)];

        let added = add_task(&mut tasks, "  Buy milk ").expect("task added");

        assert_eq!(added.text, "Buy milk");
        assert!(!added.completed);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, added.id);
        assert_eq!(tasks[1].id, "task-old");
    }

    #[test]
    fn add_task_ignores_whitespace_only_text() {
        let mut tasks = vec![sample("task-1", "existing", false)];

        assert!(add_task(&mut tasks, "   ").is_none());
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn add_task_sets_parsable_created_at() {
        let mut tasks = Vec::new();
        let added = add_task(&mut tasks, "demo").unwrap();
        OffsetDateTime::parse(&added.created_at, &Rfc3339).unwrap();
    }

    #[test]
    fn added_ids_stay_unique_across_rapid_calls() {
        let mut tasks = Vec::new();
        for index in 0..100 {
            add_task(&mut tasks, &format!("task {index}")).unwrap();
        }

        let ids: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn toggle_task_twice_restores_original_flag() {
        let mut tasks = vec![sample("task-1", "demo", false)];

        let toggled = toggle_task(&mut tasks, "task-1").unwrap();
        assert!(toggled.completed);

        let toggled_back = toggle_task(&mut tasks, "task-1").unwrap();
        assert!(!toggled_back.completed);
        assert!(!tasks[0].completed);
    }

    #[test]
    fn toggle_task_missing_id_is_a_no_op() {
        let mut tasks = vec![sample("task-1", "demo", false)];

        assert!(toggle_task(&mut tasks, "task-2").is_none());
        assert!(!tasks[0].completed);
    }

    #[test]
    fn edit_task_replaces_trimmed_text() {
        let mut tasks = vec![sample("task-1", "old", false)];

        let edited = edit_task(&mut tasks, "task-1", "  new text ").unwrap();

        assert_eq!(edited.text, "new text");
        assert_eq!(tasks[0].text, "new text");
    }

    #[test]
    fn edit_task_with_empty_text_keeps_original() {
        let mut tasks = vec![sample("task-1", "keep me", false)];

        assert!(edit_task(&mut tasks, "task-1", "   ").is_none());
        assert_eq!(tasks[0].text, "keep me");
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn edit_task_missing_id_is_a_no_op() {
        let mut tasks = vec![sample("task-1", "keep me", false)];

        assert!(edit_task(&mut tasks, "task-2", "new").is_none());
        assert_eq!(tasks[0].text, "keep me");
    }

    #[test]
    fn delete_task_is_idempotent() {
        let mut tasks = vec![sample("task-1", "demo", false)];

        let removed = delete_task(&mut tasks, "task-1").unwrap();
        assert_eq!(removed.id, "task-1");
        assert!(tasks.is_empty());

        assert!(delete_task(&mut tasks, "task-1").is_none());
        assert!(tasks.is_empty());
    }

    #[test]
    fn clear_completed_removes_only_completed_in_order() {
        let mut tasks = vec![
            sample("task-4", "d", true),
            sample("task-3", "c", false),
            sample("task-2", "b", true),
            sample("task-1", "a", false),
        ];

        let removed = clear_completed(&mut tasks);

        assert_eq!(removed, 2);
        let remaining: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(remaining, vec!["task-3", "task-1"]);
    }

    #[test]
    fn clear_completed_with_nothing_completed_reports_zero() {
        let mut tasks = vec![sample("task-1", "a", false)];

        assert_eq!(clear_completed(&mut tasks), 0);
        assert_eq!(tasks.len(), 1);
    }
}
