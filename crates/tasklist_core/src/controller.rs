use crate::error::AppError;
use crate::model::{Filter, Task};
use crate::storage::json_store;
use crate::task_api;
use crate::view::{self, ViewModel};
use std::path::{Path, PathBuf};

/// Discrete user-intent events. Whatever front end sits on top (CLI
/// subcommand, interactive prompt, anything else) translates its gestures
/// into these and hands them to `Session::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AddRequested(String),
    ToggleRequested(String),
    /// Edit-intent on a task: enters edit mode, or commits the currently
    /// displayed text when that task is already being edited.
    EditRequested(String),
    /// Commit key-signal with the captured replacement text.
    EditCommitted { id: String, text: String },
    DeleteRequested(String),
    FilterChanged(Filter),
    ClearCompletedRequested,
}

/// What a dispatch did, for the front end's status line. `Ignored` covers
/// every silent no-op path: blank input, stale ids, edits with empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Task),
    Toggled(Task),
    Edited(Task),
    Deleted(Task),
    EditingStarted(String),
    EditingEnded(String),
    Cleared(usize),
    FilterSet(Filter),
    Ignored,
}

/// Exclusive owner of the task collection, the active filter and the
/// inline-edit state for one user session. Every successful mutation is
/// followed synchronously by a full-collection save; filter changes and
/// no-ops never touch the store.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    tasks: Vec<Task>,
    filter: Filter,
    editing: Option<String>,
}

impl Session {
    /// Opens a session over the persisted slot. A malformed slot degrades
    /// to an empty collection; the swallowed diagnostic is returned so the
    /// caller can report it.
    pub fn open(path: &Path) -> (Self, Option<AppError>) {
        let load = json_store::load_tasks_with_fallback(path);
        (
            Self {
                path: path.to_path_buf(),
                tasks: load.tasks,
                filter: Filter::default(),
                editing: None,
            },
            load.error,
        )
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn view(&self) -> ViewModel {
        view::project(&self.tasks, self.filter, self.editing.as_deref())
    }

    pub fn dispatch(&mut self, event: Event) -> Result<Outcome, AppError> {
        match event {
            Event::AddRequested(raw_text) => match task_api::add_task(&mut self.tasks, &raw_text) {
                Some(task) => {
                    self.save()?;
                    Ok(Outcome::Added(task))
                }
                None => Ok(Outcome::Ignored),
            },
            Event::ToggleRequested(id) => match task_api::toggle_task(&mut self.tasks, &id) {
                Some(task) => {
                    self.save()?;
                    Ok(Outcome::Toggled(task))
                }
                None => Ok(Outcome::Ignored),
            },
            Event::EditRequested(id) => {
                if self.editing.as_deref() == Some(id.as_str()) {
                    // Second edit-intent: explicit save of the displayed
                    // text, which at this level is the stored text.
                    let current = self
                        .tasks
                        .iter()
                        .find(|task| task.id == id)
                        .map(|task| task.text.clone());
                    self.editing = None;
                    match current {
                        Some(text) => self.commit_edit(&id, &text, true),
                        None => Ok(Outcome::Ignored),
                    }
                } else if self.tasks.iter().any(|task| task.id == id) {
                    self.editing = Some(id.clone());
                    Ok(Outcome::EditingStarted(id))
                } else {
                    Ok(Outcome::Ignored)
                }
            }
            Event::EditCommitted { id, text } => {
                let was_editing = self.editing.as_deref() == Some(id.as_str());
                if was_editing {
                    self.editing = None;
                }
                self.commit_edit(&id, &text, was_editing)
            }
            Event::DeleteRequested(id) => match task_api::delete_task(&mut self.tasks, &id) {
                Some(task) => {
                    if self.editing.as_deref() == Some(id.as_str()) {
                        self.editing = None;
                    }
                    self.save()?;
                    Ok(Outcome::Deleted(task))
                }
                None => Ok(Outcome::Ignored),
            },
            Event::FilterChanged(filter) => {
                self.filter = filter;
                Ok(Outcome::FilterSet(filter))
            }
            Event::ClearCompletedRequested => {
                let removed = task_api::clear_completed(&mut self.tasks);
                if removed > 0 {
                    self.save()?;
                }
                Ok(Outcome::Cleared(removed))
            }
        }
    }

    fn commit_edit(&mut self, id: &str, text: &str, was_editing: bool) -> Result<Outcome, AppError> {
        match task_api::edit_task(&mut self.tasks, id, text) {
            Some(task) => {
                self.save()?;
                Ok(Outcome::Edited(task))
            }
            None if was_editing => Ok(Outcome::EditingEnded(id.to_string())),
            None => Ok(Outcome::Ignored),
        }
    }

    fn save(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }
}
