use clap::{Parser, Subcommand, ValueEnum};
use tasklist_core::model::Filter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the configured theme for this invocation
    #[arg(long, global = true, value_name = "THEME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasklist add Buy milk
    Add {
        text: Vec<String>,
    },
    /// Toggle a task between active and completed
    ///
    /// Example: tasklist toggle task-1f0c
    Toggle {
        id: String,
    },
    /// Edit a task's text; without new text (interactive mode) this opens
    /// the task for editing instead
    ///
    /// Example: tasklist edit task-1f0c Buy organic milk
    Edit {
        id: String,
        new_text: Vec<String>,
    },
    /// Delete a task
    ///
    /// Example: tasklist delete task-1f0c
    Delete {
        id: String,
    },
    /// Remove all completed tasks
    ///
    /// Example: tasklist clear
    Clear,
    /// List tasks through a filter
    ///
    /// Example: tasklist list active
    List {
        filter: Option<FilterArg>,
    },
    /// Set the session filter and re-render (interactive mode)
    ///
    /// Example: filter completed
    Filter {
        filter: FilterArg,
    },
    /// Re-render the current view (interactive mode)
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Active => Filter::Active,
            FilterArg::Completed => Filter::Completed,
        }
    }
}
