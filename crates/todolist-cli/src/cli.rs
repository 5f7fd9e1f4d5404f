use clap::{Parser, Subcommand};
use todolist_core::models::TaskPriority;

/// A small personal task tracker with categories, due dates and
/// automatic overdue-task closure
#[derive(Parser, Debug)]
#[command(name = "todolist", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as completed
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Show task statistics
    Stats,
    /// Manage categories
    Category(CategoryCommand),
    /// Close overdue tasks, once or continuously
    Autoclose(AutocloseCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The due date of the task (e.g. "tomorrow", "2026-03-01")
    #[clap(long)]
    pub due: Option<String>,
    /// The priority of the task (low, medium, high or 1-3)
    #[clap(short, long)]
    pub priority: Option<TaskPriority>,
    /// The category of the task (created on first use)
    #[clap(short, long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Show only completed tasks
    #[clap(long)]
    pub completed: bool,
    /// Show only pending tasks
    #[clap(long, conflicts_with = "completed")]
    pub pending: bool,
    /// Keyword to match against title or description
    #[clap(short, long)]
    pub search: Option<String>,
    /// Number of tasks to skip
    #[clap(long, default_value_t = 0)]
    pub skip: i64,
    /// Maximum number of tasks to show (1-100)
    #[clap(long, default_value_t = 20)]
    pub limit: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    #[arg(long)]
    pub priority: Option<TaskPriority>,

    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "category")]
    pub category_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as completed
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryAction {
    /// List categories with their task counts
    List,
    /// Delete a category (its tasks are kept, detached)
    Delete {
        /// The ID of the category to delete
        id: i64,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct AutocloseCommand {
    /// Run continuously, closing overdue tasks on a fixed period
    #[clap(short, long)]
    pub daemon: bool,
    /// Skip the confirmation prompt in one-shot mode
    #[clap(short, long)]
    pub yes: bool,
}
