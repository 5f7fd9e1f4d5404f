use anyhow::Result;
use todolist_core::models::TaskFilter;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::cli::ListCommand;
use crate::views::table::display_tasks;

pub async fn list_tasks(service: &TaskService<impl Repository>, command: ListCommand) -> Result<()> {
    let completed = if command.completed {
        Some(true)
    } else if command.pending {
        Some(false)
    } else {
        None
    };

    let filter = TaskFilter {
        completed,
        search: command.search,
    };

    let tasks = service
        .list_tasks(&filter, command.skip, command.limit)
        .await?;
    display_tasks(&tasks);

    Ok(())
}
