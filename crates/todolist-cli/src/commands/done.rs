use anyhow::Result;
use owo_colors::OwoColorize;
use todolist_core::error::CoreError;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::cli::DoneCommand;

pub async fn done_task(service: &TaskService<impl Repository>, command: DoneCommand) -> Result<()> {
    let task = service
        .complete_task(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Task with ID {} not found", command.id)))?;

    println!("{} task: '{}'", "Completed".green().bold(), task.title);
    Ok(())
}
