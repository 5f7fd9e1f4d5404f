use anyhow::Result;
use dialoguer::Confirm;
use todolist_core::error::CoreError;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::cli::DeleteCommand;

pub async fn delete_task(
    service: &TaskService<impl Repository>,
    command: DeleteCommand,
) -> Result<()> {
    let task = service
        .get_task(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Task with ID {} not found", command.id)))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete task '{}'?",
                task.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    service.delete_task(command.id).await?;
    println!("Deleted task #{}.", command.id);
    Ok(())
}
