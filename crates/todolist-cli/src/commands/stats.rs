use anyhow::Result;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::views::table::display_statistics;

pub async fn show_stats(service: &TaskService<impl Repository>) -> Result<()> {
    let stats = service.statistics().await?;
    display_statistics(&stats);
    Ok(())
}
