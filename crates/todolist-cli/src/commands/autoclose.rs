use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::time::Duration;
use todolist_core::repository::Repository;
use todolist_core::scheduler::{OnceOutcome, Scheduler};

use crate::cli::AutocloseCommand;

pub async fn autoclose<R: Repository + 'static>(
    repo: Arc<R>,
    interval: Duration,
    command: AutocloseCommand,
) -> Result<()> {
    let scheduler = Scheduler::new(repo, interval);

    if command.daemon {
        run_daemon(&scheduler, interval).await
    } else {
        run_once(&scheduler, command.yes).await
    }
}

async fn run_daemon<R: Repository>(scheduler: &Scheduler<R>, interval: Duration) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!(
        "Scheduler started: closing overdue tasks every {} minute(s). Press Ctrl-C to stop.",
        interval.as_secs() / 60
    );

    scheduler
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    println!("Scheduler stopped.");
    Ok(())
}

async fn run_once<R: Repository>(scheduler: &Scheduler<R>, assume_yes: bool) -> Result<()> {
    println!("Checking for overdue tasks...");

    let outcome = scheduler
        .run_once(|overdue| {
            println!("Found {} overdue task(s):", overdue.len());
            for task in overdue {
                let due = task
                    .due_date
                    .map(|d| d.to_rfc2822())
                    .unwrap_or_else(|| "no due date".to_string());
                println!("  [{}] {} (due {})", task.id, task.title, due);
            }
            if assume_yes {
                true
            } else {
                Confirm::new()
                    .with_prompt("Close these tasks?")
                    .default(false)
                    .interact()
                    .unwrap_or(false)
            }
        })
        .await?;

    match outcome {
        OnceOutcome::NoOverdue => println!("{} No overdue tasks found.", "OK".green().bold()),
        OnceOutcome::Declined => println!("Operation cancelled."),
        OnceOutcome::Closed(count) => {
            println!("{} Closed {} task(s).", "OK".green().bold(), count)
        }
    }

    Ok(())
}
