use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use todolist_core::error::CoreError;
use todolist_core::memory::MemoryRepository;
use todolist_core::models::{
    NewTaskData, Page, Task, TaskFilter, TaskStatistics, TaskWithCategory, UpdateTaskData,
};
use todolist_core::repository::TaskRepository;
use todolist_core::scheduler::{OnceOutcome, Scheduler};
use tokio::sync::mpsc;

/// Repository stub for daemon-loop tests: records when each closure pass
/// ran and fails the configured call to simulate a storage outage.
struct FlakyRepo {
    calls: AtomicUsize,
    pass_times: Mutex<Vec<tokio::time::Instant>>,
    fail_on_call: usize,
    pass_tx: mpsc::UnboundedSender<usize>,
}

impl FlakyRepo {
    fn new(fail_on_call: usize) -> (Arc<Self>, mpsc::UnboundedReceiver<usize>) {
        let (pass_tx, pass_rx) = mpsc::unbounded_channel();
        let repo = Arc::new(Self {
            calls: AtomicUsize::new(0),
            pass_times: Mutex::new(Vec::new()),
            fail_on_call,
            pass_tx,
        });
        (repo, pass_rx)
    }

    fn unsupported<T>() -> Result<T, CoreError> {
        Err(CoreError::NotFound("not exercised by this stub".to_string()))
    }
}

#[async_trait]
impl TaskRepository for FlakyRepo {
    async fn create_task(&self, _data: NewTaskData) -> Result<Task, CoreError> {
        Self::unsupported()
    }

    async fn find_task_by_id(&self, _id: i64) -> Result<Option<Task>, CoreError> {
        Ok(None)
    }

    async fn list_tasks(
        &self,
        _filter: &TaskFilter,
        _page: Page,
    ) -> Result<Vec<TaskWithCategory>, CoreError> {
        Ok(Vec::new())
    }

    async fn find_overdue(&self, _now: DateTime<Utc>) -> Result<Vec<Task>, CoreError> {
        Ok(Vec::new())
    }

    async fn close_overdue(&self, _now: DateTime<Utc>) -> Result<u64, CoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.pass_times
            .lock()
            .expect("pass_times lock")
            .push(tokio::time::Instant::now());
        let _ = self.pass_tx.send(call);
        if call == self.fail_on_call {
            Err(CoreError::NotFound("store unavailable".to_string()))
        } else {
            Ok(1)
        }
    }

    async fn complete_task(&self, _id: i64) -> Result<Option<Task>, CoreError> {
        Ok(None)
    }

    async fn update_task(
        &self,
        _id: i64,
        _data: UpdateTaskData,
    ) -> Result<Option<Task>, CoreError> {
        Ok(None)
    }

    async fn delete_task(&self, _id: i64) -> Result<bool, CoreError> {
        Ok(false)
    }

    async fn statistics(&self, _now: DateTime<Utc>) -> Result<TaskStatistics, CoreError> {
        Self::unsupported()
    }
}

const PERIOD: Duration = Duration::from_secs(900);

#[tokio::test(start_paused = true)]
async fn daemon_survives_a_failing_pass_and_keeps_its_schedule() {
    let (repo, mut pass_rx) = FlakyRepo::new(2);
    let scheduler = Arc::new(Scheduler::new(repo.clone(), PERIOD));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let daemon = {
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move {
            scheduler
                .run_until(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        })
    };

    // First pass fires immediately; the second fails; the third proves
    // the loop survived.
    for expected in 1..=3 {
        let call = pass_rx.recv().await.expect("daemon ended early");
        assert_eq!(call, expected);
    }

    shutdown_tx.send(()).expect("daemon already stopped");
    daemon.await.expect("daemon task panicked");

    // Failed pass did not disturb the cadence: each pass ran exactly one
    // period after the previous one, including the one after the failure.
    let times = repo.pass_times.lock().expect("pass_times lock").clone();
    assert_eq!(times.len(), 3);
    assert_eq!(times[1] - times[0], PERIOD);
    assert_eq!(times[2] - times[1], PERIOD);
}

#[tokio::test(start_paused = true)]
async fn daemon_stops_promptly_on_shutdown() {
    let (repo, mut pass_rx) = FlakyRepo::new(usize::MAX);
    let scheduler = Scheduler::new(repo.clone(), PERIOD);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let daemon = tokio::spawn(async move {
        scheduler
            .run_until(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    // Let the startup pass run, then interrupt mid-sleep.
    assert_eq!(pass_rx.recv().await, Some(1));
    shutdown_tx.send(()).expect("daemon already stopped");
    daemon.await.expect("daemon task panicked");

    assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn run_once_requires_confirmation() {
    let repo = Arc::new(MemoryRepository::new());
    repo.create_task(NewTaskData {
        title: "Missed deadline".to_string(),
        due_date: Some(Utc::now() - ChronoDuration::hours(1)),
        ..Default::default()
    })
    .await
    .unwrap();

    let scheduler = Scheduler::with_default_period(Arc::clone(&repo));

    // Declined: nothing changes
    let outcome = scheduler.run_once(|_| false).await.unwrap();
    assert_eq!(outcome, OnceOutcome::Declined);
    assert_eq!(repo.find_overdue(Utc::now()).await.unwrap().len(), 1);

    // Confirmed: the reported set matches what gets closed
    let outcome = scheduler
        .run_once(|overdue| {
            assert_eq!(overdue.len(), 1);
            assert_eq!(overdue[0].title, "Missed deadline");
            true
        })
        .await
        .unwrap();
    assert_eq!(outcome, OnceOutcome::Closed(1));

    // Nothing left: confirmation is not even requested
    let outcome = scheduler
        .run_once(|_| panic!("confirm must not be called with no overdue tasks"))
        .await
        .unwrap();
    assert_eq!(outcome, OnceOutcome::NoOverdue);
}

#[tokio::test]
async fn run_pass_swallows_storage_errors() {
    let (repo, _pass_rx) = FlakyRepo::new(1);
    let scheduler = Scheduler::new(repo.clone(), PERIOD);

    assert_eq!(scheduler.run_pass().await, 0);
    assert_eq!(scheduler.run_pass().await, 1);
}
