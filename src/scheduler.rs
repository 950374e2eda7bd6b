use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};
use futures::future::LocalBoxFuture;
use tokio::time::sleep;

/// How often [`Scheduler::run`] looks for due jobs.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

pub type Task<'a> = Box<dyn FnMut() -> LocalBoxFuture<'a, crate::Result<()>> + 'a>;

struct Job<'a> {
    at: NaiveTime,
    next_run: NaiveDateTime,
    task: Task<'a>,
}

impl std::fmt::Debug for Job<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("at", &self.at)
            .field("next_run", &self.next_run)
            .finish_non_exhaustive()
    }
}

/// First `at` strictly after `now`.
fn next_occurrence(at: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    }
}

/// Runs daily jobs one after another on the current task.
#[derive(Debug, Default)]
pub struct Scheduler<'a> {
    jobs: Vec<Job<'a>>,
}

impl<'a> Scheduler<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task` to run every day at `at`, starting with the first `at` after `now`.
    pub fn every_day_at<F>(&mut self, at: NaiveTime, now: NaiveDateTime, task: F)
    where
        F: FnMut() -> LocalBoxFuture<'a, crate::Result<()>> + 'a,
    {
        self.jobs.push(Job {
            at,
            next_run: next_occurrence(at, now),
            task: Box::new(task),
        });
    }

    pub fn next_run(&self) -> Option<NaiveDateTime> {
        self.jobs.iter().map(|job| job.next_run).min()
    }

    /// Runs every job due at `now` to completion and moves it to its next day.
    /// Days that were missed entirely are not made up for.
    pub async fn run_pending_at(&mut self, now: NaiveDateTime) -> crate::Result<()> {
        for job in self.jobs.iter_mut().filter(|job| job.next_run <= now) {
            log::debug!("Running job scheduled for {}", job.next_run);
            let res = (job.task)().await;
            job.next_run = next_occurrence(job.at, now);
            res?;
        }
        Ok(())
    }

    pub async fn run_pending(&mut self) -> crate::Result<()> {
        self.run_pending_at(Local::now().naive_local()).await
    }

    /// Checks for due jobs every [`POLL_INTERVAL`] until a job fails.
    pub async fn run(&mut self) -> crate::Result<()> {
        loop {
            self.run_pending().await?;
            sleep(POLL_INTERVAL).await;
        }
    }
}
