//! Scheduler for periodic background jobs.
//!
//! Runs news ingestion on the configured cron expression. The same ingestion can be triggered
//! over HTTP through the cron endpoint, the two share [`NewsService`].

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, service::news::NewsService};

/// Dependencies handed to every scheduled job run.
#[derive(Clone)]
pub struct JobContext {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub feed_urls: Arc<Vec<String>>,
}

pub struct Scheduler {
    context: JobContext,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(context: JobContext) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self { context, sched })
    }

    /// Registers the news ingestion job and starts the scheduler.
    pub async fn start(mut self, news_cron: &str) -> Result<(), Error> {
        self.schedule_job(news_cron, "player news", ingest_news)
            .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the [`JobContext`] on every run and reports how many
    /// records it wrote, which is logged along with any error.
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(JobContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let context = self.context.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let context = context.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(context).await {
                        Ok(count) => tracing::info!("Stored {} new {} record(s)", count, name),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

async fn ingest_news(context: JobContext) -> Result<usize, Error> {
    let summary = NewsService::new(&context.db, &context.http, &context.feed_urls)
        .ingest(None)
        .await?;

    Ok(summary.inserted)
}
