//! Notification polling for the signed-in user.
//!
//! Polling is the only delivery mechanism: the center fetches on start and then every
//! [`NOTIFICATION_POLL_INTERVAL`], publishing each result through its [`Store`].

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::{sync::Notify, task::JoinHandle};

use crate::{
    model::notification::{MarkReadDto, NotificationDto, NotificationListDto},
    workflow::{error::WorkflowError, store::Store},
};

pub const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Server side of the notification center.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn fetch(&self) -> Result<NotificationListDto, WorkflowError>;
    async fn mark_read(&self, notification_id: i32) -> Result<MarkReadDto, WorkflowError>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationSnapshot {
    pub items: Vec<NotificationDto>,
    pub unread: u64,
}

impl From<NotificationListDto> for NotificationSnapshot {
    fn from(list: NotificationListDto) -> Self {
        Self {
            items: list.notifications,
            unread: list.unread_count,
        }
    }
}

pub struct NotificationCenter<S> {
    source: Arc<S>,
    store: Store<NotificationSnapshot>,
}

impl<S> Clone for NotificationCenter<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: self.store.clone(),
        }
    }
}

/// Stops a running poller when asked. Dropping the handle leaves the poller running.
pub struct PollerHandle {
    stopped: Arc<AtomicBool>,
    wake: Arc<Notify>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops polling after the in-flight fetch, if any, completes.
    pub async fn stop(self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.wake.notify_one();

        if let Err(e) = self.task.await {
            tracing::warn!("Notification poller ended abnormally: {}", e);
        }
    }
}

impl<S: NotificationSource + 'static> NotificationCenter<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<NotificationSnapshot> {
        &self.store
    }

    /// Fetches the latest notifications and publishes them.
    pub async fn refresh(&self) -> Result<(), WorkflowError> {
        let list = self.source.fetch().await?;
        self.store.set(list.into());

        Ok(())
    }

    /// Starts polling on a background task.
    pub fn start(&self) -> PollerHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        let center = self.clone();
        let task_stopped = Arc::clone(&stopped);
        let task_wake = Arc::clone(&wake);

        let task = tokio::spawn(async move {
            while !task_stopped.load(Ordering::SeqCst) {
                if let Err(e) = center.refresh().await {
                    tracing::warn!("Failed to poll notifications: {}", e);
                }

                tokio::select! {
                    _ = tokio::time::sleep(NOTIFICATION_POLL_INTERVAL) => {}
                    _ = task_wake.notified() => {}
                }
            }
        });

        PollerHandle {
            stopped,
            wake,
            task,
        }
    }

    /// Marks a notification as read and returns the link to navigate to, if any.
    ///
    /// The store is updated before the server confirms. If the server refuses, the store is
    /// reloaded from the server and the error returned.
    pub async fn mark_read(&self, notification_id: i32) -> Result<Option<String>, WorkflowError> {
        let mut local_link = None;
        self.store.update(|snapshot| {
            if let Some(item) = snapshot.items.iter_mut().find(|item| item.id == notification_id) {
                if !item.read {
                    item.read = true;
                    snapshot.unread = snapshot.unread.saturating_sub(1);
                }
                local_link = item.link.clone();
            }
        });

        match self.source.mark_read(notification_id).await {
            Ok(result) => Ok(result.link.or(local_link)),
            Err(e) => {
                if let Err(refresh_error) = self.refresh().await {
                    tracing::warn!("Failed to reload notifications: {}", refresh_error);
                }

                Err(e)
            }
        }
    }
}
