use entity::sea_orm_active_enums::NotificationKind;
use sea_orm::DatabaseConnection;

use crate::{
    model::notification::{MarkReadDto, NotificationDto, NotificationKindDto, NotificationListDto},
    server::{
        data::notification::NotificationRepository,
        error::{trade::TradeError, Error},
        model::db::NotificationModel,
    },
};

/// Most notifications returned by a single listing
pub const NOTIFICATION_LIST_LIMIT: u64 = 50;

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recent notifications of the user along with the unread total.
    pub async fn list(&self, user_id: i32) -> Result<NotificationListDto, Error> {
        let repo = NotificationRepository::new(self.db);

        let notifications = repo
            .get_recent(user_id, NOTIFICATION_LIST_LIMIT)
            .await?
            .into_iter()
            .map(notification_dto)
            .collect();
        let unread_count = repo.count_unread(user_id).await?;

        Ok(NotificationListDto {
            notifications,
            unread_count,
        })
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, Error> {
        Ok(NotificationRepository::new(self.db)
            .count_unread(user_id)
            .await?)
    }

    /// Marks one of the user's notifications as read and returns its link.
    ///
    /// Notifications of other users are reported as not found.
    pub async fn mark_read(&self, user_id: i32, notification_id: i32) -> Result<MarkReadDto, Error> {
        let repo = NotificationRepository::new(self.db);

        let notification = repo
            .get_by_id(notification_id)
            .await?
            .filter(|notification| notification.user_id == user_id)
            .ok_or_else(|| {
                TradeError::RecordNotFound(format!("Notification ID {}", notification_id))
            })?;

        let notification = repo.mark_read(notification).await?;

        Ok(MarkReadDto {
            link: notification.link,
        })
    }

    /// Marks every notification of the user as read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, Error> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    /// Creates a notification as a side effect of another operation.
    ///
    /// Failures are logged and never returned, the calling operation has already succeeded.
    pub async fn notify(
        &self,
        user_id: i32,
        kind: NotificationKind,
        title: &str,
        body: &str,
        link: Option<String>,
    ) {
        if let Err(e) = NotificationRepository::new(self.db)
            .create(user_id, kind, title, body, link)
            .await
        {
            tracing::warn!(user_id, "Failed to create notification: {}", e);
        }
    }
}

fn notification_dto(notification: NotificationModel) -> NotificationDto {
    let kind = match notification.kind {
        NotificationKind::System => NotificationKindDto::System,
        NotificationKind::Trade => NotificationKindDto::Trade,
        NotificationKind::Clan => NotificationKindDto::Clan,
        NotificationKind::Other => NotificationKindDto::Other,
    };

    NotificationDto {
        id: notification.id,
        kind,
        title: notification.title,
        body: notification.body,
        link: notification.link,
        read: notification.read,
        created_at: notification.created_at,
    }
}
