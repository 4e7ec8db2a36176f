use chrono::Utc;
use entity::sea_orm_active_enums::NotificationKind;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        kind: NotificationKind,
        title: &str,
        body: &str,
        link: Option<String>,
    ) -> Result<entity::notification::Model, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind),
            title: ActiveValue::Set(title.to_string()),
            body: ActiveValue::Set(body.to_string()),
            link: ActiveValue::Set(link),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    pub async fn get_by_id(&self, notification_id: i32) -> Result<Option<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find_by_id(notification_id)
            .one(self.db)
            .await
    }

    /// Most recent notifications of the user, newest first.
    pub async fn get_recent(&self, user_id: i32, limit: u64) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .count(self.db)
            .await
    }

    pub async fn mark_read(
        &self,
        notification: entity::notification::Model,
    ) -> Result<entity::notification::Model, DbErr> {
        if notification.read {
            return Ok(notification);
        }

        let mut notification = notification.into_active_model();
        notification.read = ActiveValue::Set(true);

        notification.update(self.db).await
    }

    /// Marks every unread notification of the user as read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::NotificationKind;
    use huddle_test_utils::prelude::*;

    use crate::server::data::notification::NotificationRepository;

    async fn setup() -> Result<TestContext, TestError> {
        TestBuilder::new()
            .with_table(entity::prelude::HuddleUser)
            .with_table(entity::prelude::Notification)
            .build()
            .await
    }

    /// Expect newest first, capped at the limit
    #[tokio::test]
    async fn lists_recent_first() -> Result<(), TestError> {
        let test = setup().await?;
        let alice = test.user().insert_user("alice").await?;

        let repo = NotificationRepository::new(&test.db);
        for i in 0..3 {
            repo.create(alice.id, NotificationKind::System, &format!("n{}", i), "body", None)
                .await?;
        }

        let recent = repo.get_recent(alice.id, 2).await?;

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "n2");
        assert_eq!(recent[1].title, "n1");

        Ok(())
    }

    /// Expect unread counts to follow mark_read and mark_all_read
    #[tokio::test]
    async fn tracks_unread() -> Result<(), TestError> {
        let test = setup().await?;
        let alice = test.user().insert_user("alice").await?;
        let bob = test.user().insert_user("bob").await?;

        let repo = NotificationRepository::new(&test.db);
        let first = repo
            .create(alice.id, NotificationKind::Trade, "t", "b", Some("/trades".into()))
            .await?;
        repo.create(alice.id, NotificationKind::Trade, "t", "b", None).await?;
        repo.create(bob.id, NotificationKind::Trade, "t", "b", None).await?;

        assert_eq!(repo.count_unread(alice.id).await?, 2);

        repo.mark_read(first).await?;
        assert_eq!(repo.count_unread(alice.id).await?, 1);

        assert_eq!(repo.mark_all_read(alice.id).await?, 1);
        assert_eq!(repo.count_unread(alice.id).await?, 0);
        assert_eq!(repo.count_unread(bob.id).await?, 1);

        Ok(())
    }
}
