use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::InsertFriend,
        query::FriendQuery,
        repository::FriendRepository,
        schema::{FriendEntity, FriendStatus},
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    fn select(query: &FriendQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT * FROM friends");
        query.push_where(&mut builder);
        builder.push(" ORDER BY created_at, id");
        builder
    }

    async fn insert<'e, E>(
        executor: E,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError>
    where
        E: PgExecutor<'e>,
    {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let friend = sqlx::query_as::<_, FriendEntity>(
            r#"
            INSERT INTO friends (id, sender_type, sender_id, receiver_type, receiver_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&friend.sender.entity_type)
        .bind(friend.sender.entity_id)
        .bind(&friend.receiver.entity_type)
        .bind(friend.receiver.entity_id)
        .bind(friend.status)
        .fetch_one(executor)
        .await?;

        Ok(friend)
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn find_first(
        &self,
        query: &FriendQuery,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let mut builder = Self::select(query);
        builder.push(" LIMIT 1");

        let friend =
            builder.build_query_as::<FriendEntity>().fetch_optional(&self.pool).await?;

        Ok(friend)
    }

    async fn find_all(&self, query: &FriendQuery) -> Result<Vec<FriendEntity>, error::SystemError> {
        let mut builder = Self::select(query);

        let friends = builder.build_query_as::<FriendEntity>().fetch_all(&self.pool).await?;

        Ok(friends)
    }

    async fn create_friendship(
        &self,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError> {
        Self::insert(&self.pool, friend).await
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<FriendEntity, error::SystemError> {
        let friend = sqlx::query_as::<_, FriendEntity>(
            r#"
            UPDATE friends
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Friendship not found"))?;

        Ok(friend)
    }

    async fn delete_friendship(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM friends WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn replace_friendship_atomic(
        &self,
        previous: Option<&Uuid>,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        if let Some(id) = previous {
            sqlx::query("DELETE FROM friends WHERE id = $1").bind(id).execute(&mut *tx).await?;
        }

        let friend = Self::insert(&mut *tx, friend).await?;

        tx.commit().await?;

        Ok(friend)
    }
}
