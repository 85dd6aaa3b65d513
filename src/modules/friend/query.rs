use sqlx::{Postgres, QueryBuilder};

use crate::modules::friend::{
    model::EntityRef,
    schema::{FriendEntity, FriendStatus},
};

/// Boolean filter over friendship records. The same tree is evaluated in
/// memory and rendered as a parameterised SQL predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FriendFilter {
    Sender(EntityRef),
    Receiver(EntityRef),
    Status(FriendStatus),
    And(Vec<FriendFilter>),
    Or(Vec<FriendFilter>),
}

impl FriendFilter {
    pub fn matches(&self, friend: &FriendEntity) -> bool {
        match self {
            FriendFilter::Sender(entity) => friend.is_sender(entity),
            FriendFilter::Receiver(entity) => friend.is_receiver(entity),
            FriendFilter::Status(status) => friend.status == *status,
            FriendFilter::And(filters) => filters.iter().all(|f| f.matches(friend)),
            FriendFilter::Or(filters) => filters.iter().any(|f| f.matches(friend)),
        }
    }

    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            FriendFilter::Sender(entity) => {
                builder
                    .push("(sender_type = ")
                    .push_bind(entity.entity_type.clone())
                    .push(" AND sender_id = ")
                    .push_bind(entity.entity_id)
                    .push(")");
            }
            FriendFilter::Receiver(entity) => {
                builder
                    .push("(receiver_type = ")
                    .push_bind(entity.entity_type.clone())
                    .push(" AND receiver_id = ")
                    .push_bind(entity.entity_id)
                    .push(")");
            }
            FriendFilter::Status(status) => {
                builder.push("status = ").push_bind(*status);
            }
            FriendFilter::And(filters) => Self::push_group(builder, filters, " AND ", "TRUE"),
            FriendFilter::Or(filters) => Self::push_group(builder, filters, " OR ", "FALSE"),
        }
    }

    fn push_group(
        builder: &mut QueryBuilder<'_, Postgres>,
        filters: &[FriendFilter],
        separator: &str,
        empty: &str,
    ) {
        if filters.is_empty() {
            builder.push(empty);
            return;
        }

        builder.push("(");
        for (i, filter) in filters.iter().enumerate() {
            if i > 0 {
                builder.push(separator);
            }
            filter.push_sql(builder);
        }
        builder.push(")");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FriendQuery {
    filter: FriendFilter,
}

impl FriendQuery {
    /// Records between `sender` and `receiver`. With `self_only` only the
    /// record sent by `sender` matches; otherwise either direction does.
    pub fn between(sender: &EntityRef, receiver: &EntityRef, self_only: bool) -> Self {
        let forward = FriendFilter::And(vec![
            FriendFilter::Sender(sender.clone()),
            FriendFilter::Receiver(receiver.clone()),
        ]);

        if self_only {
            return FriendQuery { filter: forward };
        }

        let backward = FriendFilter::And(vec![
            FriendFilter::Sender(receiver.clone()),
            FriendFilter::Receiver(sender.clone()),
        ]);

        FriendQuery { filter: FriendFilter::Or(vec![forward, backward]) }
    }

    pub fn involving(entity: &EntityRef) -> Self {
        FriendQuery {
            filter: FriendFilter::Or(vec![
                FriendFilter::Sender(entity.clone()),
                FriendFilter::Receiver(entity.clone()),
            ]),
        }
    }

    pub fn sent_by(entity: &EntityRef) -> Self {
        FriendQuery { filter: FriendFilter::Sender(entity.clone()) }
    }

    pub fn received_by(entity: &EntityRef) -> Self {
        FriendQuery { filter: FriendFilter::Receiver(entity.clone()) }
    }

    pub fn with_status(self, status: FriendStatus) -> Self {
        FriendQuery { filter: FriendFilter::And(vec![self.filter, FriendFilter::Status(status)]) }
    }

    pub fn filter(&self) -> &FriendFilter {
        &self.filter
    }

    pub fn matches(&self, friend: &FriendEntity) -> bool {
        self.filter.matches(friend)
    }

    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE ");
        self.filter.push_sql(builder);
    }
}
