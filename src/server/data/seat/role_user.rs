use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::data::page_offset;

pub struct SeatRoleUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeatRoleUserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::seat_role_user::Model>, DbErr> {
        entity::prelude::SeatRoleUser::find().all(self.db).await
    }

    /// Record IDs of every role the user belongs to
    pub async fn get_role_ids_for_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::SeatRoleUser::find()
            .select_only()
            .column(entity::seat_role_user::Column::SeatRoleId)
            .filter(entity::seat_role_user::Column::UserId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Pages through a user's role memberships
    pub async fn list_for_user(
        &self,
        user_id: i32,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<entity::seat_role_user::Model>, u64), DbErr> {
        let query = entity::prelude::SeatRoleUser::find()
            .filter(entity::seat_role_user::Column::UserId.eq(user_id));
        let total = query.clone().count(self.db).await?;

        let memberships = query
            .order_by_asc(entity::seat_role_user::Column::SeatRoleId)
            .offset(page_offset(limit, page))
            .limit(limit)
            .all(self.db)
            .await?;

        Ok((memberships, total))
    }

    /// Pages through the user IDs of a role's members, optionally restricted to `user_ids`
    pub async fn list_user_ids_for_role(
        &self,
        role_id: i32,
        user_ids: Option<&[i32]>,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<i32>, u64), DbErr> {
        let mut query = entity::prelude::SeatRoleUser::find()
            .filter(entity::seat_role_user::Column::SeatRoleId.eq(role_id));

        if let Some(user_ids) = user_ids {
            query = query
                .filter(entity::seat_role_user::Column::UserId.is_in(user_ids.iter().copied()));
        }

        let total = query.clone().count(self.db).await?;

        let ids = query
            .select_only()
            .column(entity::seat_role_user::Column::UserId)
            .order_by_asc(entity::seat_role_user::Column::UserId)
            .offset(page_offset(limit, page))
            .limit(limit)
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        Ok((ids, total))
    }

    /// Inserts `(role_id, user_id)` memberships
    pub async fn create_many(&self, memberships: Vec<(i32, i32)>) -> Result<(), DbErr> {
        if memberships.is_empty() {
            return Ok(());
        }

        let memberships =
            memberships
                .into_iter()
                .map(|(role_id, user_id)| entity::seat_role_user::ActiveModel {
                    seat_role_id: ActiveValue::Set(role_id),
                    user_id: ActiveValue::Set(user_id),
                    ..Default::default()
                });

        entity::prelude::SeatRoleUser::insert_many(memberships)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes memberships by record ID
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::SeatRoleUser::delete_many()
            .filter(entity::seat_role_user::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every membership of the roles `role_ids`
    pub async fn delete_for_roles(&self, role_ids: &[i32]) -> Result<u64, DbErr> {
        if role_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::SeatRoleUser::delete_many()
            .filter(entity::seat_role_user::Column::SeatRoleId.is_in(role_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
