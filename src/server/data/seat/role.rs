use std::collections::HashMap;

use migration::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    ExprTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::page_offset;

pub struct SeatRoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeatRoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::seat_role::Model>, DbErr> {
        entity::prelude::SeatRole::find()
            .order_by_asc(entity::seat_role::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::seat_role::Model>, DbErr> {
        entity::prelude::SeatRole::find_by_id(id).one(self.db).await
    }

    pub async fn get_many(&self, ids: &[i32]) -> Result<Vec<entity::seat_role::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::SeatRole::find()
            .filter(entity::seat_role::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::seat_role::Column::Id)
            .all(self.db)
            .await
    }

    /// Inserts `(seat_role_id, name)` pairs
    pub async fn create_many(&self, roles: Vec<(i64, String)>) -> Result<(), DbErr> {
        if roles.is_empty() {
            return Ok(());
        }

        let roles = roles
            .into_iter()
            .map(|(seat_role_id, name)| entity::seat_role::ActiveModel {
                seat_role_id: ActiveValue::Set(seat_role_id),
                name: ActiveValue::Set(name),
                ..Default::default()
            });

        entity::prelude::SeatRole::insert_many(roles)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn rename(&self, role: entity::seat_role::Model, name: String) -> Result<(), DbErr> {
        let mut role_am: entity::seat_role::ActiveModel = role.into();
        role_am.name = ActiveValue::Set(name);
        role_am.update(self.db).await?;

        Ok(())
    }

    /// Deletes roles by record ID. Memberships and permissions must be removed first.
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::SeatRole::delete_many()
            .filter(entity::seat_role::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Pages through roles ordered by name
    ///
    /// `name` matches a case-insensitive substring and `seat_role_id` an exact SeAT role ID.
    ///
    /// # Returns
    /// The requested page and the number of matching roles
    pub async fn list(
        &self,
        name: Option<&str>,
        seat_role_id: Option<i64>,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<entity::seat_role::Model>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(name) = name {
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col((
                    entity::seat_role::Entity,
                    entity::seat_role::Column::Name,
                ))))
                .like(format!("%{}%", name.to_lowercase())),
            );
        }
        if let Some(seat_role_id) = seat_role_id {
            condition = condition.add(entity::seat_role::Column::SeatRoleId.eq(seat_role_id));
        }

        let query = entity::prelude::SeatRole::find().filter(condition);
        let total = query.clone().count(self.db).await?;

        let roles = query
            .order_by_asc(entity::seat_role::Column::Name)
            .order_by_asc(entity::seat_role::Column::Id)
            .offset(page_offset(limit, page))
            .limit(limit)
            .all(self.db)
            .await?;

        Ok((roles, total))
    }

    /// Number of members of each role in `ids`; roles without members are absent
    pub async fn member_counts(&self, ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let role_ids = entity::prelude::SeatRoleUser::find()
            .select_only()
            .column(entity::seat_role_user::Column::SeatRoleId)
            .filter(entity::seat_role_user::Column::SeatRoleId.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for role_id in role_ids {
            *counts.entry(role_id).or_insert(0) += 1;
        }

        Ok(counts)
    }
}
