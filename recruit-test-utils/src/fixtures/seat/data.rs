use entity::{
    prelude::*, sea_orm_active_enums::Permission, seat_role, seat_role_permission, seat_role_user,
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::seat::SeatFixtures};

impl<'a> SeatFixtures<'a> {
    pub async fn insert_role(
        &self,
        seat_role_id: i64,
        name: &str,
    ) -> Result<seat_role::Model, TestError> {
        Ok(SeatRole::insert(seat_role::ActiveModel {
            seat_role_id: ActiveValue::Set(seat_role_id),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Adds `user_id` to the role record `role_id`.
    pub async fn insert_role_user(
        &self,
        role_id: i32,
        user_id: i32,
    ) -> Result<seat_role_user::Model, TestError> {
        Ok(SeatRoleUser::insert(seat_role_user::ActiveModel {
            seat_role_id: ActiveValue::Set(role_id),
            user_id: ActiveValue::Set(user_id),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Grants `permission` to the role record `role_id`.
    pub async fn insert_role_permission(
        &self,
        role_id: i32,
        permission: Permission,
    ) -> Result<seat_role_permission::Model, TestError> {
        Ok(
            SeatRolePermission::insert(seat_role_permission::ActiveModel {
                seat_role_id: ActiveValue::Set(role_id),
                permission: ActiveValue::Set(permission),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
