use std::collections::HashSet;

use entity::sea_orm_active_enums::Permission;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct SeatRolePermissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeatRolePermissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Permissions granted by any of the roles `role_ids`, without duplicates
    pub async fn get_for_roles(&self, role_ids: &[i32]) -> Result<Vec<Permission>, DbErr> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = entity::prelude::SeatRolePermission::find()
            .filter(
                entity::seat_role_permission::Column::SeatRoleId.is_in(role_ids.iter().copied()),
            )
            .order_by_asc(entity::seat_role_permission::Column::Id)
            .all(self.db)
            .await?;

        let mut seen = HashSet::new();

        Ok(rows
            .into_iter()
            .map(|row| row.permission)
            .filter(|permission| seen.insert(*permission))
            .collect())
    }

    /// Makes the role's permissions equal `desired`
    ///
    /// # Returns
    /// `true` if any row was inserted or deleted
    pub async fn set_for_role(
        &self,
        role_id: i32,
        desired: &HashSet<Permission>,
    ) -> Result<bool, DbErr> {
        let existing = entity::prelude::SeatRolePermission::find()
            .filter(entity::seat_role_permission::Column::SeatRoleId.eq(role_id))
            .all(self.db)
            .await?;

        let stale: Vec<i32> = existing
            .iter()
            .filter(|row| !desired.contains(&row.permission))
            .map(|row| row.id)
            .collect();
        let stored: HashSet<Permission> = existing.iter().map(|row| row.permission).collect();
        let missing: Vec<_> = desired
            .iter()
            .filter(|permission| !stored.contains(permission))
            .map(|permission| entity::seat_role_permission::ActiveModel {
                seat_role_id: ActiveValue::Set(role_id),
                permission: ActiveValue::Set(*permission),
                ..Default::default()
            })
            .collect();

        let changed = !stale.is_empty() || !missing.is_empty();

        if !stale.is_empty() {
            entity::prelude::SeatRolePermission::delete_many()
                .filter(entity::seat_role_permission::Column::Id.is_in(stale))
                .exec(self.db)
                .await?;
        }

        if !missing.is_empty() {
            entity::prelude::SeatRolePermission::insert_many(missing)
                .exec(self.db)
                .await?;
        }

        Ok(changed)
    }

    /// Deletes every permission of the roles `role_ids`
    pub async fn delete_for_roles(&self, role_ids: &[i32]) -> Result<u64, DbErr> {
        if role_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::SeatRolePermission::delete_many()
            .filter(
                entity::seat_role_permission::Column::SeatRoleId.is_in(role_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use entity::sea_orm_active_enums::Permission;
    use recruit_test_utils::prelude::*;

    use crate::server::data::seat::role_permission::SeatRolePermissionRepository;

    /// Expect the union of permissions across roles without duplicates
    #[tokio::test]
    async fn unions_permissions_across_roles() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_seat_tables().build().await?;
        let first = test.seat().insert_role(1, "Recruiters").await?;
        let second = test.seat().insert_role(2, "Directors").await?;
        test.seat()
            .insert_role_permission(first.id, Permission::ViewApplication)
            .await?;
        test.seat()
            .insert_role_permission(second.id, Permission::ViewApplication)
            .await?;
        test.seat()
            .insert_role_permission(second.id, Permission::AcceptApplication)
            .await?;

        let repo = SeatRolePermissionRepository::new(&test.db);
        let permissions = repo.get_for_roles(&[first.id, second.id]).await?;

        assert_eq!(
            permissions,
            vec![Permission::ViewApplication, Permission::AcceptApplication]
        );

        Ok(())
    }

    /// Expect a second identical write to change nothing
    #[tokio::test]
    async fn set_is_idempotent() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_seat_tables().build().await?;
        let role = test.seat().insert_role(1, "Recruiters").await?;
        test.seat()
            .insert_role_permission(role.id, Permission::ManageSettings)
            .await?;

        let repo = SeatRolePermissionRepository::new(&test.db);
        let desired = HashSet::from([Permission::ViewApplication, Permission::RejectApplication]);
        let first = repo.set_for_role(role.id, &desired).await?;
        let second = repo.set_for_role(role.id, &desired).await?;

        assert!(first);
        assert!(!second);
        let stored: HashSet<Permission> =
            repo.get_for_roles(&[role.id]).await?.into_iter().collect();
        assert_eq!(stored, desired);

        Ok(())
    }
}
