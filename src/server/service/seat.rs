//! Mirrors SeAT roles and their memberships into the local tables.

use std::collections::{HashMap, HashSet};

use futures::stream::{FuturesUnordered, TryStreamExt};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    client::seat::SeatClient,
    data::{
        seat::{
            role::SeatRoleRepository, role_permission::SeatRolePermissionRepository,
            role_user::SeatRoleUserRepository,
        },
        user::user::UserRepository,
    },
    error::Error,
};

/// Writes performed by a single mirror run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeatSyncSummary {
    pub roles_created: usize,
    pub roles_renamed: usize,
    pub roles_deleted: usize,
    pub memberships_added: usize,
    pub memberships_removed: usize,
}

impl SeatSyncSummary {
    /// Returns true if the run changed nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for SeatSyncSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Roles: {} created, {} renamed, {} deleted. Memberships: {} added, {} removed.",
            self.roles_created,
            self.roles_renamed,
            self.roles_deleted,
            self.memberships_added,
            self.memberships_removed
        )
    }
}

/// One-way mirror of the SeAT role directory.
///
/// SeAT calls are single attempt; any failure aborts the run. Writes only happen for actual
/// differences so a repeated run against unchanged data writes nothing.
pub struct SeatSyncService<'a> {
    db: &'a DatabaseConnection,
    seat_client: &'a SeatClient,
}

impl<'a> SeatSyncService<'a> {
    /// Creates a new instance of [`SeatSyncService`]
    pub fn new(db: &'a DatabaseConnection, seat_client: &'a SeatClient) -> Self {
        Self { db, seat_client }
    }

    /// Syncs roles first, then the memberships of every role now known locally.
    pub async fn sync(&self) -> Result<SeatSyncSummary, Error> {
        let mut summary = SeatSyncSummary::default();

        self.sync_roles(&mut summary).await?;
        self.sync_memberships(&mut summary).await?;

        Ok(summary)
    }

    async fn sync_roles(&self, summary: &mut SeatSyncSummary) -> Result<(), Error> {
        let upstream: HashMap<i64, String> = self
            .seat_client
            .get_roles()
            .await?
            .into_iter()
            .map(|role| (role.id, role.title))
            .collect();

        let local = SeatRoleRepository::new(self.db).get_all().await?;
        let local_ids: HashSet<i64> = local.iter().map(|role| role.seat_role_id).collect();

        let mut deleted = Vec::new();
        let mut renamed = Vec::new();
        for role in local {
            match upstream.get(&role.seat_role_id) {
                None => deleted.push(role.id),
                Some(title) if *title != role.name => {
                    let title = title.clone();
                    renamed.push((role, title));
                }
                Some(_) => {}
            }
        }

        let mut created: Vec<(i64, String)> = upstream
            .into_iter()
            .filter(|(id, _)| !local_ids.contains(id))
            .collect();
        created.sort_unstable_by_key(|(id, _)| *id);

        if deleted.is_empty() && renamed.is_empty() && created.is_empty() {
            return Ok(());
        }

        summary.roles_created = created.len();
        summary.roles_renamed = renamed.len();
        summary.roles_deleted = deleted.len();

        let txn = self.db.begin().await?;
        let role_repo = SeatRoleRepository::new(&txn);

        SeatRoleUserRepository::new(&txn)
            .delete_for_roles(&deleted)
            .await?;
        SeatRolePermissionRepository::new(&txn)
            .delete_for_roles(&deleted)
            .await?;
        role_repo.delete_many(&deleted).await?;

        role_repo.create_many(created).await?;
        for (role, title) in renamed {
            role_repo.rename(role, title).await?;
        }

        txn.commit().await?;

        Ok(())
    }

    async fn sync_memberships(&self, summary: &mut SeatSyncSummary) -> Result<(), Error> {
        let roles = SeatRoleRepository::new(self.db).get_all().await?;

        let members_by_role: Vec<(i32, Vec<i64>)> = roles
            .iter()
            .map(|role| async move {
                let members = self.seat_client.get_role_members(role.seat_role_id).await?;
                Ok::<_, Error>((role.id, members))
            })
            .collect::<FuturesUnordered<_>>()
            .try_collect()
            .await?;

        let seat_user_ids: Vec<i64> = members_by_role
            .iter()
            .flat_map(|(_, members)| members.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let local_users: HashMap<i64, i32> = UserRepository::new(self.db)
            .get_ids_by_seat_user_ids(&seat_user_ids)
            .await?
            .into_iter()
            .map(|(user_id, seat_user_id)| (seat_user_id, user_id))
            .collect();

        let desired: HashSet<(i32, i32)> = members_by_role
            .iter()
            .flat_map(|(role_id, members)| {
                members
                    .iter()
                    .filter_map(|seat_user_id| local_users.get(seat_user_id))
                    .map(|user_id| (*role_id, *user_id))
            })
            .collect();

        let existing = SeatRoleUserRepository::new(self.db).get_all().await?;
        let existing_pairs: HashSet<(i32, i32)> = existing
            .iter()
            .map(|membership| (membership.seat_role_id, membership.user_id))
            .collect();

        let removed: Vec<i32> = existing
            .iter()
            .filter(|membership| !desired.contains(&(membership.seat_role_id, membership.user_id)))
            .map(|membership| membership.id)
            .collect();
        let mut added: Vec<(i32, i32)> = desired
            .into_iter()
            .filter(|pair| !existing_pairs.contains(pair))
            .collect();
        added.sort_unstable();

        if removed.is_empty() && added.is_empty() {
            return Ok(());
        }

        summary.memberships_added = added.len();
        summary.memberships_removed = removed.len();

        let txn = self.db.begin().await?;
        let role_user_repo = SeatRoleUserRepository::new(&txn);

        role_user_repo.delete_many(&removed).await?;
        role_user_repo.create_many(added).await?;

        txn.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use recruit_test_utils::{constant::TEST_SEAT_TOKEN, prelude::*};
    use sea_orm::EntityTrait;

    use crate::server::{
        client::seat::SeatClient,
        service::seat::{SeatSyncService, SeatSyncSummary},
    };

    fn seat_client(test: &TestContext) -> SeatClient {
        SeatClient::new(reqwest::Client::new(), test.server_url(), TEST_SEAT_TOKEN)
    }

    /// Expect new roles and memberships of linked users to be mirrored
    #[tokio::test]
    async fn mirrors_roles_and_memberships() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_seat_tables()
            .with_user_for_character(95_000_001, 98000001)
            .with_user_for_character(95_000_002, 98000001)
            .build()
            .await?;
        test.user().link_seat_user(1, 501).await?;
        let roles = test
            .seat()
            .create_roles_page_endpoint(1, 1, &[(10, "Recruiters")], 1);
        // 502 is unknown locally and the second local user has no SeAT link
        let members = test.seat().create_role_detail_endpoint(10, &[501, 502], 1);

        let summary = SeatSyncService::new(&test.db, &seat_client(&test))
            .sync()
            .await?;

        assert_eq!(summary.roles_created, 1);
        assert_eq!(summary.memberships_added, 1);
        let memberships = entity::prelude::SeatRoleUser::find().all(&test.db).await?;
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].user_id, 1);
        roles.assert();
        members.assert();

        Ok(())
    }

    /// Expect a second run against unchanged data to write nothing
    #[tokio::test]
    async fn second_run_is_idempotent() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_seat_tables()
            .with_user_for_character(95_000_001, 98000001)
            .build()
            .await?;
        test.user().link_seat_user(1, 501).await?;
        let mocks = vec![
            test.seat()
                .create_roles_page_endpoint(1, 1, &[(10, "Recruiters"), (11, "Directors")], 2),
            test.seat().create_role_detail_endpoint(10, &[501], 2),
            test.seat().create_role_detail_endpoint(11, &[], 2),
        ];
        let seat_client = seat_client(&test);
        let service = SeatSyncService::new(&test.db, &seat_client);

        let first = service.sync().await?;
        let second = service.sync().await?;

        assert!(!first.is_empty());
        assert!(second.is_empty());
        assert_eq!(second, SeatSyncSummary::default());
        for mock in mocks {
            mock.assert();
        }

        Ok(())
    }

    /// Expect removed roles to be deleted with their memberships and drifted names updated
    #[tokio::test]
    async fn deletes_and_renames_roles() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_seat_tables()
            .with_user_for_character(95_000_001, 98000001)
            .build()
            .await?;
        test.user().link_seat_user(1, 501).await?;
        let stale = test.seat().insert_role(9, "Old Role").await?;
        test.seat().insert_role_user(stale.id, 1).await?;
        let kept = test.seat().insert_role(10, "Recruiter").await?;
        test.seat()
            .create_roles_page_endpoint(1, 1, &[(10, "Recruiters")], 1);
        test.seat().create_role_detail_endpoint(10, &[], 1);

        let summary = SeatSyncService::new(&test.db, &seat_client(&test))
            .sync()
            .await?;

        assert_eq!(summary.roles_deleted, 1);
        assert_eq!(summary.roles_renamed, 1);
        let roles = entity::prelude::SeatRole::find().all(&test.db).await?;
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, kept.id);
        assert_eq!(roles[0].name, "Recruiters");
        assert!(entity::prelude::SeatRoleUser::find()
            .all(&test.db)
            .await?
            .is_empty());

        Ok(())
    }
}
