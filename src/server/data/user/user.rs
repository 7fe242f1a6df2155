use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::page_offset;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user with the character record `main_character_id` as main
    pub async fn create(
        &self,
        main_character_id: i32,
        seat_user_id: Option<i64>,
    ) -> Result<entity::recruit_user::Model, DbErr> {
        let user = entity::recruit_user::ActiveModel {
            seat_user_id: ActiveValue::Set(seat_user_id),
            main_character_id: ActiveValue::Set(main_character_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::recruit_user::Model>, DbErr> {
        entity::prelude::RecruitUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_seat_user_id(
        &self,
        seat_user_id: i64,
    ) -> Result<Option<entity::recruit_user::Model>, DbErr> {
        entity::prelude::RecruitUser::find()
            .filter(entity::recruit_user::Column::SeatUserId.eq(seat_user_id))
            .one(self.db)
            .await
    }

    /// Gets users along with their main character
    pub async fn get_many_with_main_character(
        &self,
        user_ids: &[i32],
    ) -> Result<
        Vec<(
            entity::recruit_user::Model,
            Option<entity::eve_character::Model>,
        )>,
        DbErr,
    > {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RecruitUser::find()
            .filter(entity::recruit_user::Column::Id.is_in(user_ids.iter().copied()))
            .find_also_related(entity::eve_character::Entity)
            .all(self.db)
            .await
    }

    /// Maps SeAT user IDs to local user IDs, ignoring users that are not linked to SeAT
    pub async fn get_ids_by_seat_user_ids(
        &self,
        seat_user_ids: &[i64],
    ) -> Result<Vec<(i32, i64)>, DbErr> {
        if seat_user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RecruitUser::find()
            .select_only()
            .column(entity::recruit_user::Column::Id)
            .column(entity::recruit_user::Column::SeatUserId)
            .filter(entity::recruit_user::Column::SeatUserId.is_in(seat_user_ids.iter().copied()))
            .into_tuple::<(i32, i64)>()
            .all(self.db)
            .await
    }

    /// Pages through user IDs ordered by ID, optionally restricted to `user_ids`
    ///
    /// # Returns
    /// The requested page of user IDs and the total number of matching users
    pub async fn list_ids(
        &self,
        user_ids: Option<&[i32]>,
        limit: u64,
        page: u64,
    ) -> Result<(Vec<i32>, u64), DbErr> {
        let mut query = entity::prelude::RecruitUser::find();

        if let Some(user_ids) = user_ids {
            query = query.filter(entity::recruit_user::Column::Id.is_in(user_ids.iter().copied()));
        }

        let total = query.clone().count(self.db).await?;

        let ids = query
            .select_only()
            .column(entity::recruit_user::Column::Id)
            .order_by_asc(entity::recruit_user::Column::Id)
            .offset(page_offset(limit, page))
            .limit(limit)
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        Ok((ids, total))
    }

    pub async fn set_seat_user_id(
        &self,
        user_id: i32,
        seat_user_id: i64,
    ) -> Result<Option<entity::recruit_user::Model>, DbErr> {
        let user = match self.get(user_id).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.seat_user_id = ActiveValue::Set(Some(seat_user_id));

        Ok(Some(user_am.update(self.db).await?))
    }

    pub async fn set_main_character(
        &self,
        user_id: i32,
        main_character_id: i32,
    ) -> Result<Option<entity::recruit_user::Model>, DbErr> {
        let user = match self.get(user_id).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if user.main_character_id == main_character_id {
            return Ok(Some(user));
        }

        let mut user_am = user.into_active_model();
        user_am.main_character_id = ActiveValue::Set(main_character_id);

        Ok(Some(user_am.update(self.db).await?))
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use recruit_test_utils::prelude::*;

        use crate::server::data::user::user::UserRepository;

        /// Expect success when creating a new user
        #[tokio::test]
        async fn creates_user() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let character = test.eve().insert_mock_character(95_000_001, 98000001).await?;

            let user_repo = UserRepository::new(&test.db);
            let user = user_repo.create(character.id, Some(7)).await?;

            assert_eq!(user.main_character_id, character.id);
            assert_eq!(user.seat_user_id, Some(7));

            Ok(())
        }

        /// Expect Error when the SeAT user ID is already linked to another user
        #[tokio::test]
        async fn fails_for_duplicate_seat_user() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let character = test.eve().insert_mock_character(95_000_001, 98000001).await?;
            test.user().insert_user(character.id, Some(7)).await?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.create(character.id, Some(7)).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get_ids_by_seat_user_ids {
        use recruit_test_utils::prelude::*;

        use crate::server::data::user::user::UserRepository;

        /// Expect only users linked to the requested SeAT IDs to be returned
        #[tokio::test]
        async fn maps_linked_users_only() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let (linked, _) = test
                .user()
                .insert_user_with_mock_character(95_000_001, 98000001)
                .await?;
            test.user()
                .insert_user_with_mock_character(95_000_002, 98000001)
                .await?;
            test.user().link_seat_user(linked.id, 10).await?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.get_ids_by_seat_user_ids(&[10, 11]).await?;

            assert_eq!(result, vec![(linked.id, 10)]);

            Ok(())
        }
    }

    mod list_ids {
        use recruit_test_utils::prelude::*;

        use crate::server::data::user::user::UserRepository;

        /// Expect the second page to hold the remaining user and the total to count all users
        #[tokio::test]
        async fn pages_users_by_id() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_user_tables()
                .with_user_for_character(95_000_001, 98000001)
                .with_user_for_character(95_000_002, 98000001)
                .with_user_for_character(95_000_003, 98000001)
                .build()
                .await?;

            let user_repo = UserRepository::new(&test.db);
            let (ids, total) = user_repo.list_ids(None, 2, 2).await?;

            assert_eq!(ids, vec![3]);
            assert_eq!(total, 3);

            Ok(())
        }

        /// Expect the filter to restrict both the page and the total
        #[tokio::test]
        async fn restricts_to_filter() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_user_tables()
                .with_user_for_character(95_000_001, 98000001)
                .with_user_for_character(95_000_002, 98000001)
                .build()
                .await?;

            let user_repo = UserRepository::new(&test.db);
            let (ids, total) = user_repo.list_ids(Some(&[2]), 10, 1).await?;

            assert_eq!(ids, vec![2]);
            assert_eq!(total, 1);

            Ok(())
        }
    }

    mod set_main_character {
        use recruit_test_utils::prelude::*;

        use crate::server::data::user::user::UserRepository;

        /// Expect Ok(None) when the user does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let character = test.eve().insert_mock_character(95_000_001, 98000001).await?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.set_main_character(1, character.id).await?;

            assert!(result.is_none());

            Ok(())
        }

        /// Expect the main character to change
        #[tokio::test]
        async fn changes_main_character() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let (user, _) = test
                .user()
                .insert_user_with_mock_character(95_000_001, 98000001)
                .await?;
            let other = test.eve().insert_mock_character(95_000_002, 98000001).await?;

            let user_repo = UserRepository::new(&test.db);
            let updated = user_repo
                .set_main_character(user.id, other.id)
                .await?
                .expect("user exists");

            assert_eq!(updated.main_character_id, other.id);

            Ok(())
        }
    }
}
