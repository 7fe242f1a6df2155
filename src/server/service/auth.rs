//! EVE SSO login and the user resolution that follows a successful callback.

use dioxus_logger::tracing;
use eve_esi::model::oauth2::AuthenticationData;
use oauth2::TokenResponse;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    client::seat::SeatClient,
    data::{
        eve::character::CharacterRepository,
        user::{user::UserRepository, user_character::UserCharacterRepository},
    },
    error::Error,
    model::auth::SsoCharacter,
    service::eve::EveService,
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    esi_client: &'a eve_esi::Client,
    seat_client: &'a SeatClient,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(
        db: &'a DatabaseConnection,
        esi_client: &'a eve_esi::Client,
        seat_client: &'a SeatClient,
    ) -> Self {
        Self {
            db,
            esi_client,
            seat_client,
        }
    }

    /// Builds the EVE SSO login URL along with the CSRF state to store in session.
    ///
    /// No ESI scopes are requested; login only identifies the character.
    pub fn login_url(&self) -> Result<AuthenticationData, Error> {
        let scopes = eve_esi::ScopeBuilder::new().build();

        Ok(self.esi_client.oauth2().login_url(scopes)?)
    }

    /// Exchanges the authorization code and validates the returned JWT.
    ///
    /// # Returns
    /// - `Ok(SsoCharacter)` - Character ID, name and owner hash from the token claims
    /// - `Err(Error::EsiError)` - Token exchange or JWT validation failed
    pub async fn authenticate(&self, code: &str) -> Result<SsoCharacter, Error> {
        let token = self.esi_client.oauth2().get_token(code).await?;

        let claims = self
            .esi_client
            .oauth2()
            .validate_token(token.access_token().secret().to_string())
            .await?;

        let character_id = claims.character_id()?;

        Ok(SsoCharacter {
            character_id,
            character_name: claims.name,
            owner_hash: claims.owner,
        })
    }

    /// Completes a login: authenticates the code and resolves the user it belongs to.
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the user to store in session
    pub async fn handle_callback(&self, code: &str) -> Result<i32, Error> {
        let character = self.authenticate(code).await?;

        let user = self.get_or_create_user(character).await?;

        Ok(user.id)
    }

    /// Finds the user owning `character`, linking through SeAT or creating one when needed.
    ///
    /// - A character already owned under the same owner hash resolves to its owner, who is
    ///   linked to SeAT if that hasn't happened yet.
    /// - Otherwise, when SeAT knows the character, it joins the local user carrying that SeAT
    ///   user ID, or a new user is created with it.
    /// - Otherwise a new user is created with the character as main.
    pub async fn get_or_create_user(
        &self,
        character: SsoCharacter,
    ) -> Result<entity::recruit_user::Model, Error> {
        let character_repo = CharacterRepository::new(self.db);
        let user_character_repo = UserCharacterRepository::new(self.db);
        let user_repo = UserRepository::new(self.db);

        let ownership = match character_repo
            .get_by_character_id(character.character_id)
            .await?
        {
            Some(record) => user_character_repo.get_by_character_id(record.id).await?,
            None => None,
        };

        if let Some(ownership) = ownership
            .as_ref()
            .filter(|ownership| ownership.owner_hash == character.owner_hash)
        {
            let user = user_repo.get(ownership.user_id).await?.ok_or_else(|| {
                Error::InternalError(format!(
                    "User ID {} owning character ID {} not found",
                    ownership.user_id, character.character_id
                ))
            })?;

            if user.seat_user_id.is_some() {
                return Ok(user);
            }

            return self.link_existing_user(user, &character).await;
        }

        let eve_character = EveService::new(self.db, self.esi_client)
            .get_or_create_character(
                character.character_id,
                Some(character.character_name.clone()),
            )
            .await?;

        let seat_user_id = self
            .seat_client
            .get_character_user_id(character.character_id)
            .await?;

        let seat_user = match seat_user_id {
            Some(seat_user_id) => user_repo.get_by_seat_user_id(seat_user_id).await?,
            None => None,
        };

        let txn = self.db.begin().await?;
        let user = match seat_user {
            Some(user) => user,
            None => {
                let user = UserRepository::new(&txn)
                    .create(eve_character.id, seat_user_id)
                    .await?;

                tracing::debug!(
                    user_id = user.id,
                    character_id = character.character_id,
                    "Created user for character"
                );

                user
            }
        };
        assign_ownership(&txn, user.id, eve_character.id, &character.owner_hash).await?;
        txn.commit().await?;

        if user.seat_user_id.is_some() {
            return self.sync_main_character(user).await;
        }

        Ok(user)
    }

    /// Links a user without a SeAT user ID through the character they just logged in with.
    ///
    /// If another local user already carries the SeAT user ID, the character moves over to
    /// them and that user is returned instead.
    async fn link_existing_user(
        &self,
        user: entity::recruit_user::Model,
        character: &SsoCharacter,
    ) -> Result<entity::recruit_user::Model, Error> {
        let Some(seat_user_id) = self
            .seat_client
            .get_character_user_id(character.character_id)
            .await?
        else {
            return Ok(user);
        };

        let user_repo = UserRepository::new(self.db);

        let user = match user_repo.get_by_seat_user_id(seat_user_id).await? {
            Some(seat_user) => {
                let eve_character = CharacterRepository::new(self.db)
                    .get_by_character_id(character.character_id)
                    .await?
                    .ok_or_else(|| {
                        Error::InternalError(format!(
                            "Owned character ID {} not found",
                            character.character_id
                        ))
                    })?;

                let txn = self.db.begin().await?;
                assign_ownership(&txn, seat_user.id, eve_character.id, &character.owner_hash)
                    .await?;
                txn.commit().await?;

                seat_user
            }
            None => user_repo
                .set_seat_user_id(user.id, seat_user_id)
                .await?
                .ok_or_else(|| {
                    Error::InternalError(format!("User ID {} disappeared while linking", user.id))
                })?,
        };

        self.sync_main_character(user).await
    }

    /// Makes the user's main character match the one chosen in SeAT.
    async fn sync_main_character(
        &self,
        user: entity::recruit_user::Model,
    ) -> Result<entity::recruit_user::Model, Error> {
        let Some(seat_user_id) = user.seat_user_id else {
            return Ok(user);
        };

        let Some(main_character_id) = self
            .seat_client
            .get_user_main_character_id(seat_user_id)
            .await?
        else {
            return Ok(user);
        };

        let main_character = EveService::new(self.db, self.esi_client)
            .get_or_create_character(main_character_id, None)
            .await?;

        if main_character.id == user.main_character_id {
            return Ok(user);
        }

        let user_id = user.id;

        UserRepository::new(self.db)
            .set_main_character(user_id, main_character.id)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!("User ID {} disappeared while syncing main", user_id))
            })
    }
}

/// Records `user_id` as owner of the character record, moving any previous ownership.
async fn assign_ownership<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    character_record_id: i32,
    owner_hash: &str,
) -> Result<(), Error> {
    let user_character_repo = UserCharacterRepository::new(db);

    match user_character_repo
        .get_by_character_id(character_record_id)
        .await?
    {
        Some(existing) => {
            if existing.user_id != user_id || existing.owner_hash != owner_hash {
                user_character_repo
                    .update(existing.id, user_id, owner_hash.to_string())
                    .await?;
            }
        }
        None => {
            user_character_repo
                .create(user_id, character_record_id, owner_hash.to_string())
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use recruit_test_utils::{constant::TEST_SEAT_TOKEN, prelude::*};
    use sea_orm::EntityTrait;

    use crate::server::{
        client::seat::SeatClient, model::auth::SsoCharacter, service::auth::AuthService,
    };

    fn sso_character(character_id: i64, owner_hash: &str) -> SsoCharacter {
        SsoCharacter {
            character_id,
            character_name: format!("Character {}", character_id),
            owner_hash: owner_hash.to_string(),
        }
    }

    fn seat_client(test: &TestContext) -> SeatClient {
        SeatClient::new(reqwest::Client::new(), test.server_url(), TEST_SEAT_TOKEN)
    }

    /// Expect a login URL carrying a CSRF state
    #[tokio::test]
    async fn builds_login_url() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;
        let seat = seat_client(&test);

        let login = AuthService::new(&test.db, &test.esi_client, &seat).login_url()?;

        assert!(!login.state.is_empty());
        assert!(login.login_url.contains(&login.state));

        Ok(())
    }

    /// Expect the JWT claims to be returned after the code exchange
    #[tokio::test]
    async fn authenticates_code() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_jwt_endpoints(95_000_001, "owner_hash")
            .build()
            .await?;
        let seat = seat_client(&test);

        let character = AuthService::new(&test.db, &test.esi_client, &seat)
            .authenticate("code")
            .await?;

        assert_eq!(character.character_id, 95_000_001);
        assert_eq!(character.character_name, "Character 95000001");
        assert_eq!(character.owner_hash, "owner_hash");

        Ok(())
    }

    /// Expect an owned, linked character to resolve to its user without any upstream call
    #[tokio::test]
    async fn returns_existing_linked_user() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_user_tables().build().await?;
        let (user, _) = test
            .user()
            .insert_user_with_mock_character(95_000_001, 98785281)
            .await?;
        test.user().link_seat_user(user.id, 5).await?;
        let seat = seat_client(&test);

        let resolved = AuthService::new(&test.db, &test.esi_client, &seat)
            .get_or_create_user(sso_character(95_000_001, "owner_hash_95000001"))
            .await?;

        assert_eq!(resolved.id, user.id);

        Ok(())
    }

    /// Expect an unknown character unknown to SeAT to become a new user's main
    #[tokio::test]
    async fn creates_new_user() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_user_tables()
            .with_mock_corporation(98000001)
            .with_character_affiliation_endpoint(
                vec![factory::mock_character_affiliation(95_000_001, 98000001)],
                1,
            )
            .build()
            .await?;
        let sheet = test
            .seat()
            .create_character_sheet_endpoint(95_000_001, None, 1);
        let seat = seat_client(&test);

        let user = AuthService::new(&test.db, &test.esi_client, &seat)
            .get_or_create_user(sso_character(95_000_001, "hash"))
            .await?;

        assert!(user.seat_user_id.is_none());
        let ownerships = entity::prelude::RecruitUserCharacter::find()
            .all(&test.db)
            .await?;
        assert_eq!(ownerships.len(), 1);
        assert_eq!(ownerships[0].user_id, user.id);
        assert_eq!(ownerships[0].character_id, user.main_character_id);
        sheet.assert();
        test.assert_mocks();

        Ok(())
    }

    /// Expect a character SeAT links to an existing local user to join that user
    #[tokio::test]
    async fn attaches_character_to_seat_user() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_user_tables()
            .with_mock_corporation(98000001)
            .with_character_affiliation_endpoint(
                vec![factory::mock_character_affiliation(95_000_002, 98000001)],
                1,
            )
            .build()
            .await?;
        let (existing, main) = test
            .user()
            .insert_user_with_mock_character(95_000_001, 98785281)
            .await?;
        test.user().link_seat_user(existing.id, 5).await?;
        let sheet = test
            .seat()
            .create_character_sheet_endpoint(95_000_002, Some(5), 1);
        let seat_user = test.seat().create_user_endpoint(5, 95_000_001, 1);
        let seat = seat_client(&test);

        let user = AuthService::new(&test.db, &test.esi_client, &seat)
            .get_or_create_user(sso_character(95_000_002, "alt_hash"))
            .await?;

        assert_eq!(user.id, existing.id);
        assert_eq!(user.main_character_id, main.id);
        let ownerships = entity::prelude::RecruitUserCharacter::find()
            .all(&test.db)
            .await?;
        assert_eq!(ownerships.len(), 2);
        assert!(ownerships.iter().all(|o| o.user_id == existing.id));
        sheet.assert();
        seat_user.assert();

        Ok(())
    }

    /// Expect a new user linked to SeAT to take the main character chosen in SeAT
    #[tokio::test]
    async fn creates_seat_user_with_seat_main() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_user_tables()
            .with_mock_character(95_000_009, 98785281)
            .with_mock_corporation(98000001)
            .with_character_affiliation_endpoint(
                vec![factory::mock_character_affiliation(95_000_001, 98000001)],
                1,
            )
            .build()
            .await?;
        test.seat()
            .create_character_sheet_endpoint(95_000_001, Some(8), 1);
        test.seat().create_user_endpoint(8, 95_000_009, 1);
        let seat = seat_client(&test);

        let user = AuthService::new(&test.db, &test.esi_client, &seat)
            .get_or_create_user(sso_character(95_000_001, "hash"))
            .await?;

        assert_eq!(user.seat_user_id, Some(8));
        let main = entity::prelude::EveCharacter::find_by_id(user.main_character_id)
            .one(&test.db)
            .await?;
        assert_eq!(main.map(|c| c.character_id), Some(95_000_009));

        Ok(())
    }

    /// Expect an owned but unlinked user to be linked once SeAT knows the character
    #[tokio::test]
    async fn links_existing_user_to_seat() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_user_tables().build().await?;
        let (user, _) = test
            .user()
            .insert_user_with_mock_character(95_000_001, 98785281)
            .await?;
        test.seat()
            .create_character_sheet_endpoint(95_000_001, Some(3), 1);
        test.seat().create_user_endpoint(3, 95_000_001, 1);
        let seat = seat_client(&test);

        let resolved = AuthService::new(&test.db, &test.esi_client, &seat)
            .get_or_create_user(sso_character(95_000_001, "owner_hash_95000001"))
            .await?;

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.seat_user_id, Some(3));
        assert_eq!(resolved.main_character_id, user.main_character_id);

        Ok(())
    }
}
