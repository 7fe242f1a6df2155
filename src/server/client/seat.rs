//! Client for the SeAT v2 API.

use reqwest::{header::ACCEPT, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::server::error::{seat::SeatError, Error};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeatRole {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct SeatRolesMeta {
    last_page: u32,
}

#[derive(Debug, Deserialize)]
struct SeatRolesResponse {
    data: Vec<SeatRole>,
    meta: SeatRolesMeta,
}

#[derive(Debug, Deserialize)]
struct SeatRoleDetails {
    #[serde(default)]
    members: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct SeatRoleDetailsResponse {
    data: SeatRoleDetails,
}

#[derive(Debug, Deserialize)]
struct SeatCharacterSheet {
    user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SeatCharacterSheetResponse {
    data: SeatCharacterSheet,
}

#[derive(Debug, Deserialize)]
struct SeatUser {
    main_character_id: Option<i64>,
}

/// Read-only access to SeAT roles, users and character sheets.
///
/// Every request carries the API token in the `x-token` header. A 401 from SeAT means the
/// token is wrong and is reported as [`SeatError::InvalidApplicationKey`].
#[derive(Clone)]
pub struct SeatClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl SeatClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("x-token", &self.token)
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(SeatError::InvalidApplicationKey.into());
        }

        Ok(response)
    }

    /// Fetches every role across all pages of `GET /api/v2/roles`
    pub async fn get_roles(&self) -> Result<Vec<SeatRole>, Error> {
        let mut roles = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .send(self.get("/api/v2/roles").query(&[("page", page)]))
                .await?
                .error_for_status()?;
            let body: SeatRolesResponse = response.json().await?;

            roles.extend(body.data);

            if page >= body.meta.last_page {
                break;
            }
            page += 1;
        }

        Ok(roles)
    }

    /// SeAT user IDs of the role's members
    pub async fn get_role_members(&self, seat_role_id: i64) -> Result<Vec<i64>, Error> {
        let response = self
            .send(self.get(&format!("/api/v2/roles/{}", seat_role_id)))
            .await?
            .error_for_status()?;
        let body: SeatRoleDetailsResponse = response.json().await?;

        Ok(body.data.members)
    }

    /// SeAT user the character is linked to, `None` when SeAT does not know the character
    pub async fn get_character_user_id(&self, character_id: i64) -> Result<Option<i64>, Error> {
        let response = self
            .send(self.get(&format!("/api/v2/character/sheet/{}", character_id)))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: SeatCharacterSheetResponse = response.error_for_status()?.json().await?;

        Ok(body.data.user_id)
    }

    /// EVE character ID of the SeAT user's main character
    pub async fn get_user_main_character_id(&self, seat_user_id: i64) -> Result<Option<i64>, Error> {
        let response = self
            .send(self.get(&format!("/api/v2/users/{}", seat_user_id)))
            .await?
            .error_for_status()?;
        let body: SeatUser = response.json().await?;

        Ok(body.main_character_id)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use recruit_test_utils::{constant::TEST_SEAT_TOKEN, prelude::*};

    use crate::server::{
        client::seat::{SeatClient, SeatRole},
        error::{seat::SeatError, Error},
    };

    fn client(test: &TestContext) -> SeatClient {
        SeatClient::new(reqwest::Client::new(), test.server_url(), TEST_SEAT_TOKEN)
    }

    /// Expect roles from every page to be collected in order
    #[tokio::test]
    async fn collects_roles_across_pages() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;
        let first = test
            .seat()
            .create_roles_page_endpoint(1, 2, &[(1, "Recruiters")], 1);
        let second = test
            .seat()
            .create_roles_page_endpoint(2, 2, &[(2, "Directors")], 1);

        let roles = client(&test).get_roles().await?;

        assert_eq!(
            roles,
            vec![
                SeatRole {
                    id: 1,
                    title: "Recruiters".to_string()
                },
                SeatRole {
                    id: 2,
                    title: "Directors".to_string()
                },
            ]
        );
        first.assert();
        second.assert();

        Ok(())
    }

    /// Expect a 404 character sheet to mean the character is not linked
    #[tokio::test]
    async fn unlinked_character_is_none() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;
        let mock = test
            .seat()
            .create_character_sheet_endpoint(95_000_001, None, 1);

        let result = client(&test).get_character_user_id(95_000_001).await?;

        assert_eq!(result, None);
        mock.assert();

        Ok(())
    }

    /// Expect a linked character sheet to return the SeAT user ID
    #[tokio::test]
    async fn linked_character_returns_user_id() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;
        let mock = test
            .seat()
            .create_character_sheet_endpoint(95_000_001, Some(12), 1);

        let result = client(&test).get_character_user_id(95_000_001).await?;

        assert_eq!(result, Some(12));
        mock.assert();

        Ok(())
    }

    /// Expect a 401 to surface as an invalid application key
    #[tokio::test]
    async fn unauthorized_is_invalid_key() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("GET", "/api/v2/roles/1")
                    .with_status(401)
                    .create()
            })
            .build()
            .await?;

        let result = client(&test).get_role_members(1).await;

        assert!(matches!(
            result,
            Err(Error::SeatError(SeatError::InvalidApplicationKey))
        ));
        test.assert_mocks();

        Ok(())
    }

    /// Expect the user endpoint to report the main character
    #[tokio::test]
    async fn reads_main_character() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("GET", "/api/v2/users/12")
                    .match_header("accept", Matcher::Exact("application/json".to_string()))
                    .with_status(200)
                    .with_header("content-type", "application/json")
                    .with_body(r#"{"id":12,"name":"seat user","main_character_id":95000001}"#)
                    .create()
            })
            .build()
            .await?;

        let result = client(&test).get_user_main_character_id(12).await?;

        assert_eq!(result, Some(95_000_001));
        test.assert_mocks();

        Ok(())
    }
}
