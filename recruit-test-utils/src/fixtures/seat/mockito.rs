//! SeAT API endpoints registered on the mock server.
//!
//! Bodies are built with `serde_json::json!` so the harness does not depend on the client's
//! response types.

use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{constant::TEST_SEAT_TOKEN, fixtures::seat::SeatFixtures};

impl<'a> SeatFixtures<'a> {
    /// `GET /api/v2/roles?page={page}` returning `(id, title)` pairs.
    pub fn create_roles_page_endpoint(
        &mut self,
        page: u32,
        last_page: u32,
        roles: &[(i64, &str)],
        expected_requests: usize,
    ) -> Mock {
        let data: Vec<_> = roles
            .iter()
            .map(|(id, title)| json!({ "id": id, "title": title, "description": "", "logo": "" }))
            .collect();

        self.setup
            .server
            .mock("GET", "/api/v2/roles")
            .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
            .match_header("x-token", TEST_SEAT_TOKEN)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": data,
                    "meta": { "current_page": page, "last_page": last_page }
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// `GET /api/v2/roles/{seat_role_id}` listing `members` as SeAT user IDs.
    pub fn create_role_detail_endpoint(
        &mut self,
        seat_role_id: i64,
        members: &[i64],
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/api/v2/roles/{}", seat_role_id);

        self.setup
            .server
            .mock("GET", url.as_str())
            .match_header("x-token", TEST_SEAT_TOKEN)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": {
                        "title": "",
                        "description": "",
                        "logo": "",
                        "permissions": [],
                        "members": members,
                        "squads": []
                    }
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// `GET /api/v2/character/sheet/{character_id}`; `None` answers 404 (character not linked).
    pub fn create_character_sheet_endpoint(
        &mut self,
        character_id: i64,
        seat_user_id: Option<i64>,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/api/v2/character/sheet/{}", character_id);
        let mock = self
            .setup
            .server
            .mock("GET", url.as_str())
            .match_header("x-token", TEST_SEAT_TOKEN);

        let mock = match seat_user_id {
            Some(user_id) => mock
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "data": { "user_id": user_id } }).to_string()),
            None => mock.with_status(404),
        };

        mock.expect(expected_requests).create()
    }

    /// `GET /api/v2/users/{seat_user_id}` reporting `main_character_id`.
    pub fn create_user_endpoint(
        &mut self,
        seat_user_id: i64,
        main_character_id: i64,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/api/v2/users/{}", seat_user_id);

        self.setup
            .server
            .mock("GET", url.as_str())
            .match_header("x-token", TEST_SEAT_TOKEN)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": seat_user_id,
                    "name": "seat user",
                    "active": true,
                    "associated_character_ids": [main_character_id],
                    "main_character_id": main_character_id
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }
}
