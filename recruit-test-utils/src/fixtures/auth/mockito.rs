use mockito::Mock;

use crate::fixtures::auth::{
    factory::{mock_jwt_claims, mock_jwt_keys, mock_jwt_token},
    AuthFixtures,
};

impl<'a> AuthFixtures<'a> {
    /// Registers `GET /oauth/jwks` and `POST /v2/oauth/token` so an SSO code exchange
    /// yields a valid token for `character_id` owned by `owner_hash`.
    pub fn create_jwt_endpoints(&mut self, character_id: i64, owner_hash: &str) -> Vec<Mock> {
        let claims = mock_jwt_claims(character_id, owner_hash);

        let jwks_endpoint = self
            .setup
            .server
            .mock("GET", "/oauth/jwks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_jwt_keys()).unwrap())
            .create();

        let token_endpoint = self
            .setup
            .server
            .mock("POST", "/v2/oauth/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_jwt_token(&claims)).unwrap())
            .create();

        vec![jwks_endpoint, token_endpoint]
    }
}
