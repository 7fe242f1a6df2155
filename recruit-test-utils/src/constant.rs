//! Placeholder credentials used to build test ESI clients. None of these are real.

/// User agent sent with every mocked ESI request.
pub static TEST_USER_AGENT: &str =
    "Recruit/1.0 (contact@example.com; +https://github.com/autumn-order/recruit)";

pub static TEST_ESI_CLIENT_ID: &str = "esi_client_id";

pub static TEST_ESI_CLIENT_SECRET: &str = "esi_client_secret";

pub static TEST_CALLBACK_URL: &str = "http://localhost:8080/api/auth/callback";

/// API token the SeAT client is configured with in tests.
pub static TEST_SEAT_TOKEN: &str = "seat_api_token";

/// Frontend origin used when building redirects and webhook embed links in tests.
pub static TEST_FRONTEND_URL: &str = "http://localhost:5173";
