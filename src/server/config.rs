use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub user_agent: String,
    pub esi_client_id: String,
    pub esi_client_secret: String,
    pub esi_callback_url: String,
    pub database_url: String,
    pub valkey_url: String,
    /// Origin of the web frontend, used for redirects, CORS and webhook links
    pub frontend_url: String,
    pub seat_url: String,
    pub seat_api_token: String,
    /// Character that always resolves to the Admin permission
    pub admin_character_id: Option<i64>,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let application_name = required("APPLICATION_NAME")?;
        let contact_email = required("CONTACT_EMAIL")?;

        let admin_character_id = match optional("APPLICATION_ADMIN_CHARACTER_ID") {
            Some(value) => Some(value.parse::<i64>().map_err(|e| ConfigError::InvalidEnvValue {
                var: "APPLICATION_ADMIN_CHARACTER_ID".to_string(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            user_agent: format!("{} ({})", application_name, contact_email),
            esi_client_id: required("ESI_CLIENT_ID")?,
            esi_client_secret: required("ESI_CLIENT_SECRET")?,
            esi_callback_url: required("ESI_CALLBACK_URL")?,
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            frontend_url: required("FRONTEND_URL")?.trim_end_matches('/').to_string(),
            seat_url: required("SEAT_URL")?.trim_end_matches('/').to_string(),
            seat_api_token: required("SEAT_API_TOKEN")?,
            admin_character_id,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Unset and empty variables are both treated as absent.
fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
