use std::env;

const DEFAULT_PORT: u16 = 8000;

/// Process-wide settings, read from the environment once at startup and
/// passed explicitly into the components that need them.
///
/// Missing credentials are reported as warnings here but do not abort
/// startup; the affected endpoint fails at request time instead.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API key for the Google Generative Language API.
    pub google_api_key: String,
    /// SMTP relay username, also used as the From address.
    pub smtp_username: String,
    /// App-specific SMTP password.
    pub smtp_password: String,
    /// HTTP listen port.
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        let settings = Self {
            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            smtp_username: env::var("EMAIL_USER").unwrap_or_default(),
            smtp_password: env::var("EMAIL_PASS").unwrap_or_default(),
            port: parse_port(env::var("PORT").ok()),
        };

        if settings.google_api_key.is_empty() {
            tracing::warn!("GOOGLE_API_KEY is not set; /chat-pdf requests will fail");
        }
        if settings.smtp_username.is_empty() || settings.smtp_password.is_empty() {
            tracing::warn!("EMAIL_USER or EMAIL_PASS is not set; /send-email requests will fail");
        }

        settings
    }
}

fn parse_port(value: Option<String>) -> u16 {
    value
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
