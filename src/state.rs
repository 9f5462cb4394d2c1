use std::sync::Arc;

use crate::core::config::Settings;
use crate::llm::{Embedder, GeminiClient, Generator};
use crate::mail::{Mailer, SmtpMailer};

/// Application state shared across all routes.
///
/// Read-only after startup: the pipeline keeps no state between requests,
/// so handlers never need locking.
pub struct AppState {
    pub settings: Settings,
    pub embedder: Arc<dyn Embedder>,
    pub generator: Arc<dyn Generator>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Wires the live service clients from the process settings.
    pub fn initialize(settings: Settings) -> anyhow::Result<Arc<Self>> {
        let gemini = Arc::new(GeminiClient::new(settings.google_api_key.clone())?);
        let mailer = Arc::new(SmtpMailer::new(
            settings.smtp_username.clone(),
            settings.smtp_password.clone(),
        )?);

        Ok(Arc::new(Self {
            settings,
            embedder: gemini.clone(),
            generator: gemini,
            mailer,
        }))
    }
}
