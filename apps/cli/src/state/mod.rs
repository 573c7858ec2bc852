//! # CLI State
//!
//! Everything a command needs: the open session and the notices raised
//! while it ran.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::CliResult;
use stockcart_engine::adapters::{CollectingNotifier, ConsoleNotifier};
use stockcart_engine::{CartConfig, CartEngine, NotificationSink, Session};

/// Prints notices to stderr as they happen and keeps them for the exit code.
#[derive(Debug, Default)]
pub struct CliNotifier {
    console: ConsoleNotifier,
    collected: CollectingNotifier,
}

impl CliNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.collected.messages()
    }
}

impl NotificationSink for CliNotifier {
    fn warn(&self, message: &str) {
        self.console.warn(message);
        self.collected.warn(message);
    }
}

pub struct AppState {
    session: Session,
    notices: Arc<CliNotifier>,
}

impl AppState {
    /// Loads configuration and opens the session.
    ///
    /// An explicit `--config` file must load; without one, a broken default
    /// config falls back to defaults.
    pub async fn open(config_path: Option<PathBuf>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => CartConfig::load(Some(path))?,
            None => CartConfig::load_or_default(None),
        };
        Self::from_config(&config).await
    }

    pub async fn from_config(config: &CartConfig) -> CliResult<Self> {
        let notices = Arc::new(CliNotifier::default());
        let session = Session::open(config, notices.clone()).await?;
        debug!("Session opened");

        Ok(AppState { session, notices })
    }

    pub fn engine(&self) -> &CartEngine {
        self.session.engine()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Notices raised so far.
    pub fn notices(&self) -> Vec<String> {
        self.notices.messages()
    }

    pub async fn close(self) {
        self.session.close().await;
    }
}
