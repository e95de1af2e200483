//! Model API key status.

use super::paint;
use crate::document::{mounts, SharedDocument};
use crate::markup::templates;
use minijinja::context;
use serde::Serialize;
use strum::{AsRefStr, Display};

/// Reported when neither the server nor the client has a working key.
pub const NO_VALID_KEY: &str = "No valid API key found";

/// Which side supplied the working key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KeySource {
    Server,
    Client,
}

/// Outcome of an API status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiAvailability {
    pub available: bool,
    pub source: Option<KeySource>,
    pub error: Option<String>,
    pub details: Option<String>,
}

impl ApiAvailability {
    pub fn available(source: KeySource) -> Self {
        Self {
            available: true,
            source: Some(source),
            error: None,
            details: None,
        }
    }

    /// No key works; `details` is the server's explanation.
    pub fn unavailable(details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            available: false,
            source: None,
            error: Some(NO_VALID_KEY.to_string()),
            details: (!details.is_empty()).then_some(details),
        }
    }

    /// The check itself failed.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            available: false,
            source: None,
            error: Some(error.into()),
            details: None,
        }
    }

    /// Status line shown next to the indicator.
    pub fn status_text(&self) -> &'static str {
        match (self.available, self.source, self.error.as_deref()) {
            (true, Some(KeySource::Client), _) => "Client API key connected",
            (true, _, _) => "Server API key connected",
            (false, _, Some(NO_VALID_KEY)) => "API key not configured",
            (false, _, _) => "Error checking API status",
        }
    }

    fn state(&self) -> &'static str {
        match (self.available, self.error.as_deref()) {
            (true, _) => "connected",
            (false, Some(NO_VALID_KEY)) => "disconnected",
            (false, _) => "error",
        }
    }
}

pub struct StatusPanel {
    document: SharedDocument,
}

impl StatusPanel {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }

    pub fn show(&self, availability: &ApiAvailability) {
        let details = match (availability.state(), &availability.details, &availability.error) {
            ("error", _, Some(error)) => Some(error.as_str()),
            (_, Some(details), _) => Some(details.as_str()),
            _ => None,
        };
        paint(
            &self.document,
            mounts::API_STATUS,
            templates::API_STATUS,
            context! {
                state => availability.state(),
                text => availability.status_text(),
                details,
            },
        );
    }
}
