//! Server configuration from environment variables.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BOOK_TAG: &str = "MAIN";

/// Settings for the HTTP server binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PORT`, default 8080.
    pub port: u16,
    /// `BOOK_TAG`, default `MAIN`.
    pub book_tag: String,
}

impl ServerConfig {
    /// Reads `PORT` and `BOOK_TAG`. Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("BOOK_TAG").ok())
    }

    fn from_vars(port: Option<String>, book_tag: Option<String>) -> Self {
        let port = port
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let book_tag = book_tag
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BOOK_TAG.to_string());
        Self { port, book_tag }
    }

    /// Bind address, all interfaces.
    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            book_tag: DEFAULT_BOOK_TAG.to_string(),
        }
    }
}
