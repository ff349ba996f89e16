use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow, ensure};
use reqwest::Url;

pub const DEFAULT_PAGE_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_INTERNAL_API_HOST: &str = "haproxy";
pub const DEFAULT_FILE_LOG_FILTER: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Raw backend origin; `None` means same-origin relative requests.
    pub api_url: Option<String>,
    pub page_origin: String,
    pub internal_api_host: String,
    pub log_dir: Option<PathBuf>,
    pub file_log_filter: String,
}

impl ClientSettings {
    pub fn from_env() -> Result<Self> {
        // Load .env if present, but do not fail if file does not exist.
        let _ = dotenvy::dotenv();

        Self::from_source(|name| env::var(name).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_optional = |name: &str| {
            lookup(name).and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            })
        };

        let api_url = read_optional("API_URL");

        let page_origin =
            read_optional("PAGE_ORIGIN").unwrap_or_else(|| DEFAULT_PAGE_ORIGIN.to_owned());
        Url::parse(&page_origin)
            .map_err(|error| anyhow!("PAGE_ORIGIN `{page_origin}` is not an absolute URL: {error}"))?;
        let page_origin = page_origin.trim_end_matches('/').to_owned();

        let internal_api_host = lookup("INTERNAL_API_HOST")
            .map(|value| value.trim().to_owned())
            .unwrap_or_else(|| DEFAULT_INTERNAL_API_HOST.to_owned());
        ensure!(
            !internal_api_host.is_empty(),
            "INTERNAL_API_HOST cannot be empty"
        );

        let log_dir = read_optional("TODO_DESK_LOG_DIR").map(PathBuf::from);
        let file_log_filter = read_optional("TODO_DESK_FILE_LOG")
            .unwrap_or_else(|| DEFAULT_FILE_LOG_FILTER.to_owned());

        Ok(Self {
            api_url,
            page_origin,
            internal_api_host,
            log_dir,
            file_log_filter,
        })
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(value) = api_url {
            let trimmed = value.trim();
            self.api_url = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        }
        self
    }
}
