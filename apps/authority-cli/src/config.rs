use std::path::PathBuf;

use anyhow::{Context, Result};
use platform_authz::InMemoryDirectory;

const DEFAULT_FIXTURE: &str = "apps/authority-cli/fixtures/directory.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub fixture: PathBuf,
    pub log_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let fixture = std::env::var("AUTHORITY_FIXTURE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FIXTURE));
        let log_filter = non_empty_env("AUTHORITY_LOG");
        let otlp_endpoint = non_empty_env("OTLP_ENDPOINT");

        Ok(Self {
            fixture,
            log_filter,
            otlp_endpoint,
        })
    }

    pub fn with_fixture(mut self, fixture: Option<PathBuf>) -> Self {
        if let Some(path) = fixture {
            self.fixture = path;
        }
        self
    }

    pub fn load_directory(&self) -> Result<InMemoryDirectory> {
        let raw = std::fs::read_to_string(&self.fixture)
            .with_context(|| format!("reading fixture {}", self.fixture.display()))?;
        InMemoryDirectory::from_json(&raw)
            .with_context(|| format!("parsing fixture {}", self.fixture.display()))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
