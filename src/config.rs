use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::api::projects::DEFAULT_API_VERSION;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Runtime configuration for one deployment invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_key: String,
    pub account_id: Option<String>,
    pub api_version: String,
    pub project_file: PathBuf,
    pub dry_run: bool,
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let api_base_url = env
        .get_var("API_BASE_URL")
        .ok_or_else(|| anyhow!("API_BASE_URL env var must be set"))?;

    let api_key = env
        .get_var("API_KEY")
        .ok_or_else(|| anyhow!("API_KEY must be provided via Secret env"))?;

    let project_file: PathBuf = env
        .get_var("PROJECT_FILE")
        .ok_or_else(|| anyhow!("PROJECT_FILE env var must point at the project manifest"))?
        .into();

    let account_id = env.get_var("ACCOUNT_ID");

    let api_version = env
        .get_var("API_VERSION")
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    let dry_run = env
        .get_var("DRY_RUN")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false);

    Ok(Config {
        api_base_url,
        api_key,
        account_id,
        api_version,
        project_file,
        dry_run,
    })
}
