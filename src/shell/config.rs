use serde::Deserialize;

use crate::shared::inbound::cron_guard::CronSettings;

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Remote document store project; the in memory store is used when absent.
    #[serde(default)]
    pub store_project_id: Option<String>,
    #[serde(default = "default_dataset")]
    pub store_dataset: String,
    #[serde(default)]
    pub store_api_token: Option<String>,
    #[serde(default = "default_api_version")]
    pub store_api_version: String,
    #[serde(default = "default_base_url")]
    pub app_base_url: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(skip)]
    pub cron: CronSettings,
}

impl Settings {
    /// Read settings from the environment, after loading `.env` when one exists.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect::<Vec<_>>())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)> + Clone,
    {
        let mut settings: Settings = envy::from_iter(vars.clone())?;
        settings.cron = envy::from_iter(vars)?;
        Ok(settings)
    }
}
