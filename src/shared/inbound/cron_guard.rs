// Gate in front of the scheduled job endpoints.
//
// Calls must carry `Authorization: Bearer <CRON_SECRET>`. Development environments skip
// the check. A production deployment without a configured secret refuses every call.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::shared::core::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CronSettings {
    #[serde(default)]
    pub cron_secret: Option<String>,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default)]
    pub pause_scheduled_jobs: bool,
}

fn default_app_env() -> String {
    "production".to_string()
}

impl Default for CronSettings {
    fn default() -> Self {
        Self {
            cron_secret: None,
            app_env: default_app_env(),
            pause_scheduled_jobs: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronGate {
    Run,
    /// Jobs are paused by configuration; respond without doing any work.
    Paused,
}

pub fn check(settings: &CronSettings, headers: &HeaderMap) -> Result<CronGate, ApplicationError> {
    if settings.app_env != "development" {
        let Some(secret) = settings.cron_secret.as_deref().filter(|s| !s.is_empty()) else {
            return Err(ApplicationError::Unauthorized("cron secret not configured".into()));
        };
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        if !presented.is_some_and(|token| matches_secret(token, secret)) {
            return Err(ApplicationError::Unauthorized("invalid cron credentials".into()));
        }
    }
    if settings.pause_scheduled_jobs {
        return Ok(CronGate::Paused);
    }
    Ok(CronGate::Run)
}

/// Compares without short-circuiting on the first differing byte.
fn matches_secret(presented: &str, secret: &str) -> bool {
    bool::from(presented.as_bytes().ct_eq(secret.as_bytes()))
}
