use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote API; `/api/users` and `/api/analysis` hang off it.
    pub api_url: String,
    /// No timeout when unset: a hung request waits forever.
    pub timeout_secs: Option<u64>,
    /// Embed base64 image bytes in analysis requests.
    pub inline_photos: bool,
}

impl AppConfig {
    /// Reads the environment; an explicit `api_url` wins over `PHYSIQUE_API_URL`.
    pub fn load(api_url: Option<&str>) -> anyhow::Result<Self> {
        let api_url = match api_url {
            Some(url) => url.to_string(),
            None => std::env::var("PHYSIQUE_API_URL").context("PHYSIQUE_API_URL is not set")?,
        };
        Ok(Self {
            api_url: normalize_base_url(&api_url),
            timeout_secs: std::env::var("PHYSIQUE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok()),
            inline_photos: std::env::var("PHYSIQUE_INLINE_PHOTOS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: normalize_base_url(api_url),
            timeout_secs: None,
            inline_photos: false,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = AppConfig::with_api_url("http://localhost:3000/");
        assert_eq!(cfg.endpoint("/api/users"), "http://localhost:3000/api/users");
        assert_eq!(cfg.endpoint("api/analysis"), "http://localhost:3000/api/analysis");
    }

    #[test]
    fn defaults_have_no_timeout() {
        let cfg = AppConfig::with_api_url("http://x");
        assert!(cfg.timeout_secs.is_none());
        assert!(!cfg.inline_photos);
    }
}
