use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub wikipedia: WikipediaConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

/// Google Custom Search credentials. Both must be present for searches to run.
#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    pub google_api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

// Keeps the API key out of logs
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "***"))
            .field("search_engine_id", &self.search_engine_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SearchConfig {
    pub fn is_configured(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.google_api_key) && present(&self.search_engine_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikipediaConfig {
    pub api_url: String,
    pub thumbnail_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per minute across the API; 0 disables limiting
    pub requests_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
                cors_allowed_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            search: SearchConfig {
                google_api_key: None,
                search_engine_id: None,
                base_url: "https://www.googleapis.com".to_string(),
                timeout_secs: 10,
            },
            wikipedia: WikipediaConfig {
                api_url: "https://en.wikipedia.org/w/api.php".to_string(),
                thumbnail_size: 300,
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: 60,
            },
        }
    }
}

/// First non-empty value among the given variable names
fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| defaults.server.port.to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.server.cors_allowed_origins),
            },
            search: SearchConfig {
                google_api_key: first_var(&["GOOGLE_API_KEY", "VITE_GOOGLE_API_KEY"]),
                search_engine_id: first_var(&[
                    "GOOGLE_SEARCH_ENGINE_ID",
                    "VITE_GOOGLE_SEARCH_ENGINE_ID",
                ]),
                base_url: env::var("GOOGLE_SEARCH_BASE_URL").unwrap_or(defaults.search.base_url),
                timeout_secs: env::var("SEARCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| defaults.search.timeout_secs.to_string())
                    .parse()?,
            },
            wikipedia: WikipediaConfig {
                api_url: env::var("WIKIPEDIA_API_URL").unwrap_or(defaults.wikipedia.api_url),
                thumbnail_size: env::var("WIKIPEDIA_THUMBNAIL_SIZE")
                    .unwrap_or_else(|_| defaults.wikipedia.thumbnail_size.to_string())
                    .parse()?,
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| defaults.rate_limit.requests_per_minute.to_string())
                    .parse()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.base_url, "https://www.googleapis.com");
        assert_eq!(config.wikipedia.thumbnail_size, 300);
        assert!(!config.search.is_configured());
    }

    #[test]
    fn test_search_requires_both_credentials() {
        let mut search = Config::default().search;
        search.google_api_key = Some("key".to_string());
        assert!(!search.is_configured());

        search.search_engine_id = Some("   ".to_string());
        assert!(!search.is_configured());

        search.search_engine_id = Some("cx-123".to_string());
        assert!(search.is_configured());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let mut search = Config::default().search;
        search.google_api_key = Some("super-secret".to_string());
        let rendered = format!("{:?}", search);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
