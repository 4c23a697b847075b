use napi_derive::napi;

/// Configuration for the opportunity sync pipeline.
/// Passed from Node.js via `initSync()`.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Backend base URL (default: "http://localhost:8000")
    pub base_url: Option<String>,

    /// Minimum profit threshold forwarded to the backend (default: 0.001)
    pub min_profit: Option<f64>,

    /// Opportunity list path (default: "/api/arbitrage")
    pub list_path: Option<String>,

    /// Recompute trigger path (default: "/api/refresh-arbitrage")
    pub recompute_path: Option<String>,

    /// Per-request timeout in milliseconds (default: none)
    pub request_timeout_ms: Option<i64>,

    /// Kick off a load right after init (default: true)
    pub load_on_init: Option<bool>,

    /// Enable verbose tracing logs (default: false)
    pub verbose: Option<bool>,
}

impl SyncConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or("http://localhost:8000")
            .trim_end_matches('/')
    }

    pub fn min_profit(&self) -> f64 {
        self.min_profit.filter(|v| v.is_finite()).unwrap_or(0.001)
    }

    pub fn list_path(&self) -> &str {
        self.list_path.as_deref().unwrap_or("/api/arbitrage")
    }

    pub fn recompute_path(&self) -> &str {
        self.recompute_path
            .as_deref()
            .unwrap_or("/api/refresh-arbitrage")
    }

    pub fn request_timeout_ms(&self) -> Option<u64> {
        match self.request_timeout_ms {
            Some(ms) if ms > 0 => Some(ms as u64),
            _ => None, // no timeout
        }
    }

    pub fn load_on_init(&self) -> bool {
        self.load_on_init.unwrap_or(true)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert!((config.min_profit() - 0.001).abs() < 1e-12);
        assert_eq!(config.list_path(), "/api/arbitrage");
        assert_eq!(config.recompute_path(), "/api/refresh-arbitrage");
        assert_eq!(config.request_timeout_ms(), None);
        assert!(config.load_on_init());
        assert!(!config.verbose());
    }

    #[test]
    fn test_overrides() {
        let config = SyncConfig {
            base_url: Some("https://arb.example.com/".to_string()),
            min_profit: Some(0.02),
            request_timeout_ms: Some(2500),
            load_on_init: Some(false),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://arb.example.com");
        assert!((config.min_profit() - 0.02).abs() < 1e-12);
        assert_eq!(config.request_timeout_ms(), Some(2500));
        assert!(!config.load_on_init());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SyncConfig {
            min_profit: Some(f64::NAN),
            request_timeout_ms: Some(-5),
            ..Default::default()
        };
        assert!((config.min_profit() - 0.001).abs() < 1e-12);
        assert_eq!(config.request_timeout_ms(), None);
    }
}
