//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | YLLURE_PLATFORM | native | `native` or `web` |
//! | YLLURE_API_BASE_URL | per platform | Backend base URL |
//! | YLLURE_API_TOKEN | - | Bearer credential |
//! | YLLURE_REQUEST_TIMEOUT_SECS | 10 | Request timeout, `0` means default |
//! | YLLURE_ENVIRONMENT | development | Environment tag |
//! | YLLURE_USE_MOCK_DATA | true | Fall back to mock data on failure |
//! | YLLURE_FORCE_MOCK | false | Always serve mock data, never dial |
//! | YLLURE_MOCK_LATENCY_MS | 500 | Simulated mock latency |
//! | YLLURE_AUTH_MODE | demo | `demo` or `remote` |

use std::str::FromStr;
use std::time::Duration;

/// Default backend for native builds
pub const DEFAULT_NATIVE_BASE_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default simulated latency of the mock responder
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 500;

/// Where the client runs; decides the default base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Desktop / device build talking to an absolute host
    #[default]
    Native,
    /// Browser build served next to the API (relative base)
    Web,
}

impl Platform {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Platform::Native => DEFAULT_NATIVE_BASE_URL,
            Platform::Web => "",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Platform::Native),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// How the session store authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Any non-empty credentials produce a local session
    #[default]
    Demo,
    /// Delegate login/logout/validation to the backend
    Remote,
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" | "mock" => Ok(AuthMode::Demo),
            "remote" => Ok(AuthMode::Remote),
            other => Err(format!("unknown auth mode: {}", other)),
        }
    }
}

/// Client configuration for connecting to the catalog backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000"); empty on web
    pub base_url: String,

    /// Bearer credential
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Environment tag: development | staging | production
    pub environment: String,

    /// Serve mock data when the backend call fails
    pub use_mock_data: bool,

    /// Serve mock data without dialling the backend at all
    pub force_mock: bool,

    /// Simulated mock latency in milliseconds
    pub mock_latency_ms: u64,

    /// Authentication mode of the session store
    pub auth_mode: AuthMode,

    pub platform: Platform,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            environment: "development".to_string(),
            use_mock_data: true,
            force_mock: false,
            mock_latency_ms: DEFAULT_MOCK_LATENCY_MS,
            auth_mode: AuthMode::Demo,
            platform: Platform::Native,
        }
    }

    /// Configuration with the platform's default base URL
    pub fn for_platform(platform: Platform) -> Self {
        let mut config = Self::new(platform.default_base_url());
        config.platform = platform;
        config
    }

    /// Load from environment variables
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let platform: Platform = env_parse("YLLURE_PLATFORM").unwrap_or_default();
        let mut config = Self::for_platform(platform);

        if let Ok(base_url) = std::env::var("YLLURE_API_BASE_URL") {
            config.base_url = base_url;
        }
        config.token = std::env::var("YLLURE_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        config.timeout = env_parse::<u64>("YLLURE_REQUEST_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if let Ok(environment) = std::env::var("YLLURE_ENVIRONMENT") {
            config.environment = environment;
        }
        config.use_mock_data = env_parse("YLLURE_USE_MOCK_DATA").unwrap_or(true);
        config.force_mock = env_parse("YLLURE_FORCE_MOCK").unwrap_or(false);
        config.mock_latency_ms =
            env_parse("YLLURE_MOCK_LATENCY_MS").unwrap_or(DEFAULT_MOCK_LATENCY_MS);
        config.auth_mode = env_parse("YLLURE_AUTH_MODE").unwrap_or_default();
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout; `0` restores the default
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = if seconds == 0 { DEFAULT_TIMEOUT_SECS } else { seconds };
        self
    }

    /// Enable or disable the mock fallback
    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.use_mock_data = enabled;
        self
    }

    /// Always serve mock data
    pub fn with_force_mock(mut self, force: bool) -> Self {
        self.force_mock = force;
        self
    }

    pub fn with_mock_latency(mut self, millis: u64) -> Self {
        self.mock_latency_ms = millis;
        self
    }

    pub fn with_auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = mode;
        self
    }

    /// Zero never reaches the HTTP client
    pub fn timeout_duration(&self) -> Duration {
        match self.timeout {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_platform(Platform::Native)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
