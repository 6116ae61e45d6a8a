use crate::auth::jwt::JwtConfig;

/// Default request timeout. Syncing large playlists can take minutes.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `300`).
    pub request_timeout_secs: u64,
    /// Identity-provider token verification settings.
    pub jwt: JwtConfig,
    pub youtube: YouTubeConfig,
}

/// YouTube Data API settings.
#[derive(Clone)]
pub struct YouTubeConfig {
    /// Server-held API key. Never sent to callers.
    pub api_key: Option<String>,
    pub api_url: String,
}

impl std::fmt::Debug for YouTubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl YouTubeConfig {
    /// Load YouTube settings from the environment.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `YOUTUBE_API_KEY`      | unset (sync disabled)                     |
    /// | `YOUTUBE_API_BASE_URL` | `https://www.googleapis.com/youtube/v3`   |
    pub fn from_env() -> Self {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let api_url = std::env::var("YOUTUBE_API_BASE_URL")
            .unwrap_or_else(|_| academy_youtube::DEFAULT_API_URL.into());

        Self { api_key, api_url }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3000`     |
    /// | `REQUEST_TIMEOUT_SECS` | `300`      |
    ///
    /// See [`JwtConfig::from_env`] and [`YouTubeConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            youtube: YouTubeConfig::from_env(),
        }
    }
}
