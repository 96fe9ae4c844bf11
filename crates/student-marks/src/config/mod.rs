use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Settings for both the store server and the command-line client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let cors_origins = parse_origins(&env::var("APP_CORS_ORIGINS").unwrap_or_default())?;

        let base_url = env::var("MARKS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                cors_origins,
            },
            client: ClientConfig::new(base_url)?,
            telemetry: TelemetryConfig {
                log_level: env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the store. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Where the collection client sends its requests.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().to_string();
        if !is_http_url(&base_url) {
            return Err(ConfigError::InvalidApiUrl { value: base_url });
        }
        Ok(Self { base_url })
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Comma-separated origins; blanks between commas are skipped.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let origin = origin.trim_end_matches('/');
            if is_http_url(origin) {
                Ok(origin.to_string())
            } else {
                Err(ConfigError::InvalidCorsOrigin {
                    value: origin.to_string(),
                })
            }
        })
        .collect()
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidApiUrl { value: String },
    InvalidCorsOrigin { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidApiUrl { value } => {
                write!(f, "MARKS_API_URL must be an http(s) URL, got '{value}'")
            }
            ConfigError::InvalidCorsOrigin { value } => {
                write!(f, "APP_CORS_ORIGINS entries must be http(s) origins, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidApiUrl { .. }
            | ConfigError::InvalidCorsOrigin { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    const VARS: [&str; 5] = [
        "APP_HOST",
        "APP_PORT",
        "APP_CORS_ORIGINS",
        "APP_LOG_LEVEL",
        "MARKS_API_URL",
    ];

    fn reset_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_point_client_and_server_at_port_5000() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.client.base_url, DEFAULT_API_URL);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn localhost_binds_loopback() {
        let server = ServerConfig {
            host: "LOCALHOST".to_string(),
            port: 5050,
            cors_origins: Vec::new(),
        };
        let addr = server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 5050));
    }

    #[test]
    fn api_url_override_is_respected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MARKS_API_URL", "  http://backend:5000 ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.client.base_url, "http://backend:5000");
        reset_env();
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let origins = parse_origins(" http://localhost:3000/, ,https://marks.example.edu ")
            .expect("origins parse");
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://marks.example.edu"]
        );
    }

    #[test]
    fn rejects_invalid_port_api_url_and_origin() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "seventy");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));

        reset_env();
        env::set_var("MARKS_API_URL", "localhost:5000");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidApiUrl { .. })
        ));

        reset_env();
        env::set_var("APP_CORS_ORIGINS", "localhost:3000");
        match AppConfig::load() {
            Err(ConfigError::InvalidCorsOrigin { value }) => assert_eq!(value, "localhost:3000"),
            other => panic!("expected invalid origin, got {other:?}"),
        }
        reset_env();
    }
}
