use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ats: AtsConfig,
    pub interview: InterviewConfig,
    pub email: EmailConfig,
    pub archive: ArchiveConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let ats = AtsConfig {
            base_url: env::var("ATS_BASE_URL")
                .unwrap_or_else(|_| "https://api.manatal.com/open/v3".to_string()),
            api_token: non_empty_var("ATS_API_TOKEN"),
        };

        let interview = InterviewConfig {
            base_url: env::var("INTERVIEW_BASE_URL")
                .unwrap_or_else(|_| "https://api.hireflix.com/v1".to_string()),
            api_key: non_empty_var("INTERVIEW_API_KEY"),
            default_position_id: non_empty_var("INTERVIEW_DEFAULT_POSITION"),
        };

        let email = EmailConfig {
            api_key: non_empty_var("EMAIL_API_KEY"),
            from_address: env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "recruiting@localhost".to_string()),
            app_url: env::var("APP_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        };

        let archive = ArchiveConfig {
            path: non_empty_var("APP_ARCHIVE_PATH").map(PathBuf::from),
            resume_dir: non_empty_var("APP_RESUME_DIR").map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ats,
            interview,
            email,
            archive,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the applicant-tracking system of record.
///
/// A missing token is not a load error: the API service falls back to its
/// in-memory directory so the pipeline stays usable offline and in CI.
#[derive(Debug, Clone)]
pub struct AtsConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

/// Connection settings for the video-interview platform.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub default_position_id: Option<String>,
}

/// Outbound email settings. `app_url` feeds the links embedded in
/// candidate-facing messages.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub from_address: String,
    pub app_url: String,
}

/// Operator file outputs: the appended questionnaire rows and the stored
/// resume uploads. Both fall back to in-memory stores when unset.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub path: Option<PathBuf>,
    pub resume_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
