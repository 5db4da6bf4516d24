use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// gita.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port the API listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// PEM certificate; TLS is enabled when both this and `tls_key` are set
    #[serde(default)]
    pub tls_cert: Option<PathBuf>,
    /// PEM private key
    #[serde(default)]
    pub tls_key: Option<PathBuf>,
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Per-request timeout
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    /// Pause after each fetch during `populate`
    #[serde(default = "default_populate_delay_secs")]
    pub populate_delay_secs: u64,
    /// Pause after each call during `enhance`
    #[serde(default = "default_enhance_delay_secs")]
    pub enhance_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Append log output to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Rust builder image
    #[serde(default = "default_builder_image")]
    pub base_image: String,
    /// Runtime base image
    #[serde(default = "default_runtime_image")]
    pub runtime_image: String,
    /// Cargo Chef version
    #[serde(default = "default_cargo_chef_version")]
    pub cargo_chef_version: String,
    /// OS compiler toolchain installed by the toolchain recipe
    #[serde(default = "default_toolchain_packages")]
    pub toolchain_packages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Repository name prefix; the release tag is appended
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,
    #[serde(default = "default_image_tag")]
    pub image_tag: String,
    /// Target platforms for the multi-arch build
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    /// Dockerfile used by the release build
    #[serde(default = "default_release_dockerfile")]
    pub dockerfile: String,
    /// GitHub secret holding the registry username
    #[serde(default = "default_username_secret")]
    pub username_secret: String,
    /// GitHub secret holding the registry access token
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            tls_cert: None,
            tls_key: None,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_secs: default_gemini_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            populate_delay_secs: default_populate_delay_secs(),
            enhance_delay_secs: default_enhance_delay_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_image: default_builder_image(),
            runtime_image: default_runtime_image(),
            cargo_chef_version: default_cargo_chef_version(),
            toolchain_packages: default_toolchain_packages(),
        }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            image_prefix: default_image_prefix(),
            image_tag: default_image_tag(),
            platforms: default_platforms(),
            dockerfile: default_release_dockerfile(),
            username_secret: default_username_secret(),
            token_secret: default_token_secret(),
        }
    }
}

impl GitaConfig {
    /// Load from the given file, or return defaults if it does not exist.
    pub fn load(config_path: &Path) -> crate::Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }
}

impl ServerConfig {
    /// Certificate and key paths when both are configured.
    pub fn tls_files(&self) -> Option<(&Path, &Path)> {
        Some((self.tls_cert.as_deref()?, self.tls_key.as_deref()?))
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("geetha_telugu.db")
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_owned()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_owned()
}

fn default_gemini_timeout_secs() -> u64 {
    60
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_owned()
}

fn default_populate_delay_secs() -> u64 {
    10
}

fn default_enhance_delay_secs() -> u64 {
    15
}

fn default_log_filter() -> String {
    "info".to_owned()
}

fn default_builder_image() -> String {
    "rust:1.88-bookworm".to_owned()
}

fn default_runtime_image() -> String {
    "debian:bookworm-slim".to_owned()
}

fn default_cargo_chef_version() -> String {
    "0.1.68".to_owned()
}

fn default_toolchain_packages() -> Vec<String> {
    vec!["build-essential".to_owned(), "pkg-config".to_owned()]
}

fn default_image_prefix() -> String {
    "gita-server".to_owned()
}

fn default_image_tag() -> String {
    "latest".to_owned()
}

fn default_platforms() -> Vec<String> {
    vec!["linux/arm64".to_owned()]
}

fn default_release_dockerfile() -> String {
    "Dockerfile".to_owned()
}

fn default_username_secret() -> String {
    "DOCKERHUB_USERNAME".to_owned()
}

fn default_token_secret() -> String {
    "DOCKERHUB_TOKEN".to_owned()
}
