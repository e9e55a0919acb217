use serde::{Deserialize, Serialize};
use std::fs;

/// Process-wide configuration, loaded once at startup and never mutated.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Authentication configuration: signing secret, token lifetime and the
/// password-hash work factor. Read-only after initialization.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret. Overridable via the JWT_SECRET env var so the
    /// real secret stays out of checked-in config files.
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: i64,
    #[serde(default)]
    pub argon2: Argon2Config,
}

/// Argon2 work factor. Tune memory/iterations against login latency;
/// the defaults match the argon2 crate's recommended interactive profile.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    pub dir: String,
    pub max_file_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "./uploads".to_string(),
            max_file_bytes: 1_000_000,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        let mut config: AppConfig =
            serde_yaml::from_str(&content).expect("Failed to parse config yaml");

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }

        config
    }
}
