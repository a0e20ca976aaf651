use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// NDJSON file that accepted submissions are appended to.
    pub store_path: PathBuf,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SURVEY_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_HOST: {e}"))?;

        let port: u16 = env_or("SURVEY_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_PORT: {e}"))?;

        let store_path = PathBuf::from(env_or("SURVEY_STORE_PATH", "survey.ndjson"));
        if store_path.as_os_str().is_empty() {
            return Err("SURVEY_STORE_PATH must not be empty".to_string());
        }

        let max_body_size: usize = env_or("SURVEY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("SURVEY_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            store_path,
            max_body_size,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
