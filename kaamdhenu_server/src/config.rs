use std::env;

use log::*;

const DEFAULT_KD_HOST: &str = "127.0.0.1";
const DEFAULT_KD_PORT: u16 = 5000;
const DEFAULT_KD_DATABASE_URL: &str = "sqlite://data/kaamdhenu.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_KD_HOST.to_string(),
            port: DEFAULT_KD_PORT,
            database_url: DEFAULT_KD_DATABASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("KD_HOST").ok().unwrap_or_else(|| DEFAULT_KD_HOST.into());
        let port = env::var("KD_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for KD_PORT. {e} Using the default, {DEFAULT_KD_PORT}, instead.");
                    DEFAULT_KD_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_KD_PORT);
        let database_url = env::var("KD_DATABASE_URL").unwrap_or_else(|_| {
            info!("🪛️ KD_DATABASE_URL is not set. Using the default, {DEFAULT_KD_DATABASE_URL}.");
            DEFAULT_KD_DATABASE_URL.to_string()
        });
        Self { host, port, database_url }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, "sqlite://data/kaamdhenu.db");
    }
}
