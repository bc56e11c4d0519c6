use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 9000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Server settings, layered as defaults < `bookshelf.toml` < `BOOKSHELF_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Fallback tracing filter, used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(File::with_name("bookshelf").required(false))
            .add_source(Environment::with_prefix("BOOKSHELF").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
