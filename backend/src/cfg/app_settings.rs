use std::{env, net::Ipv6Addr, path::Path};

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cfg;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AppSettings {
    #[serde(default)]
    pub server: cfg::ServerSettings,

    #[serde(default)]
    pub sheetdb: cfg::SheetDbSettings,

    #[serde(default)]
    pub storage: cfg::StorageSettings,

    #[serde(default)]
    pub assets: cfg::AssetSettings,
}

impl AppSettings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let app_run_env = Self::get_app_run_env();
        let config_path = Self::get_config_path();
        let mut builder = config::Config::builder();

        // Layer 0: Set defaults from AppSettings::default()
        let default_settings = Self::default();
        let default_toml = toml::to_string(&default_settings)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize defaults: {e}")))?;
        builder = builder.add_source(File::from_str(&default_toml, config::FileFormat::Toml));

        // Layer 1: Add default configuration from files
        let default_config_path = config_path.join("configs.default.toml");
        if default_config_path.exists() {
            builder = builder.add_source(File::from(default_config_path));
        }

        // Layer 2: Add environment-specific config
        let env_config_path = config_path.join(format!("configs.{app_run_env}.toml"));
        if env_config_path.exists() {
            builder = builder.add_source(File::from(env_config_path));
        }

        // Layer 3: Add local config overrides
        let local_config_path = config_path.join("configs.local.toml");
        if local_config_path.exists() {
            builder = builder.add_source(File::from(local_config_path));
        }

        // Layer 4: Override with prefixed environment variables
        // Use APP_SERVER__PORT, APP_SHEETDB__BASE_URL, etc.
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

        // Layer 5: The plain variables the deployment scripts already set
        builder = builder
            .set_override_option("sheetdb.api_id", env::var("SHEETDB_API_ID").ok())?
            .set_override_option("server.host", env::var("HOST").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("server.debug", env::var("DEBUG").ok().map(|v| parse_debug_flag(&v)))?
            .set_override_option("server.production", env::var("PRODUCTION").ok().map(|v| parse_production_flag(&v)))?;

        builder.build()?.try_deserialize::<Self>()
    }

    #[must_use]
    pub fn get_server_address(&self) -> String {
        let host = &self.server.host;
        if host.parse::<Ipv6Addr>().is_ok() {
            format!("[{host}]:{}", self.server.port)
        } else {
            format!("{host}:{}", self.server.port)
        }
    }

    /// Selects which `configs.{env}.toml` file is layered in.
    #[must_use]
    pub fn get_app_run_env() -> &'static str {
        let production = env::var("PRODUCTION").is_ok_and(|v| parse_production_flag(&v));
        if production { "production" } else { "development" }
    }

    #[must_use]
    pub fn get_config_path() -> &'static Path {
        Path::new(".")
    }

    #[must_use]
    pub fn get_config_full_path() -> String {
        let config_path = Self::get_config_path();
        config_path
            .canonicalize()
            .ok()
            .unwrap_or_else(|| config_path.to_path_buf())
            .to_string_lossy()
            .to_string()
    }
}

/// `DEBUG` accepts `true`, `1` or `t`, case-insensitively.
#[must_use]
pub fn parse_debug_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "t")
}

/// `PRODUCTION` is only enabled by a literal `true`, case-insensitively.
#[must_use]
pub fn parse_production_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
