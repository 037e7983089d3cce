use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub port: u16,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub production: bool,

    /// Overrides the directives derived from `debug` when non-empty.
    #[serde(default)]
    pub log_directives: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: true,
            production: false,
            log_directives: String::new(),
        }
    }
}

impl ServerSettings {
    #[must_use]
    pub const fn worker_count(&self) -> usize {
        if self.production { 4 } else { 1 }
    }

    #[must_use]
    pub fn effective_log_directives(&self) -> String {
        if !self.log_directives.trim().is_empty() {
            return self.log_directives.clone();
        }
        if self.debug {
            "debug,tower_http=debug,axum=debug".to_string()
        } else {
            "info,tower_http=info,axum=info".to_string()
        }
    }

    #[must_use]
    pub const fn mode_name(&self) -> &'static str {
        if self.production { "production" } else { "development" }
    }
}
