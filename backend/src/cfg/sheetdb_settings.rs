use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SheetDbSettings {
    /// Empty means no upstream is configured and fixture data is served.
    #[serde(default)]
    pub api_id: String,

    #[serde(default)]
    pub base_url: String,
}

impl Default for SheetDbSettings {
    fn default() -> Self {
        Self {
            api_id: String::new(),
            base_url: "https://sheetdb.io/api/v1".to_string(),
        }
    }
}

impl SheetDbSettings {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_id.trim().is_empty()
    }

    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        let base = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/{}", self.api_id.trim()))
    }
}
