use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AssetSettings {
    /// Production build output, preferred when present.
    #[serde(default)]
    pub build_dir: PathBuf,

    #[serde(default)]
    pub public_dir: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("frontend/build"),
            public_dir: PathBuf::from("frontend/public"),
        }
    }
}
