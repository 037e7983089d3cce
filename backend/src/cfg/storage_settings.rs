use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub snapshot_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("frontend/src/data/sampleData.json"),
        }
    }
}
