use std::path::Path;

use axum_test::TestServer;

use crate::app;
use crate::cfg;
use crate::core;

/// Settings whose snapshot and asset directories all live under `dir`.
pub fn settings_in(dir: &Path) -> cfg::AppSettings {
    cfg::AppSettings {
        storage: cfg::StorageSettings {
            snapshot_path: dir.join("data").join("sampleData.json"),
        },
        assets: cfg::AssetSettings {
            build_dir: dir.join("build"),
            public_dir: dir.join("public"),
        },
        ..Default::default()
    }
}

pub fn create_test_server(settings: cfg::AppSettings) -> TestServer {
    let context = core::Context::new(reqwest::Client::new(), settings);
    let router = app::create_router(context);
    TestServer::new(router).unwrap()
}
