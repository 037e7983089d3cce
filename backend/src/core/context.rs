use crate::cfg;
use crate::core;

pub type ArcContext = std::sync::Arc<Context>;

#[derive(Clone)]
pub struct Context {
    pub settings: cfg::AppSettings,
    pub http_client: reqwest::Client,
    pub static_root: core::StaticRoot,
}

impl Context {
    #[must_use]
    pub fn new(http_client: reqwest::Client, settings: cfg::AppSettings) -> ArcContext {
        let static_root = core::StaticRoot::resolve(&settings.assets);
        Self {
            settings,
            http_client,
            static_root,
        }
        .into()
    }
}
