use std::path::{Component, Path, PathBuf};

use crate::cfg;

pub const ENTRY_DOCUMENT: &str = "index.html";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticRootKind {
    Build,
    Public,
}

/// Directory the SPA assets are served from, chosen once at startup.
#[derive(Clone, Debug)]
pub struct StaticRoot {
    pub dir: PathBuf,
    pub kind: StaticRootKind,
}

impl StaticRoot {
    #[must_use]
    pub fn resolve(settings: &cfg::AssetSettings) -> Self {
        if settings.build_dir.is_dir() {
            Self { dir: settings.build_dir.clone(), kind: StaticRootKind::Build }
        } else {
            Self { dir: settings.public_dir.clone(), kind: StaticRootKind::Public }
        }
    }

    #[must_use]
    pub fn entry_document(&self) -> PathBuf {
        self.dir.join(ENTRY_DOCUMENT)
    }

    /// Maps a request path (without the leading slash) to an existing file under the root.
    /// Anything that would escape the root never matches.
    #[must_use]
    pub fn find_file(&self, relative: &str) -> Option<PathBuf> {
        if relative.is_empty() {
            return None;
        }
        let relative = Path::new(relative);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        let candidate = self.dir.join(relative);
        candidate.is_file().then_some(candidate)
    }
}
