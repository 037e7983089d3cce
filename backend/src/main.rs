#![deny(clippy::all)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::todo)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]

fn main() {
    app::run();
}


pub mod cfg {
    mod app_settings;
    mod asset_settings;
    mod server_settings;
    mod sheetdb_settings;
    mod storage_settings;

    pub use app_settings::*;
    pub use asset_settings::*;
    pub use server_settings::*;
    pub use sheetdb_settings::*;
    pub use storage_settings::*;
}

pub mod core {
    mod context;
    mod static_root;

    pub use context::*;
    pub use static_root::*;
}

pub mod routes {
    pub mod api;
    pub mod assets;
}

pub mod services {
    pub mod sheetdb;
    pub mod snapshot;
}

pub mod app {
    mod cli;
    mod router;
    mod server;

    pub use cli::*;
    pub use router::*;
    pub use server::*;
}
