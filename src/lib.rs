pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod scene;
pub mod ui;

pub use app::AppState;
pub use config::VizConfig;
pub use error::{ConfigError, FetchError};
