pub mod app;
pub mod config;
pub mod headless;
pub mod logging;
pub mod views;

pub use app::run_interactive;
pub use config::AppConfig;
