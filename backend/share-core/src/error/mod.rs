pub mod config;
pub mod open_tab;
pub mod share;

pub use config::ConfigError;
pub use open_tab::OpenTabError;
pub use share::ShareError;
