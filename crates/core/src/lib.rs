pub mod browser;
pub mod client;
pub mod config;
pub mod flow;
pub mod location;
pub mod platform;

// Re-export transit from the transit crate
pub use parada_transit as transit;

pub use browser::{BrowserError, StopBrowser};
pub use config::TransitConfig;
