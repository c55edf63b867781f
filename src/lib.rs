pub mod config;
pub mod error;
pub mod google;
pub mod logger;
pub mod models;
pub mod normalizer;
pub mod provider;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, GoogleConfig};
pub use error::{ProxyError, Result};
pub use google::GoogleClient;
pub use models::*;
pub use provider::ImageProvider;
