pub mod config;
pub mod endpoint;
pub mod error;
pub mod net;
pub mod pipeline;
pub mod wire;

pub use config::Settings;
pub use endpoint::Endpoint;
pub use error::{ClientError, ConfigError, ConnectionError};
pub use pipeline::Outcome;
