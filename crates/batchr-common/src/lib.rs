pub mod errors;
pub mod types;

pub use errors::{BatchrError, ConfigError};
pub use types::Color;

pub type Result<T> = std::result::Result<T, BatchrError>;
