pub mod errors;
pub mod events;
pub mod types;

pub use errors::{BridgeError, ConfigError, ShellError};
pub use events::{EventBus, ShellEvent};
pub use types::Rgba;

pub type Result<T> = std::result::Result<T, ShellError>;
