//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use casement_common::Rgba;
use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Options the shell hands to the window host at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    /// Window width in logical pixels (valid range: 200-10000).
    pub width: u32,
    /// Window height in logical pixels (valid range: 200-10000).
    pub height: u32,
    pub resizable: bool,
    pub fullscreen: bool,
    pub frameless: bool,
    /// Create the window hidden; the host shows it once content is ready.
    pub start_hidden: bool,
    /// Hide instead of closing when the user dismisses the window.
    pub hide_on_close: bool,
    pub background: Rgba,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Casement".into(),
            width: 1040,
            height: 768,
            resizable: true,
            fullscreen: false,
            frameless: false,
            start_hidden: false,
            hide_on_close: false,
            background: Rgba::default(),
        }
    }
}

/// Logging directive for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// EnvFilter directive, e.g. `casement=debug`.
    pub level: String,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "casement=info".into(),
        }
    }
}

/// Top-level shell configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window: WindowOptions,
    pub logging: LoggingOptions,
}
