//! Asset resolution for the shell's content renderer.
//!
//! Provides:
//! - An immutable [`AssetBundle`] of packaged frontend content
//! - An ordered [`FallbackRoute`] chain for paths the bundle cannot satisfy
//! - The [`AssetResolver`] that serves every renderer content request
//!
//! The resolver speaks `http` request/response types (the same types a
//! webview host hands to a custom-protocol handler), so it plugs directly
//! into the host's content hook.

pub mod bundle;
pub mod fallback;
pub mod mime;
pub mod resolver;

pub use bundle::{AssetBundle, AssetBundleBuilder, AssetEntry};
pub use fallback::{FallbackHandler, FallbackRoute, RoutePattern};
pub use resolver::AssetResolver;
