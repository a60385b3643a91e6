//! The Casement shell: lifecycle orchestration and host wiring.
//!
//! A [`Shell`] bundles everything the window host needs:
//! - a content hook backed by `casement-assets`
//! - a frontend-call hook backed by `casement-bridge`
//! - lifecycle notification hooks driven by a [`LifecycleController`]
//! - a [`MenuCommandTable`] the host builds its native menu from
//!
//! The host is an external collaborator: it calls the fixed entry points
//! on [`Shell`] and observes [`ShellEvent`]s (notably `QuitRequested`,
//! its cue to issue a close request).

pub mod context;
pub mod lifecycle;
pub mod menu;
pub mod shell;

pub use casement_common::{EventBus, ShellEvent};
pub use context::LifecycleContext;
pub use lifecycle::{CloseDecision, LifecycleController, LifecycleStage};
pub use menu::{MenuCommand, MenuCommandTable};
pub use shell::{QuitHandle, Shell, ShellBuilder};
