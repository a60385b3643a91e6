//! Shell assembly: one value carrying everything the host drives.

use std::sync::Arc;

use http::{Request, Response};
use serde_json::Value;
use tokio::sync::broadcast;

use casement_assets::{AssetBundle, AssetResolver, FallbackRoute};
use casement_bridge::{BoundObject, BoundObjectTable, MethodBindingBridge};
use casement_common::{BridgeError, EventBus, ShellEvent};
use casement_config::ShellConfig;

use crate::lifecycle::{CloseDecision, LifecycleController, LifecycleStage};
use crate::menu::MenuCommandTable;
use crate::LifecycleContext;

/// Cloneable handle that issues the explicit quit command.
///
/// Publishing `QuitRequested` is the host's cue to run a close request
/// through [`Shell::close_requested`]; the close handler still gets its
/// chance to veto. Menu closures capture one of these during setup.
#[derive(Clone)]
pub struct QuitHandle {
    events: Arc<EventBus>,
}

impl QuitHandle {
    pub fn request_quit(&self) {
        tracing::debug!("quit command issued");
        self.events.publish(ShellEvent::QuitRequested);
    }
}

/// The assembled application shell.
///
/// `Shell` is `Send + Sync`: asset resolution and bridge lookups are
/// read-only after construction, and lifecycle transitions serialize
/// internally.
pub struct Shell {
    config: ShellConfig,
    resolver: AssetResolver,
    bridge: MethodBindingBridge,
    menu: MenuCommandTable,
    lifecycle: LifecycleController,
    events: Arc<EventBus>,
}

impl Shell {
    pub fn builder(config: ShellConfig) -> ShellBuilder {
        ShellBuilder {
            config,
            bundle: AssetBundle::builder().build(),
            fallback: FallbackRoute::new(),
            table: BoundObjectTable::new(),
            menu: MenuCommandTable::new(),
            events: Arc::new(EventBus::default()),
            lifecycle: None,
        }
    }

    // -----------------------------------------------------------------
    // Host content hook
    // -----------------------------------------------------------------

    /// Serve one renderer content request.
    pub fn serve(&self, request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        self.resolver.resolve(request)
    }

    // -----------------------------------------------------------------
    // Host frontend-call hook
    // -----------------------------------------------------------------

    /// Invoke a bound method with an already-decoded argument payload.
    pub fn invoke(&self, object: &str, method: &str, args: &Value) -> Result<Value, BridgeError> {
        self.bridge.invoke(object, method, args)
    }

    /// Raw JSON in, raw JSON out: the host's frontend-call hook.
    pub fn invoke_json(&self, raw: &str) -> String {
        self.bridge.dispatch_json(raw)
    }

    // -----------------------------------------------------------------
    // Host lifecycle hooks
    // -----------------------------------------------------------------

    pub fn notify_started(&self) {
        self.lifecycle.notify_started();
    }

    pub fn notify_ready(&self) {
        self.lifecycle.notify_ready();
    }

    pub fn close_requested(&self) -> CloseDecision {
        self.lifecycle.close_requested()
    }

    /// Programmatic quit, veto included.
    pub fn request_quit(&self) -> CloseDecision {
        self.lifecycle.request_quit()
    }

    pub fn notify_shutdown(&self) {
        self.lifecycle.notify_shutdown();
    }

    // -----------------------------------------------------------------
    // Menu
    // -----------------------------------------------------------------

    /// Dispatch a native menu command by id. Publishes the command as a
    /// shell event when a handler ran.
    pub fn dispatch_menu(&self, id: &str) -> bool {
        let handled = self.menu.dispatch(id);
        if handled {
            self.events.publish(ShellEvent::MenuCommand(id.to_string()));
        }
        handled
    }

    /// The command table, for host menu construction.
    pub fn menu(&self) -> &MenuCommandTable {
        &self.menu
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn stage(&self) -> LifecycleStage {
        self.lifecycle.stage()
    }

    pub fn context(&self) -> &LifecycleContext {
        self.lifecycle.context()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.events.subscribe()
    }

    pub fn quit_handle(&self) -> QuitHandle {
        QuitHandle {
            events: Arc::clone(&self.events),
        }
    }
}

/// Assembles a [`Shell`]. All registration happens here; the built
/// shell's bundle, bound objects, and menu are immutable.
pub struct ShellBuilder {
    config: ShellConfig,
    bundle: AssetBundle,
    fallback: FallbackRoute,
    table: BoundObjectTable,
    menu: MenuCommandTable,
    events: Arc<EventBus>,
    lifecycle: Option<LifecycleController>,
}

impl ShellBuilder {
    /// The packaged frontend bundle.
    pub fn assets(mut self, bundle: AssetBundle) -> Self {
        self.bundle = bundle;
        self
    }

    /// Register a fallback handler for paths the bundle cannot satisfy.
    /// Registration order is match order.
    pub fn route<F>(mut self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + Send + Sync + 'static,
    {
        self.fallback = self.fallback.route(pattern, handler);
        self
    }

    /// Expose a backend object to the frontend.
    pub fn bind(mut self, object: BoundObject) -> Self {
        self.table.bind(object);
        self
    }

    /// Register a native menu command.
    pub fn menu_command<F>(mut self, id: &str, title: &str, accelerator: Option<&str>, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.menu.register(id, title, accelerator, handler);
        self
    }

    /// Handle for menu closures that need to issue the quit command.
    pub fn quit_handle(&self) -> QuitHandle {
        QuitHandle {
            events: Arc::clone(&self.events),
        }
    }

    pub fn on_start(mut self, hook: impl FnMut(&LifecycleContext) + Send + 'static) -> Self {
        self.controller().on_start(hook);
        self
    }

    pub fn on_ready(mut self, hook: impl FnMut(&LifecycleContext) + Send + 'static) -> Self {
        self.controller().on_ready(hook);
        self
    }

    pub fn on_close_request(
        mut self,
        hook: impl FnMut(&LifecycleContext) -> CloseDecision + Send + 'static,
    ) -> Self {
        self.controller().on_close_request(hook);
        self
    }

    pub fn on_shutdown(mut self, hook: impl FnMut(&LifecycleContext) + Send + 'static) -> Self {
        self.controller().on_shutdown(hook);
        self
    }

    pub fn build(mut self) -> Shell {
        let lifecycle = self
            .lifecycle
            .take()
            .unwrap_or_else(|| LifecycleController::new(Arc::clone(&self.events)));
        tracing::info!(
            assets = self.bundle.len(),
            objects = self.table.len(),
            menu_commands = self.menu.len(),
            "shell assembled"
        );
        Shell {
            config: self.config,
            resolver: AssetResolver::new(self.bundle, self.fallback),
            bridge: MethodBindingBridge::new(self.table),
            menu: self.menu,
            lifecycle,
            events: self.events,
        }
    }

    fn controller(&mut self) -> &mut LifecycleController {
        let events = Arc::clone(&self.events);
        self.lifecycle
            .get_or_insert_with(|| LifecycleController::new(events))
    }
}
