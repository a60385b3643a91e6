//! Native-menu command dispatch.
//!
//! The host builds its platform menu from [`MenuCommandTable::commands`]
//! and calls [`MenuCommandTable::dispatch`] when an item fires. Unknown
//! identifiers are a logged no-op: user-facing paths favor availability
//! over strict failure, unlike the (programmatic) bridge.

type CommandHandler = Box<dyn Fn() + Send + Sync>;

/// One registered menu command: an identifier, display metadata for the
/// host's menu construction, and the zero-argument handler.
pub struct MenuCommand {
    id: String,
    title: String,
    accelerator: Option<String>,
    handler: CommandHandler,
}

impl MenuCommand {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Platform-neutral accelerator hint, e.g. `CmdOrCtrl+Q`.
    pub fn accelerator(&self) -> Option<&str> {
        self.accelerator.as_deref()
    }
}

/// Command identifier → handler table, built at setup.
///
/// Dispatch is re-entrant: a handler may itself trigger another
/// dispatch, and repeated user events invoke the handler repeatedly.
#[derive(Default)]
pub struct MenuCommandTable {
    commands: Vec<MenuCommand>,
}

impl MenuCommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `id`. A duplicate id replaces the earlier
    /// handler in place, keeping its menu position.
    pub fn register<F>(&mut self, id: &str, title: &str, accelerator: Option<&str>, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let command = MenuCommand {
            id: id.to_string(),
            title: title.to_string(),
            accelerator: accelerator.map(str::to_string),
            handler: Box::new(handler),
        };
        if let Some(existing) = self.commands.iter_mut().find(|c| c.id == id) {
            tracing::warn!(id, "menu command replaced by a later registration");
            *existing = command;
        } else {
            self.commands.push(command);
        }
    }

    /// Invoke the handler registered for `id`. Returns whether a
    /// handler ran; an unregistered id is a logged no-op.
    pub fn dispatch(&self, id: &str) -> bool {
        match self.commands.iter().find(|c| c.id == id) {
            Some(command) => {
                tracing::debug!(id, "menu command dispatched");
                (command.handler)();
                true
            }
            None => {
                tracing::debug!(id, "no handler registered for menu command");
                false
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.commands.iter().any(|c| c.id == id)
    }

    /// Commands in registration order, for host menu construction.
    pub fn commands(&self) -> impl Iterator<Item = &MenuCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
