//! The lifecycle state machine: `Created → Started → Ready → Closing →
//! Shutdown`.
//!
//! The window host drives the machine through the notify entry points;
//! application handlers are registered once at setup. A transition mutex
//! serializes the machine, so a ready signal that races a slow start
//! handler simply queues behind it; `Started` is always reported to
//! application code before `Ready`.

use std::sync::{Arc, Mutex, MutexGuard};

use casement_common::{EventBus, ShellEvent};

use crate::context::LifecycleContext;

/// Where the application is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Created,
    Started,
    Ready,
    Closing,
    /// Terminal. No handler runs after this.
    Shutdown,
}

/// Outcome of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Proceed,
    /// The close handler cancelled the close; the application stays Ready.
    Veto,
}

type HookFn = Box<dyn FnMut(&LifecycleContext) + Send>;
type CloseFn = Box<dyn FnMut(&LifecycleContext) -> CloseDecision + Send>;

struct Inner {
    stage: LifecycleStage,
    /// A close request arrived before Ready; replay it once Ready fires.
    quit_pending: bool,
    on_start: Option<HookFn>,
    on_ready: Option<HookFn>,
    on_close_request: Option<CloseFn>,
    on_shutdown: Option<HookFn>,
}

/// Sequences the lifecycle transitions exactly once each, in order.
pub struct LifecycleController {
    inner: Mutex<Inner>,
    context: LifecycleContext,
    events: Arc<EventBus>,
}

impl LifecycleController {
    /// Create a controller with a fresh [`LifecycleContext`].
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                stage: LifecycleStage::Created,
                quit_pending: false,
                on_start: None,
                on_ready: None,
                on_close_request: None,
                on_shutdown: None,
            }),
            context: LifecycleContext::new(),
            events,
        }
    }

    // -----------------------------------------------------------------
    // Handler registration (setup phase, requires exclusive access)
    // -----------------------------------------------------------------

    pub fn on_start(&mut self, hook: impl FnMut(&LifecycleContext) + Send + 'static) {
        self.lock().on_start = Some(Box::new(hook));
    }

    pub fn on_ready(&mut self, hook: impl FnMut(&LifecycleContext) + Send + 'static) {
        self.lock().on_ready = Some(Box::new(hook));
    }

    pub fn on_close_request(
        &mut self,
        hook: impl FnMut(&LifecycleContext) -> CloseDecision + Send + 'static,
    ) {
        self.lock().on_close_request = Some(Box::new(hook));
    }

    pub fn on_shutdown(&mut self, hook: impl FnMut(&LifecycleContext) + Send + 'static) {
        self.lock().on_shutdown = Some(Box::new(hook));
    }

    // -----------------------------------------------------------------
    // Host notification hooks
    // -----------------------------------------------------------------

    /// The host reports process/window initialization. Fires the start
    /// handler once; a repeat call is a no-op.
    pub fn notify_started(&self) {
        let mut inner = self.lock();
        if inner.stage == LifecycleStage::Created {
            self.run_start(&mut inner);
        } else {
            tracing::debug!(stage = ?inner.stage, "start already reported, ignoring");
        }
    }

    /// The renderer reports its content finished loading. Fires the
    /// ready handler once; if the host misorders the signals, the start
    /// transition runs first.
    pub fn notify_ready(&self) {
        let mut inner = self.lock();
        match inner.stage {
            LifecycleStage::Created => {
                tracing::warn!("content ready before start was reported, running start first");
                self.run_start(&mut inner);
                self.run_ready(&mut inner);
            }
            LifecycleStage::Started => self.run_ready(&mut inner),
            _ => tracing::debug!(stage = ?inner.stage, "ready already reported, ignoring"),
        }
    }

    /// The host (or a programmatic quit) requests a close. The close
    /// handler may veto, reverting to Ready; a later close request is
    /// processed independently.
    pub fn close_requested(&self) -> CloseDecision {
        let mut inner = self.lock();
        self.run_close(&mut inner)
    }

    /// Programmatic quit: drives the same close path as a user close,
    /// veto included. Before Ready the request is deferred and replayed
    /// once Ready fires.
    pub fn request_quit(&self) -> CloseDecision {
        tracing::debug!("programmatic quit requested");
        self.close_requested()
    }

    /// The host reports final teardown. Only reachable through an
    /// accepted close; cancels the context (exactly once) before the
    /// shutdown handler runs.
    pub fn notify_shutdown(&self) {
        let mut inner = self.lock();
        match inner.stage {
            LifecycleStage::Closing => {
                self.context.cancel_once();
                inner.stage = LifecycleStage::Shutdown;
                tracing::info!("lifecycle: shutdown");
                if let Some(hook) = inner.on_shutdown.as_mut() {
                    hook(&self.context);
                }
                self.events.publish(ShellEvent::Shutdown);
            }
            LifecycleStage::Shutdown => {
                tracing::debug!("shutdown already completed, ignoring");
            }
            other => {
                tracing::warn!(
                    stage = ?other,
                    "shutdown is only reachable through an accepted close, ignoring"
                );
            }
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn stage(&self) -> LifecycleStage {
        self.lock().stage
    }

    pub fn context(&self) -> &LifecycleContext {
        &self.context
    }

    // -----------------------------------------------------------------
    // Transitions (called with the lock held)
    // -----------------------------------------------------------------

    fn run_start(&self, inner: &mut MutexGuard<'_, Inner>) {
        inner.stage = LifecycleStage::Started;
        tracing::info!("lifecycle: started");
        if let Some(hook) = inner.on_start.as_mut() {
            hook(&self.context);
        }
        self.events.publish(ShellEvent::Started);
    }

    fn run_ready(&self, inner: &mut MutexGuard<'_, Inner>) {
        inner.stage = LifecycleStage::Ready;
        tracing::info!("lifecycle: ready");
        if let Some(hook) = inner.on_ready.as_mut() {
            hook(&self.context);
        }
        self.events.publish(ShellEvent::Ready);

        if inner.quit_pending {
            inner.quit_pending = false;
            tracing::info!("replaying close request deferred before ready");
            let _ = self.run_close(inner);
        }
    }

    fn run_close(&self, inner: &mut MutexGuard<'_, Inner>) -> CloseDecision {
        match inner.stage {
            LifecycleStage::Ready => {
                inner.stage = LifecycleStage::Closing;
                let decision = match inner.on_close_request.as_mut() {
                    Some(hook) => hook(&self.context),
                    None => CloseDecision::Proceed,
                };
                match decision {
                    CloseDecision::Veto => {
                        inner.stage = LifecycleStage::Ready;
                        tracing::info!("close vetoed, staying ready");
                        self.events.publish(ShellEvent::CloseVetoed);
                        CloseDecision::Veto
                    }
                    CloseDecision::Proceed => {
                        tracing::info!("close accepted");
                        self.events.publish(ShellEvent::CloseAccepted);
                        CloseDecision::Proceed
                    }
                }
            }
            LifecycleStage::Created | LifecycleStage::Started => {
                inner.quit_pending = true;
                tracing::debug!(stage = ?inner.stage, "close requested before ready, deferring");
                CloseDecision::Veto
            }
            LifecycleStage::Closing => {
                tracing::debug!("close already in progress, ignoring");
                CloseDecision::Veto
            }
            LifecycleStage::Shutdown => CloseDecision::Veto,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn controller() -> LifecycleController {
        LifecycleController::new(Arc::new(EventBus::new(32)))
    }

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, LifecycleController) {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let mut controller = controller();
        let start_log = Arc::clone(&log);
        controller.on_start(move |_| start_log.lock().unwrap().push("start"));
        let ready_log = Arc::clone(&log);
        controller.on_ready(move |_| ready_log.lock().unwrap().push("ready"));
        let close_log = Arc::clone(&log);
        controller.on_close_request(move |_| {
            close_log.lock().unwrap().push("close");
            CloseDecision::Proceed
        });
        let shutdown_log = Arc::clone(&log);
        controller.on_shutdown(move |_| shutdown_log.lock().unwrap().push("shutdown"));
        (log, controller)
    }

    #[test]
    fn transitions_run_in_fixed_order() {
        let (log, controller) = recorder();

        controller.notify_started();
        controller.notify_ready();
        assert_eq!(controller.close_requested(), CloseDecision::Proceed);
        controller.notify_shutdown();

        assert_eq!(*log.lock().unwrap(), vec!["start", "ready", "close", "shutdown"]);
        assert_eq!(controller.stage(), LifecycleStage::Shutdown);
    }

    #[test]
    fn repeat_start_and_ready_are_no_ops() {
        let (log, controller) = recorder();

        controller.notify_started();
        controller.notify_started();
        controller.notify_ready();
        controller.notify_ready();
        controller.notify_started();

        assert_eq!(*log.lock().unwrap(), vec!["start", "ready"]);
        assert_eq!(controller.stage(), LifecycleStage::Ready);
    }

    #[test]
    fn ready_before_start_runs_start_first() {
        let (log, controller) = recorder();

        controller.notify_ready();

        assert_eq!(*log.lock().unwrap(), vec!["start", "ready"]);
        assert_eq!(controller.stage(), LifecycleStage::Ready);

        // The host's own late start report is then a no-op.
        controller.notify_started();
        assert_eq!(*log.lock().unwrap(), vec!["start", "ready"]);
    }

    #[test]
    fn veto_reverts_to_ready_and_later_close_is_independent() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut controller = controller();
        let counter = Arc::clone(&attempts);
        controller.on_close_request(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                CloseDecision::Veto
            } else {
                CloseDecision::Proceed
            }
        });

        controller.notify_started();
        controller.notify_ready();

        assert_eq!(controller.close_requested(), CloseDecision::Veto);
        assert_eq!(controller.stage(), LifecycleStage::Ready);
        assert!(!controller.context().is_cancelled());

        assert_eq!(controller.close_requested(), CloseDecision::Proceed);
        assert_eq!(controller.stage(), LifecycleStage::Closing);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn shutdown_is_unreachable_without_an_accepted_close() {
        let (log, controller) = recorder();

        controller.notify_shutdown();
        assert_eq!(controller.stage(), LifecycleStage::Created);

        controller.notify_started();
        controller.notify_ready();
        controller.notify_shutdown();
        assert_eq!(controller.stage(), LifecycleStage::Ready);
        assert!(log.lock().unwrap().iter().all(|&step| step != "shutdown"));
    }

    #[test]
    fn shutdown_cancels_the_context_exactly_once() {
        let cancelled_in_handler = Arc::new(AtomicUsize::new(0));
        let mut controller = controller();
        let seen = Arc::clone(&cancelled_in_handler);
        controller.on_shutdown(move |ctx| {
            if ctx.is_cancelled() {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        controller.notify_started();
        controller.notify_ready();
        controller.close_requested();
        controller.notify_shutdown();
        controller.notify_shutdown();

        // Cancellation precedes the handler and the repeat call was a no-op.
        assert_eq!(cancelled_in_handler.load(Ordering::SeqCst), 1);
        assert!(controller.context().is_cancelled());
        assert!(!controller.context().cancel_once());
    }

    #[test]
    fn close_before_ready_is_deferred_and_replayed() {
        let (log, controller) = recorder();

        controller.notify_started();
        assert_eq!(controller.close_requested(), CloseDecision::Veto);
        assert_eq!(controller.stage(), LifecycleStage::Started);

        controller.notify_ready();
        // The deferred close ran right after the ready handler.
        assert_eq!(*log.lock().unwrap(), vec!["start", "ready", "close"]);
        assert_eq!(controller.stage(), LifecycleStage::Closing);
    }

    #[test]
    fn close_while_closing_is_vetoed() {
        let (_, controller) = recorder();
        controller.notify_started();
        controller.notify_ready();

        assert_eq!(controller.close_requested(), CloseDecision::Proceed);
        assert_eq!(controller.close_requested(), CloseDecision::Veto);
        assert_eq!(controller.stage(), LifecycleStage::Closing);
    }

    #[test]
    fn concurrent_close_requests_have_one_winner() {
        let (_, controller) = recorder();
        controller.notify_started();
        controller.notify_ready();

        let controller = Arc::new(controller);
        let mut handles = Vec::new();
        for _ in 0..4 {
            let controller = Arc::clone(&controller);
            handles.push(std::thread::spawn(move || controller.close_requested()));
        }
        let proceeds = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&d| d == CloseDecision::Proceed)
            .count();
        assert_eq!(proceeds, 1);

        controller.notify_shutdown();
        assert_eq!(controller.stage(), LifecycleStage::Shutdown);
    }

    #[test]
    fn events_are_published_per_transition() {
        let events = Arc::new(EventBus::new(32));
        let mut rx = events.subscribe();
        let controller = LifecycleController::new(Arc::clone(&events));

        controller.notify_started();
        controller.notify_ready();
        controller.close_requested();
        controller.notify_shutdown();

        assert!(matches!(rx.try_recv().unwrap(), ShellEvent::Started));
        assert!(matches!(rx.try_recv().unwrap(), ShellEvent::Ready));
        assert!(matches!(rx.try_recv().unwrap(), ShellEvent::CloseAccepted));
        assert!(matches!(rx.try_recv().unwrap(), ShellEvent::Shutdown));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_close_handler_defaults_to_proceed() {
        let controller = controller();
        controller.notify_started();
        controller.notify_ready();
        assert_eq!(controller.close_requested(), CloseDecision::Proceed);
    }
}
