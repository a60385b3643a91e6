//! Headless host driver.
//!
//! Drives a full host session against a [`Shell`] without a native
//! window: start, content-ready, asset probes, bridge invocations, the
//! quit menu command, close request, shutdown. Used by `main` for
//! development runs and by CI to exercise every host entry point.

use http::Request;
use serde_json::json;

use casement_bridge::InvocationResponse;
use casement_shell::{CloseDecision, LifecycleStage, Shell, ShellEvent};

#[derive(Debug)]
pub struct ProbeResult {
    pub path: String,
    pub status: u16,
    pub bytes: usize,
}

#[derive(Debug)]
pub struct InvocationResult {
    pub call: String,
    pub ok: bool,
    pub response: String,
}

/// What one scripted session did, for the operator's summary.
#[derive(Debug)]
pub struct SessionReport {
    pub probes: Vec<ProbeResult>,
    pub invocations: Vec<InvocationResult>,
    pub events: Vec<ShellEvent>,
    pub final_stage: LifecycleStage,
    pub context_cancelled: bool,
}

impl SessionReport {
    /// A session is complete when the shell reached terminal shutdown.
    pub fn completed(&self) -> bool {
        self.final_stage == LifecycleStage::Shutdown && self.context_cancelled
    }
}

/// Run one scripted host session.
pub fn run_session(shell: &Shell, probes: &[String]) -> SessionReport {
    let mut rx = shell.subscribe();

    // The host reports window initialization, then content-ready.
    shell.notify_started();
    shell.notify_ready();

    let probe_results = probes.iter().map(|path| probe(shell, path)).collect();

    let calls = [
        json!({"object": "counter", "method": "increment", "args": {"by": 5}}),
        json!({"object": "counter", "method": "increment", "args": [5]}),
        json!({"object": "greeter", "method": "greet", "args": ["casement"]}),
        json!({"object": "counter", "method": "increment", "args": {"by": "five"}}),
        json!({"object": "counter", "method": "reset", "args": []}),
    ];
    let invocation_results = calls.iter().map(|call| invoke(shell, call)).collect();

    // Fire the quit menu item, then behave like the host: translate the
    // quit cue into a close request.
    shell.dispatch_menu("file.quit");

    let mut events: Vec<ShellEvent> = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    let quit_requested = events
        .iter()
        .any(|event| matches!(event, ShellEvent::QuitRequested));

    if quit_requested {
        match shell.close_requested() {
            CloseDecision::Proceed => shell.notify_shutdown(),
            CloseDecision::Veto => tracing::info!("close vetoed, window stays open"),
        }
    } else {
        tracing::warn!("quit menu command did not cue a close, skipping shutdown");
    }

    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    SessionReport {
        probes: probe_results,
        invocations: invocation_results,
        events,
        final_stage: shell.stage(),
        context_cancelled: shell.context().is_cancelled(),
    }
}

fn probe(shell: &Shell, path: &str) -> ProbeResult {
    match Request::builder().uri(path).body(Vec::new()) {
        Ok(request) => {
            let response = shell.serve(&request);
            tracing::info!(path, status = %response.status(), bytes = response.body().len(), "probe served");
            ProbeResult {
                path: path.to_string(),
                status: response.status().as_u16(),
                bytes: response.body().len(),
            }
        }
        Err(error) => {
            tracing::warn!(path, %error, "probe path is not a valid uri");
            ProbeResult {
                path: path.to_string(),
                status: 0,
                bytes: 0,
            }
        }
    }
}

fn invoke(shell: &Shell, call: &serde_json::Value) -> InvocationResult {
    let raw = call.to_string();
    let response = shell.invoke_json(&raw);
    let ok = serde_json::from_str::<InvocationResponse>(&response)
        .map(|parsed| parsed.is_ok())
        .unwrap_or(false);
    tracing::info!(call = %raw, ok, response = %response, "bridge invocation");
    InvocationResult {
        call: raw,
        ok,
        response,
    }
}
