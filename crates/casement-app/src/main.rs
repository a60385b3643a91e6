mod cli;
mod demo;
mod harness;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use casement_config::ShellConfig;

fn main() {
    let args = cli::parse();

    // Load config before the subscriber so the logging directive can
    // come from the config file; CLI override wins.
    let config = match args.config.as_deref() {
        Some(path) => casement_config::toml_loader::load_from_path(Path::new(path)),
        None => casement_config::load_config(),
    }
    .unwrap_or_else(|error| {
        eprintln!("config load failed, using defaults: {error}");
        ShellConfig::default()
    });

    let directive = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level)
        .to_string();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "casement=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Casement v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        title = %config.window.title,
        width = config.window.width,
        height = config.window.height,
        "window options loaded"
    );

    let shell = demo::build_demo_shell(config);

    let probes = if args.probes.is_empty() {
        ["/", "/app.js", "/api/version", "/missing.js"]
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        args.probes.clone()
    };

    let report = harness::run_session(&shell, &probes);

    for probe in &report.probes {
        tracing::info!(path = %probe.path, status = probe.status, bytes = probe.bytes, "probe");
    }
    for invocation in &report.invocations {
        tracing::info!(call = %invocation.call, ok = invocation.ok, "invocation");
    }

    if report.completed() {
        tracing::info!(events = report.events.len(), "session completed, shutdown reached");
    } else {
        tracing::error!(stage = ?report.final_stage, "session did not reach shutdown");
        std::process::exit(1);
    }
}
