use clap::Parser;

/// Casement: a desktop application shell with a headless dev harness.
#[derive(Parser, Debug)]
#[command(name = "casement", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (EnvFilter directive, e.g. casement=debug).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Asset path the harness probes once content is ready (repeatable).
    #[arg(long = "probe", value_name = "PATH")]
    pub probes: Vec<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_probe_paths() {
        let args = Args::parse_from(["casement", "--probe", "/", "--probe", "/app.js"]);
        assert_eq!(args.probes, vec!["/", "/app.js"]);
        assert!(args.config.is_none());
    }

    #[test]
    fn parses_overrides() {
        let args = Args::parse_from([
            "casement",
            "--config",
            "/tmp/alt.toml",
            "--log-level",
            "casement=debug",
        ]);
        assert_eq!(args.config.as_deref(), Some("/tmp/alt.toml"));
        assert_eq!(args.log_level.as_deref(), Some("casement=debug"));
    }
}
