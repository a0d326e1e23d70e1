use clap::Parser;

/// Install Docker Engine (or Docker Desktop) and the Compose plugin on this machine.
#[derive(Parser, Debug)]
#[command(name = "docker-setup", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Print every step without executing anything
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Emit debug diagnostics on stderr (same as DOCKER_SETUP_LOG=debug)
    #[arg(long, short = 'v')]
    pub(crate) verbose: bool,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<docker_setup::ColorMode>,
}

impl Cli {
    /// `--dry-run` or DOCKER_SETUP_DRY_RUN=1.
    pub(crate) fn effective_dry_run(&self) -> bool {
        self.dry_run || std::env::var("DOCKER_SETUP_DRY_RUN").ok().as_deref() == Some("1")
    }
}
