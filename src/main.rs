//! portal — renders the configured portal page widgets to HTML.
//!
//! Run with:  `RUST_LOG=debug portal [--watch] [path/to/portal.toml]`

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "portal")]
#[command(about = "Render the configured portal page to HTML", long_about = None)]
#[command(version)]
struct Cli {
    /// Keep running and re-render whenever the config file changes
    #[arg(short, long)]
    watch: bool,

    /// Page config (defaults to $XDG_CONFIG_HOME/portal/portal.toml)
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only markup.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = cli.path.unwrap_or_else(portal_config::default_path);
    tracing::info!("portal v{} using {}", env!("CARGO_PKG_VERSION"), path.display());

    portal_host::run(path, cli.watch).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_flag_and_path() {
        let cli = Cli::try_parse_from(["portal", "-w", "site.toml"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.path, Some(PathBuf::from("site.toml")));

        let cli = Cli::try_parse_from(["portal"]).unwrap();
        assert!(!cli.watch);
        assert!(cli.path.is_none());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["portal", "--hlep"]).is_err());
        assert!(Cli::try_parse_from(["portal", "a.toml", "b.toml"]).is_err());
    }
}
