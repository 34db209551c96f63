//! Command-line arguments. Flags override the loaded configuration.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(name = "encore", version, about)]
pub struct Cli {
    /// TOML catalog of tracks and playlists; the built-in sample is used otherwise
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Config file to load instead of the XDG default
    #[arg(long, value_name = "PATH", env = "ENCORE_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Start in shuffle mode
    #[arg(long)]
    pub shuffle: bool,

    /// Start with the mini player collapsed
    #[arg(long)]
    pub collapsed: bool,

    /// Do not register on the D-Bus session bus
    #[arg(long)]
    pub no_mpris: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "encore",
            "--catalog",
            "songs.toml",
            "--config",
            "/tmp/encore.toml",
            "--shuffle",
            "--collapsed",
            "--no-mpris",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("songs.toml")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/encore.toml")));
        assert!(cli.shuffle);
        assert!(cli.collapsed);
        assert!(cli.no_mpris);
    }

    #[test]
    fn flags_default_to_off() {
        let cli = Cli::try_parse_from(["encore"]).unwrap();
        assert!(cli.catalog.is_none());
        assert!(!cli.shuffle);
        assert!(!cli.collapsed);
        assert!(!cli.no_mpris);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["encore", "--loud"]).is_err());
    }
}
