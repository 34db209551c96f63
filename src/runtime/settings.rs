use crate::cli::Cli;
use crate::config;

/// Load settings, falling back to defaults on any error.
///
/// Logging is not set up yet at this point, so the fallback reason is
/// returned for the caller to log.
pub fn load_settings(cli: &Cli) -> (config::Settings, Option<String>) {
    let path = cli.config.clone().or_else(config::resolve_config_path);

    let (mut settings, warning) = match config::Settings::load_from(path.as_deref()) {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    };

    apply_cli_overrides(&mut settings, cli);
    (settings, warning)
}

pub fn apply_cli_overrides(settings: &mut config::Settings, cli: &Cli) {
    if let Some(path) = &cli.catalog {
        settings.catalog.path = Some(path.clone());
    }
    if cli.shuffle {
        settings.playback.shuffle = true;
    }
    if cli.collapsed {
        settings.ui.start_collapsed = true;
    }
}
